//! Error types for the simulation engine.

use super::config::{MAX_HORIZON_YEARS, MAX_SIMULATIONS};

/// Configuration error for the simulation engine.
///
/// These errors occur during construction, before any sampling begins.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Simulation count outside the valid range.
    #[error("invalid simulation count {0}: must be in range [1, {MAX_SIMULATIONS}]")]
    InvalidSimulationCount(usize),

    /// Time horizon outside the valid range.
    #[error("invalid time horizon {0}: must be in range [1, {MAX_HORIZON_YEARS}] years")]
    InvalidHorizon(usize),

    /// Batch size zero or larger than the simulation count.
    #[error("invalid batch size {got}: must be in range [1, n_simulations = {n_simulations}]")]
    InvalidBatchSize {
        /// The rejected batch size.
        got: usize,
        /// The configured simulation count.
        n_simulations: usize,
    },

    /// Invalid parameter value with name and description.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },
}

/// Runtime error for a simulation call.
///
/// All-or-nothing: when any variant is returned, no partial summary exists.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// Aggregation was attempted over zero produced values.
    #[error("empty sample: no simulation paths were produced")]
    EmptySample,

    /// A path compounded to a non-finite multiplier.
    #[error("numeric overflow: non-finite horizon multiplier on path {path}")]
    NumericOverflow {
        /// Zero-based index of the offending path.
        path: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidSimulationCount(0);
        assert!(err.to_string().contains("invalid simulation count 0"));

        let err = ConfigError::InvalidBatchSize {
            got: 500,
            n_simulations: 100,
        };
        assert!(err.to_string().contains("invalid batch size 500"));

        let err = ConfigError::InvalidParameter {
            name: "annual_volatility",
            reason: "must be non-negative".to_string(),
        };
        assert!(err.to_string().contains("annual_volatility"));
    }

    #[test]
    fn test_config_error_converts_to_simulation_error() {
        let err: SimulationError = ConfigError::InvalidHorizon(0).into();
        assert!(matches!(
            err,
            SimulationError::InvalidConfiguration(ConfigError::InvalidHorizon(0))
        ));
    }

    #[test]
    fn test_overflow_display_names_path() {
        let err = SimulationError::NumericOverflow { path: 17 };
        assert!(err.to_string().contains("path 17"));
    }
}
