//! Simulation configuration.
//!
//! [`SimulationConfig`] is the immutable input to a simulation run. It is
//! constructed through a validating builder and never mutated afterwards;
//! callers wanting different parameters build a new configuration.

use super::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_SIMULATIONS: usize = 100_000_000;

/// Maximum time horizon in years.
pub const MAX_HORIZON_YEARS: usize = 100;

/// Default batch size when the builder is not given one explicitly.
pub const DEFAULT_BATCH_SIZE: usize = 100_000;

/// Strategy for retaining the simulated return sample for percentiles.
///
/// Batching already bounds the *processing* memory of a run; the sample
/// mode decides whether the aggregator keeps the full sample (exact
/// percentiles, the common case) or a bounded uniform sub-sample
/// (approximate percentiles, for callers that cap memory below the
/// sample size).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleMode {
    /// Retain every simulated return; percentiles are exact.
    #[default]
    Exact,
    /// Retain at most `capacity` returns in a uniform reservoir;
    /// percentiles carry sampling error O(1/√capacity).
    Reservoir {
        /// Maximum number of retained returns.
        capacity: usize,
    },
}

/// Monte Carlo simulation configuration.
///
/// Immutable once built. Use [`SimulationConfig::builder`] to construct
/// instances; `build` validates every field before returning.
///
/// # Examples
///
/// ```rust
/// use sim_engine::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_simulations(100_000)
///     .expected_annual_return(0.12)
///     .annual_volatility(0.18)
///     .time_horizon_years(5)
///     .initial_portfolio_value(1_000_000.0)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_simulations(), 100_000);
/// assert_eq!(config.batch_size(), 100_000);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulationConfig {
    n_simulations: usize,
    expected_annual_return: f64,
    annual_volatility: f64,
    time_horizon_years: usize,
    initial_portfolio_value: f64,
    batch_size: usize,
    seed: Option<u64>,
    sample_mode: SampleMode,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_simulations(&self) -> usize {
        self.n_simulations
    }

    /// Returns the expected annual return as a fraction (0.12 = 12%).
    #[inline]
    pub fn expected_annual_return(&self) -> f64 {
        self.expected_annual_return
    }

    /// Returns the annual volatility as a fraction.
    #[inline]
    pub fn annual_volatility(&self) -> f64 {
        self.annual_volatility
    }

    /// Returns the time horizon in whole years.
    #[inline]
    pub fn time_horizon_years(&self) -> usize {
        self.time_horizon_years
    }

    /// Returns the initial portfolio value.
    #[inline]
    pub fn initial_portfolio_value(&self) -> f64 {
        self.initial_portfolio_value
    }

    /// Returns the batch size. Affects peak memory only, never results.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Returns the optional master seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the master seed, defaulting to 0 when unset.
    #[inline]
    pub fn seed_or_default(&self) -> u64 {
        self.seed.unwrap_or(0)
    }

    /// Returns the sample retention mode.
    #[inline]
    pub fn sample_mode(&self) -> SampleMode {
        self.sample_mode
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any count is out of range, the batch size
    /// exceeds the simulation count, the volatility is negative, or any
    /// float field is non-finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_simulations == 0 || self.n_simulations > MAX_SIMULATIONS {
            return Err(ConfigError::InvalidSimulationCount(self.n_simulations));
        }
        if self.time_horizon_years == 0 || self.time_horizon_years > MAX_HORIZON_YEARS {
            return Err(ConfigError::InvalidHorizon(self.time_horizon_years));
        }
        if self.batch_size == 0 || self.batch_size > self.n_simulations {
            return Err(ConfigError::InvalidBatchSize {
                got: self.batch_size,
                n_simulations: self.n_simulations,
            });
        }
        if !self.expected_annual_return.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "expected_annual_return",
                reason: "must be finite".to_string(),
            });
        }
        if !self.annual_volatility.is_finite() || self.annual_volatility < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "annual_volatility",
                reason: "must be finite and non-negative".to_string(),
            });
        }
        if !self.initial_portfolio_value.is_finite() || self.initial_portfolio_value <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "initial_portfolio_value",
                reason: "must be finite and positive".to_string(),
            });
        }
        if let SampleMode::Reservoir { capacity } = self.sample_mode {
            if capacity == 0 {
                return Err(ConfigError::InvalidParameter {
                    name: "sample_mode",
                    reason: "reservoir capacity must be positive".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
///
/// Required fields: `n_simulations`, `expected_annual_return`,
/// `annual_volatility`, `time_horizon_years`, `initial_portfolio_value`.
/// The batch size defaults to `min(n_simulations, DEFAULT_BATCH_SIZE)`.
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_simulations: Option<usize>,
    expected_annual_return: Option<f64>,
    annual_volatility: Option<f64>,
    time_horizon_years: Option<usize>,
    initial_portfolio_value: Option<f64>,
    batch_size: Option<usize>,
    seed: Option<u64>,
    sample_mode: SampleMode,
}

impl SimulationConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn n_simulations(mut self, n_simulations: usize) -> Self {
        self.n_simulations = Some(n_simulations);
        self
    }

    /// Sets the expected annual return as a fraction.
    #[inline]
    pub fn expected_annual_return(mut self, expected_annual_return: f64) -> Self {
        self.expected_annual_return = Some(expected_annual_return);
        self
    }

    /// Sets the annual volatility as a fraction.
    #[inline]
    pub fn annual_volatility(mut self, annual_volatility: f64) -> Self {
        self.annual_volatility = Some(annual_volatility);
        self
    }

    /// Sets the time horizon in whole years.
    #[inline]
    pub fn time_horizon_years(mut self, time_horizon_years: usize) -> Self {
        self.time_horizon_years = Some(time_horizon_years);
        self
    }

    /// Sets the initial portfolio value.
    #[inline]
    pub fn initial_portfolio_value(mut self, initial_portfolio_value: f64) -> Self {
        self.initial_portfolio_value = Some(initial_portfolio_value);
        self
    }

    /// Sets the batch size (memory knob; does not affect results).
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Sets the master seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the sample retention mode.
    #[inline]
    pub fn sample_mode(mut self, sample_mode: SampleMode) -> Self {
        self.sample_mode = sample_mode;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required field is missing or any field
    /// fails [`SimulationConfig::validate`].
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let n_simulations = self.n_simulations.ok_or(ConfigError::InvalidParameter {
            name: "n_simulations",
            reason: "must be specified".to_string(),
        })?;
        let expected_annual_return =
            self.expected_annual_return
                .ok_or(ConfigError::InvalidParameter {
                    name: "expected_annual_return",
                    reason: "must be specified".to_string(),
                })?;
        let annual_volatility = self.annual_volatility.ok_or(ConfigError::InvalidParameter {
            name: "annual_volatility",
            reason: "must be specified".to_string(),
        })?;
        let time_horizon_years = self
            .time_horizon_years
            .ok_or(ConfigError::InvalidParameter {
                name: "time_horizon_years",
                reason: "must be specified".to_string(),
            })?;
        let initial_portfolio_value =
            self.initial_portfolio_value
                .ok_or(ConfigError::InvalidParameter {
                    name: "initial_portfolio_value",
                    reason: "must be specified".to_string(),
                })?;

        let batch_size = self
            .batch_size
            .unwrap_or_else(|| n_simulations.min(DEFAULT_BATCH_SIZE));

        let config = SimulationConfig {
            n_simulations,
            expected_annual_return,
            annual_volatility,
            time_horizon_years,
            initial_portfolio_value,
            batch_size,
            seed: self.seed,
            sample_mode: self.sample_mode,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> SimulationConfigBuilder {
        SimulationConfig::builder()
            .n_simulations(10_000)
            .expected_annual_return(0.12)
            .annual_volatility(0.18)
            .time_horizon_years(5)
            .initial_portfolio_value(1_000_000.0)
    }

    #[test]
    fn test_builder_valid() {
        let config = builder().build().unwrap();
        assert_eq!(config.n_simulations(), 10_000);
        assert_eq!(config.time_horizon_years(), 5);
        assert_eq!(config.batch_size(), 10_000);
        assert_eq!(config.seed(), None);
        assert_eq!(config.sample_mode(), SampleMode::Exact);
    }

    #[test]
    fn test_batch_size_defaults_to_cap() {
        let config = builder().n_simulations(5_000_000).build().unwrap();
        assert_eq!(config.batch_size(), DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_builder_with_seed() {
        let config = builder().seed(42).build().unwrap();
        assert_eq!(config.seed(), Some(42));
        assert_eq!(config.seed_or_default(), 42);
    }

    #[test]
    fn test_zero_simulations_rejected() {
        let result = builder().n_simulations(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSimulationCount(0))
        ));
    }

    #[test]
    fn test_too_many_simulations_rejected() {
        let result = builder().n_simulations(MAX_SIMULATIONS + 1).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSimulationCount(_))
        ));
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let result = builder().time_horizon_years(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidHorizon(0))));
    }

    #[test]
    fn test_batch_size_larger_than_count_rejected() {
        let result = builder().batch_size(20_000).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidBatchSize {
                got: 20_000,
                n_simulations: 10_000
            })
        ));
    }

    #[test]
    fn test_negative_volatility_rejected() {
        let result = builder().annual_volatility(-0.1).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "annual_volatility",
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_return_rejected() {
        let result = builder().expected_annual_return(f64::NAN).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "expected_annual_return",
                ..
            })
        ));
    }

    #[test]
    fn test_non_positive_initial_value_rejected() {
        let result = builder().initial_portfolio_value(0.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "initial_portfolio_value",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_reservoir_capacity_rejected() {
        let result = builder()
            .sample_mode(SampleMode::Reservoir { capacity: 0 })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "sample_mode",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_required_field() {
        let result = SimulationConfig::builder().n_simulations(100).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "expected_annual_return",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_volatility_is_valid() {
        let config = builder().annual_volatility(0.0).build().unwrap();
        assert_eq!(config.annual_volatility(), 0.0);
    }
}
