//! Simulation orchestration.
//!
//! [`SimulationEngine`] splits a run into batches of at most
//! `batch_size` paths, samples each batch into its own accumulator
//! (in parallel when there is enough work), and merges the partial
//! accumulators in batch order. Because every path owns its RNG stream
//! and the merge is associative, neither the batch size nor the thread
//! count changes the result.

use rayon::prelude::*;

use super::accumulator::BatchAccumulator;
use super::config::SimulationConfig;
use super::error::{ConfigError, SimulationError};
use super::sampler::sample_batch;
use super::summary::SimulationSummary;

/// Minimum number of batches before the engine parallelises.
pub const PARALLEL_THRESHOLD: usize = 2;

/// Monte Carlo portfolio simulation engine.
///
/// # Examples
///
/// ```rust
/// use sim_engine::mc::{SimulationConfig, SimulationEngine};
///
/// let config = SimulationConfig::builder()
///     .n_simulations(10_000)
///     .expected_annual_return(0.12)
///     .annual_volatility(0.18)
///     .time_horizon_years(1)
///     .initial_portfolio_value(1_000_000.0)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let engine = SimulationEngine::new(config).unwrap();
/// let summary = engine.run().unwrap();
/// assert_eq!(summary.n_simulations, 10_000);
/// ```
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    /// Creates an engine for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid; nothing is
    /// sampled in that case.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns a reference to the configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs the full simulation and aggregates it into a summary.
    ///
    /// Stateless: repeated calls with the same configuration and seed
    /// produce identical summaries.
    ///
    /// # Errors
    ///
    /// - `NumericOverflow` if any path compounds to a non-finite
    ///   multiplier; the whole call fails.
    /// - `EmptySample` if no paths were produced.
    pub fn run(&self) -> Result<SimulationSummary, SimulationError> {
        let n_batches = self
            .config
            .n_simulations()
            .div_ceil(self.config.batch_size());

        let batches: Vec<Result<BatchAccumulator, SimulationError>> =
            if n_batches >= PARALLEL_THRESHOLD {
                (0..n_batches)
                    .into_par_iter()
                    .map(|idx| sample_batch(&self.config, idx))
                    .collect()
            } else {
                (0..n_batches)
                    .map(|idx| sample_batch(&self.config, idx))
                    .collect()
            };

        // Merge in batch order: exact folds are order-independent, and the
        // reservoir's replacement draws stay reproducible this way.
        let mut merged: Option<BatchAccumulator> = None;
        for result in batches {
            let acc = result?;
            match merged.as_mut() {
                Some(m) => m.merge(acc),
                None => merged = Some(acc),
            }
        }

        let merged = merged.ok_or(SimulationError::EmptySample)?;
        SimulationSummary::from_accumulator(merged, &self.config)
    }
}

/// Runs a simulation for the given configuration.
///
/// Convenience wrapper over [`SimulationEngine`]: validates, samples,
/// aggregates. The complete call contract of the kernel.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationSummary, SimulationError> {
    SimulationEngine::new(config.clone())?.run()
}
