//! Monte Carlo simulation kernel.
//!
//! The module is organised as a pipeline:
//!
//! ```text
//! config.rs      - SimulationConfig (validated, immutable input)
//! sampler.rs     - annual-return draws → horizon multipliers → values
//! accumulator.rs - mergeable per-batch folds
//! summary.rs     - SimulationSummary (the only long-lived artifact)
//! engine.rs      - batching, parallelism, orchestration
//! ```

pub mod accumulator;
pub mod config;
pub mod engine;
pub mod error;
pub mod sampler;
pub mod summary;

pub use accumulator::{BatchAccumulator, SampleStore, OUTCOME_THRESHOLDS};
pub use config::{
    SampleMode, SimulationConfig, SimulationConfigBuilder, DEFAULT_BATCH_SIZE, MAX_HORIZON_YEARS,
    MAX_SIMULATIONS,
};
pub use engine::{run_simulation, SimulationEngine, PARALLEL_THRESHOLD};
pub use error::{ConfigError, SimulationError};
pub use sampler::{horizon_return, portfolio_value, sample_path, PathOutcome, RETURN_FLOOR};
pub use summary::{PercentileRow, SimulationSummary, ThresholdProbability};
