//! # Sim Engine (Kernel)
//!
//! Batched Monte Carlo simulation of portfolio returns.
//!
//! This crate provides:
//! - A validated, immutable [`SimulationConfig`] built through a builder
//! - Per-path seeded RNG streams for reproducible, batch-invariant draws
//! - Batched sampling with mergeable accumulators (memory bounded by the
//!   batch size plus the sample store)
//! - [`run_simulation`], the stateless call contract of the kernel
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            sim_engine (L2)              │
//! ├─────────────────────────────────────────┤
//! │  rng/  - seeded per-path streams        │
//! │  mc/   - config, sampler, accumulator,  │
//! │          summary, engine                │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │             sim_core (L1)               │
//! │  moment folds, percentiles, reservoir   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sim_engine::{run_simulation, SimulationConfig};
//!
//! let config = SimulationConfig::builder()
//!     .n_simulations(50_000)
//!     .expected_annual_return(0.12)
//!     .annual_volatility(0.18)
//!     .time_horizon_years(5)
//!     .initial_portfolio_value(1_000_000.0)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let summary = run_simulation(&config).unwrap();
//! assert!(summary.probability_of_profit + summary.probability_of_loss <= 1.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod rng;

// Re-export commonly used types
pub use mc::{
    run_simulation, PercentileRow, SampleMode, SimulationConfig, SimulationEngine,
    SimulationError, SimulationSummary, ThresholdProbability,
};
