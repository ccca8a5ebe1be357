//! Numerical primitives: moment folds, percentiles, and reservoir sampling.

pub mod percentile;
pub mod reservoir;
pub mod stats;
