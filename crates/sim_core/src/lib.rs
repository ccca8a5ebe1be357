//! # Sim Core (Foundation)
//!
//! Streaming statistics and order-statistic primitives shared by the
//! simulation and risk kernels.
//!
//! This crate provides:
//! - Mergeable moment accumulators for single-pass statistics
//! - Percentile computation over sorted samples (linear interpolation)
//! - A bounded-memory uniform sample reservoir for approximate percentiles
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             sim_core (L1)               │
//! ├─────────────────────────────────────────┤
//! │  math/stats.rs      - moment folds      │
//! │  math/percentile.rs - order statistics  │
//! │  math/reservoir.rs  - bounded sampling  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! No I/O and no logging happen at this layer; everything is a pure fold
//! or a pure function over slices. All merge operations are associative
//! and commutative so callers may combine partial results in any order.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod math;

pub use math::percentile::{percentile_of_sorted, PERCENTILE_LEVELS};
pub use math::reservoir::Reservoir;
pub use math::stats::MomentAccumulator;
