//! # Sim Risk (Kernel)
//!
//! Factor-based decomposition of portfolio risk into systematic and
//! idiosyncratic contributions.
//!
//! This crate provides:
//! - A validated [`FactorModel`] (named factors, classes, volatilities,
//!   optional covariance matrix)
//! - A validated [`FactorExposureTable`] (per-asset weights, betas,
//!   idiosyncratic volatilities)
//! - [`decompose_risk`], the stateless call contract: portfolio betas,
//!   systematic/idiosyncratic variance split, per-factor and per-class
//!   shares, standalone per-asset risk, diversification benefit
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             sim_risk (L2)               │
//! ├─────────────────────────────────────────┤
//! │  factor/ - model, table, decomposition  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Independent of the simulation kernel: it consumes static portfolio
//! configuration, not simulation output.
//!
//! ## Example
//!
//! ```rust
//! use sim_risk::{
//!     decompose_risk, AssetExposureBuilder, Factor, FactorClass, FactorExposureTable,
//!     FactorModel,
//! };
//!
//! let model = FactorModel::new(vec![
//!     Factor::new("market", FactorClass::Market, 0.18),
//!     Factor::new("gold", FactorClass::Commodity, 0.35),
//! ])
//! .unwrap();
//!
//! let table = FactorExposureTable::builder(model)
//!     .add_asset(
//!         AssetExposureBuilder::new("ANG", 0.4)
//!             .beta("market", 1.25)
//!             .beta("gold", 1.8)
//!             .idiosyncratic_volatility(0.32),
//!     )
//!     .add_asset(
//!         AssetExposureBuilder::new("FSR", 0.6)
//!             .beta("market", 1.1)
//!             .idiosyncratic_volatility(0.18),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let decomposition = decompose_risk(&table).unwrap();
//! assert!(decomposition.total_volatility > 0.0);
//! assert!(decomposition.systematic_share() + decomposition.idiosyncratic_share() > 0.99);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod factor;

// Re-export commonly used types
pub use factor::{
    decompose_risk, AssetContribution, AssetExposure, AssetExposureBuilder, ClassContribution,
    Factor, FactorClass, FactorContribution, FactorExposureTable, FactorExposureTableBuilder,
    FactorModel, FactorTableError, RiskDecomposition, WEIGHT_TOLERANCE,
};
