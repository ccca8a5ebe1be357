//! Factor-based risk decomposition.
//!
//! ```text
//! model.rs         - Factor, FactorClass, FactorModel (+ covariance)
//! table.rs         - AssetExposure, FactorExposureTable (validated input)
//! decompose.rs     - decompose_risk (the call contract)
//! contributions.rs - standalone per-asset risk, diversification effect
//! result.rs        - RiskDecomposition and friends
//! ```

mod contributions;
pub mod decompose;
pub mod error;
pub mod model;
pub mod result;
pub mod table;

pub use decompose::decompose_risk;
pub use error::FactorTableError;
pub use model::{Factor, FactorClass, FactorModel};
pub use result::{AssetContribution, ClassContribution, FactorContribution, RiskDecomposition};
pub use table::{
    AssetExposure, AssetExposureBuilder, FactorExposureTable, FactorExposureTableBuilder,
    WEIGHT_TOLERANCE,
};
