//! Error types for factor table construction and decomposition.

/// Validation error for a factor model or exposure table.
///
/// Surfaced before any decomposition arithmetic runs; no partial
/// [`RiskDecomposition`](super::result::RiskDecomposition) is ever
/// produced.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FactorTableError {
    /// Portfolio weights do not sum to 1 within tolerance.
    #[error("portfolio weights sum to {sum}, expected 1 within ±{tolerance}")]
    WeightSumMismatch {
        /// Actual weight sum.
        sum: f64,
        /// Accepted deviation from 1.
        tolerance: f64,
    },

    /// A factor or asset carries a negative volatility.
    #[error("negative volatility {value} for '{name}'")]
    NegativeVolatility {
        /// Factor or asset name.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// An asset declares a beta for a factor the model does not know.
    #[error("asset '{asset}' references undeclared factor '{factor}'")]
    UnknownFactor {
        /// Offending asset identifier.
        asset: String,
        /// The unknown factor name.
        factor: String,
    },

    /// Two assets share an identifier.
    #[error("duplicate asset '{0}'")]
    DuplicateAsset(String),

    /// Two factors share a name.
    #[error("duplicate factor '{0}'")]
    DuplicateFactor(String),

    /// The table holds no assets.
    #[error("factor table has no assets")]
    EmptyTable,

    /// The covariance matrix does not match the factor count.
    #[error("covariance matrix is {rows}×{cols}, expected {expected}×{expected}")]
    CovarianceDimension {
        /// Supplied row count.
        rows: usize,
        /// Supplied column count of the offending row.
        cols: usize,
        /// Declared factor count.
        expected: usize,
    },

    /// The covariance matrix is not symmetric.
    #[error("covariance matrix is not symmetric at ({row}, {col})")]
    CovarianceAsymmetry {
        /// Row of the asymmetric entry.
        row: usize,
        /// Column of the asymmetric entry.
        col: usize,
    },

    /// A parameter failed a finiteness or range check.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },
}
