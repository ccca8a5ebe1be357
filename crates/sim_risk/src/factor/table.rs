//! Per-asset factor exposures and the validated exposure table.

use super::error::FactorTableError;
use super::model::FactorModel;

/// Accepted deviation of the portfolio weight sum from 1.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// One asset's exposures, aligned with the model's factor order.
///
/// Built through [`AssetExposureBuilder`]; betas not set there are zero,
/// so every asset always carries a value for every declared factor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AssetExposure {
    asset_id: String,
    weight: f64,
    betas: Vec<f64>,
    idiosyncratic_volatility: f64,
}

impl AssetExposure {
    /// Asset identifier.
    #[inline]
    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    /// Portfolio weight as a fraction.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Betas in the model's factor order.
    #[inline]
    pub fn betas(&self) -> &[f64] {
        &self.betas
    }

    /// Idiosyncratic (stock-specific) annual volatility.
    #[inline]
    pub fn idiosyncratic_volatility(&self) -> f64 {
        self.idiosyncratic_volatility
    }
}

/// Builder for one asset row.
///
/// # Examples
///
/// ```rust
/// use sim_risk::factor::AssetExposureBuilder;
///
/// let asset = AssetExposureBuilder::new("CPI", 0.25)
///     .idiosyncratic_volatility(0.22)
///     .beta("market", 1.15)
///     .beta("financials", 1.25);
/// ```
#[derive(Clone, Debug)]
pub struct AssetExposureBuilder {
    asset_id: String,
    weight: f64,
    idiosyncratic_volatility: f64,
    betas: Vec<(String, f64)>,
}

impl AssetExposureBuilder {
    /// Starts a row for `asset_id` with the given portfolio weight.
    pub fn new(asset_id: impl Into<String>, weight: f64) -> Self {
        Self {
            asset_id: asset_id.into(),
            weight,
            idiosyncratic_volatility: 0.0,
            betas: Vec::new(),
        }
    }

    /// Sets the idiosyncratic annual volatility (default 0).
    pub fn idiosyncratic_volatility(mut self, volatility: f64) -> Self {
        self.idiosyncratic_volatility = volatility;
        self
    }

    /// Sets the beta against a declared factor. Later calls for the same
    /// factor overwrite earlier ones.
    pub fn beta(mut self, factor: impl Into<String>, beta: f64) -> Self {
        self.betas.push((factor.into(), beta));
        self
    }
}

/// A validated portfolio of factor exposures.
///
/// Invariants (checked by [`FactorExposureTableBuilder::build`] and
/// re-checked by [`FactorExposureTable::validate`]):
/// - weights sum to 1 within [`WEIGHT_TOLERANCE`];
/// - every asset carries a beta for every declared factor;
/// - no negative volatilities anywhere.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FactorExposureTable {
    model: FactorModel,
    assets: Vec<AssetExposure>,
}

impl FactorExposureTable {
    /// Creates a new table builder over a factor model.
    pub fn builder(model: FactorModel) -> FactorExposureTableBuilder {
        FactorExposureTableBuilder {
            model,
            assets: Vec::new(),
        }
    }

    /// The factor model this table is expressed against.
    #[inline]
    pub fn model(&self) -> &FactorModel {
        &self.model
    }

    /// Asset rows in insertion order.
    #[inline]
    pub fn assets(&self) -> &[AssetExposure] {
        &self.assets
    }

    /// Validates the table invariants.
    ///
    /// Tables built through the builder always pass; this re-check exists
    /// so the decomposer can honour its fail-before-arithmetic contract
    /// regardless of how a table was obtained.
    pub fn validate(&self) -> Result<(), FactorTableError> {
        if self.assets.is_empty() {
            return Err(FactorTableError::EmptyTable);
        }

        let mut sum = 0.0;
        for asset in &self.assets {
            if !asset.weight.is_finite() {
                return Err(FactorTableError::InvalidParameter {
                    name: "weight",
                    reason: format!("non-finite weight for asset '{}'", asset.asset_id),
                });
            }
            if !asset.idiosyncratic_volatility.is_finite() || asset.idiosyncratic_volatility < 0.0
            {
                return Err(FactorTableError::NegativeVolatility {
                    name: asset.asset_id.clone(),
                    value: asset.idiosyncratic_volatility,
                });
            }
            if asset.betas.len() != self.model.len() {
                return Err(FactorTableError::InvalidParameter {
                    name: "betas",
                    reason: format!(
                        "asset '{}' has {} betas, model declares {} factors",
                        asset.asset_id,
                        asset.betas.len(),
                        self.model.len()
                    ),
                });
            }
            sum += asset.weight;
        }

        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(FactorTableError::WeightSumMismatch {
                sum,
                tolerance: WEIGHT_TOLERANCE,
            });
        }
        Ok(())
    }
}

/// Builder for [`FactorExposureTable`].
///
/// # Examples
///
/// ```rust
/// use sim_risk::factor::{
///     AssetExposureBuilder, Factor, FactorClass, FactorExposureTable, FactorModel,
/// };
///
/// let model = FactorModel::new(vec![
///     Factor::new("market", FactorClass::Market, 0.18),
/// ])
/// .unwrap();
///
/// let table = FactorExposureTable::builder(model)
///     .add_asset(AssetExposureBuilder::new("A", 0.5).beta("market", 1.1))
///     .add_asset(AssetExposureBuilder::new("B", 0.5).beta("market", 0.9))
///     .build()
///     .unwrap();
///
/// assert_eq!(table.assets().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct FactorExposureTableBuilder {
    model: FactorModel,
    assets: Vec<AssetExposureBuilder>,
}

impl FactorExposureTableBuilder {
    /// Adds one asset row.
    pub fn add_asset(mut self, asset: AssetExposureBuilder) -> Self {
        self.assets.push(asset);
        self
    }

    /// Builds and validates the table.
    ///
    /// Named betas are resolved against the model (unknown names are an
    /// error); unset betas default to zero.
    ///
    /// # Errors
    ///
    /// Returns `FactorTableError` on any invariant violation; nothing is
    /// decomposed in that case.
    pub fn build(self) -> Result<FactorExposureTable, FactorTableError> {
        let mut assets = Vec::with_capacity(self.assets.len());

        for row in self.assets {
            if assets
                .iter()
                .any(|existing: &AssetExposure| existing.asset_id == row.asset_id)
            {
                return Err(FactorTableError::DuplicateAsset(row.asset_id));
            }

            let mut betas = vec![0.0; self.model.len()];
            for (factor_name, beta) in row.betas {
                let index = self.model.index_of(&factor_name).ok_or_else(|| {
                    FactorTableError::UnknownFactor {
                        asset: row.asset_id.clone(),
                        factor: factor_name.clone(),
                    }
                })?;
                if !beta.is_finite() {
                    return Err(FactorTableError::InvalidParameter {
                        name: "beta",
                        reason: format!(
                            "non-finite beta for asset '{}' on factor '{}'",
                            row.asset_id, factor_name
                        ),
                    });
                }
                betas[index] = beta;
            }

            assets.push(AssetExposure {
                asset_id: row.asset_id,
                weight: row.weight,
                betas,
                idiosyncratic_volatility: row.idiosyncratic_volatility,
            });
        }

        let table = FactorExposureTable {
            model: self.model,
            assets,
        };
        table.validate()?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::model::{Factor, FactorClass};

    fn model() -> FactorModel {
        FactorModel::new(vec![
            Factor::new("market", FactorClass::Market, 0.18),
            Factor::new("commodity", FactorClass::Commodity, 0.35),
        ])
        .unwrap()
    }

    #[test]
    fn test_build_fills_missing_betas_with_zero() {
        let table = FactorExposureTable::builder(model())
            .add_asset(AssetExposureBuilder::new("A", 1.0).beta("market", 1.2))
            .build()
            .unwrap();

        assert_eq!(table.assets()[0].betas(), &[1.2, 0.0]);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let result = FactorExposureTable::builder(model())
            .add_asset(AssetExposureBuilder::new("A", 0.5))
            .add_asset(AssetExposureBuilder::new("B", 0.4))
            .build();
        assert!(matches!(
            result,
            Err(FactorTableError::WeightSumMismatch { .. })
        ));
    }

    #[test]
    fn test_weight_sum_tolerance_is_respected() {
        let table = FactorExposureTable::builder(model())
            .add_asset(AssetExposureBuilder::new("A", 0.5))
            .add_asset(AssetExposureBuilder::new("B", 0.5 + 1e-9))
            .build();
        assert!(table.is_ok());
    }

    #[test]
    fn test_unknown_factor_rejected() {
        let result = FactorExposureTable::builder(model())
            .add_asset(AssetExposureBuilder::new("A", 1.0).beta("liquidity", 0.5))
            .build();
        assert!(matches!(
            result,
            Err(FactorTableError::UnknownFactor { asset, factor })
                if asset == "A" && factor == "liquidity"
        ));
    }

    #[test]
    fn test_duplicate_asset_rejected() {
        let result = FactorExposureTable::builder(model())
            .add_asset(AssetExposureBuilder::new("A", 0.5))
            .add_asset(AssetExposureBuilder::new("A", 0.5))
            .build();
        assert!(matches!(result, Err(FactorTableError::DuplicateAsset(id)) if id == "A"));
    }

    #[test]
    fn test_negative_idiosyncratic_volatility_rejected() {
        let result = FactorExposureTable::builder(model())
            .add_asset(AssetExposureBuilder::new("A", 1.0).idiosyncratic_volatility(-0.2))
            .build();
        assert!(matches!(
            result,
            Err(FactorTableError::NegativeVolatility { .. })
        ));
    }

    #[test]
    fn test_empty_table_rejected() {
        let result = FactorExposureTable::builder(model()).build();
        assert!(matches!(result, Err(FactorTableError::EmptyTable)));
    }

    #[test]
    fn test_later_beta_overwrites_earlier() {
        let table = FactorExposureTable::builder(model())
            .add_asset(
                AssetExposureBuilder::new("A", 1.0)
                    .beta("market", 0.8)
                    .beta("market", 1.1),
            )
            .build()
            .unwrap();
        assert_eq!(table.assets()[0].betas()[0], 1.1);
    }
}
