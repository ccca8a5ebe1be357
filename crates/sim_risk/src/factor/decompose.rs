//! Portfolio risk decomposition.
//!
//! Splits total portfolio variance into systematic (factor-driven) and
//! idiosyncratic (stock-specific) components:
//!
//! ```text
//! total = Σ_f contribution_f  +  Σ_i (w_i σ_idio,i)²
//! ```
//!
//! Under the default independence assumption `contribution_f = (β_f σ_f)²`
//! with `β_f` the weight-weighted portfolio beta. With a covariance matrix
//! attached to the model, the systematic part is `βᵀΣβ` and per-factor
//! contributions are `β_f (Σβ)_f`, which still sum to it.

use super::contributions::{asset_contributions, diversification_benefit};
use super::error::FactorTableError;
use super::model::FactorClass;
use super::result::{ClassContribution, FactorContribution, RiskDecomposition};
use super::table::FactorExposureTable;

/// Decomposes portfolio risk into systematic and idiosyncratic parts.
///
/// Pure and stateless: the table is read, never mutated, and the result
/// carries no reference back to it.
///
/// # Errors
///
/// Returns `FactorTableError` when the table fails validation; no
/// arithmetic runs in that case. Tables built through
/// [`FactorExposureTable::builder`] always pass.
///
/// # Examples
///
/// ```rust
/// use sim_risk::factor::{
///     decompose_risk, AssetExposureBuilder, Factor, FactorClass, FactorExposureTable,
///     FactorModel,
/// };
///
/// let model = FactorModel::new(vec![
///     Factor::new("market", FactorClass::Market, 0.2),
/// ])
/// .unwrap();
/// let table = FactorExposureTable::builder(model)
///     .add_asset(AssetExposureBuilder::new("A", 0.5).beta("market", 1.0))
///     .add_asset(AssetExposureBuilder::new("B", 0.5).beta("market", 1.0))
///     .build()
///     .unwrap();
///
/// let decomposition = decompose_risk(&table).unwrap();
/// assert!((decomposition.total_volatility - 0.2).abs() < 1e-12);
/// ```
pub fn decompose_risk(table: &FactorExposureTable) -> Result<RiskDecomposition, FactorTableError> {
    table.validate()?;

    let model = table.model();
    let n_factors = model.len();

    // Portfolio beta per factor: weight-weighted sum of asset betas.
    let mut portfolio_betas = vec![0.0; n_factors];
    for asset in table.assets() {
        for (slot, &beta) in portfolio_betas.iter_mut().zip(asset.betas()) {
            *slot += asset.weight() * beta;
        }
    }

    let contributions: Vec<f64> = match model.covariance() {
        None => model
            .factors()
            .iter()
            .zip(&portfolio_betas)
            .map(|(factor, &beta)| (beta * factor.annual_volatility()).powi(2))
            .collect(),
        Some(cov) => (0..n_factors)
            .map(|f| {
                let sigma_beta: f64 = (0..n_factors)
                    .map(|g| cov[f][g] * portfolio_betas[g])
                    .sum();
                portfolio_betas[f] * sigma_beta
            })
            .collect(),
    };

    let systematic_variance: f64 = contributions.iter().sum();
    let idiosyncratic_variance: f64 = table
        .assets()
        .iter()
        .map(|asset| (asset.weight() * asset.idiosyncratic_volatility()).powi(2))
        .sum();
    let total_variance = systematic_variance + idiosyncratic_variance;

    let share = |variance: f64| {
        if total_variance > 0.0 {
            variance / total_variance
        } else {
            0.0
        }
    };

    let factor_contributions: Vec<FactorContribution> = model
        .factors()
        .iter()
        .zip(&portfolio_betas)
        .zip(&contributions)
        .map(|((factor, &beta), &variance)| FactorContribution {
            factor: factor.name().to_string(),
            class: factor.class(),
            portfolio_beta: beta,
            variance,
            share_of_total: share(variance),
        })
        .collect();

    let class_contributions: Vec<ClassContribution> = FactorClass::ALL
        .iter()
        .filter(|class| model.factors().iter().any(|f| f.class() == **class))
        .map(|&class| {
            let variance: f64 = factor_contributions
                .iter()
                .filter(|c| c.class == class)
                .map(|c| c.variance)
                .sum();
            ClassContribution {
                class,
                variance,
                share_of_total: share(variance),
            }
        })
        .collect();

    let total_volatility = total_variance.sqrt();
    let asset_contributions = asset_contributions(table);
    let diversification_benefit = diversification_benefit(total_volatility, &asset_contributions);

    Ok(RiskDecomposition {
        total_volatility,
        total_variance,
        // A symmetric but indefinite covariance can push the quadratic
        // form negative; floor before the square root.
        systematic_volatility: systematic_variance.max(0.0).sqrt(),
        systematic_variance,
        idiosyncratic_volatility: idiosyncratic_variance.sqrt(),
        idiosyncratic_variance,
        factor_contributions,
        class_contributions,
        asset_contributions,
        diversification_benefit,
    })
}
