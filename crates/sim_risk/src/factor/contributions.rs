//! Per-asset standalone risk and the diversification effect.

use super::result::AssetContribution;
use super::table::FactorExposureTable;

/// Computes each asset's standalone variance split.
///
/// Systematic part: `βᵀΣβ` (diagonal Σ under the independence
/// assumption). Idiosyncratic part: `σ_idio²`. Both are the asset's own
/// risk, before portfolio weighting.
pub(crate) fn asset_contributions(table: &FactorExposureTable) -> Vec<AssetContribution> {
    let model = table.model();

    table
        .assets()
        .iter()
        .map(|asset| {
            let systematic = match model.covariance() {
                None => model
                    .factors()
                    .iter()
                    .zip(asset.betas())
                    .map(|(factor, &beta)| (beta * factor.annual_volatility()).powi(2))
                    .sum(),
                Some(cov) => {
                    let betas = asset.betas();
                    (0..betas.len())
                        .map(|f| {
                            let sigma_beta: f64 =
                                (0..betas.len()).map(|g| cov[f][g] * betas[g]).sum();
                            betas[f] * sigma_beta
                        })
                        .sum()
                }
            };

            AssetContribution {
                asset_id: asset.asset_id().to_string(),
                weight: asset.weight(),
                systematic_variance: systematic,
                idiosyncratic_variance: asset.idiosyncratic_volatility().powi(2),
            }
        })
        .collect()
}

/// Fraction of the undiversified risk bound shed by pooling:
/// `1 − σ_portfolio / Σ w_i σ_i`.
///
/// The weighted sum of standalone volatilities bounds the portfolio
/// volatility from above (triangle inequality), so the benefit lies in
/// `[0, 1]` whenever the factor covariance is positive semi-definite.
/// Zero when the bound itself is zero.
pub(crate) fn diversification_benefit(
    portfolio_volatility: f64,
    contributions: &[AssetContribution],
) -> f64 {
    let undiversified: f64 = contributions
        .iter()
        .map(AssetContribution::weighted_volatility)
        .sum();
    if undiversified > 0.0 {
        1.0 - portfolio_volatility / undiversified
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::model::{Factor, FactorClass, FactorModel};
    use crate::factor::table::{AssetExposureBuilder, FactorExposureTable};
    use approx::assert_relative_eq;

    #[test]
    fn test_standalone_split_for_two_assets() {
        let model =
            FactorModel::new(vec![Factor::new("market", FactorClass::Market, 0.2)]).unwrap();
        let table = FactorExposureTable::builder(model)
            .add_asset(
                AssetExposureBuilder::new("A", 0.6)
                    .beta("market", 1.0)
                    .idiosyncratic_volatility(0.3),
            )
            .add_asset(AssetExposureBuilder::new("B", 0.4).beta("market", 0.5))
            .build()
            .unwrap();

        let contributions = asset_contributions(&table);
        assert_eq!(contributions.len(), 2);

        // A: (1.0 × 0.2)² systematic, 0.3² idiosyncratic.
        assert_relative_eq!(contributions[0].systematic_variance, 0.04, epsilon = 1e-12);
        assert_relative_eq!(contributions[0].idiosyncratic_variance, 0.09, epsilon = 1e-12);
        assert_relative_eq!(
            contributions[0].weighted_volatility(),
            0.6 * 0.13f64.sqrt(),
            epsilon = 1e-12
        );

        // B: (0.5 × 0.2)² systematic, no idiosyncratic risk.
        assert_relative_eq!(contributions[1].systematic_variance, 0.01, epsilon = 1e-12);
        assert_eq!(contributions[1].idiosyncratic_variance, 0.0);
    }

    #[test]
    fn test_diversification_benefit_zero_without_risk() {
        assert_eq!(diversification_benefit(0.0, &[]), 0.0);
    }

    #[test]
    fn test_idiosyncratic_pool_diversifies() {
        // Two uncorrelated assets, idiosyncratic risk only: pooled
        // volatility is 1/√2 of the weighted bound.
        let contributions = vec![
            AssetContribution {
                asset_id: "A".to_string(),
                weight: 0.5,
                systematic_variance: 0.0,
                idiosyncratic_variance: 0.04,
            },
            AssetContribution {
                asset_id: "B".to_string(),
                weight: 0.5,
                systematic_variance: 0.0,
                idiosyncratic_variance: 0.04,
            },
        ];
        // Portfolio variance: (0.5 × 0.2)² + (0.5 × 0.2)² = 0.02.
        let portfolio_volatility = 0.02f64.sqrt();
        let benefit = diversification_benefit(portfolio_volatility, &contributions);
        assert_relative_eq!(benefit, 1.0 - 1.0 / 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_perfectly_aligned_portfolio_has_no_benefit() {
        let contributions = vec![
            AssetContribution {
                asset_id: "A".to_string(),
                weight: 0.5,
                systematic_variance: 0.04,
                idiosyncratic_variance: 0.0,
            },
            AssetContribution {
                asset_id: "B".to_string(),
                weight: 0.5,
                systematic_variance: 0.04,
                idiosyncratic_variance: 0.0,
            },
        ];
        // Identical betas on one factor: portfolio volatility equals the
        // weighted standalone bound.
        let benefit = diversification_benefit(0.2, &contributions);
        assert_relative_eq!(benefit, 0.0, epsilon = 1e-12);
    }
}
