//! End-to-end properties of the risk decomposer on a realistic portfolio.

use approx::assert_relative_eq;
use sim_risk::{
    decompose_risk, AssetExposureBuilder, Factor, FactorClass, FactorExposureTable, FactorModel,
};

/// A five-stock portfolio with market, sector, style, currency and
/// commodity factors.
fn jse_style_table() -> FactorExposureTable {
    let model = FactorModel::new(vec![
        Factor::new("market", FactorClass::Market, 0.18),
        Factor::new("financials", FactorClass::Sector, 0.22),
        Factor::new("technology", FactorClass::Sector, 0.35),
        Factor::new("materials", FactorClass::Sector, 0.40),
        Factor::new("size", FactorClass::Style, 0.08),
        Factor::new("value", FactorClass::Style, 0.12),
        Factor::new("momentum", FactorClass::Style, 0.15),
        Factor::new("quality", FactorClass::Style, 0.10),
        Factor::new("rand", FactorClass::Currency, 0.25),
        Factor::new("commodity", FactorClass::Commodity, 0.35),
    ])
    .unwrap();

    FactorExposureTable::builder(model)
        .add_asset(
            AssetExposureBuilder::new("CPI", 0.25)
                .beta("market", 1.15)
                .beta("financials", 1.25)
                .beta("size", 0.80)
                .beta("value", -0.40)
                .beta("momentum", 0.65)
                .beta("quality", 1.50)
                .beta("rand", 0.30)
                .beta("commodity", 0.05)
                .idiosyncratic_volatility(0.22),
        )
        .add_asset(
            AssetExposureBuilder::new("FSR", 0.25)
                .beta("market", 1.10)
                .beta("financials", 1.20)
                .beta("size", 0.85)
                .beta("value", 0.20)
                .beta("momentum", 0.45)
                .beta("quality", 1.20)
                .beta("rand", 0.35)
                .beta("commodity", 0.05)
                .idiosyncratic_volatility(0.18),
        )
        .add_asset(
            AssetExposureBuilder::new("NPN", 0.20)
                .beta("market", 1.35)
                .beta("technology", 1.60)
                .beta("size", 0.90)
                .beta("value", -0.80)
                .beta("momentum", 0.30)
                .beta("quality", 0.60)
                .beta("rand", -0.50)
                .beta("commodity", -0.10)
                .idiosyncratic_volatility(0.28),
        )
        .add_asset(
            AssetExposureBuilder::new("ANG", 0.15)
                .beta("market", 1.25)
                .beta("materials", 1.55)
                .beta("size", 0.70)
                .beta("value", 0.30)
                .beta("momentum", 0.80)
                .beta("quality", 0.40)
                .beta("rand", -0.60)
                .beta("commodity", 1.80)
                .idiosyncratic_volatility(0.32),
        )
        .add_asset(
            AssetExposureBuilder::new("IMP", 0.15)
                .beta("market", 1.40)
                .beta("materials", 1.70)
                .beta("size", 0.50)
                .beta("value", 0.50)
                .beta("momentum", 0.60)
                .beta("quality", 0.20)
                .beta("rand", -0.55)
                .beta("commodity", 1.90)
                .idiosyncratic_volatility(0.38),
        )
        .build()
        .unwrap()
}

#[test]
fn variance_identity_holds_for_realistic_portfolio() {
    let d = decompose_risk(&jse_style_table()).unwrap();
    assert_relative_eq!(
        d.systematic_variance + d.idiosyncratic_variance,
        d.total_variance,
        max_relative = 1e-9
    );
    assert_relative_eq!(d.total_volatility, d.total_variance.sqrt(), max_relative = 1e-12);
}

#[test]
fn factor_shares_sum_to_systematic_share() {
    let d = decompose_risk(&jse_style_table()).unwrap();
    let share_sum: f64 = d.factor_contributions.iter().map(|c| c.share_of_total).sum();
    assert_relative_eq!(share_sum, d.systematic_share(), max_relative = 1e-9);
}

#[test]
fn class_rollup_covers_all_systematic_variance() {
    let d = decompose_risk(&jse_style_table()).unwrap();
    let class_sum: f64 = d.class_contributions.iter().map(|c| c.variance).sum();
    assert_relative_eq!(class_sum, d.systematic_variance, max_relative = 1e-9);
}

#[test]
fn market_is_a_dominant_exposure() {
    let d = decompose_risk(&jse_style_table()).unwrap();
    let market = d
        .factor_contributions
        .iter()
        .find(|c| c.factor == "market")
        .unwrap();
    // Portfolio market beta ≈ 1.22 against an 18% factor vol; no other
    // single factor should dwarf it.
    assert!(market.portfolio_beta > 1.0);
    assert!(market.share_of_total > 0.1);
}

#[test]
fn diversification_benefit_is_positive_here() {
    // Sector/commodity exposures are spread across assets, so pooling
    // should shed part of the standalone risk.
    let d = decompose_risk(&jse_style_table()).unwrap();
    assert!(
        d.diversification_benefit > 0.0,
        "benefit = {}",
        d.diversification_benefit
    );
}

#[test]
fn decomposition_is_deterministic() {
    let a = decompose_risk(&jse_style_table()).unwrap();
    let b = decompose_risk(&jse_style_table()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn asset_contributions_follow_table_order() {
    let d = decompose_risk(&jse_style_table()).unwrap();
    let ids: Vec<&str> = d
        .asset_contributions
        .iter()
        .map(|c| c.asset_id.as_str())
        .collect();
    assert_eq!(ids, ["CPI", "FSR", "NPN", "ANG", "IMP"]);
}
