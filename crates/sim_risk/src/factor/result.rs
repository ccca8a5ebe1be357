//! Decomposition output types.

use super::model::FactorClass;

/// One factor's contribution to portfolio variance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FactorContribution {
    /// Factor name.
    pub factor: String,
    /// Factor class, for report grouping.
    pub class: FactorClass,
    /// Weight-weighted portfolio beta against this factor.
    pub portfolio_beta: f64,
    /// Variance contributed by this factor. Under the independence
    /// assumption this is `(β_f σ_f)²`; with a covariance matrix it is
    /// `β_f (Σβ)_f`, which can be negative for hedging exposures.
    pub variance: f64,
    /// This factor's variance as a fraction of total portfolio variance.
    pub share_of_total: f64,
}

/// Variance rollup for one factor class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClassContribution {
    /// The factor class.
    pub class: FactorClass,
    /// Summed variance of the class's factors.
    pub variance: f64,
    /// Class variance as a fraction of total portfolio variance.
    pub share_of_total: f64,
}

/// One asset's standalone risk, before diversification.
///
/// Variances here are the asset's own (unweighted) risk split; the
/// weighted standalone volatilities `w σ` bound the portfolio volatility
/// from above, and the gap is the diversification effect reported on
/// [`RiskDecomposition::diversification_benefit`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AssetContribution {
    /// Asset identifier.
    pub asset_id: String,
    /// Portfolio weight.
    pub weight: f64,
    /// The asset's standalone systematic variance `βᵀΣβ`.
    pub systematic_variance: f64,
    /// The asset's standalone idiosyncratic variance `σ_idio²`.
    pub idiosyncratic_variance: f64,
}

impl AssetContribution {
    /// Standalone total variance.
    #[inline]
    pub fn total_variance(&self) -> f64 {
        self.systematic_variance + self.idiosyncratic_variance
    }

    /// Standalone total volatility.
    #[inline]
    pub fn total_volatility(&self) -> f64 {
        self.total_variance().max(0.0).sqrt()
    }

    /// Standalone systematic volatility.
    #[inline]
    pub fn systematic_volatility(&self) -> f64 {
        self.systematic_variance.max(0.0).sqrt()
    }

    /// Standalone idiosyncratic volatility.
    #[inline]
    pub fn idiosyncratic_volatility(&self) -> f64 {
        self.idiosyncratic_variance.sqrt()
    }

    /// Weight-scaled standalone volatility, the asset's term in the
    /// undiversified risk bound `Σ w_i σ_i`.
    #[inline]
    pub fn weighted_volatility(&self) -> f64 {
        self.weight * self.total_volatility()
    }
}

/// Full decomposition of portfolio risk.
///
/// # Invariants
///
/// - `systematic_variance + idiosyncratic_variance == total_variance`
///   (1e-9 relative).
/// - Factor contribution shares sum to
///   `systematic_variance / total_variance`.
/// - All shares are zero for a risk-free portfolio (total variance 0).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RiskDecomposition {
    /// Total annual portfolio volatility.
    pub total_volatility: f64,
    /// Total annual portfolio variance.
    pub total_variance: f64,
    /// Volatility attributable to systematic factors.
    pub systematic_volatility: f64,
    /// Variance attributable to systematic factors.
    pub systematic_variance: f64,
    /// Volatility attributable to stock-specific risk.
    pub idiosyncratic_volatility: f64,
    /// Variance attributable to stock-specific risk.
    pub idiosyncratic_variance: f64,
    /// Per-factor contributions, in the model's factor order.
    pub factor_contributions: Vec<FactorContribution>,
    /// Per-class rollups, in [`FactorClass::ALL`] order (present classes
    /// only).
    pub class_contributions: Vec<ClassContribution>,
    /// Per-asset standalone risks, in table order.
    pub asset_contributions: Vec<AssetContribution>,
    /// `1 − portfolio volatility / Σ w_i σ_i`: the fraction of the
    /// undiversified risk bound shed by pooling the assets. Zero for a
    /// single asset or a perfectly aligned portfolio; non-negative for
    /// any positive semi-definite factor covariance.
    pub diversification_benefit: f64,
}

impl RiskDecomposition {
    /// Systematic variance as a fraction of total variance.
    #[inline]
    pub fn systematic_share(&self) -> f64 {
        if self.total_variance > 0.0 {
            self.systematic_variance / self.total_variance
        } else {
            0.0
        }
    }

    /// Idiosyncratic variance as a fraction of total variance.
    #[inline]
    pub fn idiosyncratic_share(&self) -> f64 {
        if self.total_variance > 0.0 {
            self.idiosyncratic_variance / self.total_variance
        } else {
            0.0
        }
    }

    /// Looks up a factor's share of total variance by name.
    pub fn factor_share(&self, factor: &str) -> Option<f64> {
        self.factor_contributions
            .iter()
            .find(|c| c.factor == factor)
            .map(|c| c.share_of_total)
    }
}
