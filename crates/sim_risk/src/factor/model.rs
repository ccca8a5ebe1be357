//! Systematic factor model: named factors, volatilities, optional
//! covariance.

use super::error::FactorTableError;

/// Broad grouping of systematic factors, used for report rollups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FactorClass {
    /// Broad-market exposure.
    Market,
    /// Industry sector exposures.
    Sector,
    /// Style tilts (size, value, momentum, quality).
    Style,
    /// Currency sensitivity.
    Currency,
    /// Commodity price sensitivity.
    Commodity,
}

impl FactorClass {
    /// All classes, in report order.
    pub const ALL: [FactorClass; 5] = [
        FactorClass::Market,
        FactorClass::Sector,
        FactorClass::Style,
        FactorClass::Currency,
        FactorClass::Commodity,
    ];

    /// Human-readable class name.
    pub fn name(&self) -> &'static str {
        match self {
            FactorClass::Market => "Market",
            FactorClass::Sector => "Sector",
            FactorClass::Style => "Style",
            FactorClass::Currency => "Currency",
            FactorClass::Commodity => "Commodity",
        }
    }
}

/// One systematic factor: a name, a class, and an annual volatility.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Factor {
    name: String,
    class: FactorClass,
    annual_volatility: f64,
}

impl Factor {
    /// Creates a factor. Volatility is validated when the model is built.
    pub fn new(name: impl Into<String>, class: FactorClass, annual_volatility: f64) -> Self {
        Self {
            name: name.into(),
            class,
            annual_volatility,
        }
    }

    /// Factor name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Factor class.
    #[inline]
    pub fn class(&self) -> FactorClass {
        self.class
    }

    /// Annual volatility as a fraction.
    #[inline]
    pub fn annual_volatility(&self) -> f64 {
        self.annual_volatility
    }

    /// Annual variance (volatility squared).
    #[inline]
    pub fn variance(&self) -> f64 {
        self.annual_volatility * self.annual_volatility
    }
}

/// A validated set of systematic factors.
///
/// By default factors are treated as mutually independent, so portfolio
/// systematic variance is `Σ_f (β_f σ_f)²`. A full covariance matrix can
/// be attached with [`FactorModel::with_covariance`], in which case the
/// decomposer computes `βᵀ Σ β` instead.
///
/// # Examples
///
/// ```rust
/// use sim_risk::factor::{Factor, FactorClass, FactorModel};
///
/// let model = FactorModel::new(vec![
///     Factor::new("market", FactorClass::Market, 0.18),
///     Factor::new("commodity", FactorClass::Commodity, 0.35),
/// ])
/// .unwrap();
///
/// assert_eq!(model.len(), 2);
/// assert_eq!(model.index_of("market"), Some(0));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FactorModel {
    factors: Vec<Factor>,
    covariance: Option<Vec<Vec<f64>>>,
}

impl FactorModel {
    /// Creates an independence-assumption model from a factor list.
    ///
    /// # Errors
    ///
    /// Returns `FactorTableError` on duplicate factor names or negative /
    /// non-finite volatilities.
    pub fn new(factors: Vec<Factor>) -> Result<Self, FactorTableError> {
        Self::validate_factors(&factors)?;
        Ok(Self {
            factors,
            covariance: None,
        })
    }

    /// Creates a model with an explicit factor covariance matrix
    /// (annual variance units, row-major, one row per factor).
    ///
    /// # Errors
    ///
    /// In addition to the [`FactorModel::new`] checks, returns
    /// `FactorTableError` when the matrix is not square of the factor
    /// count, not symmetric within 1e-9, or holds non-finite entries.
    pub fn with_covariance(
        factors: Vec<Factor>,
        covariance: Vec<Vec<f64>>,
    ) -> Result<Self, FactorTableError> {
        Self::validate_factors(&factors)?;

        let expected = factors.len();
        if covariance.len() != expected {
            return Err(FactorTableError::CovarianceDimension {
                rows: covariance.len(),
                cols: covariance.first().map_or(0, Vec::len),
                expected,
            });
        }
        for row in &covariance {
            if row.len() != expected {
                return Err(FactorTableError::CovarianceDimension {
                    rows: covariance.len(),
                    cols: row.len(),
                    expected,
                });
            }
        }
        for (i, row) in covariance.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(FactorTableError::InvalidParameter {
                        name: "covariance",
                        reason: format!("non-finite entry at ({i}, {j})"),
                    });
                }
                if (value - covariance[j][i]).abs() > 1e-9 {
                    return Err(FactorTableError::CovarianceAsymmetry { row: i, col: j });
                }
            }
        }

        Ok(Self {
            factors,
            covariance: Some(covariance),
        })
    }

    fn validate_factors(factors: &[Factor]) -> Result<(), FactorTableError> {
        for (i, factor) in factors.iter().enumerate() {
            if !factor.annual_volatility.is_finite() || factor.annual_volatility < 0.0 {
                return Err(FactorTableError::NegativeVolatility {
                    name: factor.name.clone(),
                    value: factor.annual_volatility,
                });
            }
            if factors[..i].iter().any(|f| f.name == factor.name) {
                return Err(FactorTableError::DuplicateFactor(factor.name.clone()));
            }
        }
        Ok(())
    }

    /// Declared factors, in declaration order.
    #[inline]
    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    /// Number of declared factors.
    #[inline]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Returns `true` if the model declares no factors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Index of a factor by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.factors.iter().position(|f| f.name == name)
    }

    /// The attached covariance matrix, if any.
    #[inline]
    pub fn covariance(&self) -> Option<&Vec<Vec<f64>>> {
        self.covariance.as_ref()
    }
}
