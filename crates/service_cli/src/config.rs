//! TOML input schema and conversion into kernel types.
//!
//! One file can carry both a `[simulation]` section and a factor portfolio
//! (`[[factor]]` / `[[asset]]` tables, optional `[factor_covariance]`);
//! each command picks the sections it needs.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use sim_engine::{SampleMode, SimulationConfig};
use sim_risk::{
    AssetExposureBuilder, Factor, FactorClass, FactorExposureTable, FactorModel,
};

use crate::error::{CliError, Result};

/// Top-level TOML document.
#[derive(Debug, Deserialize)]
pub struct InputFile {
    /// Simulation parameters, for `simfolio simulate`.
    pub simulation: Option<SimulationSection>,
    /// Optional portfolio metadata.
    pub portfolio: Option<PortfolioSection>,
    /// Declared systematic factors, for `simfolio decompose`.
    #[serde(default, rename = "factor")]
    pub factors: Vec<FactorSection>,
    /// Asset exposure rows, for `simfolio decompose`.
    #[serde(default, rename = "asset")]
    pub assets: Vec<AssetSection>,
    /// Optional factor covariance matrix (annual variance units).
    pub factor_covariance: Option<CovarianceSection>,
}

/// `[portfolio]` metadata.
#[derive(Debug, Deserialize)]
pub struct PortfolioSection {
    /// Display name used in report headers.
    pub name: Option<String>,
}

/// `[simulation]` parameters. Rates are fractions (0.12 = 12%).
#[derive(Debug, Deserialize)]
pub struct SimulationSection {
    pub n_simulations: usize,
    pub expected_annual_return: f64,
    pub annual_volatility: f64,
    pub time_horizon_years: usize,
    pub initial_portfolio_value: f64,
    pub batch_size: Option<usize>,
    pub seed: Option<u64>,
    /// When set, percentiles use a bounded reservoir of this capacity
    /// instead of the full sample.
    pub reservoir_capacity: Option<usize>,
}

impl SimulationSection {
    /// Builds the validated kernel configuration.
    pub fn to_config(&self) -> Result<SimulationConfig> {
        let mut builder = SimulationConfig::builder()
            .n_simulations(self.n_simulations)
            .expected_annual_return(self.expected_annual_return)
            .annual_volatility(self.annual_volatility)
            .time_horizon_years(self.time_horizon_years)
            .initial_portfolio_value(self.initial_portfolio_value);
        if let Some(batch_size) = self.batch_size {
            builder = builder.batch_size(batch_size);
        }
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        if let Some(capacity) = self.reservoir_capacity {
            builder = builder.sample_mode(SampleMode::Reservoir { capacity });
        }
        Ok(builder.build()?)
    }
}

/// One `[[factor]]` row.
#[derive(Debug, Deserialize)]
pub struct FactorSection {
    pub name: String,
    pub class: FactorClassName,
    pub annual_volatility: f64,
}

/// Factor class names as written in TOML.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorClassName {
    Market,
    Sector,
    Style,
    Currency,
    Commodity,
}

impl From<FactorClassName> for FactorClass {
    fn from(name: FactorClassName) -> Self {
        match name {
            FactorClassName::Market => FactorClass::Market,
            FactorClassName::Sector => FactorClass::Sector,
            FactorClassName::Style => FactorClass::Style,
            FactorClassName::Currency => FactorClass::Currency,
            FactorClassName::Commodity => FactorClass::Commodity,
        }
    }
}

/// One `[[asset]]` row; betas map factor name → beta, unset factors are 0.
#[derive(Debug, Deserialize)]
pub struct AssetSection {
    pub id: String,
    pub weight: f64,
    #[serde(default)]
    pub idiosyncratic_volatility: f64,
    #[serde(default)]
    pub betas: BTreeMap<String, f64>,
}

/// `[factor_covariance]` matrix, row-major over the declared factors.
#[derive(Debug, Deserialize)]
pub struct CovarianceSection {
    pub matrix: Vec<Vec<f64>>,
}

/// Loads and parses an input file.
pub fn load_input(path: &str) -> Result<InputFile> {
    if !Path::new(path).exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Assembles the validated factor exposure table from an input file.
pub fn build_factor_table(input: &InputFile) -> Result<FactorExposureTable> {
    if input.factors.is_empty() && input.assets.is_empty() {
        return Err(CliError::MissingSection("factor"));
    }

    let factors: Vec<Factor> = input
        .factors
        .iter()
        .map(|f| Factor::new(f.name.clone(), FactorClass::from(f.class), f.annual_volatility))
        .collect();

    let model = match &input.factor_covariance {
        Some(section) => FactorModel::with_covariance(factors, section.matrix.clone())?,
        None => FactorModel::new(factors)?,
    };

    let mut builder = FactorExposureTable::builder(model);
    for asset in &input.assets {
        let mut row = AssetExposureBuilder::new(asset.id.clone(), asset.weight)
            .idiosyncratic_volatility(asset.idiosyncratic_volatility);
        for (factor_name, beta) in &asset.betas {
            row = row.beta(factor_name.clone(), *beta);
        }
        builder = builder.add_asset(row);
    }
    Ok(builder.build()?)
}

/// Report label from the `[portfolio]` section, with a fallback.
pub fn portfolio_label(input: &InputFile) -> &str {
    input
        .portfolio
        .as_ref()
        .and_then(|p| p.name.as_deref())
        .unwrap_or("Portfolio")
}
