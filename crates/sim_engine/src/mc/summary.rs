//! Simulation summary statistics.
//!
//! [`SimulationSummary`] is the only artifact that survives a simulation
//! run: a fixed percentile table plus scalar statistics. It never retains
//! the per-path sample.

use sim_core::{percentile_of_sorted, PERCENTILE_LEVELS};

use super::accumulator::{BatchAccumulator, OUTCOME_THRESHOLDS};
use super::config::SimulationConfig;
use super::error::SimulationError;

/// One row of the percentile table.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PercentileRow {
    /// Percentile level (1–99).
    pub level: u8,
    /// Total-horizon return fraction at this level.
    pub horizon_return: f64,
    /// Final portfolio value at this level.
    pub final_value: f64,
}

impl PercentileRow {
    /// Gain (positive) or loss (negative) versus the initial value.
    #[inline]
    pub fn gain_loss(&self, initial_value: f64) -> f64 {
        self.final_value - initial_value
    }
}

/// Probability of an outcome beyond a return threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ThresholdProbability {
    /// Return-fraction threshold (e.g. 0.20 for ±20%).
    pub threshold: f64,
    /// Fraction of paths strictly beyond the threshold.
    pub probability: f64,
}

/// Summary statistics of a completed simulation run.
///
/// # Invariants
///
/// - `percentiles` is non-decreasing in level (both columns).
/// - `probability_of_profit + probability_of_loss ≤ 1`, with the residual
///   being the fraction of exact-breakeven paths.
/// - Built only from a non-empty sample; no field is ever NaN-by-default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulationSummary {
    /// Number of simulated paths.
    pub n_simulations: u64,
    /// Initial portfolio value the run was configured with.
    pub initial_portfolio_value: f64,
    /// Percentile table over the configured levels.
    pub percentiles: Vec<PercentileRow>,
    /// Mean final portfolio value.
    pub mean_final_value: f64,
    /// Median (50th percentile) final portfolio value.
    pub median_final_value: f64,
    /// Population standard deviation of the final value.
    pub std_dev_final_value: f64,
    /// Smallest simulated final value.
    pub min_final_value: f64,
    /// Largest simulated final value.
    pub max_final_value: f64,
    /// Mean total-horizon return fraction.
    pub mean_return: f64,
    /// Median total-horizon return fraction.
    pub median_return: f64,
    /// Population standard deviation of the return fraction.
    pub std_dev_return: f64,
    /// Skewness of the return distribution.
    pub skewness: f64,
    /// Excess kurtosis of the return distribution.
    pub excess_kurtosis: f64,
    /// Mean return over its standard deviation (0 when the std is 0).
    pub sharpe_ratio: f64,
    /// Return fraction at the 5th percentile (95% Value at Risk).
    pub var_95: f64,
    /// Return fraction at the 1st percentile (99% Value at Risk).
    pub var_99: f64,
    /// Fraction of paths ending strictly above the initial value.
    pub probability_of_profit: f64,
    /// Fraction of paths ending strictly below the initial value.
    pub probability_of_loss: f64,
    /// Probabilities of losing more than each threshold.
    pub loss_beyond: Vec<ThresholdProbability>,
    /// Probabilities of gaining more than each threshold.
    pub profit_beyond: Vec<ThresholdProbability>,
    /// Paths where at least one annual return was floored at −100%.
    pub clamped_paths: u64,
}

impl SimulationSummary {
    /// Fraction of paths ending exactly at the initial value.
    #[inline]
    pub fn probability_of_breakeven(&self) -> f64 {
        (1.0 - self.probability_of_profit - self.probability_of_loss).max(0.0)
    }

    /// Builds the summary from a finished accumulator.
    pub(crate) fn from_accumulator(
        acc: BatchAccumulator,
        config: &SimulationConfig,
    ) -> Result<Self, SimulationError> {
        if acc.is_empty() {
            return Err(SimulationError::EmptySample);
        }

        let (scalars, sorted_returns) = acc.finish();
        if sorted_returns.is_empty() {
            return Err(SimulationError::EmptySample);
        }

        let initial = config.initial_portfolio_value();
        let n = scalars.returns.count() as f64;

        // Non-empty by the guard above, so the fallback never fires.
        let percentile =
            |level: f64| percentile_of_sorted(&sorted_returns, level).unwrap_or(sorted_returns[0]);

        let percentiles: Vec<PercentileRow> = PERCENTILE_LEVELS
            .iter()
            .map(|&level| {
                let horizon_return = percentile(level as f64);
                PercentileRow {
                    level,
                    horizon_return,
                    final_value: initial * (1.0 + horizon_return),
                }
            })
            .collect();

        let mean_return = scalars.returns.mean();
        let std_dev_return = scalars.returns.std_dev();
        let median_return = percentile(50.0);
        let sharpe_ratio = if std_dev_return > 0.0 {
            mean_return / std_dev_return
        } else {
            0.0
        };

        let loss_beyond = OUTCOME_THRESHOLDS
            .iter()
            .zip(scalars.loss_beyond)
            .map(|(&threshold, count)| ThresholdProbability {
                threshold,
                probability: count as f64 / n,
            })
            .collect();
        let profit_beyond = OUTCOME_THRESHOLDS
            .iter()
            .zip(scalars.profit_beyond)
            .map(|(&threshold, count)| ThresholdProbability {
                threshold,
                probability: count as f64 / n,
            })
            .collect();

        Ok(Self {
            n_simulations: scalars.returns.count(),
            initial_portfolio_value: initial,
            percentiles,
            mean_final_value: initial * (1.0 + mean_return),
            median_final_value: initial * (1.0 + median_return),
            std_dev_final_value: initial * std_dev_return,
            min_final_value: initial * (1.0 + scalars.returns.min()),
            max_final_value: initial * (1.0 + scalars.returns.max()),
            mean_return,
            median_return,
            std_dev_return,
            skewness: scalars.returns.skewness(),
            excess_kurtosis: scalars.returns.excess_kurtosis(),
            sharpe_ratio,
            var_95: percentile(5.0),
            var_99: percentile(1.0),
            probability_of_profit: scalars.profit as f64 / n,
            probability_of_loss: scalars.loss as f64 / n,
            loss_beyond,
            profit_beyond,
            clamped_paths: scalars.clamped_paths,
        })
    }
}
