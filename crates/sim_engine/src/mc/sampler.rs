//! Return sampling and portfolio valuation.
//!
//! Each path draws one annual return per horizon year from
//! `Normal(expected_annual_return, annual_volatility)` and compounds the
//! multipliers: `Π (1 + r_t)`. Annual returns are floored at −100% so a
//! multiplier can never go negative; paths where the floor fired are
//! flagged and counted. A multiplier that still fails to be finite
//! (overflow toward +∞ under extreme parameters) fails the whole call.

use rand_distr::Normal;

use super::accumulator::BatchAccumulator;
use super::config::SimulationConfig;
use super::error::{ConfigError, SimulationError};
use crate::rng::{split_mix64, SimRng};

/// Per-period return floor: a single year can lose at most 100%.
pub const RETURN_FLOOR: f64 = -1.0;

/// Salt separating reservoir replacement draws from path streams.
const STORE_SEED_SALT: u64 = 0xC0DE_5EED_0B5E_55ED;

/// Outcome of compounding one simulation path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathOutcome {
    /// Total-horizon return multiplier `Π (1 + r_t)`.
    pub multiplier: f64,
    /// Whether any annual return hit the −100% floor.
    pub clamped: bool,
}

/// Compounds one path of annual draws into a horizon multiplier.
pub fn sample_path(rng: &mut SimRng, annual: &Normal<f64>, horizon_years: usize) -> PathOutcome {
    let mut multiplier = 1.0;
    let mut clamped = false;
    for _ in 0..horizon_years {
        let mut annual_return = rng.sample(annual);
        if annual_return < RETURN_FLOOR {
            annual_return = RETURN_FLOOR;
            clamped = true;
        }
        multiplier *= 1.0 + annual_return;
    }
    PathOutcome {
        multiplier,
        clamped,
    }
}

/// Valuation step: final portfolio value implied by a multiplier.
#[inline]
pub fn portfolio_value(initial_value: f64, multiplier: f64) -> f64 {
    initial_value * multiplier
}

/// Valuation step: total-horizon return fraction implied by a multiplier.
#[inline]
pub fn horizon_return(multiplier: f64) -> f64 {
    multiplier - 1.0
}

/// Samples one batch of paths into a fresh accumulator.
///
/// The batch covers paths `[batch_idx * batch_size, ...)` up to the batch
/// size or the tail of the run. Each path derives its own RNG stream from
/// the master seed, so results are independent of the batch layout.
pub(crate) fn sample_batch(
    config: &SimulationConfig,
    batch_idx: usize,
) -> Result<BatchAccumulator, SimulationError> {
    let start = batch_idx * config.batch_size();
    let len = config.batch_size().min(config.n_simulations() - start);
    let seed = config.seed_or_default();

    let annual = Normal::new(config.expected_annual_return(), config.annual_volatility())
        .map_err(|_| ConfigError::InvalidParameter {
            name: "annual_volatility",
            reason: "must be finite and non-negative".to_string(),
        })?;

    let store_seed = split_mix64(seed ^ STORE_SEED_SALT).wrapping_add(batch_idx as u64);
    let mut acc = BatchAccumulator::new(config.sample_mode(), len, store_seed);

    for i in 0..len {
        let path_idx = start + i;
        let mut rng = SimRng::for_path(seed, path_idx as u64);
        let outcome = sample_path(&mut rng, &annual, config.time_horizon_years());
        if !outcome.multiplier.is_finite() {
            return Err(SimulationError::NumericOverflow { path: path_idx });
        }
        acc.record(horizon_return(outcome.multiplier), outcome.clamped);
    }

    Ok(acc)
}
