//! Mergeable per-batch accumulation of simulation outcomes.
//!
//! Each batch of paths folds into a [`BatchAccumulator`]; the raw batch is
//! discarded after folding, so peak memory stays bounded by the batch size
//! plus the sample store. Accumulators merge with an associative,
//! commutative operation: exact for moments, min/max and all counters,
//! approximate-but-bounded for the reservoir store.

use sim_core::{MomentAccumulator, Reservoir};

use super::config::SampleMode;

/// Return thresholds (as fractions) for the loss/profit-beyond counters.
pub const OUTCOME_THRESHOLDS: [f64; 3] = [0.10, 0.20, 0.50];

/// Sample store backing percentile computation.
///
/// `Exact` retains every horizon return; `Reservoir` retains a bounded
/// uniform sub-sample (see [`SampleMode`]).
pub enum SampleStore {
    /// Full sample; percentiles are exact.
    Exact(Vec<f64>),
    /// Bounded uniform sample; percentiles are approximate.
    Reservoir(Reservoir),
}

impl SampleStore {
    /// Creates a store for one batch.
    ///
    /// `expected` sizes the exact store's allocation; `seed` drives the
    /// reservoir's replacement draws (derive it per batch so merged runs
    /// stay reproducible).
    pub fn for_batch(mode: SampleMode, expected: usize, seed: u64) -> Self {
        match mode {
            SampleMode::Exact => SampleStore::Exact(Vec::with_capacity(expected)),
            SampleMode::Reservoir { capacity } => {
                SampleStore::Reservoir(Reservoir::new(capacity, seed))
            }
        }
    }

    #[inline]
    fn push(&mut self, x: f64) {
        match self {
            SampleStore::Exact(values) => values.push(x),
            SampleStore::Reservoir(reservoir) => reservoir.push(x),
        }
    }

    fn merge(&mut self, other: SampleStore) {
        let current = std::mem::replace(self, SampleStore::Exact(Vec::new()));
        *self = match (current, other) {
            (SampleStore::Exact(mut a), SampleStore::Exact(b)) => {
                a.extend(b);
                SampleStore::Exact(a)
            }
            (SampleStore::Reservoir(mut a), SampleStore::Reservoir(b)) => {
                a.merge(b);
                SampleStore::Reservoir(a)
            }
            // Mixed stores only arise from caller error; continuing
            // Algorithm R over the exact side keeps the sample uniform.
            (SampleStore::Reservoir(mut a), SampleStore::Exact(b)) => {
                for x in b {
                    a.push(x);
                }
                SampleStore::Reservoir(a)
            }
            (SampleStore::Exact(a), SampleStore::Reservoir(mut b)) => {
                for x in a {
                    b.push(x);
                }
                SampleStore::Reservoir(b)
            }
        };
    }

    /// Consumes the store, returning the retained sample sorted ascending.
    pub fn into_sorted(self) -> Vec<f64> {
        match self {
            SampleStore::Exact(mut values) => {
                values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                values
            }
            SampleStore::Reservoir(reservoir) => reservoir.into_sorted(),
        }
    }
}

/// Accumulated outcome statistics for one or more batches.
///
/// Records horizon returns (fractions); final-value statistics are an
/// affine transform of the return statistics and are derived at summary
/// construction time.
pub struct BatchAccumulator {
    returns: MomentAccumulator<f64>,
    profit: u64,
    loss: u64,
    breakeven: u64,
    loss_beyond: [u64; OUTCOME_THRESHOLDS.len()],
    profit_beyond: [u64; OUTCOME_THRESHOLDS.len()],
    clamped_paths: u64,
    store: SampleStore,
}

impl BatchAccumulator {
    /// Creates an empty accumulator for one batch.
    pub fn new(mode: SampleMode, expected: usize, store_seed: u64) -> Self {
        Self {
            returns: MomentAccumulator::new(),
            profit: 0,
            loss: 0,
            breakeven: 0,
            loss_beyond: [0; OUTCOME_THRESHOLDS.len()],
            profit_beyond: [0; OUTCOME_THRESHOLDS.len()],
            clamped_paths: 0,
            store: SampleStore::for_batch(mode, expected, store_seed),
        }
    }

    /// Folds one path outcome into the accumulator.
    ///
    /// `horizon_return` is the total-horizon return fraction (multiplier
    /// minus one); `clamped` marks paths where an annual return was
    /// floored at −100%.
    pub fn record(&mut self, horizon_return: f64, clamped: bool) {
        self.returns.add(horizon_return);
        if horizon_return > 0.0 {
            self.profit += 1;
        } else if horizon_return < 0.0 {
            self.loss += 1;
        } else {
            self.breakeven += 1;
        }
        for (slot, &threshold) in self.loss_beyond.iter_mut().zip(&OUTCOME_THRESHOLDS) {
            if horizon_return < -threshold {
                *slot += 1;
            }
        }
        for (slot, &threshold) in self.profit_beyond.iter_mut().zip(&OUTCOME_THRESHOLDS) {
            if horizon_return > threshold {
                *slot += 1;
            }
        }
        if clamped {
            self.clamped_paths += 1;
        }
        self.store.push(horizon_return);
    }

    /// Merges another accumulator into this one.
    pub fn merge(&mut self, other: BatchAccumulator) {
        self.returns.merge(&other.returns);
        self.profit += other.profit;
        self.loss += other.loss;
        self.breakeven += other.breakeven;
        for (a, b) in self.loss_beyond.iter_mut().zip(other.loss_beyond) {
            *a += b;
        }
        for (a, b) in self.profit_beyond.iter_mut().zip(other.profit_beyond) {
            *a += b;
        }
        self.clamped_paths += other.clamped_paths;
        self.store.merge(other.store);
    }

    /// Number of recorded paths.
    #[inline]
    pub fn count(&self) -> u64 {
        self.returns.count()
    }

    /// Returns `true` if no paths have been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Return-fraction moments.
    #[inline]
    pub fn returns(&self) -> &MomentAccumulator<f64> {
        &self.returns
    }

    /// Count of strictly profitable paths.
    #[inline]
    pub fn profit_count(&self) -> u64 {
        self.profit
    }

    /// Count of strictly losing paths.
    #[inline]
    pub fn loss_count(&self) -> u64 {
        self.loss
    }

    /// Count of exact-breakeven paths (neither profit nor loss).
    #[inline]
    pub fn breakeven_count(&self) -> u64 {
        self.breakeven
    }

    /// Counts of paths losing more than each [`OUTCOME_THRESHOLDS`] entry.
    #[inline]
    pub fn loss_beyond(&self) -> [u64; OUTCOME_THRESHOLDS.len()] {
        self.loss_beyond
    }

    /// Counts of paths gaining more than each [`OUTCOME_THRESHOLDS`] entry.
    #[inline]
    pub fn profit_beyond(&self) -> [u64; OUTCOME_THRESHOLDS.len()] {
        self.profit_beyond
    }

    /// Count of paths where at least one annual return was clamped.
    #[inline]
    pub fn clamped_paths(&self) -> u64 {
        self.clamped_paths
    }

    /// Consumes the accumulator, returning the sorted return sample.
    pub fn into_sorted_returns(self) -> Vec<f64> {
        self.store.into_sorted()
    }

    /// Splits the accumulator into its scalar part and sorted sample.
    pub(crate) fn finish(self) -> (AccumulatorScalars, Vec<f64>) {
        let scalars = AccumulatorScalars {
            returns: self.returns,
            profit: self.profit,
            loss: self.loss,
            breakeven: self.breakeven,
            loss_beyond: self.loss_beyond,
            profit_beyond: self.profit_beyond,
            clamped_paths: self.clamped_paths,
        };
        (scalars, self.store.into_sorted())
    }
}

/// Scalar counters of a finished accumulator (sample store detached).
pub(crate) struct AccumulatorScalars {
    pub returns: MomentAccumulator<f64>,
    pub profit: u64,
    pub loss: u64,
    pub breakeven: u64,
    pub loss_beyond: [u64; OUTCOME_THRESHOLDS.len()],
    pub profit_beyond: [u64; OUTCOME_THRESHOLDS.len()],
    pub clamped_paths: u64,
}
