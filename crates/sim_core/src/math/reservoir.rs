//! Bounded-memory uniform sampling of a value stream.
//!
//! [`Reservoir`] implements Algorithm R: the first `capacity` values are
//! kept, after which each new value replaces a random slot with probability
//! `capacity / seen`. The retained items are a uniform random sample of the
//! stream, so order statistics over them approximate the stream's
//! percentiles with sampling error O(1/√capacity).
//!
//! Reservoirs merge by weighted draw: items survive in proportion to the
//! stream sizes behind each side. The merge is approximate (unlike the
//! moment folds, which are exact) but stays a uniform sample of the
//! combined stream.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed-capacity uniform random sample of a value stream.
///
/// # Examples
///
/// ```rust
/// use sim_core::Reservoir;
///
/// let mut res = Reservoir::new(100, 7);
/// for i in 0..10_000 {
///     res.push(i as f64);
/// }
/// assert_eq!(res.len(), 100);
/// assert_eq!(res.seen(), 10_000);
/// ```
pub struct Reservoir {
    capacity: usize,
    items: Vec<f64>,
    seen: u64,
    rng: StdRng,
}

impl Reservoir {
    /// Creates an empty reservoir.
    ///
    /// A zero capacity is bumped to 1 so the reservoir always holds at
    /// least one representative value.
    pub fn new(capacity: usize, seed: u64) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
            seen: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Offers one value to the reservoir.
    #[inline]
    pub fn push(&mut self, x: f64) {
        self.seen += 1;
        if self.items.len() < self.capacity {
            self.items.push(x);
        } else {
            let j = self.rng.gen_range(0..self.seen);
            if (j as usize) < self.capacity {
                self.items[j as usize] = x;
            }
        }
    }

    /// Merges another reservoir into this one.
    ///
    /// When both sides retained their full streams the merge is an exact
    /// concatenation; otherwise `capacity` survivors are drawn without
    /// replacement, each side weighted by the stream size behind it.
    pub fn merge(&mut self, other: Reservoir) {
        let total = self.seen + other.seen;

        let fully_retained =
            self.items.len() as u64 == self.seen && other.items.len() as u64 == other.seen;
        if fully_retained && self.items.len() + other.items.len() <= self.capacity {
            self.items.extend(other.items);
            self.seen = total;
            return;
        }

        let weight_a = self.seen;
        let weight_b = other.seen;
        let mut a = std::mem::take(&mut self.items);
        let mut b = other.items;
        let mut out = Vec::with_capacity(self.capacity);

        while out.len() < self.capacity && (!a.is_empty() || !b.is_empty()) {
            let pick_a = if a.is_empty() {
                false
            } else if b.is_empty() {
                true
            } else {
                self.rng.gen_range(0..weight_a + weight_b) < weight_a
            };
            let source = if pick_a { &mut a } else { &mut b };
            let idx = self.rng.gen_range(0..source.len());
            out.push(source.swap_remove(idx));
        }

        self.items = out;
        self.seen = total;
    }

    /// Returns the retained sample, in no particular order.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.items
    }

    /// Consumes the reservoir, returning the retained sample sorted
    /// ascending.
    pub fn into_sorted(mut self) -> Vec<f64> {
        self.items
            .sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        self.items
    }

    /// Number of retained values (≤ capacity).
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been retained yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of values offered across the stream(s).
    #[inline]
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// Configured capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::percentile::percentile_of_sorted;

    #[test]
    fn test_small_stream_is_retained_exactly() {
        let mut res = Reservoir::new(16, 1);
        for i in 0..10 {
            res.push(i as f64);
        }
        assert_eq!(res.len(), 10);
        assert_eq!(res.seen(), 10);
        let mut values = res.values().to_vec();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(values, (0..10).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_capacity_is_bounded() {
        let mut res = Reservoir::new(8, 2);
        for i in 0..1000 {
            res.push(i as f64);
        }
        assert_eq!(res.len(), 8);
        assert_eq!(res.seen(), 1000);
    }

    #[test]
    fn test_zero_capacity_is_bumped() {
        let res = Reservoir::new(0, 3);
        assert_eq!(res.capacity(), 1);
    }

    #[test]
    fn test_merge_of_small_streams_concatenates() {
        let mut a = Reservoir::new(32, 4);
        let mut b = Reservoir::new(32, 5);
        for i in 0..10 {
            a.push(i as f64);
            b.push((100 + i) as f64);
        }
        a.merge(b);
        assert_eq!(a.len(), 20);
        assert_eq!(a.seen(), 20);
    }

    #[test]
    fn test_merge_tracks_combined_stream_size() {
        let mut a = Reservoir::new(8, 6);
        let mut b = Reservoir::new(8, 7);
        for i in 0..500 {
            a.push(i as f64);
            b.push(i as f64 + 0.5);
        }
        a.merge(b);
        assert_eq!(a.len(), 8);
        assert_eq!(a.seen(), 1000);
    }

    #[test]
    fn test_reservoir_median_approximates_stream_median() {
        // Uniform stream over [0, 1); true median 0.5.
        let mut res = Reservoir::new(4096, 8);
        let n = 200_000u64;
        for i in 0..n {
            res.push(i as f64 / n as f64);
        }
        let sorted = res.into_sorted();
        let median = percentile_of_sorted(&sorted, 50.0).unwrap();
        // 4096 samples → std error ≈ 0.5 / sqrt(4096) ≈ 0.008.
        assert!((median - 0.5).abs() < 0.05, "median = {}", median);
    }
}
