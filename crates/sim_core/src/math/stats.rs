//! Streaming moment accumulation.
//!
//! [`MomentAccumulator`] folds a value stream into raw power sums plus
//! min/max, from which mean, variance, skewness and excess kurtosis are
//! derived on demand. Accumulators merge with an associative, commutative
//! operation, so partial results from independent batches can be combined
//! in any order without changing the outcome.

use num_traits::Float;

/// Single-pass fold of count, Σx, Σx², Σx³, Σx⁴, min and max.
///
/// The accumulator never stores the stream itself; memory is O(1) per
/// accumulator regardless of how many values are folded in.
///
/// # Merge Discipline
///
/// `merge` is exact: power sums add, counts add, min/max combine. Folding
/// a stream through any batch split and merge order produces identical
/// state (up to floating-point addition order in the power sums).
///
/// # Examples
///
/// ```rust
/// use sim_core::MomentAccumulator;
///
/// let mut acc: MomentAccumulator<f64> = MomentAccumulator::new();
/// for x in [1.0, 2.0, 3.0, 4.0] {
///     acc.add(x);
/// }
/// assert_eq!(acc.count(), 4);
/// assert_eq!(acc.mean(), 2.5);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MomentAccumulator<T: Float> {
    count: u64,
    sum: T,
    sum_sq: T,
    sum_cube: T,
    sum_quad: T,
    min: T,
    max: T,
}

impl<T: Float> Default for MomentAccumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> MomentAccumulator<T> {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: T::zero(),
            sum_sq: T::zero(),
            sum_cube: T::zero(),
            sum_quad: T::zero(),
            min: T::infinity(),
            max: T::neg_infinity(),
        }
    }

    /// Folds one value into the accumulator.
    #[inline]
    pub fn add(&mut self, x: T) {
        let x2 = x * x;
        self.count += 1;
        self.sum = self.sum + x;
        self.sum_sq = self.sum_sq + x2;
        self.sum_cube = self.sum_cube + x2 * x;
        self.sum_quad = self.sum_quad + x2 * x2;
        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }

    /// Merges another accumulator into this one.
    ///
    /// Associative and commutative; see the type-level docs.
    pub fn merge(&mut self, other: &Self) {
        self.count += other.count;
        self.sum = self.sum + other.sum;
        self.sum_sq = self.sum_sq + other.sum_sq;
        self.sum_cube = self.sum_cube + other.sum_cube;
        self.sum_quad = self.sum_quad + other.sum_quad;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Returns the number of folded values.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns `true` if no values have been folded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the minimum folded value, or +∞ for an empty accumulator.
    #[inline]
    pub fn min(&self) -> T {
        self.min
    }

    /// Returns the maximum folded value, or −∞ for an empty accumulator.
    #[inline]
    pub fn max(&self) -> T {
        self.max
    }

    fn n(&self) -> T {
        T::from(self.count).unwrap_or_else(T::zero)
    }

    /// Arithmetic mean. Zero for an empty accumulator.
    pub fn mean(&self) -> T {
        if self.count == 0 {
            return T::zero();
        }
        self.sum / self.n()
    }

    /// Population variance (second central moment). Zero when fewer than
    /// two values have been folded.
    pub fn variance(&self) -> T {
        if self.count < 2 {
            return T::zero();
        }
        let mean = self.mean();
        let var = self.sum_sq / self.n() - mean * mean;
        // Raw-moment cancellation can dip slightly below zero.
        var.max(T::zero())
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> T {
        self.variance().sqrt()
    }

    /// Population skewness: E[((x − μ)/σ)³]. Zero when the standard
    /// deviation vanishes.
    pub fn skewness(&self) -> T {
        if self.count < 2 {
            return T::zero();
        }
        let n = self.n();
        let m1 = self.mean();
        let m2 = self.variance();
        if m2 <= T::zero() {
            return T::zero();
        }
        let two = T::from(2.0).unwrap_or_else(T::one);
        let three = T::from(3.0).unwrap_or_else(T::one);
        let m3 = self.sum_cube / n - three * m1 * (self.sum_sq / n) + two * m1 * m1 * m1;
        m3 / m2.powf(T::from(1.5).unwrap_or_else(T::one))
    }

    /// Population excess kurtosis: E[((x − μ)/σ)⁴] − 3. Zero when the
    /// standard deviation vanishes.
    pub fn excess_kurtosis(&self) -> T {
        if self.count < 2 {
            return T::zero();
        }
        let n = self.n();
        let m1 = self.mean();
        let m2 = self.variance();
        if m2 <= T::zero() {
            return T::zero();
        }
        let three = T::from(3.0).unwrap_or_else(T::one);
        let four = T::from(4.0).unwrap_or_else(T::one);
        let six = T::from(6.0).unwrap_or_else(T::one);
        let m1_sq = m1 * m1;
        let m4 = self.sum_quad / n - four * m1 * (self.sum_cube / n)
            + six * m1_sq * (self.sum_sq / n)
            - three * m1_sq * m1_sq;
        m4 / (m2 * m2) - three
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fold(values: &[f64]) -> MomentAccumulator<f64> {
        let mut acc = MomentAccumulator::new();
        for &x in values {
            acc.add(x);
        }
        acc
    }

    #[test]
    fn test_empty_accumulator() {
        let acc: MomentAccumulator<f64> = MomentAccumulator::new();
        assert!(acc.is_empty());
        assert_eq!(acc.count(), 0);
        assert_eq!(acc.mean(), 0.0);
        assert_eq!(acc.variance(), 0.0);
    }

    #[test]
    fn test_basic_moments() {
        let acc = fold(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(acc.count(), 8);
        assert_relative_eq!(acc.mean(), 5.0);
        assert_relative_eq!(acc.variance(), 4.0);
        assert_relative_eq!(acc.std_dev(), 2.0);
        assert_eq!(acc.min(), 2.0);
        assert_eq!(acc.max(), 9.0);
    }

    #[test]
    fn test_symmetric_sample_has_zero_skewness() {
        let acc = fold(&[-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_relative_eq!(acc.skewness(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_right_skewed_sample() {
        let acc = fold(&[1.0, 1.0, 1.0, 1.0, 10.0]);
        assert!(acc.skewness() > 1.0);
    }

    #[test]
    fn test_kurtosis_of_constant_is_zero() {
        let acc = fold(&[3.0, 3.0, 3.0, 3.0]);
        assert_eq!(acc.excess_kurtosis(), 0.0);
    }

    #[test]
    fn test_two_point_kurtosis() {
        // Symmetric two-point distribution has kurtosis 1, excess -2.
        let acc = fold(&[-1.0, 1.0, -1.0, 1.0]);
        assert_relative_eq!(acc.excess_kurtosis(), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_merge_matches_single_fold() {
        let values: Vec<f64> = (0..100).map(|i| (i as f64) * 0.37 - 18.5).collect();
        let whole = fold(&values);

        let mut left = fold(&values[..37]);
        let right = fold(&values[37..]);
        left.merge(&right);

        assert_eq!(left.count(), whole.count());
        assert_relative_eq!(left.mean(), whole.mean(), epsilon = 1e-12);
        assert_relative_eq!(left.variance(), whole.variance(), epsilon = 1e-12);
        assert_eq!(left.min(), whole.min());
        assert_eq!(left.max(), whole.max());
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let mut acc = fold(&[1.0, 2.0, 3.0]);
        let before = acc;
        acc.merge(&MomentAccumulator::new());
        assert_eq!(acc.count(), before.count());
        assert_eq!(acc.mean(), before.mean());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn merge_is_commutative(
                a in proptest::collection::vec(-1e6f64..1e6, 1..50),
                b in proptest::collection::vec(-1e6f64..1e6, 1..50),
            ) {
                let mut ab = fold(&a);
                ab.merge(&fold(&b));
                let mut ba = fold(&b);
                ba.merge(&fold(&a));

                prop_assert_eq!(ab.count(), ba.count());
                prop_assert!((ab.mean() - ba.mean()).abs() <= 1e-9 * ab.mean().abs().max(1.0));
                prop_assert_eq!(ab.min(), ba.min());
                prop_assert_eq!(ab.max(), ba.max());
            }

            #[test]
            fn variance_is_non_negative(
                xs in proptest::collection::vec(-1e6f64..1e6, 0..100),
            ) {
                prop_assert!(fold(&xs).variance() >= 0.0);
            }
        }
    }
}
