//! Percentile computation over sorted samples.
//!
//! Uses linear interpolation between order statistics: for level `p` over
//! `n` sorted values the fractional rank is `p/100 × (n−1)`, and the result
//! interpolates between the floor and ceiling ranks.

/// Percentile levels reported by the simulation summary, in ascending order.
pub const PERCENTILE_LEVELS: [u8; 9] = [1, 5, 10, 25, 50, 75, 90, 95, 99];

/// Computes the `level` percentile of an ascending-sorted slice.
///
/// Returns `None` for an empty slice or a level outside `[0, 100]`.
///
/// # Examples
///
/// ```rust
/// use sim_core::percentile_of_sorted;
///
/// let sorted = [10.0, 20.0, 30.0, 40.0, 50.0];
/// assert_eq!(percentile_of_sorted(&sorted, 50.0), Some(30.0));
/// assert_eq!(percentile_of_sorted(&sorted, 25.0), Some(20.0));
/// assert_eq!(percentile_of_sorted(&sorted, 0.0), Some(10.0));
/// assert_eq!(percentile_of_sorted(&sorted, 100.0), Some(50.0));
/// ```
pub fn percentile_of_sorted(sorted: &[f64], level: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&level) {
        return None;
    }
    if sorted.len() == 1 {
        return Some(sorted[0]);
    }

    let rank = level / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }

    let weight = rank - lower as f64;
    Some(sorted[lower] + weight * (sorted[upper] - sorted[lower]))
}
