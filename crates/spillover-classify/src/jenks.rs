//! Fisher–Jenks natural breaks.
//!
//! Optimal partition of sorted data into `k` contiguous classes minimizing
//! the total within-class sum of squared deviations, by dynamic
//! programming in `O(n^2 k)` time and `O(n k)` space.

use smallvec::SmallVec;

use crate::breaks::Breaks;
use crate::sorted_finite;

/// Natural-breaks thresholds for `values` into `n_bins` classes.
///
/// The thresholds are the minimum, the upper bound of each class, and the
/// maximum, so with the upper-inclusive bins of [`Breaks::bin_of`] every
/// value lands in the class the optimizer put it in. When there are fewer
/// finite values than bins, only as many classes as values are formed and
/// the remaining thresholds repeat the maximum. Returns `None` if no
/// finite value remains or `n_bins` is zero.
pub fn jenks_breaks(values: &[f64], n_bins: usize) -> Option<Breaks> {
    let data = sorted_finite(values);
    if data.is_empty() || n_bins == 0 {
        return None;
    }

    let classes = n_bins.min(data.len());
    let lower = class_limits(&data, classes);

    let n = data.len();
    let mut thresholds: SmallVec<[f64; 8]> = SmallVec::from_elem(data[n - 1], n_bins + 1);
    thresholds[0] = data[0];
    let mut end = n;
    for class in (2..=classes).rev() {
        let start = lower[end][class];
        thresholds[class - 1] = data[start - 2];
        end = start - 1;
    }
    Some(Breaks::from_sorted(thresholds))
}

/// `lower[l][j]`: 1-based index of the first element of the last class in
/// the best split of `data[..l]` into `j` classes.
fn class_limits(data: &[f64], classes: usize) -> Vec<Vec<usize>> {
    let n = data.len();
    let mut lower = vec![vec![0usize; classes + 1]; n + 1];
    let mut cost = vec![vec![f64::INFINITY; classes + 1]; n + 1];

    // One element fits in exactly one class.
    lower[1][1] = 1;
    cost[1][1] = 0.0;

    // Shift by the minimum; variances are unchanged and the running sums
    // stay small.
    let origin = data[0];

    for l in 2..=n {
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        let mut ssd = 0.0;
        for m in 1..=l {
            let first = l - m + 1;
            let v = data[first - 1] - origin;
            sum += v;
            sum_sq += v * v;
            ssd = (sum_sq - sum * sum / m as f64).max(0.0);

            let prev = first - 1;
            if prev == 0 {
                continue;
            }
            for j in 2..=classes {
                let candidate = ssd + cost[prev][j - 1];
                if candidate.is_finite() && candidate <= cost[l][j] {
                    lower[l][j] = first;
                    cost[l][j] = candidate;
                }
            }
        }
        lower[l][1] = 1;
        cost[l][1] = ssd;
    }
    lower
}
