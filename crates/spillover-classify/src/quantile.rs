//! Evenly spaced quantile breaks.

use smallvec::SmallVec;

use crate::breaks::Breaks;
use crate::sorted_finite;

/// Thresholds at the quantiles `0, 1/n_bins, ..., 1` of `values`.
///
/// Quantiles interpolate linearly between order statistics, so the first
/// and last thresholds are the observed minimum and maximum. Non-finite
/// values are ignored. Returns `None` if no finite value remains or
/// `n_bins` is zero.
pub fn quantile_breaks(values: &[f64], n_bins: usize) -> Option<Breaks> {
    let data = sorted_finite(values);
    if data.is_empty() || n_bins == 0 {
        return None;
    }

    let last = (data.len() - 1) as f64;
    let thresholds: SmallVec<[f64; 8]> = (0..=n_bins)
        .map(|i| {
            let pos = last * i as f64 / n_bins as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            data[lo] + (data[hi] - data[lo]) * frac
        })
        .collect();
    Some(Breaks::from_sorted(thresholds))
}
