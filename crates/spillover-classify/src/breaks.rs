//! Threshold sequences and value-to-bin lookup.

use serde::Serialize;
use smallvec::SmallVec;

/// `n_bins + 1` non-decreasing, finite thresholds.
///
/// Bin `i` covers `(breaks[i], breaks[i + 1]]`, except that bin 0 also
/// takes everything at or below `breaks[0]` and the last bin everything
/// above the top break. Most palettes have fewer than eight colors, so
/// thresholds are kept inline.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Breaks(SmallVec<[f64; 8]>);

impl Breaks {
    /// Validate a threshold sequence.
    ///
    /// Returns `None` unless there are at least two thresholds, all
    /// finite and non-decreasing.
    pub fn new(thresholds: impl IntoIterator<Item = f64>) -> Option<Self> {
        let t: SmallVec<[f64; 8]> = thresholds.into_iter().collect();
        if t.len() < 2 || t.iter().any(|v| !v.is_finite()) {
            return None;
        }
        if t.windows(2).any(|w| w[1] < w[0]) {
            return None;
        }
        Some(Self(t))
    }

    /// Wrap thresholds computed from sorted data, smoothing out any
    /// rounding step-downs with a running maximum.
    pub(crate) fn from_sorted(mut t: SmallVec<[f64; 8]>) -> Self {
        debug_assert!(t.len() >= 2);
        for i in 1..t.len() {
            if t[i] < t[i - 1] {
                t[i] = t[i - 1];
            }
        }
        Self(t)
    }

    /// Number of bins (`len - 1`, always at least 1).
    pub fn n_bins(&self) -> usize {
        self.0.len() - 1
    }

    /// The thresholds.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Lowest threshold.
    pub fn lower(&self) -> f64 {
        self.0[0]
    }

    /// Highest threshold.
    pub fn upper(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    /// Bin index for `value`, always in `[0, n_bins - 1]`.
    ///
    /// Finds the smallest `i` with `breaks[i] >= value` and returns
    /// `i - 1`, clamped at both ends: a value equal to the lowest break
    /// is bin 0, not -1.
    pub fn bin_of(&self, value: f64) -> usize {
        let i = self.0.partition_point(|b| *b < value);
        i.saturating_sub(1).min(self.n_bins() - 1)
    }
}

/// Free-function form of [`Breaks::bin_of`].
pub fn bin_of(value: f64, breaks: &Breaks) -> usize {
    breaks.bin_of(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaks(t: &[f64]) -> Breaks {
        Breaks::new(t.iter().copied()).unwrap()
    }

    #[test]
    fn new_rejects_short_sequences() {
        assert!(Breaks::new(Vec::<f64>::new()).is_none());
        assert!(Breaks::new([1.0]).is_none());
    }

    #[test]
    fn new_rejects_decreasing_or_non_finite() {
        assert!(Breaks::new([1.0, 0.5]).is_none());
        assert!(Breaks::new([0.0, f64::NAN]).is_none());
        assert!(Breaks::new([0.0, f64::INFINITY]).is_none());
        assert!(Breaks::new([1.0, 1.0, 2.0]).is_some());
    }

    #[test]
    fn bins_are_upper_inclusive() {
        let b = breaks(&[0.0, 10.0, 20.0, 30.0]);
        assert_eq!(b.n_bins(), 3);
        assert_eq!(b.bin_of(5.0), 0);
        assert_eq!(b.bin_of(10.0), 0);
        assert_eq!(b.bin_of(10.5), 1);
        assert_eq!(b.bin_of(20.0), 1);
        assert_eq!(b.bin_of(30.0), 2);
    }

    #[test]
    fn lowest_break_maps_to_bin_zero() {
        let b = breaks(&[0.0, 10.0, 20.0]);
        assert_eq!(b.bin_of(0.0), 0);
        assert_eq!(b.bin_of(-5.0), 0);
    }

    #[test]
    fn values_above_top_break_map_to_last_bin() {
        let b = breaks(&[0.0, 10.0, 20.0]);
        assert_eq!(b.bin_of(1e9), 1);
    }

    #[test]
    fn collapsed_breaks_resolve_to_bin_zero() {
        // Single observed value: every threshold equal.
        let b = breaks(&[4.0, 4.0, 4.0, 4.0]);
        assert_eq!(b.bin_of(4.0), 0);
        assert_eq!(b.lower(), b.upper());
    }

    #[test]
    fn from_sorted_smooths_step_downs() {
        let b = Breaks::from_sorted(SmallVec::from_slice(&[1.0, 2.0, 1.999_999, 3.0]));
        assert_eq!(b.as_slice(), &[1.0, 2.0, 2.0, 3.0]);
    }

    #[test]
    fn free_function_matches_method() {
        let b = breaks(&[0.0, 1.0, 2.0]);
        assert_eq!(bin_of(1.5, &b), b.bin_of(1.5));
    }

    #[test]
    fn serializes_as_plain_array() {
        let b = breaks(&[0.0, 1.5, 3.0]);
        assert_eq!(serde_json::to_string(&b).unwrap(), "[0.0,1.5,3.0]");
    }
}
