//! Discretization of continuous outputs into color bins.
//!
//! [`compute_breaks`] turns a set of values into `n_bins + 1`
//! non-decreasing thresholds ([`Breaks`]) using either evenly spaced
//! quantiles or Fisher–Jenks natural breaks; [`bin_of`] maps a value onto
//! the half-open interval `(breaks[i-1], breaks[i]]` it falls in.
//! [`Classifier`] bundles a validated bin count and method and classifies
//! a whole pass at once.
//!
//! Breaks are recomputed from scratch every pass, so bins are relative:
//! a cell may change color when other cells' values move.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod breaks;
pub mod classifier;
pub mod jenks;
pub mod quantile;

pub use breaks::{bin_of, Breaks};
pub use classifier::{compute_breaks, Classification, ClassificationMethod, Classifier};
pub use jenks::jenks_breaks;
pub use quantile::quantile_breaks;

/// Finite values of `values`, sorted ascending.
pub(crate) fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut data: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    data.sort_by(f64::total_cmp);
    data
}
