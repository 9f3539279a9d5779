//! Pairwise planar distances for Spillover.
//!
//! [`DistanceMatrixBuilder`] enumerates every ordered pair of distinct,
//! coordinate-bearing cells and records their Euclidean distance, grouped
//! by receiver. The result is quadratic in cell count, so it is held by a
//! [`DistanceCache`] and only rebuilt when the grid geometry changes
//! (detected through a [`GeometryFingerprint`]) or on explicit
//! invalidation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod matrix;

pub use cache::{DistanceCache, GeometryFingerprint};
pub use matrix::{DistanceMatrix, DistanceMatrixBuilder, DistanceRecord};
