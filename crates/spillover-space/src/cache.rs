//! Distance matrix cache with geometry-based invalidation.
//!
//! [`DistanceCache`] lazily builds a [`DistanceMatrix`] on first use and
//! hands out the cached matrix on later calls as long as the cells'
//! geometry is unchanged. Heights and type labels are per-pass churn and
//! do not affect the cache: only IDs and positions do.

use std::hash::{DefaultHasher, Hash, Hasher};

use spillover_core::CellRef;

use crate::matrix::{located_cells, DistanceMatrix, DistanceMatrixBuilder};

/// Fingerprint of the geometry of a cell snapshot.
///
/// Hashes the ID and position bit patterns of every coordinate-bearing
/// cell, in order, plus their count as a cheap first check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryFingerprint {
    cell_count: usize,
    hash: u64,
}

impl GeometryFingerprint {
    /// Fingerprint the geometry of `cells`.
    pub fn of(cells: &[CellRef<'_>]) -> Self {
        let located = located_cells(cells);
        let mut hasher = DefaultHasher::new();
        for (id, p) in &located {
            id.hash(&mut hasher);
            p.x.to_bits().hash(&mut hasher);
            p.y.to_bits().hash(&mut hasher);
        }
        Self {
            cell_count: located.len(),
            hash: hasher.finish(),
        }
    }

    /// Number of coordinate-bearing cells.
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }
}

#[derive(Debug)]
struct CachedMatrix {
    matrix: DistanceMatrix,
    fingerprint: GeometryFingerprint,
}

/// Owned cache around a [`DistanceMatrix`].
///
/// # Invalidation
///
/// The matrix is rebuilt when:
/// - No matrix has been built yet.
/// - The snapshot's [`GeometryFingerprint`] differs from the cached one
///   (a cell was added, removed, or moved).
/// - [`invalidate`](Self::invalidate) or [`rebuild`](Self::rebuild) is
///   called explicitly.
///
/// All mutation goes through `&mut self`, so a rebuild can never overlap
/// a reader holding the matrix returned by
/// [`get_or_build`](Self::get_or_build).
#[derive(Debug, Default)]
pub struct DistanceCache {
    builder: DistanceMatrixBuilder,
    cached: Option<CachedMatrix>,
    builds: u64,
}

impl DistanceCache {
    /// Create an empty cache. Nothing is built until first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached matrix, rebuilding if the geometry changed.
    ///
    /// The flag is `true` when this call (re)built the matrix.
    pub fn get_or_build(&mut self, cells: &[CellRef<'_>]) -> (&DistanceMatrix, bool) {
        let fingerprint = GeometryFingerprint::of(cells);
        if self
            .cached
            .as_ref()
            .is_some_and(|c| c.fingerprint != fingerprint)
        {
            self.cached = None;
        }

        let mut rebuilt = false;
        let builder = self.builder;
        let builds = &mut self.builds;
        let cached = self.cached.get_or_insert_with(|| {
            rebuilt = true;
            *builds += 1;
            let matrix = builder.build(cells);
            tracing::info!(
                cells = matrix.cell_count(),
                pairs = matrix.len(),
                "built distance matrix"
            );
            CachedMatrix {
                matrix,
                fingerprint,
            }
        });
        (&cached.matrix, rebuilt)
    }

    /// Unconditionally rebuild from `cells`.
    pub fn rebuild(&mut self, cells: &[CellRef<'_>]) -> &DistanceMatrix {
        self.cached = None;
        self.get_or_build(cells).0
    }

    /// Drop the cached matrix, forcing a rebuild on next use.
    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            tracing::debug!("distance matrix invalidated");
        }
    }

    /// Whether a matrix is currently cached.
    pub fn is_built(&self) -> bool {
        self.cached.is_some()
    }

    /// The cached matrix, if any.
    pub fn matrix(&self) -> Option<&DistanceMatrix> {
        self.cached.as_ref().map(|c| &c.matrix)
    }

    /// How many times a matrix has been built over the cache's lifetime.
    pub fn build_count(&self) -> u64 {
        self.builds
    }
}
