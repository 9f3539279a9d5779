//! Full ordered-pair distance enumeration.
//!
//! The matrix stores `n·(n−1)` records rather than a half matrix: the
//! engine aggregates per receiver and needs each receiver's complete
//! `(sender, distance)` list as one contiguous slice.

use std::ops::Range;

use indexmap::{IndexMap, IndexSet};
use spillover_core::{CellId, CellRef, Point};

/// Distance from one sender cell to one receiver cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceRecord {
    /// Cell the influence comes from.
    pub sender: CellId,
    /// Cell the influence arrives at.
    pub receiver: CellId,
    /// Euclidean planar distance, `>= 0`.
    pub distance: f64,
}

/// All pairwise distances between the coordinate-bearing cells of one
/// grid topology, grouped by receiver.
///
/// Invariants:
/// - no record has `sender == receiver`;
/// - for every record `(a, b, d)` there is a record `(b, a, d)`;
/// - `incoming(r)` lists every other cell exactly once.
#[derive(Clone, Debug, Default)]
pub struct DistanceMatrix {
    records: Vec<DistanceRecord>,
    by_receiver: IndexMap<CellId, Range<usize>>,
}

impl DistanceMatrix {
    /// Total number of ordered pairs.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when fewer than two cells had valid coordinates.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct cells covered by the matrix.
    pub fn cell_count(&self) -> usize {
        self.by_receiver.len()
    }

    /// Iterate over every record, grouped by receiver.
    pub fn iter(&self) -> impl Iterator<Item = &DistanceRecord> + '_ {
        self.records.iter()
    }

    /// Cells covered by the matrix, in build order.
    pub fn receivers(&self) -> impl Iterator<Item = CellId> + '_ {
        self.by_receiver.keys().copied()
    }

    /// Every `(sender, distance)` record arriving at `receiver`.
    ///
    /// Empty if the receiver is not covered (no valid coordinate, or the
    /// matrix is empty).
    pub fn incoming(&self, receiver: CellId) -> &[DistanceRecord] {
        match self.by_receiver.get(&receiver) {
            Some(range) => &self.records[range.clone()],
            None => &[],
        }
    }

    /// Distance between two distinct covered cells.
    pub fn distance(&self, a: CellId, b: CellId) -> Option<f64> {
        self.incoming(b)
            .iter()
            .find(|r| r.sender == a)
            .map(|r| r.distance)
    }

    /// Whether `id` is covered by the matrix.
    pub fn contains(&self, id: CellId) -> bool {
        self.by_receiver.contains_key(&id)
    }
}

/// Builds a [`DistanceMatrix`] from a snapshot of cells.
///
/// Cells without a finite position are skipped. If the same ID appears
/// twice, the first occurrence wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct DistanceMatrixBuilder;

impl DistanceMatrixBuilder {
    /// Create a builder.
    pub fn new() -> Self {
        Self
    }

    /// Enumerate every ordered pair of distinct, coordinate-bearing cells.
    ///
    /// Returns an empty matrix if fewer than two cells qualify.
    pub fn build(&self, cells: &[CellRef<'_>]) -> DistanceMatrix {
        let points = located_cells(cells);
        if points.len() < 2 {
            return DistanceMatrix::default();
        }

        let n = points.len();
        let mut records = Vec::with_capacity(n * (n - 1));
        let mut by_receiver = IndexMap::with_capacity(n);

        for (j, &(receiver, rp)) in points.iter().enumerate() {
            let start = records.len();
            for (i, &(sender, sp)) in points.iter().enumerate() {
                if i == j {
                    continue;
                }
                records.push(DistanceRecord {
                    sender,
                    receiver,
                    distance: sp.distance(&rp),
                });
            }
            by_receiver.insert(receiver, start..records.len());
        }

        DistanceMatrix {
            records,
            by_receiver,
        }
    }
}

/// Unique `(id, position)` pairs for cells with a finite position.
pub(crate) fn located_cells(cells: &[CellRef<'_>]) -> Vec<(CellId, Point)> {
    let mut seen = IndexSet::with_capacity(cells.len());
    let mut out = Vec::with_capacity(cells.len());
    for cell in cells {
        let Some(position) = cell.valid_position() else {
            continue;
        };
        if !seen.insert(cell.id) {
            tracing::warn!(cell = %cell.id, "duplicate cell id, keeping first occurrence");
            continue;
        }
        out.push((cell.id, position));
    }
    out
}
