//! Read and write interfaces into the host grid.

use crate::cell::{Cell, CellRef, CellUpdate};
use crate::id::CellId;

/// Read-only access to the cells of the host grid.
///
/// The core never owns cells: each pass reads them through this trait,
/// derives its own working copy, and reports results through
/// [`CellSink`].
pub trait CellSource {
    /// Number of cells on the grid.
    fn cell_count(&self) -> usize;

    /// Borrow the cell at `index` (`0..cell_count()`).
    ///
    /// Returns `None` if the index is out of range or the host has no
    /// cell there.
    fn cell(&self, index: usize) -> Option<CellRef<'_>>;

    /// Snapshot every cell in index order.
    fn cells(&self) -> Vec<CellRef<'_>> {
        (0..self.cell_count()).filter_map(|i| self.cell(i)).collect()
    }
}

/// Write access to the derived attributes of host cells.
pub trait CellSink {
    /// Record the derived values for cell `id`.
    ///
    /// Returns `false` if the host has no cell with that ID.
    fn write(&mut self, id: CellId, update: CellUpdate) -> bool;
}

impl CellSource for [Cell] {
    fn cell_count(&self) -> usize {
        self.len()
    }

    fn cell(&self, index: usize) -> Option<CellRef<'_>> {
        self.get(index).map(Cell::view)
    }
}

impl CellSource for Vec<Cell> {
    fn cell_count(&self) -> usize {
        self.len()
    }

    fn cell(&self, index: usize) -> Option<CellRef<'_>> {
        self.get(index).map(Cell::view)
    }
}
