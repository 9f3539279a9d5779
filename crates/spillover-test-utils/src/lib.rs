//! Test utilities and mock grids for Spillover development.
//!
//! Provides [`MockGrid`], an in-memory host grid implementing both
//! [`CellSource`] and [`CellSink`], and the [`fixtures`] module with
//! reusable cell layouts.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use indexmap::IndexMap;

use spillover_core::{Cell, CellId, CellRef, CellSink, CellSource, CellUpdate};

/// In-memory host grid.
///
/// Backed by a `Vec<Cell>` for reads and an `IndexMap<CellId, CellUpdate>`
/// recording the last update written to each cell. Writes to IDs that are
/// not on the grid are rejected and counted.
#[derive(Debug, Default)]
pub struct MockGrid {
    cells: Vec<Cell>,
    updates: IndexMap<CellId, CellUpdate>,
    rejected_writes: usize,
    write_count: usize,
}

impl MockGrid {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            ..Self::default()
        }
    }

    /// Add a cell to the grid.
    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Look up a cell by ID for in-place edits (moving, relabelling).
    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.iter_mut().find(|c| c.id == id)
    }

    /// Remove a cell by ID, returning it if present.
    pub fn remove(&mut self, id: CellId) -> Option<Cell> {
        let idx = self.cells.iter().position(|c| c.id == id)?;
        Some(self.cells.remove(idx))
    }

    /// The owned cells.
    pub fn cells_owned(&self) -> &[Cell] {
        &self.cells
    }

    /// Last update written to `id`.
    pub fn update(&self, id: CellId) -> Option<&CellUpdate> {
        self.updates.get(&id)
    }

    /// All recorded updates, in first-write order.
    pub fn updates(&self) -> &IndexMap<CellId, CellUpdate> {
        &self.updates
    }

    /// Number of writes to unknown IDs.
    pub fn rejected_writes(&self) -> usize {
        self.rejected_writes
    }

    /// Number of accepted writes over the grid's lifetime.
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    /// Forget all recorded updates.
    pub fn clear_updates(&mut self) {
        self.updates.clear();
    }
}

impl CellSource for MockGrid {
    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn cell(&self, index: usize) -> Option<CellRef<'_>> {
        self.cells.get(index).map(Cell::view)
    }
}

impl CellSink for MockGrid {
    fn write(&mut self, id: CellId, update: CellUpdate) -> bool {
        if !self.cells.iter().any(|c| c.id == id) {
            self.rejected_writes += 1;
            return false;
        }
        self.updates.insert(id, update);
        self.write_count += 1;
        true
    }
}
