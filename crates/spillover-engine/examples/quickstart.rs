//! Spillover quickstart: one campus, three recompute passes.
//!
//! Demonstrates:
//!   1. Loading a configuration from YAML
//!   2. Running a pass against an in-memory host grid
//!   3. Reading back heights, bins, and the pass report
//!   4. Moving a lab and watching the distance cache rebuild
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example quickstart

use spillover_core::{Cell, CellId, CellSink, CellSource, CellUpdate, Point};
use spillover_engine::{SpilloverConfig, SpilloverModel};
use tracing_subscriber::EnvFilter;

const CONFIG: &str = "\
gamma: 0.004
beta1: 0.06
base_height: 8
n_bins: 5
classification_method: natural-breaks
";

// ─── Host grid ──────────────────────────────────────────────────
//
// A host only has to hand out cells and accept updates. This one keeps
// both in plain vectors.

struct Campus {
    cells: Vec<Cell>,
    updates: Vec<(CellId, CellUpdate)>,
}

impl CellSource for Campus {
    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn cell(&self, index: usize) -> Option<spillover_core::CellRef<'_>> {
        self.cells.get(index).map(Cell::view)
    }
}

impl CellSink for Campus {
    fn write(&mut self, id: CellId, update: CellUpdate) -> bool {
        if !self.cells.iter().any(|c| c.id == id) {
            return false;
        }
        self.updates.push((id, update));
        true
    }
}

fn campus() -> Campus {
    let mut cells = Vec::new();
    for row in 0..6u64 {
        for col in 0..6u64 {
            let id = row * 6 + col;
            let label = match (row, col) {
                (0, 0) | (5, 5) => "Private R&D",
                (r, c) if (r + c) % 4 == 1 => "Academic",
                _ => "Default",
            };
            let position = Point::new(col as f64 * 120.0, row as f64 * 120.0);
            cells.push(Cell::new(id, label, position));
        }
    }
    Campus {
        cells,
        updates: Vec::new(),
    }
}

fn print_receivers(campus: &Campus) {
    for (id, update) in &campus.updates {
        if let Some(output) = update.output {
            println!(
                "  cell {id:>2}: output {output:>6.2}  height {:>6.2}  bin {}",
                update.height,
                update.bin.map_or("-".to_string(), |b| b.to_string())
            );
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let config = SpilloverConfig::from_yaml_str(CONFIG)?;
    let mut model = SpilloverModel::new(config)?;
    let mut grid = campus();

    let report = model.recompute(&mut grid);
    println!(
        "pass {}: {} senders, {} receivers reached, breaks {:?}",
        report.pass,
        report.sender_count,
        report.reached_count,
        report.breaks.as_ref().map(|b| b.as_slice().to_vec())
    );
    print_receivers(&grid);

    // Same geometry: the distance matrix is reused.
    grid.updates.clear();
    let report = model.recompute(&mut grid);
    println!("pass {}: distances rebuilt = {}", report.pass, report.distances_rebuilt);

    // Move the far lab next to the centre of campus.
    if let Some(lab) = grid.cells.iter_mut().find(|c| c.id == CellId(35)) {
        lab.position = Some(Point::new(300.0, 300.0));
    }
    grid.updates.clear();
    let report = model.recompute(&mut grid);
    println!("pass {}: distances rebuilt = {}", report.pass, report.distances_rebuilt);
    print_receivers(&grid);

    Ok(())
}
