//! Reusable cell layouts.
//!
//! - [`row_of_cells`]: `n` cells on the x axis, evenly spaced.
//! - [`tiled_grid`]: a rectangular lattice with a labelling function.
//! - [`campus`]: a 4x4 block mixing every role, for end-to-end passes.
//! - [`scattered`]: seeded random layout for property and bench runs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use spillover_core::{Cell, Point};

/// Receiver type label used by the default configuration.
pub const ACADEMIC: &str = "Academic";
/// Sender type label used by the default configuration.
pub const PRIVATE_RD: &str = "Private R&D";
/// Background type label used by the default configuration.
pub const BACKGROUND: &str = "Default";
/// A type label with no role in the model.
pub const RESIDENTIAL: &str = "Residential";

/// `n` cells with IDs `0..n` at `(i * spacing, 0)`, all with `label`.
pub fn row_of_cells(n: u64, spacing: f64, label: &str) -> Vec<Cell> {
    (0..n)
        .map(|i| Cell::new(i, label, Point::new(i as f64 * spacing, 0.0)))
        .collect()
}

/// A `rows x cols` lattice with IDs in row-major order and centroids at
/// `(c * spacing, r * spacing)`. `label` picks the type of each cell.
pub fn tiled_grid(
    rows: u32,
    cols: u32,
    spacing: f64,
    label: impl Fn(u32, u32) -> &'static str,
) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(rows as usize * cols as usize);
    for r in 0..rows {
        for c in 0..cols {
            let id = u64::from(r) * u64::from(cols) + u64::from(c);
            let position = Point::new(f64::from(c) * spacing, f64::from(r) * spacing);
            cells.push(Cell::new(id, label(r, c), position));
        }
    }
    cells
}

/// A 4x4 block at 100-unit spacing:
///
/// ```text
///   R&D  Acad  Def  Def
///   Acad Acad  Def  Res
///   Def  Def   Def  Acad
///   Res  Def   Def  R&D
/// ```
///
/// Every cell carries a nonzero height so tests can check that role
/// cells are reset to the base height.
pub fn campus() -> Vec<Cell> {
    const LAYOUT: [[&str; 4]; 4] = [
        [PRIVATE_RD, ACADEMIC, BACKGROUND, BACKGROUND],
        [ACADEMIC, ACADEMIC, BACKGROUND, RESIDENTIAL],
        [BACKGROUND, BACKGROUND, BACKGROUND, ACADEMIC],
        [RESIDENTIAL, BACKGROUND, BACKGROUND, PRIVATE_RD],
    ];
    tiled_grid(4, 4, 100.0, |r, c| LAYOUT[r as usize][c as usize])
        .into_iter()
        .map(|cell| cell.with_height(3.0))
        .collect()
}

/// `n` cells scattered uniformly over `[0, extent)^2`.
///
/// Roughly `sender_share` of them are senders, `receiver_share` are
/// receivers, the rest are background. Deterministic for a given seed.
pub fn scattered(seed: u64, n: u64, extent: f64, sender_share: f64, receiver_share: f64) -> Vec<Cell> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|id| {
            let x = rng.random_range(0.0..extent);
            let y = rng.random_range(0.0..extent);
            let roll: f64 = rng.random();
            let label = if roll < sender_share {
                PRIVATE_RD
            } else if roll < sender_share + receiver_share {
                ACADEMIC
            } else {
                BACKGROUND
            };
            Cell::new(id, label, Point::new(x, y)).with_height(rng.random_range(0.0..20.0))
        })
        .collect()
}
