//! Planar points, owned and borrowed cell views, and per-cell updates.

use serde::{Deserialize, Serialize};

use crate::id::CellId;

/// A projected planar coordinate (e.g. a cell centroid in metres).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Easting.
    pub x: f64,
    /// Northing.
    pub y: f64,
}

impl Point {
    /// Create a point from its two components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Borrowed, read-only view of one host cell.
///
/// This is what [`CellSource`](crate::CellSource) hands out. It is `Copy`
/// so a pass can snapshot the whole grid into a `Vec<CellRef>` without
/// cloning type labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellRef<'a> {
    /// Stable cell identifier.
    pub id: CellId,
    /// Type label (open set, e.g. `"Academic"`, `"Private R&D"`).
    pub type_label: &'a str,
    /// Planar centroid, if the host could resolve one.
    pub position: Option<Point>,
    /// Current height magnitude.
    pub height: f64,
}

impl CellRef<'_> {
    /// The position, if present and finite.
    pub fn valid_position(&self) -> Option<Point> {
        self.position.filter(Point::is_finite)
    }
}

/// An owned cell, used by hosts that keep cells in plain vectors and by
/// the test fixtures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Stable cell identifier.
    pub id: CellId,
    /// Type label.
    pub type_label: String,
    /// Planar centroid.
    pub position: Option<Point>,
    /// Height magnitude.
    #[serde(default)]
    pub height: f64,
}

impl Cell {
    /// Create a cell at a known position with zero height.
    pub fn new(id: u64, type_label: impl Into<String>, position: Point) -> Self {
        Self {
            id: CellId(id),
            type_label: type_label.into(),
            position: Some(position),
            height: 0.0,
        }
    }

    /// Set the height, builder style.
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Borrow this cell as a [`CellRef`].
    pub fn view(&self) -> CellRef<'_> {
        CellRef {
            id: self.id,
            type_label: &self.type_label,
            position: self.position,
            height: self.height,
        }
    }
}

/// Derived values written back to one host cell after a pass.
///
/// Colors are resolved by the host: the core only reports a bin index
/// (into the host palette) and an opacity for the host's base color.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellUpdate {
    /// Presented height (scaled and capped at the output ceiling).
    pub height: f64,
    /// Uncapped engine output, for receivers the engine reached.
    pub output: Option<f64>,
    /// Classification bin, `None` when the host should use its default color.
    pub bin: Option<usize>,
    /// Opacity for the cell's base color, `0..=255`.
    pub alpha: u8,
}
