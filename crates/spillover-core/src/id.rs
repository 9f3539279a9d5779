//! Strongly-typed identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a cell on the host grid.
///
/// Unique and stable for as long as the grid topology does not change.
/// The core never allocates cell IDs; they are handed in by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(pub u64);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CellId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Monotonically increasing recompute pass counter.
///
/// Incremented each time the host triggers a recompute on a model.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PassId(pub u64);

impl PassId {
    /// The pass that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PassId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
