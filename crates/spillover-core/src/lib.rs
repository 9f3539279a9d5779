//! Core types and traits for the Spillover propagation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Spillover workspace:
//! cell identifiers, planar points, borrowed cell views, the read/write
//! traits into the host grid, and the configuration error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod id;
pub mod traits;

pub use cell::{Cell, CellRef, CellUpdate, Point};
pub use error::ConfigError;
pub use id::{CellId, PassId};
pub use traits::{CellSink, CellSource};
