//! Spillover: distance-decayed knowledge spillovers on a typed cell grid.
//!
//! Receiver cells (academic departments, by default) gain output in
//! proportion to their exposure to sender cells (private R&D labs), where
//! exposure decays exponentially with distance. This is the top-level
//! facade crate re-exporting the public API of every Spillover sub-crate.
//!
//! # Quick start
//!
//! ```rust
//! use spillover::prelude::*;
//!
//! let cells = vec![
//!     Cell::new(0, "Private R&D", Point::new(0.0, 0.0)),
//!     Cell::new(1, "Academic", Point::new(150.0, 0.0)),
//!     Cell::new(2, "Academic", Point::new(600.0, 0.0)),
//!     Cell::new(3, "Default", Point::new(300.0, 0.0)),
//! ];
//!
//! let mut model = SpilloverModel::new(SpilloverConfig::default()).unwrap();
//! let outcome = model.compute(&cells);
//!
//! let near = outcome.update(CellId(1)).unwrap();
//! let far = outcome.update(CellId(2)).unwrap();
//! assert!(near.output > far.output);
//! assert_eq!(outcome.update(CellId(3)).unwrap().height, 0.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `spillover-core` | IDs, cells, host traits, `ConfigError` |
//! | [`space`] | `spillover-space` | Distance matrix and its cache |
//! | [`propagators`] | `spillover-propagators` | Exposure and output engine |
//! | [`classify`] | `spillover-classify` | Quantile and natural-breaks bins |
//! | [`engine`] | `spillover-engine` | Configuration and recompute passes |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`spillover-core`).
///
/// Host grids implement [`types::CellSource`] and [`types::CellSink`].
pub use spillover_core as types;

/// Pairwise planar distances (`spillover-space`).
pub use spillover_space as space;

/// Distance-decayed exposure and output (`spillover-propagators`).
pub use spillover_propagators as propagators;

/// Output classification (`spillover-classify`).
pub use spillover_classify as classify;

/// Configuration and pass orchestration (`spillover-engine`).
pub use spillover_engine as engine;

/// Common imports for typical Spillover usage.
///
/// ```rust
/// use spillover::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use spillover_core::{
        Cell, CellId, CellRef, CellSink, CellSource, CellUpdate, ConfigError, PassId, Point,
    };

    // Space
    pub use spillover_space::{DistanceCache, DistanceMatrix, DistanceMatrixBuilder};

    // Engine and classification
    pub use spillover_classify::{Breaks, ClassificationMethod, Classifier};
    pub use spillover_propagators::{HeightPolicy, Propagation, SpilloverEngine};

    // Passes
    pub use spillover_engine::{
        LoadError, PassOutcome, PassReport, SpilloverConfig, SpilloverModel,
    };
}
