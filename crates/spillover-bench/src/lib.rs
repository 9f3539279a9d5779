//! Benchmark profiles for the Spillover workspace.
//!
//! - [`reference_profile`]: 500 scattered cells, about the size of a large
//!   campus table
//! - [`stress_profile`]: 2000 cells, four million distance records
//! - [`reference_config`]: shipped defaults with natural-breaks bins

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use spillover_classify::ClassificationMethod;
use spillover_core::Cell;
use spillover_engine::SpilloverConfig;
use spillover_test_utils::fixtures;

/// Side of the square the profiles scatter cells over.
pub const EXTENT: f64 = 2_000.0;

/// 500 cells: 15% senders, 35% receivers, the rest background.
pub fn reference_profile(seed: u64) -> Vec<Cell> {
    fixtures::scattered(seed, 500, EXTENT, 0.15, 0.35)
}

/// 2000 cells with the same role mix as [`reference_profile`].
pub fn stress_profile(seed: u64) -> Vec<Cell> {
    fixtures::scattered(seed, 2_000, EXTENT, 0.15, 0.35)
}

/// Default configuration, classified with natural breaks (the slower
/// method).
pub fn reference_config() -> SpilloverConfig {
    SpilloverConfig {
        classification_method: ClassificationMethod::NaturalBreaks,
        ..SpilloverConfig::default()
    }
}
