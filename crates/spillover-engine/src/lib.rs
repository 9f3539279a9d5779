//! Recompute-pass orchestration for Spillover.
//!
//! [`SpilloverConfig`] is the serde-facing option set (loadable from YAML);
//! [`SpilloverModel`] turns it into a validated engine, classifier, and
//! [`Presentation`], owns the distance cache, and runs one synchronous
//! pass per host trigger:
//!
//! read cells, rebuild distances if geometry changed, propagate, classify,
//! present, write.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod model;
pub mod presentation;

pub use config::{LoadError, SpilloverConfig};
pub use model::{PassOutcome, PassReport, SpilloverModel};
pub use presentation::{Presentation, Role};
