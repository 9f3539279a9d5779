//! Spillover propagation for the Spillover workspace.
//!
//! [`SpilloverEngine`] turns a cell snapshot plus a cached
//! [`DistanceMatrix`](spillover_space::DistanceMatrix) into a
//! [`Propagation`]: a decayed, capped exposure and a transformed output
//! value for every receiver that at least one sender can reach.
//!
//! # Per-pass order
//!
//! 1. Partition cells into senders and receivers by type label.
//! 2. Accumulate `exp(-gamma * d) * height(s)` per receiver.
//! 3. Cap at the exposure ceiling.
//! 4. `output = base_height * exp(beta0 + beta1 * exposure)`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod engine;
pub mod propagation;

pub use engine::{
    HeightPolicy, SpilloverEngine, SpilloverEngineBuilder, DEFAULT_BASE_HEIGHT, DEFAULT_BETA0,
    DEFAULT_BETA1, DEFAULT_EXPOSURE_CEILING, DEFAULT_GAMMA, DEFAULT_RECEIVER_TYPE,
    DEFAULT_SENDER_TYPE,
};
pub use propagation::Propagation;
