//! Error types for the Spillover workspace.
//!
//! Only configuration can fail: degenerate grids (no senders, no
//! receivers, too few coordinates, nothing to classify) resolve to empty
//! or default results instead of errors.

use thiserror::Error;

/// Invalid configuration, detected before any pass runs.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Decay rate is NaN, infinite, zero, or negative.
    #[error("gamma must be finite and > 0, got {value}")]
    InvalidDecayRate {
        /// The rejected value.
        value: f64,
    },
    /// A model coefficient is NaN, infinite, or negative.
    #[error("{name} must be finite and >= 0, got {value}")]
    InvalidCoefficient {
        /// Which coefficient (`beta0`, `beta1`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Base height is NaN, infinite, or negative.
    #[error("base_height must be finite and >= 0, got {value}")]
    InvalidBaseHeight {
        /// The rejected value.
        value: f64,
    },
    /// A ceiling is NaN, infinite, zero, or negative.
    #[error("{name} must be finite and > 0, got {value}")]
    InvalidCeiling {
        /// Which ceiling (`exposure_ceiling`, `output_ceiling`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Output ceiling would present reached receivers below base height.
    #[error("output_ceiling must be >= the zero-exposure output {baseline}, got {ceiling}")]
    CeilingBelowBaseline {
        /// The rejected ceiling.
        ceiling: f64,
        /// `base_height * exp(beta0)`.
        baseline: f64,
    },
    /// Bin count is zero.
    #[error("n_bins must be at least 1")]
    ZeroBins,
    /// Classification method name is not recognized.
    #[error("unknown classification method '{value}' (expected quantile, natural-breaks, or none)")]
    UnknownClassificationMethod {
        /// The rejected name.
        value: String,
    },
    /// No type labels were given for a role.
    #[error("{role} type set is empty")]
    EmptyTypeSet {
        /// Which role (`sender`, `receiver`).
        role: &'static str,
    },
    /// A type label is configured as both sender and receiver.
    #[error("type label '{label}' is both a sender and a receiver type")]
    OverlappingTypes {
        /// The shared label.
        label: String,
    },
    /// Render scale is NaN, infinite, or negative.
    #[error("scale must be finite and >= 0, got {value}")]
    InvalidScale {
        /// The rejected value.
        value: f64,
    },
    /// An opacity is outside `[0, 1]`.
    #[error("{name} must be in [0.0, 1.0], got {value}")]
    InvalidAlpha {
        /// Which opacity (`background_alpha`, `unit_alpha`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}
