//! The spillover engine and its builder.
//!
//! # Construction
//!
//! ```
//! use spillover_propagators::SpilloverEngine;
//!
//! let engine = SpilloverEngine::builder()
//!     .gamma(0.004)
//!     .beta1(0.06)
//!     .base_height(8.0)
//!     .sender_type("Private R&D")
//!     .receiver_type("Academic")
//!     .build()
//!     .unwrap();
//! assert!(engine.is_sender("Private R&D"));
//! ```

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use spillover_core::{CellId, CellRef, ConfigError};
use spillover_space::DistanceMatrix;

use crate::propagation::Propagation;

/// Default exposure decay rate per unit distance.
pub const DEFAULT_GAMMA: f64 = 0.004;
/// Default log-output intercept.
pub const DEFAULT_BETA0: f64 = 0.0;
/// Default sensitivity of log-output to exposure.
pub const DEFAULT_BETA1: f64 = 0.06;
/// Default working height of sender and receiver cells.
pub const DEFAULT_BASE_HEIGHT: f64 = 8.0;
/// Default cap on exposure, applied before the output transform.
pub const DEFAULT_EXPOSURE_CEILING: f64 = 50.0;
/// Default sender type label.
pub const DEFAULT_SENDER_TYPE: &str = "Private R&D";
/// Default receiver type label.
pub const DEFAULT_RECEIVER_TYPE: &str = "Academic";

/// Where sender magnitudes come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeightPolicy {
    /// Every sender emits `base_height`, whatever height the host reports.
    #[default]
    ResetToBase,
    /// Senders emit the height the host reports (negative and NaN read
    /// as zero).
    UseSupplied,
}

/// Computes distance-decayed exposure and spillover output per receiver.
///
/// Configuration is validated once by [`SpilloverEngineBuilder::build`];
/// [`propagate`](Self::propagate) never fails.
#[derive(Clone, Debug)]
pub struct SpilloverEngine {
    gamma: f64,
    beta0: f64,
    beta1: f64,
    base_height: f64,
    exposure_ceiling: f64,
    sender_heights: HeightPolicy,
    sender_types: IndexSet<String>,
    receiver_types: IndexSet<String>,
}

/// Builder for [`SpilloverEngine`].
///
/// Defaults: `gamma = 0.004`, `beta0 = 0.0`, `beta1 = 0.06`,
/// `base_height = 8.0`, `exposure_ceiling = 50.0`,
/// `sender_heights = ResetToBase`. The type sets start empty; if still
/// empty at build time they fall back to `{"Private R&D"}` and
/// `{"Academic"}`.
#[derive(Clone, Debug)]
pub struct SpilloverEngineBuilder {
    gamma: f64,
    beta0: f64,
    beta1: f64,
    base_height: f64,
    exposure_ceiling: f64,
    sender_heights: HeightPolicy,
    sender_types: IndexSet<String>,
    receiver_types: IndexSet<String>,
}

impl SpilloverEngine {
    /// Create a new builder for configuring a `SpilloverEngine`.
    pub fn builder() -> SpilloverEngineBuilder {
        SpilloverEngineBuilder {
            gamma: DEFAULT_GAMMA,
            beta0: DEFAULT_BETA0,
            beta1: DEFAULT_BETA1,
            base_height: DEFAULT_BASE_HEIGHT,
            exposure_ceiling: DEFAULT_EXPOSURE_CEILING,
            sender_heights: HeightPolicy::ResetToBase,
            sender_types: IndexSet::new(),
            receiver_types: IndexSet::new(),
        }
    }

    /// Whether cells labelled `label` emit exposure.
    pub fn is_sender(&self, label: &str) -> bool {
        self.sender_types.contains(label)
    }

    /// Whether cells labelled `label` receive exposure.
    pub fn is_receiver(&self, label: &str) -> bool {
        self.receiver_types.contains(label)
    }

    /// Decay weight of a sender at `distance`.
    pub fn decay(&self, distance: f64) -> f64 {
        (-self.gamma * distance).exp()
    }

    /// Output for a given (already capped) exposure.
    pub fn output_for(&self, exposure: f64) -> f64 {
        self.base_height * (self.beta0 + self.beta1 * exposure).exp()
    }

    /// Output at zero exposure.
    pub fn baseline_output(&self) -> f64 {
        self.output_for(0.0)
    }

    /// Working height of sender and receiver cells.
    pub fn base_height(&self) -> f64 {
        self.base_height
    }

    /// Exposure cap.
    pub fn exposure_ceiling(&self) -> f64 {
        self.exposure_ceiling
    }

    /// Run one propagation pass.
    ///
    /// `cells` is read, never modified: role cells get their working
    /// heights in a private sender index. Receivers with no sender in
    /// their row of `distances` are left out of the result.
    pub fn propagate(&self, cells: &[CellRef<'_>], distances: &DistanceMatrix) -> Propagation {
        let mut senders: IndexMap<CellId, f64> = IndexMap::new();
        let mut receivers: IndexSet<CellId> = IndexSet::new();
        let mut seen: IndexSet<CellId> = IndexSet::with_capacity(cells.len());
        for cell in cells {
            // A repeated ID keeps the role of its first occurrence.
            if !seen.insert(cell.id) {
                continue;
            }
            if self.is_sender(cell.type_label) {
                let height = match self.sender_heights {
                    HeightPolicy::ResetToBase => self.base_height,
                    HeightPolicy::UseSupplied => cell.height.max(0.0),
                };
                senders.insert(cell.id, height);
            } else if self.is_receiver(cell.type_label) {
                receivers.insert(cell.id);
            }
        }

        let mut result = Propagation {
            sender_count: senders.len(),
            receiver_count: receivers.len(),
            baseline_output: self.baseline_output(),
            ..Propagation::default()
        };
        if senders.is_empty() || receivers.is_empty() {
            tracing::debug!(
                senders = senders.len(),
                receivers = receivers.len(),
                "degenerate propagation, no exposure"
            );
            return result;
        }

        for &receiver in &receivers {
            let mut raw = 0.0;
            let mut reached = false;
            for record in distances.incoming(receiver) {
                if let Some(&height) = senders.get(&record.sender) {
                    raw += self.decay(record.distance) * height;
                    reached = true;
                }
            }
            if !reached {
                continue;
            }
            let exposure = raw.min(self.exposure_ceiling);
            result.exposure.insert(receiver, exposure);
            result.output.insert(receiver, self.output_for(exposure));
        }

        tracing::debug!(
            senders = result.sender_count,
            receivers = result.receiver_count,
            reached = result.reached_count(),
            "propagated spillovers"
        );
        result
    }
}

impl SpilloverEngineBuilder {
    /// Set the decay rate. Must be finite and > 0.
    /// Default: `0.004`.
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the log-output intercept. Must be finite and >= 0.
    /// Default: `0.0`.
    pub fn beta0(mut self, beta0: f64) -> Self {
        self.beta0 = beta0;
        self
    }

    /// Set the exposure sensitivity. Must be finite and >= 0.
    /// Default: `0.06`.
    pub fn beta1(mut self, beta1: f64) -> Self {
        self.beta1 = beta1;
        self
    }

    /// Set the working height of role cells. Must be finite and >= 0.
    /// Default: `8.0`.
    pub fn base_height(mut self, base_height: f64) -> Self {
        self.base_height = base_height;
        self
    }

    /// Set the exposure cap. Must be finite and > 0.
    /// Default: `50.0`.
    pub fn exposure_ceiling(mut self, ceiling: f64) -> Self {
        self.exposure_ceiling = ceiling;
        self
    }

    /// Set where sender magnitudes come from.
    /// Default: [`HeightPolicy::ResetToBase`].
    pub fn sender_heights(mut self, policy: HeightPolicy) -> Self {
        self.sender_heights = policy;
        self
    }

    /// Add one sender type label.
    pub fn sender_type(mut self, label: impl Into<String>) -> Self {
        self.sender_types.insert(label.into());
        self
    }

    /// Replace the sender type labels.
    pub fn sender_types<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sender_types = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Add one receiver type label.
    pub fn receiver_type(mut self, label: impl Into<String>) -> Self {
        self.receiver_types.insert(label.into());
        self
    }

    /// Replace the receiver type labels.
    pub fn receiver_types<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.receiver_types = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Build the engine, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `gamma` is not finite and > 0
    /// - `beta0` or `beta1` is not finite and >= 0
    /// - `base_height` is not finite and >= 0
    /// - `exposure_ceiling` is not finite and > 0
    /// - a label is both a sender and a receiver type
    pub fn build(self) -> Result<SpilloverEngine, ConfigError> {
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(ConfigError::InvalidDecayRate { value: self.gamma });
        }
        for (name, value) in [("beta0", self.beta0), ("beta1", self.beta1)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidCoefficient { name, value });
            }
        }
        if !self.base_height.is_finite() || self.base_height < 0.0 {
            return Err(ConfigError::InvalidBaseHeight {
                value: self.base_height,
            });
        }
        if !self.exposure_ceiling.is_finite() || self.exposure_ceiling <= 0.0 {
            return Err(ConfigError::InvalidCeiling {
                name: "exposure_ceiling",
                value: self.exposure_ceiling,
            });
        }

        let sender_types = non_empty_or(self.sender_types, DEFAULT_SENDER_TYPE);
        let receiver_types = non_empty_or(self.receiver_types, DEFAULT_RECEIVER_TYPE);
        if let Some(label) = sender_types.intersection(&receiver_types).next() {
            return Err(ConfigError::OverlappingTypes {
                label: label.clone(),
            });
        }

        Ok(SpilloverEngine {
            gamma: self.gamma,
            beta0: self.beta0,
            beta1: self.beta1,
            base_height: self.base_height,
            exposure_ceiling: self.exposure_ceiling,
            sender_heights: self.sender_heights,
            sender_types,
            receiver_types,
        })
    }
}

fn non_empty_or(labels: IndexSet<String>, fallback: &str) -> IndexSet<String> {
    if labels.is_empty() {
        IndexSet::from([fallback.to_string()])
    } else {
        labels
    }
}
