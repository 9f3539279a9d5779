//! Result of one propagation pass.

use indexmap::IndexMap;
use spillover_core::CellId;

/// Exposure and output for every receiver reached by at least one sender.
///
/// Receivers that no sender reaches are absent from both maps: the engine
/// keeps inner-join semantics and leaves their fallback to the caller
/// (see [`baseline_output`](Self::baseline_output)). Both maps iterate in
/// the order receivers appeared in the input snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Propagation {
    pub(crate) exposure: IndexMap<CellId, f64>,
    pub(crate) output: IndexMap<CellId, f64>,
    pub(crate) sender_count: usize,
    pub(crate) receiver_count: usize,
    pub(crate) baseline_output: f64,
}

impl Propagation {
    /// Capped exposure of `receiver`, or `0.0` if no sender reached it.
    pub fn exposure(&self, receiver: CellId) -> f64 {
        self.exposure.get(&receiver).copied().unwrap_or(0.0)
    }

    /// Uncapped output of `receiver`, if a sender reached it.
    pub fn output(&self, receiver: CellId) -> Option<f64> {
        self.output.get(&receiver).copied()
    }

    /// All `(receiver, output)` pairs, in input order.
    pub fn outputs(&self) -> impl Iterator<Item = (CellId, f64)> + '_ {
        self.output.iter().map(|(&id, &v)| (id, v))
    }

    /// Output values only, in input order. This is what gets classified.
    pub fn output_values(&self) -> Vec<f64> {
        self.output.values().copied().collect()
    }

    /// All `(receiver, exposure)` pairs, in input order.
    pub fn exposures(&self) -> impl Iterator<Item = (CellId, f64)> + '_ {
        self.exposure.iter().map(|(&id, &v)| (id, v))
    }

    /// Output at zero exposure: `base_height * exp(beta0)`.
    pub fn baseline_output(&self) -> f64 {
        self.baseline_output
    }

    /// Number of sender cells in the snapshot.
    pub fn sender_count(&self) -> usize {
        self.sender_count
    }

    /// Number of receiver cells in the snapshot.
    pub fn receiver_count(&self) -> usize {
        self.receiver_count
    }

    /// Number of receivers reached by at least one sender.
    pub fn reached_count(&self) -> usize {
        self.output.len()
    }

    /// `true` when no receiver was reached.
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }
}
