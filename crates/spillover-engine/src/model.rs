//! The recompute pass.
//!
//! [`SpilloverModel`] is the only stateful piece of the system: it keeps
//! the distance cache and a pass counter between host triggers. Each pass
//! is synchronous and never fails; degenerate grids produce default
//! updates and are reported through [`PassReport`].

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use spillover_classify::{Breaks, Classifier};
use spillover_core::{CellId, CellSink, CellSource, CellUpdate, ConfigError, PassId};
use spillover_propagators::SpilloverEngine;
use spillover_space::DistanceCache;

use crate::config::SpilloverConfig;
use crate::presentation::{Presentation, Role};

/// Summary of one pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PassReport {
    /// Sequence number of the pass, starting at 1.
    pub pass: PassId,
    /// Cells read from the host.
    pub cell_count: usize,
    /// Sender cells among them.
    pub sender_count: usize,
    /// Receiver cells among them.
    pub receiver_count: usize,
    /// Receivers reached by at least one sender.
    pub reached_count: usize,
    /// Whether the distance matrix was (re)built for this pass.
    pub distances_rebuilt: bool,
    /// Classification thresholds, if any.
    pub breaks: Option<Breaks>,
    /// Updates accepted by the host. Zero for [`SpilloverModel::compute`].
    pub cells_written: usize,
    /// Updates the host rejected as unknown IDs.
    pub rejected_writes: usize,
}

/// Updates computed by a pass, not yet written anywhere.
#[derive(Clone, Debug)]
pub struct PassOutcome {
    /// One update per distinct cell ID, in host order.
    pub updates: Vec<(CellId, CellUpdate)>,
    /// Pass summary.
    pub report: PassReport,
}

impl PassOutcome {
    /// The update computed for `id`, if the cell was part of the pass.
    pub fn update(&self, id: CellId) -> Option<&CellUpdate> {
        self.updates
            .iter()
            .find(|(cell, _)| *cell == id)
            .map(|(_, update)| update)
    }
}

/// Validated configuration plus the state kept across passes.
///
/// ```
/// use spillover_core::{Cell, CellId, Point};
/// use spillover_engine::{SpilloverConfig, SpilloverModel};
///
/// let cells = vec![
///     Cell::new(0, "Private R&D", Point::new(0.0, 0.0)),
///     Cell::new(1, "Academic", Point::new(100.0, 0.0)),
/// ];
/// let mut model = SpilloverModel::new(SpilloverConfig::default()).unwrap();
/// let outcome = model.compute(&cells);
/// assert_eq!(outcome.report.reached_count, 1);
/// assert!(outcome.update(CellId(1)).unwrap().output.unwrap() > 8.0);
/// ```
#[derive(Debug)]
pub struct SpilloverModel {
    config: SpilloverConfig,
    engine: SpilloverEngine,
    classifier: Classifier,
    presentation: Presentation,
    distances: DistanceCache,
    last_pass: PassId,
}

impl SpilloverModel {
    /// Validate `config` and set up an empty model.
    ///
    /// # Errors
    ///
    /// Returns the first invalid option, as
    /// [`SpilloverConfig::validate`] would.
    pub fn new(config: SpilloverConfig) -> Result<Self, ConfigError> {
        let engine = config.engine()?;
        let classifier = config.classifier()?;
        let presentation = Presentation::new(&config, &engine)?;
        Ok(Self {
            config,
            engine,
            classifier,
            presentation,
            distances: DistanceCache::new(),
            last_pass: PassId::default(),
        })
    }

    /// The configuration the model was built from.
    pub fn config(&self) -> &SpilloverConfig {
        &self.config
    }

    /// The validated engine.
    pub fn engine(&self) -> &SpilloverEngine {
        &self.engine
    }

    /// The validated classifier.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// The distance cache.
    pub fn distances(&self) -> &DistanceCache {
        &self.distances
    }

    /// The most recent pass, or `PassId(0)` before the first.
    pub fn last_pass(&self) -> PassId {
        self.last_pass
    }

    /// Drop the cached distances. Call when the host knows its topology
    /// changed in a way positions alone do not reveal.
    pub fn invalidate_distances(&mut self) {
        self.distances.invalidate();
    }

    /// Run one pass over `source` and return the updates without writing
    /// them.
    pub fn compute<S>(&mut self, source: &S) -> PassOutcome
    where
        S: CellSource + ?Sized,
    {
        let pass = self.last_pass.next();
        self.last_pass = pass;

        let cells = source.cells();
        let (matrix, distances_rebuilt) = self.distances.get_or_build(&cells);
        let propagation = self.engine.propagate(&cells, matrix);

        let classification = self.classifier.classify(&propagation.output_values());
        let bins: IndexMap<CellId, usize> = propagation
            .outputs()
            .zip(classification.bins.iter())
            .filter_map(|((id, _), bin)| bin.map(|b| (id, b)))
            .collect();

        let mut seen = IndexSet::with_capacity(cells.len());
        let mut updates = Vec::with_capacity(cells.len());
        for cell in &cells {
            if !seen.insert(cell.id) {
                continue;
            }
            let role = if self.engine.is_sender(cell.type_label) {
                Role::Sender
            } else if self.engine.is_receiver(cell.type_label) {
                Role::Receiver
            } else {
                Role::Unit
            };
            let output = propagation.output(cell.id);
            let bin = bins.get(&cell.id).copied();
            updates.push((cell.id, self.presentation.present(cell, role, output, bin)));
        }

        if propagation.sender_count() == 0 {
            tracing::debug!(%pass, "no sender cells, receivers left at baseline");
        } else if propagation.receiver_count() == 0 {
            tracing::debug!(%pass, "no receiver cells");
        } else if propagation.is_empty() {
            tracing::debug!(%pass, "no receiver shares a distance record with a sender");
        }

        let report = PassReport {
            pass,
            cell_count: cells.len(),
            sender_count: propagation.sender_count(),
            receiver_count: propagation.receiver_count(),
            reached_count: propagation.reached_count(),
            distances_rebuilt,
            breaks: classification.breaks,
            cells_written: 0,
            rejected_writes: 0,
        };
        tracing::debug!(
            %pass,
            cells = report.cell_count,
            reached = report.reached_count,
            rebuilt = report.distances_rebuilt,
            "spillover pass computed"
        );
        PassOutcome { updates, report }
    }

    /// Run one pass over `grid` and write every update back to it.
    pub fn recompute<G>(&mut self, grid: &mut G) -> PassReport
    where
        G: CellSource + CellSink + ?Sized,
    {
        let PassOutcome {
            updates,
            mut report,
        } = self.compute(&*grid);

        for (id, update) in updates {
            if grid.write(id, update) {
                report.cells_written += 1;
            } else {
                report.rejected_writes += 1;
            }
        }
        if report.rejected_writes > 0 {
            tracing::warn!(
                pass = %report.pass,
                rejected = report.rejected_writes,
                "host rejected updates for unknown cells"
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spillover_core::{Cell, Point};

    fn pair() -> Vec<Cell> {
        vec![
            Cell::new(0, "Private R&D", Point::new(0.0, 0.0)),
            Cell::new(1, "Academic", Point::new(100.0, 0.0)),
            Cell::new(2, "Default", Point::new(200.0, 0.0)),
        ]
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = SpilloverConfig {
            n_bins: 0,
            ..SpilloverConfig::default()
        };
        assert_eq!(SpilloverModel::new(config).unwrap_err(), ConfigError::ZeroBins);
    }

    #[test]
    fn pass_ids_increase() {
        let mut model = SpilloverModel::new(SpilloverConfig::default()).unwrap();
        assert_eq!(model.last_pass(), PassId(0));
        assert_eq!(model.compute(&pair()).report.pass, PassId(1));
        assert_eq!(model.compute(&pair()).report.pass, PassId(2));
        assert_eq!(model.last_pass(), PassId(2));
    }

    #[test]
    fn compute_covers_every_cell_once() {
        let mut cells = pair();
        cells.push(Cell::new(1, "Academic", Point::new(900.0, 900.0)));
        let mut model = SpilloverModel::new(SpilloverConfig::default()).unwrap();
        let outcome = model.compute(&cells);

        let ids: Vec<u64> = outcome.updates.iter().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(outcome.report.cells_written, 0);
    }

    #[test]
    fn repeated_sender_id_is_not_presented_as_a_receiver() {
        let cells = vec![
            Cell::new(1, "Private R&D", Point::new(0.0, 0.0)),
            Cell::new(1, "Academic", Point::new(5.0, 0.0)),
            Cell::new(2, "Private R&D", Point::new(10.0, 0.0)),
        ];
        let mut model = SpilloverModel::new(SpilloverConfig::default()).unwrap();
        let outcome = model.compute(&cells);

        assert_eq!(outcome.report.sender_count, 2);
        assert_eq!(outcome.report.receiver_count, 0);
        assert_eq!(outcome.report.reached_count, 0);
        let first = outcome.update(CellId(1)).unwrap();
        assert_eq!(first.output, None);
        assert_eq!(first.bin, None);
        assert_eq!(first.height, 16.0);
    }

    #[test]
    fn single_receiver_takes_the_lowest_bin() {
        let mut model = SpilloverModel::new(SpilloverConfig::default()).unwrap();
        let outcome = model.compute(&pair());

        let receiver = outcome.update(CellId(1)).unwrap();
        assert_eq!(receiver.bin, Some(0));
        let breaks = outcome.report.breaks.unwrap();
        assert_eq!(breaks.n_bins(), 5);
        assert_eq!(breaks.lower(), breaks.upper());
    }

    #[test]
    fn invalidate_forces_a_rebuild() {
        let mut model = SpilloverModel::new(SpilloverConfig::default()).unwrap();
        assert!(model.compute(&pair()).report.distances_rebuilt);
        assert!(!model.compute(&pair()).report.distances_rebuilt);
        model.invalidate_distances();
        assert!(model.compute(&pair()).report.distances_rebuilt);
        assert_eq!(model.distances().build_count(), 2);
    }

    #[test]
    fn report_serializes_for_hosts() {
        let mut model = SpilloverModel::new(SpilloverConfig::default()).unwrap();
        let report = model.compute(&pair()).report;
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["pass"], 1);
        assert_eq!(json["reached_count"], 1);
        assert!(json["breaks"].is_array());
    }
}
