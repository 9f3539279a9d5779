//! Invariant checks for the spillover engine over random layouts.

use proptest::prelude::*;
use spillover_core::{Cell, CellId, CellRef, CellSource, Point};
use spillover_propagators::{
    HeightPolicy, Propagation, SpilloverEngine, DEFAULT_BASE_HEIGHT, DEFAULT_BETA0,
    DEFAULT_EXPOSURE_CEILING, DEFAULT_RECEIVER_TYPE, DEFAULT_SENDER_TYPE,
};
use spillover_space::DistanceMatrixBuilder;
use spillover_test_utils::fixtures::{self, ACADEMIC, PRIVATE_RD};

fn supplied_engine() -> SpilloverEngine {
    SpilloverEngine::builder()
        .sender_heights(HeightPolicy::UseSupplied)
        .build()
        .unwrap()
}

fn run(engine: &SpilloverEngine, cells: &[Cell]) -> Propagation {
    let views: Vec<CellRef<'_>> = cells.cells();
    let matrix = DistanceMatrixBuilder::new().build(&views);
    engine.propagate(&views, &matrix)
}

/// One receiver at the origin plus `senders` at the given offsets/heights.
fn layout(senders: &[(f64, f64, f64)]) -> Vec<Cell> {
    let mut cells = vec![Cell::new(0, ACADEMIC, Point::new(0.0, 0.0))];
    for (i, &(x, y, h)) in senders.iter().enumerate() {
        cells.push(Cell::new(i as u64 + 1, PRIVATE_RD, Point::new(x, y)).with_height(h));
    }
    cells
}

fn arb_senders() -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
    prop::collection::vec((-2000.0f64..2000.0, -2000.0f64..2000.0, 0.0f64..30.0), 1..12)
}

proptest! {
    #[test]
    fn raising_a_sender_never_lowers_exposure(
        senders in arb_senders(),
        which in 0usize..12,
        bump in 0.0f64..50.0,
    ) {
        let engine = supplied_engine();
        let before = run(&engine, &layout(&senders));

        let mut raised = senders.clone();
        let idx = which % raised.len();
        raised[idx].2 += bump;
        let after = run(&engine, &layout(&raised));

        prop_assert!(after.exposure(CellId(0)) >= before.exposure(CellId(0)));
        prop_assert!(after.output(CellId(0)) >= before.output(CellId(0)));
    }

    #[test]
    fn moving_a_sender_away_never_raises_exposure(
        senders in arb_senders(),
        which in 0usize..12,
        stretch in 1.0f64..5.0,
    ) {
        let engine = supplied_engine();
        let before = run(&engine, &layout(&senders));

        let mut moved = senders.clone();
        let idx = which % moved.len();
        moved[idx].0 *= stretch;
        moved[idx].1 *= stretch;
        let after = run(&engine, &layout(&moved));

        prop_assert!(after.exposure(CellId(0)) <= before.exposure(CellId(0)) + 1e-9);
    }

    #[test]
    fn exposure_and_output_are_bounded(seed in 0u64..1000, ceiling in 1.0f64..80.0) {
        let engine = SpilloverEngine::builder()
            .exposure_ceiling(ceiling)
            .build()
            .unwrap();
        let cells = fixtures::scattered(seed, 60, 800.0, 0.3, 0.4);
        let result = run(&engine, &cells);

        for (id, exposure) in result.exposures() {
            prop_assert!(exposure >= 0.0);
            prop_assert!(exposure <= ceiling);
            let out = result.output(id).unwrap();
            prop_assert!(out >= engine.base_height());
            prop_assert!(out <= engine.output_for(ceiling) + 1e-9);
        }
    }
}

#[test]
fn builder_defaults_are_the_exported_constants() {
    let engine = SpilloverEngine::builder().build().unwrap();
    assert!(engine.is_sender(DEFAULT_SENDER_TYPE));
    assert!(engine.is_receiver(DEFAULT_RECEIVER_TYPE));
    assert_eq!(engine.base_height(), DEFAULT_BASE_HEIGHT);
    assert_eq!(engine.exposure_ceiling(), DEFAULT_EXPOSURE_CEILING);
    assert_eq!(engine.baseline_output(), DEFAULT_BASE_HEIGHT * DEFAULT_BETA0.exp());
}

#[test]
fn zero_senders_leaves_every_receiver_at_baseline() {
    let engine = SpilloverEngine::builder().beta0(0.25).build().unwrap();
    let cells = fixtures::row_of_cells(5, 10.0, ACADEMIC);
    let result = run(&engine, &cells);

    assert!(result.is_empty());
    for cell in &cells {
        assert_eq!(result.exposure(cell.id), 0.0);
    }
    assert!((result.baseline_output() - 8.0 * 0.25f64.exp()).abs() < 1e-12);
}

#[test]
fn campus_reaches_every_academic_cell() {
    let engine = SpilloverEngine::builder().build().unwrap();
    let cells = fixtures::campus();
    let result = run(&engine, &cells);

    assert_eq!(result.sender_count(), 2);
    assert_eq!(result.receiver_count(), 4);
    assert_eq!(result.reached_count(), 4);

    // Cell 1 is directly beside the sender at cell 0; cell 5 is diagonal
    // to it.
    let near = result.exposure(CellId(1));
    let far = result.exposure(CellId(5));
    assert!(near > far);
}
