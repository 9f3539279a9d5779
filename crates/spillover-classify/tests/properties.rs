//! Break invariants over arbitrary value sets.

use proptest::prelude::*;
use spillover_classify::{compute_breaks, ClassificationMethod, Classifier};

fn arb_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..1.0e4, 1..80)
}

fn arb_method() -> impl Strategy<Value = ClassificationMethod> {
    prop_oneof![
        Just(ClassificationMethod::Quantile),
        Just(ClassificationMethod::NaturalBreaks),
    ]
}

proptest! {
    #[test]
    fn breaks_are_sorted_and_span_the_data(
        values in arb_values(),
        n_bins in 1usize..10,
        method in arb_method(),
    ) {
        let breaks = compute_breaks(&values, n_bins, method).unwrap();
        let t = breaks.as_slice();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        prop_assert_eq!(t.len(), n_bins + 1);
        prop_assert!(t.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(t[0], min);
        prop_assert!((t[n_bins] - max).abs() <= 1e-9 * max.abs().max(1.0));
    }

    #[test]
    fn every_value_gets_a_bin_in_range(
        values in arb_values(),
        n_bins in 1usize..10,
        method in arb_method(),
    ) {
        let classifier = Classifier::new(n_bins, method).unwrap();
        let result = classifier.classify(&values);

        prop_assert_eq!(result.bins.len(), values.len());
        for bin in &result.bins {
            let bin = bin.unwrap();
            prop_assert!(bin < n_bins);
        }
    }

    #[test]
    fn bins_preserve_value_order(
        values in arb_values(),
        n_bins in 1usize..10,
        method in arb_method(),
    ) {
        let breaks = compute_breaks(&values, n_bins, method).unwrap();
        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);
        let bins: Vec<usize> = sorted.iter().map(|&v| breaks.bin_of(v)).collect();
        prop_assert!(bins.windows(2).all(|w| w[0] <= w[1]));
    }
}
