//! Method selection and whole-pass classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use spillover_core::ConfigError;

use crate::breaks::Breaks;
use crate::jenks::jenks_breaks;
use crate::quantile::quantile_breaks;

/// How thresholds are derived from a pass's outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationMethod {
    /// Evenly spaced quantiles.
    #[default]
    Quantile,
    /// Fisher–Jenks natural breaks.
    NaturalBreaks,
    /// No classification: every cell keeps the default color.
    #[serde(rename = "none")]
    Disabled,
}

impl ClassificationMethod {
    /// Configuration name of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quantile => "quantile",
            Self::NaturalBreaks => "natural-breaks",
            Self::Disabled => "none",
        }
    }
}

impl fmt::Display for ClassificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassificationMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quantile" => Ok(Self::Quantile),
            "natural-breaks" | "natural_breaks" | "jenks" => Ok(Self::NaturalBreaks),
            "none" => Ok(Self::Disabled),
            _ => Err(ConfigError::UnknownClassificationMethod {
                value: s.to_string(),
            }),
        }
    }
}

/// Thresholds for `values` under `method`.
///
/// `None` when `method` is [`Disabled`](ClassificationMethod::Disabled),
/// `n_bins` is zero, or `values` has no finite entry.
pub fn compute_breaks(values: &[f64], n_bins: usize, method: ClassificationMethod) -> Option<Breaks> {
    match method {
        ClassificationMethod::Quantile => quantile_breaks(values, n_bins),
        ClassificationMethod::NaturalBreaks => jenks_breaks(values, n_bins),
        ClassificationMethod::Disabled => None,
    }
}

/// Breaks and per-value bins for one pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classification {
    /// Thresholds, if any could be computed.
    pub breaks: Option<Breaks>,
    /// Bin of each input value, parallel to the input. `None` where no
    /// breaks exist or the value is not finite.
    pub bins: Vec<Option<usize>>,
}

impl Classification {
    /// Number of values that received a bin.
    pub fn binned_count(&self) -> usize {
        self.bins.iter().filter(|b| b.is_some()).count()
    }
}

/// A validated bin count paired with a method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classifier {
    n_bins: usize,
    method: ClassificationMethod,
}

impl Classifier {
    /// Create a classifier. Fails if `n_bins` is zero.
    pub fn new(n_bins: usize, method: ClassificationMethod) -> Result<Self, ConfigError> {
        if n_bins == 0 {
            return Err(ConfigError::ZeroBins);
        }
        Ok(Self { n_bins, method })
    }

    /// Configured bin count.
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// Configured method.
    pub fn method(&self) -> ClassificationMethod {
        self.method
    }

    /// Compute breaks from `values` and bin each of them.
    pub fn classify(&self, values: &[f64]) -> Classification {
        let breaks = compute_breaks(values, self.n_bins, self.method);
        let bins = match &breaks {
            Some(b) => values
                .iter()
                .map(|&v| v.is_finite().then(|| b.bin_of(v)))
                .collect(),
            None => vec![None; values.len()],
        };
        if let Some(b) = &breaks {
            tracing::trace!(method = %self.method, breaks = ?b.as_slice(), "classified pass");
        }
        Classification { breaks, bins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_round_trip_through_from_str() {
        for method in [
            ClassificationMethod::Quantile,
            ClassificationMethod::NaturalBreaks,
            ClassificationMethod::Disabled,
        ] {
            assert_eq!(method.to_string().parse::<ClassificationMethod>(), Ok(method));
        }
        assert_eq!("Jenks".parse::<ClassificationMethod>(), Ok(ClassificationMethod::NaturalBreaks));
        assert_eq!(
            "kmeans".parse::<ClassificationMethod>(),
            Err(ConfigError::UnknownClassificationMethod {
                value: "kmeans".to_string()
            })
        );
    }

    #[test]
    fn serde_uses_config_names() {
        let json = serde_json::to_string(&ClassificationMethod::Disabled).unwrap();
        assert_eq!(json, "\"none\"");
        let parsed: ClassificationMethod = serde_json::from_str("\"natural-breaks\"").unwrap();
        assert_eq!(parsed, ClassificationMethod::NaturalBreaks);
    }

    #[test]
    fn zero_bins_is_rejected() {
        assert_eq!(
            Classifier::new(0, ClassificationMethod::Quantile),
            Err(ConfigError::ZeroBins)
        );
    }

    #[test]
    fn disabled_method_bins_nothing() {
        let c = Classifier::new(5, ClassificationMethod::Disabled).unwrap();
        let result = c.classify(&[1.0, 2.0, 3.0]);
        assert!(result.breaks.is_none());
        assert_eq!(result.bins, vec![None, None, None]);
        assert_eq!(result.binned_count(), 0);
    }

    #[test]
    fn empty_input_gives_no_breaks() {
        let c = Classifier::new(5, ClassificationMethod::Quantile).unwrap();
        let result = c.classify(&[]);
        assert!(result.breaks.is_none());
        assert!(result.bins.is_empty());
    }

    #[test]
    fn bins_are_parallel_to_input() {
        let c = Classifier::new(3, ClassificationMethod::NaturalBreaks).unwrap();
        let values = [21.0, 1.0, f64::NAN, 11.0, 2.0, 22.0, 10.0, 3.0, 12.0, 20.0];
        let result = c.classify(&values);

        assert_eq!(result.breaks.as_ref().unwrap().as_slice(), &[1.0, 3.0, 12.0, 22.0]);
        assert_eq!(
            result.bins,
            vec![
                Some(2),
                Some(0),
                None,
                Some(1),
                Some(0),
                Some(2),
                Some(1),
                Some(0),
                Some(1),
                Some(2)
            ]
        );
        assert_eq!(result.binned_count(), 9);
    }

    #[test]
    fn compute_breaks_dispatches_on_method() {
        let values: Vec<f64> = (1..=9).map(f64::from).collect();
        assert_eq!(
            compute_breaks(&values, 3, ClassificationMethod::Quantile),
            quantile_breaks(&values, 3)
        );
        assert_eq!(
            compute_breaks(&values, 3, ClassificationMethod::NaturalBreaks),
            jenks_breaks(&values, 3)
        );
        assert_eq!(compute_breaks(&values, 3, ClassificationMethod::Disabled), None);
    }
}
