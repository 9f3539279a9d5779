//! Model configuration, validation, and loading.
//!
//! [`SpilloverConfig`] mirrors the YAML option file. Every key is optional
//! and defaults to the values the indicator has always shipped with.
//! [`validate()`](SpilloverConfig::validate) checks every option before a
//! model is constructed, so a running model never sees a bad parameter.

use std::path::Path;

use serde::{Deserialize, Serialize};

use spillover_classify::{ClassificationMethod, Classifier};
use spillover_core::ConfigError;
use spillover_propagators::{
    HeightPolicy, SpilloverEngine, DEFAULT_BASE_HEIGHT, DEFAULT_BETA0, DEFAULT_BETA1,
    DEFAULT_EXPOSURE_CEILING, DEFAULT_GAMMA, DEFAULT_RECEIVER_TYPE, DEFAULT_SENDER_TYPE,
};

use crate::presentation::Presentation;

/// Default number of classification bins.
pub const DEFAULT_N_BINS: usize = 5;
/// Default cap on presented output.
pub const DEFAULT_OUTPUT_CEILING: f64 = 1000.0;
/// Default render scale applied to presented heights.
pub const DEFAULT_SCALE: f64 = 2.0;
/// Default label of background cells.
pub const DEFAULT_BACKGROUND_TYPE: &str = "Default";
/// Default opacity of background cells.
pub const DEFAULT_BACKGROUND_ALPHA: f64 = 0.5;
/// Default opacity of every other cell.
pub const DEFAULT_UNIT_ALPHA: f64 = 0.9;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },

    /// The file parsed but an option is out of range.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Every tunable of a spillover model.
///
/// ```
/// use spillover_engine::SpilloverConfig;
///
/// let config = SpilloverConfig::from_yaml_str("gamma: 0.01\nn_bins: 7\n").unwrap();
/// assert_eq!(config.gamma, 0.01);
/// assert_eq!(config.n_bins, 7);
/// assert_eq!(config.beta1, 0.06);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpilloverConfig {
    /// Exposure decay rate per unit distance. Default: `0.004`.
    pub gamma: f64,
    /// Log-output intercept. Default: `0.0`.
    pub beta0: f64,
    /// Sensitivity of log-output to exposure. Default: `0.06`.
    pub beta1: f64,
    /// Working height of sender and receiver cells. Default: `8.0`.
    pub base_height: f64,
    /// Labels of cells that emit exposure. Default: `["Private R&D"]`.
    pub sender_types: Vec<String>,
    /// Labels of cells that receive exposure. Default: `["Academic"]`.
    pub receiver_types: Vec<String>,
    /// Where sender magnitudes come from. Default: `reset-to-base`.
    pub sender_height_policy: HeightPolicy,
    /// Number of classification bins. Default: `5`.
    pub n_bins: usize,
    /// How bin thresholds are computed. Default: `quantile`.
    pub classification_method: ClassificationMethod,
    /// Cap on exposure before the output transform. Default: `50.0`.
    pub exposure_ceiling: f64,
    /// Cap on presented output. Default: `1000.0`.
    pub output_ceiling: f64,
    /// Multiplier applied to presented heights. Default: `2.0`.
    pub scale: f64,
    /// Label of background cells, or `None` for no background.
    /// Default: `"Default"`.
    pub background_type: Option<String>,
    /// Opacity of background cells, in `[0, 1]`. Default: `0.5`.
    pub background_alpha: f64,
    /// Opacity of every other cell, in `[0, 1]`. Default: `0.9`.
    pub unit_alpha: f64,
}

impl Default for SpilloverConfig {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_GAMMA,
            beta0: DEFAULT_BETA0,
            beta1: DEFAULT_BETA1,
            base_height: DEFAULT_BASE_HEIGHT,
            sender_types: vec![DEFAULT_SENDER_TYPE.to_string()],
            receiver_types: vec![DEFAULT_RECEIVER_TYPE.to_string()],
            sender_height_policy: HeightPolicy::default(),
            n_bins: DEFAULT_N_BINS,
            classification_method: ClassificationMethod::default(),
            exposure_ceiling: DEFAULT_EXPOSURE_CEILING,
            output_ceiling: DEFAULT_OUTPUT_CEILING,
            scale: DEFAULT_SCALE,
            background_type: Some(DEFAULT_BACKGROUND_TYPE.to_string()),
            background_alpha: DEFAULT_BACKGROUND_ALPHA,
            unit_alpha: DEFAULT_UNIT_ALPHA,
        }
    }
}

impl SpilloverConfig {
    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Yaml`] if the string is not valid YAML for this
    /// schema, or [`LoadError::Config`] if an option is out of range.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LoadError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read, plus every
    /// error of [`from_yaml_str`](Self::from_yaml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Check every option.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found. Checks run in the order
    /// engine parameters, classification, presentation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = self.engine()?;
        self.classifier()?;
        Presentation::new(self, &engine)?;
        Ok(())
    }

    /// Build the spillover engine these options describe.
    ///
    /// Unlike the engine builder, an explicitly empty type list is an
    /// error here rather than a fallback to the default label.
    pub fn engine(&self) -> Result<SpilloverEngine, ConfigError> {
        if self.sender_types.is_empty() {
            return Err(ConfigError::EmptyTypeSet { role: "sender" });
        }
        if self.receiver_types.is_empty() {
            return Err(ConfigError::EmptyTypeSet { role: "receiver" });
        }
        SpilloverEngine::builder()
            .gamma(self.gamma)
            .beta0(self.beta0)
            .beta1(self.beta1)
            .base_height(self.base_height)
            .exposure_ceiling(self.exposure_ceiling)
            .sender_heights(self.sender_height_policy)
            .sender_types(self.sender_types.iter().cloned())
            .receiver_types(self.receiver_types.iter().cloned())
            .build()
    }

    /// Build the classifier these options describe.
    pub fn classifier(&self) -> Result<Classifier, ConfigError> {
        Classifier::new(self.n_bins, self.classification_method)
    }
}
