//! Turning engine results into the values written back to host cells.

use spillover_core::{CellRef, CellUpdate, ConfigError};
use spillover_propagators::SpilloverEngine;

use crate::config::SpilloverConfig;

/// Role of a cell in a pass, as far as presentation is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Emits exposure.
    Sender,
    /// Receives exposure.
    Receiver,
    /// Neither.
    Unit,
}

/// Render scale, output ceiling, background handling, and opacities.
///
/// | cell                         | height                                   |
/// |------------------------------|------------------------------------------|
/// | reached receiver             | `scale * min(output_ceiling, output)`    |
/// | unreached receiver           | `scale * min(output_ceiling, baseline)`  |
/// | background                   | `0`                                      |
/// | sender or other              | `scale * base_height`                    |
///
/// Background cells take `background_alpha`, everything else
/// `unit_alpha`. Only reached receivers carry a bin.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    scale: f64,
    output_ceiling: f64,
    base_height: f64,
    baseline_output: f64,
    background_type: Option<String>,
    background_alpha: u8,
    unit_alpha: u8,
}

impl Presentation {
    /// Validate the presentation options of `config` against `engine`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `output_ceiling` is not finite and > 0 or is below
    /// the engine's zero-exposure output, if `scale` is not finite and
    /// >= 0, or if an alpha is outside `[0, 1]`.
    pub fn new(config: &SpilloverConfig, engine: &SpilloverEngine) -> Result<Self, ConfigError> {
        if !config.output_ceiling.is_finite() || config.output_ceiling <= 0.0 {
            return Err(ConfigError::InvalidCeiling {
                name: "output_ceiling",
                value: config.output_ceiling,
            });
        }
        let baseline = engine.baseline_output();
        if config.output_ceiling < baseline {
            return Err(ConfigError::CeilingBelowBaseline {
                ceiling: config.output_ceiling,
                baseline,
            });
        }
        if !config.scale.is_finite() || config.scale < 0.0 {
            return Err(ConfigError::InvalidScale {
                value: config.scale,
            });
        }
        let background_alpha = alpha_byte("background_alpha", config.background_alpha)?;
        let unit_alpha = alpha_byte("unit_alpha", config.unit_alpha)?;

        Ok(Self {
            scale: config.scale,
            output_ceiling: config.output_ceiling,
            base_height: engine.base_height(),
            baseline_output: baseline,
            background_type: config.background_type.clone(),
            background_alpha,
            unit_alpha,
        })
    }

    /// Whether `label` marks a background cell.
    pub fn is_background(&self, label: &str) -> bool {
        self.background_type.as_deref() == Some(label)
    }

    /// Height written for a given engine output.
    pub fn presented_height(&self, output: f64) -> f64 {
        self.scale * output.min(self.output_ceiling)
    }

    /// Derive the update for one cell.
    ///
    /// `output` is the engine's value for the cell (only reached receivers
    /// have one) and `bin` its classification bin.
    pub fn present(
        &self,
        cell: &CellRef<'_>,
        role: Role,
        output: Option<f64>,
        bin: Option<usize>,
    ) -> CellUpdate {
        let background = self.is_background(cell.type_label);
        let height = match (output, role) {
            (Some(out), _) => self.presented_height(out),
            (None, _) if background => 0.0,
            (None, Role::Receiver) => self.presented_height(self.baseline_output),
            (None, _) => self.scale * self.base_height,
        };
        CellUpdate {
            height,
            output,
            bin: output.and(bin),
            alpha: if background {
                self.background_alpha
            } else {
                self.unit_alpha
            },
        }
    }
}

fn alpha_byte(name: &'static str, value: f64) -> Result<u8, ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidAlpha { name, value });
    }
    Ok((value * 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spillover_core::{Cell, Point};

    fn presentation(config: &SpilloverConfig) -> Presentation {
        let engine = config.engine().unwrap();
        Presentation::new(config, &engine).unwrap()
    }

    fn cell(label: &str) -> Cell {
        Cell::new(1, label, Point::new(0.0, 0.0)).with_height(42.0)
    }

    #[test]
    fn reached_receiver_is_scaled_and_capped() {
        let p = presentation(&SpilloverConfig::default());
        let c = cell("Academic");

        let update = p.present(&c.view(), Role::Receiver, Some(14.0), Some(3));
        assert_eq!(update.height, 28.0);
        assert_eq!(update.output, Some(14.0));
        assert_eq!(update.bin, Some(3));
        assert_eq!(update.alpha, 229);

        let update = p.present(&c.view(), Role::Receiver, Some(5000.0), Some(4));
        assert_eq!(update.height, 2000.0);
        assert_eq!(update.output, Some(5000.0));
    }

    #[test]
    fn unreached_receiver_falls_back_to_baseline() {
        let config = SpilloverConfig {
            beta0: 0.5,
            ..SpilloverConfig::default()
        };
        let p = presentation(&config);
        let update = p.present(&cell("Academic").view(), Role::Receiver, None, Some(2));

        assert!((update.height - 2.0 * 8.0 * 0.5f64.exp()).abs() < 1e-12);
        assert_eq!(update.output, None);
        assert_eq!(update.bin, None);
    }

    #[test]
    fn senders_and_units_show_base_height() {
        let p = presentation(&SpilloverConfig::default());
        let sender = p.present(&cell("Private R&D").view(), Role::Sender, None, None);
        let other = p.present(&cell("Residential").view(), Role::Unit, None, None);

        assert_eq!(sender.height, 16.0);
        assert_eq!(other.height, 16.0);
        assert_eq!(other.alpha, 229);
    }

    #[test]
    fn background_is_flat_and_translucent() {
        let p = presentation(&SpilloverConfig::default());
        let update = p.present(&cell("Default").view(), Role::Unit, None, None);
        assert_eq!(update.height, 0.0);
        assert_eq!(update.alpha, 127);
    }

    #[test]
    fn no_background_type_treats_every_cell_as_a_unit() {
        let config = SpilloverConfig {
            background_type: None,
            ..SpilloverConfig::default()
        };
        let p = presentation(&config);
        let update = p.present(&cell("Default").view(), Role::Unit, None, None);
        assert_eq!(update.height, 16.0);
        assert_eq!(update.alpha, 229);
    }

    #[test]
    fn ceiling_below_baseline_is_rejected() {
        let config = SpilloverConfig {
            output_ceiling: 5.0,
            scale: 1.0,
            ..SpilloverConfig::default()
        };
        let engine = config.engine().unwrap();
        assert_eq!(
            Presentation::new(&config, &engine),
            Err(ConfigError::CeilingBelowBaseline {
                ceiling: 5.0,
                baseline: 8.0,
            })
        );

        // Equal to the baseline is the tightest accepted ceiling.
        let config = SpilloverConfig {
            output_ceiling: 8.0,
            scale: 1.0,
            ..SpilloverConfig::default()
        };
        let p = presentation(&config);
        let receiver = p.present(&cell("Academic").view(), Role::Receiver, Some(11.04), Some(0));
        let sender = p.present(&cell("Private R&D").view(), Role::Sender, None, None);
        assert_eq!(receiver.height, 8.0);
        assert!(receiver.height >= sender.height);
    }

    #[test]
    fn alpha_bounds_are_inclusive() {
        assert_eq!(alpha_byte("unit_alpha", 0.0), Ok(0));
        assert_eq!(alpha_byte("unit_alpha", 1.0), Ok(255));
        assert!(alpha_byte("unit_alpha", f64::NAN).is_err());
    }
}
