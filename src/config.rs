//! TOML-based household configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::sim::resample::parse_freq;

/// Maximum number of residents a household can be configured with.
pub const MAX_RESIDENTS: usize = 5;

/// Top-level household configuration parsed from TOML.
///
/// All fields have defaults matching a two-person household. Load from
/// TOML with [`HouseholdConfig::from_toml_file`] or use a named preset.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HouseholdConfig {
    /// Household composition and random seed.
    pub household: HouseholdSection,
    /// Output shape, frequency, and resampling policy.
    pub output: OutputSection,
    /// Stochastic-activation calibration scalars.
    pub calibration: CalibrationSection,
}

/// Household composition and random seed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HouseholdSection {
    /// Number of residents (1 to [`MAX_RESIDENTS`]).
    pub residents: usize,
    /// Master random seed fixing the whole stochastic sequence.
    pub seed: u64,
}

impl Default for HouseholdSection {
    fn default() -> Self {
        Self {
            residents: 2,
            seed: 42,
        }
    }
}

/// Output shape, frequency, and resampling policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    /// Output resampling granularity (e.g. `"60min"`, `"2h"`).
    pub freq: String,
    /// Averaging resampling instead of hold-last-value.
    pub resample_mean: bool,
    /// Per-device output table instead of a single total series.
    pub resolved_load: bool,
    /// Enables the separate hot-water accumulation path.
    pub hot_water: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            freq: "60min".to_string(),
            resample_mean: false,
            resolved_load: false,
            hot_water: false,
        }
    }
}

/// Stochastic-activation calibration scalars.
///
/// These tune the long-run average activation rate per device class
/// without code changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalibrationSection {
    /// Bulb activation-weight scalar.
    pub bulb_scalar: f64,
    /// Appliance activation-weight scalar.
    pub appliance_scalar: f64,
    /// Irradiance below which lighting can switch on (W/m²).
    pub irradiance_threshold_wm2: f64,
    /// Mean burn duration per lighting switch-on event (minutes).
    pub mean_bulb_burn_min: f64,
}

impl Default for CalibrationSection {
    fn default() -> Self {
        Self {
            bulb_scalar: 0.008,
            appliance_scalar: 0.02,
            irradiance_threshold_wm2: 60.0,
            mean_bulb_burn_min: 20.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"household.residents"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl HouseholdConfig {
    /// Returns the single-occupant preset.
    pub fn single() -> Self {
        Self {
            household: HouseholdSection {
                residents: 1,
                ..HouseholdSection::default()
            },
            ..Self::default()
        }
    }

    /// Returns the two-person default preset.
    pub fn couple() -> Self {
        Self::default()
    }

    /// Returns the four-person family preset.
    pub fn family() -> Self {
        Self {
            household: HouseholdSection {
                residents: 4,
                ..HouseholdSection::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["single", "couple", "family"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "single" => Ok(Self::single()),
            "couple" => Ok(Self::couple()),
            "family" => Ok(Self::family()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML
    /// is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains
    /// unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let h = &self.household;
        if h.residents == 0 || h.residents > MAX_RESIDENTS {
            errors.push(ConfigError {
                field: "household.residents".into(),
                message: format!("must be between 1 and {MAX_RESIDENTS}, got {}", h.residents),
            });
        }

        if let Err(e) = parse_freq(&self.output.freq) {
            errors.push(e);
        }

        let c = &self.calibration;
        if c.bulb_scalar <= 0.0 {
            errors.push(ConfigError {
                field: "calibration.bulb_scalar".into(),
                message: "must be > 0".into(),
            });
        }
        if c.appliance_scalar <= 0.0 {
            errors.push(ConfigError {
                field: "calibration.appliance_scalar".into(),
                message: "must be > 0".into(),
            });
        }
        if c.irradiance_threshold_wm2 < 0.0 {
            errors.push(ConfigError {
                field: "calibration.irradiance_threshold_wm2".into(),
                message: "must be >= 0".into(),
            });
        }
        if c.mean_bulb_burn_min < 1.0 {
            errors.push(ConfigError {
                field: "calibration.mean_bulb_burn_min".into(),
                message: "must be >= 1".into(),
            });
        }

        errors
    }
}
