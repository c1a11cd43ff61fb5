//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use kplate_core::ParameterInfo;
use kplate_effects::{
    PARAM_DAMPING, PARAM_INPUT_PAD, PARAM_LOW_CUT, PARAM_PREDELAY, PARAM_WETNESS, PlateControls,
    PlateReverb, PlateVariant,
};

use crate::error::ConfigError;
use crate::validation::{ValidationError, find_param, parse_param_value};

/// A stored plate setting.
///
/// Presets are TOML files naming a plate variant and any of the five
/// controls. Missing controls keep their defaults. Values are strings in the
/// parameter's display unit, optionally with a unit suffix.
///
/// # TOML Format
///
/// ```toml
/// name = "Vocal Plate"
/// description = "Bright, short plate for lead vocals"
/// variant = "d"
/// sample_rate = 48000
///
/// [params]
/// damping = "3.5"
/// low_cut = "1.5"
/// predelay = "30ms"
/// wetness = "22%"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Plate variant name (`a`, `b`, `c` or `d`).
    #[serde(default = "default_variant")]
    pub variant: String,

    /// Sample rate hint (defaults to 48000).
    /// The plate follows whatever rate it is actually run at.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Control values keyed by parameter name.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

fn default_variant() -> String {
    PlateVariant::default().name().to_string()
}

fn default_sample_rate() -> u32 {
    48000
}

impl Preset {
    /// Create a new preset for plate A with default controls.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            variant: default_variant(),
            sample_rate: default_sample_rate(),
            params: BTreeMap::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the plate variant.
    pub fn with_variant(mut self, variant: PlateVariant) -> Self {
        self.variant = variant.name().to_string();
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Add a parameter to the preset.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set a parameter value.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Get a raw parameter value.
    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(|s| s.as_str())
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The plate variant this preset names.
    pub fn plate_variant(&self) -> Result<PlateVariant, ConfigError> {
        PlateVariant::from_name(&self.variant)
            .ok_or_else(|| ConfigError::UnknownVariant(self.variant.clone()))
    }

    /// Parses every parameter into `(index, value)` in display units.
    ///
    /// Values outside a parameter's range are kept; the plate clamps them.
    fn resolved_params(&self) -> Result<Vec<(usize, f32)>, ConfigError> {
        self.params
            .iter()
            .map(|(name, value)| {
                let (index, desc) = find_param(name)
                    .ok_or_else(|| ConfigError::invalid_parameter(name, "unknown parameter"))?;
                let parsed = parse_param_value(&desc, value).map_err(|e| match e {
                    ValidationError::InvalidFormat { reason, .. } => {
                        ConfigError::invalid_parameter(name, reason)
                    }
                    other => ConfigError::invalid_parameter(name, other.to_string()),
                })?;
                Ok((index, parsed))
            })
            .collect()
    }

    /// Resolves the parameters into plate controls.
    ///
    /// Unnamed controls keep their defaults and every value is clamped into
    /// its range.
    pub fn controls(&self) -> Result<PlateControls, ConfigError> {
        let mut controls = PlateControls::default();
        for (index, value) in self.resolved_params()? {
            let value = f64::from(value);
            match index {
                PARAM_INPUT_PAD => controls.input_pad = value / 100.0,
                PARAM_DAMPING => controls.damping = value,
                PARAM_LOW_CUT => controls.low_cut = value,
                PARAM_PREDELAY => controls.predelay = value / 1000.0,
                PARAM_WETNESS => controls.wetness = value / 100.0,
                _ => {}
            }
        }
        Ok(controls.clamped())
    }

    /// Applies variant and parameters to an existing plate.
    ///
    /// Switching variant resets the plate; the parameters alone do not.
    pub fn apply(&self, plate: &mut PlateReverb) -> Result<(), ConfigError> {
        let variant = self.plate_variant()?;
        let params = self.resolved_params()?;
        if plate.variant() != variant {
            plate.set_variant(variant);
        }
        for (index, value) in params {
            plate.set_param(index, value);
        }
        Ok(())
    }

    /// Build a plate at `sample_rate` from this preset.
    pub fn build(&self, sample_rate: f32) -> Result<PlateReverb, ConfigError> {
        let mut plate = PlateReverb::with_variant(self.plate_variant()?, sample_rate);
        plate.set_controls(self.controls()?);
        Ok(plate)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
