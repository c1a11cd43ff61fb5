//! Presets for the kplate plate reverb.
//!
//! A preset names a plate variant and any of its five controls, stored as
//! TOML. This crate loads and saves them, checks them against the plate's
//! parameter descriptors, and ships a set of factory presets.
//!
//! # Example
//!
//! ```rust,no_run
//! use kplate_config::{Preset, user_presets_dir, validate_preset};
//! use kplate_effects::PlateVariant;
//!
//! let preset = Preset::new("Snare Plate")
//!     .with_variant(PlateVariant::B)
//!     .with_param("damping", "6.5")
//!     .with_param("predelay", "12ms")
//!     .with_param("wetness", "30%");
//! validate_preset(&preset).unwrap();
//!
//! preset.save(user_presets_dir().join("snare_plate.toml")).unwrap();
//! let plate = Preset::load(user_presets_dir().join("snare_plate.toml"))
//!     .unwrap()
//!     .build(48000.0)
//!     .unwrap();
//! ```

mod error;
mod preset;

/// Where presets live on disk.
pub mod paths;

/// Preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{
    ensure_user_presets_dir, find_preset, list_all_presets, preset_name_from_path,
    system_presets_dir, user_presets_dir,
};
pub use preset::Preset;
pub use validation::{
    ValidationError, ValidationResult, find_param, param_names, parse_param_value,
    validate_param, validate_preset,
};

/// Resolve a preset argument: a factory preset name, a preset file name in
/// the preset directories, or a path.
///
/// Factory presets win over files of the same name.
pub fn resolve_preset(name: &str) -> Result<Preset, ConfigError> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }
    let path = find_preset(name).ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))?;
    Preset::load(path)
}
