//! Preset validation.
//!
//! Parameter names and ranges come from the plate's own descriptors
//! ([`kplate_effects::param_descriptors`]), so a preset is checked against
//! exactly what [`PlateReverb`](kplate_effects::PlateReverb) accepts.
//!
//! # Example
//!
//! ```rust
//! use kplate_config::{Preset, validate_preset};
//!
//! let preset = Preset::new("Dark")
//!     .with_param("damping", "8")
//!     .with_param("predelay", "25ms");
//! validate_preset(&preset).expect("preset should be valid");
//! ```

use kplate_core::{ParamDescriptor, ParamUnit, db_to_linear};
use kplate_effects::{PlateVariant, param_descriptors};
use thiserror::Error;

use crate::Preset;

/// Lowest sample rate a preset may ask for.
pub const MIN_SAMPLE_RATE: u32 = 8_000;
/// Highest sample rate a preset may ask for.
pub const MAX_SAMPLE_RATE: u32 = 768_000;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown plate variant.
    #[error("unknown plate variant: {0}")]
    UnknownVariant(String),

    /// Unknown parameter name.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Invalid parameter format.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// Name of the parameter.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Sample rate hint outside the supported range.
    #[error("sample rate {0} Hz outside [8000, 768000]")]
    SampleRate(u32),

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Normalize a parameter name for consistent lookup.
///
/// Lowercases and maps spaces and hyphens to underscores, so `"Low Cut"`,
/// `"low-cut"` and `"low_cut"` are the same key.
pub fn normalize_param_name(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Looks up a plate parameter by preset key or display name.
///
/// Returns the parameter index and its descriptor.
pub fn find_param(name: &str) -> Option<(usize, ParamDescriptor)> {
    let key = normalize_param_name(name);
    param_descriptors()
        .into_iter()
        .enumerate()
        .find(|(_, desc)| desc.string_id == key || normalize_param_name(desc.name) == key)
}

/// Preset keys of every plate parameter, in index order.
pub fn param_names() -> Vec<&'static str> {
    param_descriptors().iter().map(|d| d.string_id).collect()
}

/// Parse a parameter value string into the descriptor's display unit.
///
/// Supports:
/// - Plain numbers: "5", "0.25", "120" (already in display units)
/// - Percentages: "35%" (percent parameters only)
/// - Decibels: "-6dB" (percent parameters, converted to linear percent)
/// - Time: "25ms", "0.1s" (millisecond parameters, converted to ms)
pub fn parse_param_value(desc: &ParamDescriptor, value: &str) -> ValidationResult<f32> {
    let s = value.trim();
    let invalid = |reason: String| ValidationError::InvalidFormat {
        param: desc.string_id.to_string(),
        reason,
    };
    let number = |text: &str| {
        text.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid(format!("'{s}' is not a number")))
    };
    let wrong_unit = |suffix: &str| invalid(format!("'{suffix}' is not a unit of this parameter"));

    if let Some(pct) = s.strip_suffix('%') {
        return match desc.unit {
            ParamUnit::Percent => number(pct),
            _ => Err(wrong_unit("%")),
        };
    }

    if let Some(db) = s.strip_suffix("dB").or_else(|| s.strip_suffix("db")) {
        return match desc.unit {
            ParamUnit::Percent => number(db).map(|db| 100.0 * db_to_linear(db)),
            _ => Err(wrong_unit("dB")),
        };
    }

    if let Some(ms) = s.strip_suffix("ms") {
        return match desc.unit {
            ParamUnit::Milliseconds => number(ms),
            _ => Err(wrong_unit("ms")),
        };
    }

    if let Some(secs) = s.strip_suffix('s') {
        return match desc.unit {
            ParamUnit::Milliseconds => number(secs).map(|v| v * 1000.0),
            _ => Err(wrong_unit("s")),
        };
    }

    number(s)
}

/// Validate one `name = value` pair.
///
/// Returns the parameter index and the parsed value in display units.
pub fn validate_param(name: &str, value: &str) -> ValidationResult<(usize, f32)> {
    let (index, desc) =
        find_param(name).ok_or_else(|| ValidationError::UnknownParameter(name.to_string()))?;
    let parsed = parse_param_value(&desc, value)?;
    if desc.contains(parsed) {
        Ok((index, parsed))
    } else {
        Err(ValidationError::OutOfRange {
            param: desc.string_id.to_string(),
            value: parsed,
            min: desc.min,
            max: desc.max,
        })
    }
}

/// Validate a whole preset.
///
/// Every problem is collected: one error comes back as itself, several as
/// [`ValidationError::Multiple`].
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if PlateVariant::from_name(&preset.variant).is_none() {
        errors.push(ValidationError::UnknownVariant(preset.variant.clone()));
    }

    if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&preset.sample_rate) {
        errors.push(ValidationError::SampleRate(preset.sample_rate));
    }

    for (name, value) in &preset.params {
        if let Err(e) = validate_param(name, value) {
            errors.push(e);
        }
    }

    if errors.len() > 1 {
        return Err(ValidationError::Multiple(errors));
    }
    errors.pop().map_or(Ok(()), Err)
}
