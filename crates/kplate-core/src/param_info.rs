//! Parameter introspection for discoverable effect controls.
//!
//! The [`ParameterInfo`] trait is the parameter-read interface of an effect:
//! count, describe, read and write controls by index. The CLI and the preset
//! validator drive the plate entirely through it, so neither needs to know
//! the plate's field names.
//!
//! Each control is described by a [`ParamDescriptor`] carrying its display
//! names, unit, range, default, a stable [`ParamId`] and a string id used as
//! the preset key.
//!
//! # Example
//!
//! ```rust
//! use kplate_core::{ParameterInfo, ParamDescriptor, ParamUnit, ParamId};
//!
//! struct Pad {
//!     amount: f32,
//! }
//!
//! impl ParameterInfo for Pad {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::new("Pad", "Pad", ParamUnit::None, 0.0, 1.0, 1.0)
//!                 .with_id(ParamId(10), "pad")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.amount,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.amount = value.clamp(0.0, 1.0);
//!         }
//!     }
//! }
//!
//! let mut pad = Pad { amount: 1.0 };
//! assert_eq!(pad.find_param_by_name("pad"), Some(0));
//! pad.set_param(0, 3.0);
//! assert_eq!(pad.get_param(0), 1.0);
//! ```

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` never changes for a given parameter. The plate
/// uses `100..=104`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Trait for effects that expose introspectable parameters.
///
/// Parameters are addressed by a zero-based index that is stable for the
/// lifetime of the effect. Out-of-range indices are ignored by setters and
/// read as `0.0`.
pub trait ParameterInfo {
    /// Number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, `None` past the end.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index`.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the parameter at `index`, clamped to its descriptor's range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Finds a parameter index by name, case-insensitive.
    ///
    /// Matches the display name, the short name and the string id, with
    /// spaces and underscores treated alike (`"low cut"`, `"Low_Cut"` and
    /// `"low_cut"` all match).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                names_match(desc.name, name)
                    || names_match(desc.short_name, name)
                    || names_match(desc.string_id, name)
            })
        })
    }

    /// Stable id for the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Finds a parameter index by its stable id. O(n); setup paths only.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

fn names_match(a: &str, b: &str) -> bool {
    !a.is_empty()
        && a.len() == b.len()
        && a.bytes().zip(b.bytes()).all(|(x, y)| {
            let x = if x == b'_' { b' ' } else { x.to_ascii_lowercase() };
            let y = if y == b'_' { b' ' } else { y.to_ascii_lowercase() };
            x == y
        })
}

/// Metadata for a single parameter.
///
/// `short_name` stays at 8 characters or less so it fits narrow tables.
///
/// # Example
///
/// ```rust
/// use kplate_core::{ParamDescriptor, ParamId};
///
/// let predelay = ParamDescriptor::time_ms("Predelay", "PreDly", 0.0, 500.0, 0.0)
///     .with_id(ParamId(103), "predelay");
/// assert_eq!(predelay.clamp(900.0), 500.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name.
    pub name: &'static str,
    /// Short display name, at most 8 characters.
    pub short_name: &'static str,
    /// Unit used when formatting the value.
    pub unit: ParamUnit,
    /// Minimum value.
    pub min: f32,
    /// Maximum value.
    pub max: f32,
    /// Value after construction.
    pub default: f32,
    /// Stable numeric id. `ParamId(0)` means unassigned.
    pub id: ParamId,
    /// Stable string id, used as the preset key. Empty means unassigned.
    pub string_id: &'static str,
}

impl ParamDescriptor {
    /// Descriptor without ids.
    pub fn new(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Time parameter in milliseconds.
    pub fn time_ms(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::new(name, short_name, ParamUnit::Milliseconds, min, max, default)
    }

    /// Sets the stable numeric and string ids.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Clamps a value to the range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Whether `value` lies inside the range (inclusive).
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Unit type for parameter display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Milliseconds.
    Milliseconds,
    /// Percentage.
    Percent,
    /// Dimensionless.
    None,
}

impl ParamUnit {
    /// Suffix appended when displaying a value.
    ///
    /// ```rust
    /// use kplate_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Milliseconds.suffix(), " ms");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Percent => "%",
            ParamUnit::None => "",
        }
    }
}
