//! Factory presets bundled with kplate.
//!
//! One preset per plate character at its stock settings, plus a few
//! starting points for common jobs. They are embedded as TOML and parsed on
//! request, so they go through the same path as user files.

use crate::Preset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "plate_a",
    "plate_b",
    "plate_c",
    "plate_d",
    "vocal_plate",
    "drum_room",
    "long_tail",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("plate_a", PLATE_A_PRESET),
    ("plate_b", PLATE_B_PRESET),
    ("plate_c", PLATE_C_PRESET),
    ("plate_d", PLATE_D_PRESET),
    ("vocal_plate", VOCAL_PLATE_PRESET),
    ("drum_room", DRUM_ROOM_PRESET),
    ("long_tail", LONG_TAIL_PRESET),
];

const PLATE_A_PRESET: &str = r#"
name = "Plate A"
description = "Balanced plate, stock settings"
variant = "a"
sample_rate = 48000
"#;

const PLATE_B_PRESET: &str = r#"
name = "Plate B"
description = "Bright, tight plate, stock settings"
variant = "b"
sample_rate = 48000
"#;

const PLATE_C_PRESET: &str = r#"
name = "Plate C"
description = "Dark, dense plate, stock settings"
variant = "c"
sample_rate = 48000
"#;

const PLATE_D_PRESET: &str = r#"
name = "Plate D"
description = "Large plate with input shaping, stock settings"
variant = "d"
sample_rate = 48000
"#;

const VOCAL_PLATE_PRESET: &str = r#"
name = "Vocal Plate"
description = "Bright plate with a short gap so consonants stay in front"
variant = "d"
sample_rate = 48000

[params]
damping = "3.5"
low_cut = "1.5"
predelay = "30ms"
wetness = "22%"
"#;

const DRUM_ROOM_PRESET: &str = r#"
name = "Drum Room"
description = "Short, damped plate that thickens kit and percussion"
variant = "b"
sample_rate = 48000

[params]
input_pad = "-3dB"
damping = "8"
low_cut = "2.5"
predelay = "0ms"
wetness = "30%"
"#;

const LONG_TAIL_PRESET: &str = r#"
name = "Long Tail"
description = "Open, slowly decaying wash for pads and ambience"
variant = "c"
sample_rate = 48000

[params]
damping = "0.5"
low_cut = "0.5"
predelay = "80ms"
wetness = "45%"
"#;

/// Get all factory presets.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by name.
///
/// Matches the internal identifier or the display name, case-insensitive.
///
/// # Example
///
/// ```rust
/// use kplate_config::get_factory_preset;
///
/// let preset = get_factory_preset("vocal_plate").unwrap();
/// assert_eq!(preset.name, "Vocal Plate");
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if *preset_name == name_lower {
            return Preset::from_toml(toml).ok();
        }
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Get the names of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a preset name is a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
