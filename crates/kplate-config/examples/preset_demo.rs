//! Preset demo: factory presets, unit parsing and validation.
//!
//! Run with: cargo run -p kplate-config --example preset_demo

use kplate_config::{
    Preset, factory_preset_names, find_param, get_factory_preset, parse_param_value,
    validate_preset,
};
use kplate_effects::PlateVariant;

fn main() {
    println!("=== Factory Presets ===\n");
    for name in factory_preset_names() {
        if let Some(preset) = get_factory_preset(name) {
            println!(
                "{:<12} {:<12} variant {}  {}",
                name,
                preset.name,
                preset.variant,
                preset.description.as_deref().unwrap_or("")
            );
        }
    }

    println!("\n=== Unit Parsing ===\n");
    for (param, value) in [
        ("wetness", "35%"),
        ("input_pad", "-6dB"),
        ("predelay", "0.04s"),
        ("predelay", "25ms"),
        ("damping", "50%"),
    ] {
        let Some((_, desc)) = find_param(param) else {
            continue;
        };
        match parse_param_value(&desc, value) {
            Ok(v) => println!("  {param} = {value:<6} -> {v}{}", desc.unit.suffix()),
            Err(e) => println!("  {param} = {value:<6} -> error: {e}"),
        }
    }

    println!("\n=== Validation ===\n");
    let preset = Preset::new("Too Much")
        .with_variant(PlateVariant::D)
        .with_param("damping", "14")
        .with_param("shimmer", "1")
        .with_param("predelay", "120ms");
    match validate_preset(&preset) {
        Ok(()) => println!("valid"),
        Err(e) => println!("{e}"),
    }

    println!("\n=== TOML ===\n");
    if let Some(preset) = get_factory_preset("vocal_plate")
        && let Ok(toml) = preset.to_toml()
    {
        println!("{toml}");
    }
}
