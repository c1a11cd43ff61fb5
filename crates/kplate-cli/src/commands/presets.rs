//! Preset listing.

use clap::Args;
use kplate_config::{
    factory_preset_names, get_factory_preset, list_all_presets, preset_name_from_path,
    user_presets_dir,
};

use super::common::load_preset;

#[derive(Args)]
pub struct PresetsArgs {
    /// Preset to print as TOML (factory name, user preset or file)
    name: Option<String>,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.name {
        Some(name) => show_preset(&name),
        None => {
            list_presets();
            Ok(())
        }
    }
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;
    print!("{}", preset.to_toml()?);
    Ok(())
}

fn list_presets() {
    println!("Factory Presets:");
    println!("================");
    for id in factory_preset_names() {
        if let Some(preset) = get_factory_preset(id) {
            println!(
                "  {:14} plate {}  {}",
                id,
                preset.variant,
                preset.description.as_deref().unwrap_or("")
            );
        }
    }
    println!();

    println!("User Presets:");
    println!("=============");
    let files = list_all_presets();
    if files.is_empty() {
        println!("  (none in {})", user_presets_dir().display());
    }
    for path in files {
        let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
        println!("  {:14} {}", name, path.display());
    }
}
