//! Integration tests for kplate-config.
//!
//! These tests drive presets end to end: files on disk, validation, and the
//! plate built from them.

use kplate_config::{
    ConfigError, Preset, ValidationError, factory_presets, get_factory_preset, resolve_preset,
    validate_preset,
};
use kplate_core::Effect;
use kplate_effects::PlateVariant;
use tempfile::TempDir;

/// Every factory preset builds a plate that rings after an impulse.
#[test]
fn test_factory_presets_build_working_plates() {
    for preset in factory_presets() {
        let mut plate = preset
            .build(48000.0)
            .unwrap_or_else(|e| panic!("'{}' should build: {e}", preset.name));

        let mut energy = 0.0f64;
        for i in 0..24_000 {
            let x = if i == 0 { 1.0 } else { 0.0 };
            let (l, r) = plate.process_stereo(x, x);
            assert!(l.is_finite() && r.is_finite(), "'{}' produced NaN", preset.name);
            if i > 0 {
                energy += f64::from(l * l + r * r);
            }
        }
        assert!(energy > 0.0, "'{}' has no tail", preset.name);
    }
}

/// Save then load through the filesystem, including missing parent dirs.
#[test]
fn test_preset_save_load_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("bright.toml");

    let original = Preset::new("Bright")
        .with_description("Bright plate with a gap")
        .with_variant(PlateVariant::B)
        .with_sample_rate(96000)
        .with_param("damping", "1.5")
        .with_param("predelay", "45ms")
        .with_param("wetness", "28%");

    original.save(&path).expect("save should create parent dirs");
    assert!(path.is_file());

    let loaded = Preset::load(&path).unwrap();
    assert_eq!(loaded, original);
    assert_eq!(loaded.controls().unwrap(), original.controls().unwrap());
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = Preset::load(temp_dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }), "got {err}");
}

#[test]
fn test_load_malformed_toml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, "name = \"unterminated").unwrap();
    assert!(matches!(
        Preset::load(&path),
        Err(ConfigError::TomlParse(_))
    ));
}

/// A hand-written file with every kind of mistake reports all of them.
#[test]
fn test_invalid_file_reports_every_problem() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("wrong.toml");
    std::fs::write(
        &path,
        r#"
name = "Wrong"
variant = "q"

[params]
damping = "11"
predelay = "1s"
size = "big"
"#,
    )
    .unwrap();

    let preset = Preset::load(&path).unwrap();
    match validate_preset(&preset) {
        Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 4, "{errors:?}"),
        other => panic!("expected multiple errors, got {other:?}"),
    }

    let err: ConfigError = validate_preset(&preset).unwrap_err().into();
    assert!(err.to_string().starts_with("validation failed"));
}

/// Preset controls land in the plate exactly as `PlateReverb` setters would.
#[test]
fn test_preset_matches_manual_setup() {
    let preset = get_factory_preset("long_tail").unwrap();
    let mut from_preset = preset.build(44100.0).unwrap();

    let mut manual = kplate_effects::PlateReverb::with_variant(PlateVariant::C, 44100.0);
    manual.set_damping(0.5);
    manual.set_low_cut(0.5);
    manual.set_predelay(0.08);
    manual.set_wetness(0.45);

    let a = from_preset.controls();
    let b = manual.controls();
    assert!((a.predelay - b.predelay).abs() < 1e-6);
    assert!((a.wetness - b.wetness).abs() < 1e-6);
    assert_eq!(a.damping, b.damping);

    for i in 0..2048 {
        let x = ((i * 31) % 64) as f32 / 32.0 - 1.0;
        let (l1, r1) = from_preset.process_stereo(x, -x);
        let (l2, r2) = manual.process_stereo(x, -x);
        assert!((l1 - l2).abs() < 1e-4 && (r1 - r2).abs() < 1e-4, "diverged at {i}");
    }
}

#[test]
fn test_resolve_preset_sources() {
    assert_eq!(resolve_preset("Vocal Plate").unwrap().variant, "d");

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mine.toml");
    Preset::new("Mine").with_variant(PlateVariant::C).save(&path).unwrap();
    assert_eq!(resolve_preset(path.to_str().unwrap()).unwrap().name, "Mine");

    assert!(matches!(
        resolve_preset("definitely_not_a_preset_9876"),
        Err(ConfigError::PresetNotFound(_))
    ));
}
