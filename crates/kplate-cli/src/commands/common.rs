//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use clap::Args;
use kplate_config::{Preset, resolve_preset, validate_preset};
use kplate_core::{Effect, linear_to_db};
use kplate_effects::{PlateReverb, PlateVariant};

/// Frames handed to the plate per call.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("Invalid parameter format: '{}' (expected key=value)", s))
}

/// Parse a plate variant name for clap's `value_parser`.
pub fn parse_variant(s: &str) -> Result<PlateVariant, String> {
    PlateVariant::from_name(s).ok_or_else(|| format!("unknown plate '{}' (expected a, b, c or d)", s))
}

/// Plate selection shared by the rendering commands.
#[derive(Args, Debug)]
pub struct PlateArgs {
    /// Plate variant (a, b, c or d); overrides the preset's
    #[arg(short, long, value_parser = parse_variant)]
    pub variant: Option<PlateVariant>,

    /// Factory preset name, user preset name or preset file
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Control values, e.g. "damping=3" or "predelay=25ms" (repeatable)
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    pub param: Vec<(String, String)>,
}

impl PlateArgs {
    /// The preset these arguments describe: the named preset (or defaults)
    /// with the variant and parameter overrides applied.
    pub fn preset(&self) -> anyhow::Result<Preset> {
        let mut preset = match &self.preset {
            Some(name) => load_preset(name)?,
            None => Preset::new("Command Line"),
        };
        if let Some(variant) = self.variant {
            preset = preset.with_variant(variant);
        }
        for (key, value) in &self.param {
            preset.set_param(key.as_str(), value.as_str());
        }
        validate_preset(&preset).context("invalid plate settings")?;
        Ok(preset)
    }

    /// Builds the plate at `sample_rate` and returns the preset it came from.
    pub fn build(&self, sample_rate: u32) -> anyhow::Result<(PlateReverb, Preset)> {
        let preset = self.preset()?;
        let plate = preset
            .build(sample_rate as f32)
            .with_context(|| format!("building plate from '{}'", preset.name))?;
        tracing::info!(
            preset = %preset.name,
            variant = %plate.variant(),
            sample_rate,
            "plate ready"
        );
        Ok((plate, preset))
    }
}

/// Load a preset by factory name, preset directory name or file path.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    resolve_preset(name).with_context(|| {
        format!(
            "loading preset '{}' (use 'kplate presets' to see available presets)",
            name
        )
    })
}

/// Runs `left`/`right` through the plate in blocks, reporting progress.
pub fn render(
    plate: &mut PlateReverb,
    left: &[f32],
    right: &[f32],
    block_size: usize,
    mut progress: impl FnMut(usize),
) -> (Vec<f32>, Vec<f32>) {
    let block_size = block_size.max(1);
    let len = left.len().min(right.len());
    let mut out_l = vec![0.0; len];
    let mut out_r = vec![0.0; len];

    let mut start = 0;
    while start < len {
        let end = (start + block_size).min(len);
        plate.process_block_stereo(
            &left[start..end],
            &right[start..end],
            &mut out_l[start..end],
            &mut out_r[start..end],
        );
        start = end;
        progress(end);
    }
    (out_l, out_r)
}

/// Peak and RMS of a stereo signal, both channels together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Levels {
    /// Largest absolute sample.
    pub peak: f32,
    /// Root mean square over both channels.
    pub rms: f32,
}

impl Levels {
    /// Measures `left` and `right`.
    pub fn measure(left: &[f32], right: &[f32]) -> Self {
        let count = left.len() + right.len();
        if count == 0 {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let (peak, sum) = left
            .iter()
            .chain(right)
            .fold((0.0f32, 0.0f64), |(p, s), &x| {
                (p.max(x.abs()), s + f64::from(x) * f64::from(x))
            });
        Self {
            peak,
            rms: (sum / count as f64).sqrt() as f32,
        }
    }

    /// `RMS -x.x dB, Peak -x.x dB`.
    pub fn describe(&self) -> String {
        format!(
            "RMS {:.1} dB, Peak {:.1} dB",
            linear_to_db(self.rms),
            linear_to_db(self.peak)
        )
    }
}
