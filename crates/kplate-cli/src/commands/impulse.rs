//! Stereo impulse response rendering.

use anyhow::Context;
use clap::Args;
use kplate_io::{SUPPORTED_BIT_DEPTHS, StereoSamples, WavSpec, write_wav_stereo};
use std::path::PathBuf;

use super::common::{DEFAULT_BLOCK_SIZE, Levels, PlateArgs, render};

/// Render the plate's response to a unit impulse on both inputs.
///
/// The plate runs exactly as configured, so the dry path is part of the
/// response unless `wetness` is 100%.
#[derive(Args)]
pub struct ImpulseArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    plate: PlateArgs,

    /// Length of the response in seconds
    #[arg(long, default_value = "3.0")]
    seconds: f64,

    /// Sample rate of the rendered file
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ImpulseArgs) -> anyhow::Result<()> {
    if !(args.seconds.is_finite() && args.seconds > 0.0) {
        anyhow::bail!("--seconds must be positive");
    }
    if args.sample_rate == 0 {
        anyhow::bail!("--sample-rate must be positive");
    }
    if !SUPPORTED_BIT_DEPTHS.contains(&args.bit_depth) {
        anyhow::bail!("--bit-depth must be 16, 24 or 32, got {}", args.bit_depth);
    }

    let (mut plate, preset) = args.plate.build(args.sample_rate)?;
    let frames = ((args.seconds * f64::from(args.sample_rate)).round() as usize).max(1);

    let mut impulse = vec![0.0f32; frames];
    impulse[0] = 1.0;
    let (left, right) = render(&mut plate, &impulse, &impulse, DEFAULT_BLOCK_SIZE, |_| {});

    let levels = Levels::measure(&left, &right);
    println!(
        "Plate {} ({}), {} frames at {} Hz",
        plate.variant().name().to_uppercase(),
        preset.name,
        frames,
        args.sample_rate
    );
    println!("  {}", levels.describe());
    match decay_time(&left, &right, levels.peak, 60.0) {
        Some(frame) => println!(
            "  -60 dB after {:.3}s",
            frame as f64 / f64::from(args.sample_rate)
        ),
        None => println!("  never falls 60 dB below peak within the render"),
    }

    let spec = WavSpec {
        channels: 2,
        sample_rate: args.sample_rate,
        bits_per_sample: args.bit_depth,
    };
    write_wav_stereo(&args.output, &StereoSamples::new(left, right), spec)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());

    Ok(())
}

/// First frame after which neither channel rises above `peak` minus
/// `drop_db`. `None` when the last frame is still above it.
fn decay_time(left: &[f32], right: &[f32], peak: f32, drop_db: f32) -> Option<usize> {
    let floor = peak * 10f32.powf(-drop_db / 20.0);
    let last_loud = left
        .iter()
        .zip(right)
        .rposition(|(l, r)| l.abs().max(r.abs()) > floor)?;
    let frames = left.len().min(right.len());
    (last_loud + 1 < frames).then_some(last_loud + 1)
}
