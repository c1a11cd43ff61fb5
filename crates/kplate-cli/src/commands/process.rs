//! File-based plate processing command.

use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use kplate_io::{SUPPORTED_BIT_DEPTHS, StereoSamples, WavSpec, read_wav_stereo, write_wav_stereo};
use std::path::PathBuf;

use super::common::{DEFAULT_BLOCK_SIZE, Levels, PlateArgs, render};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    plate: PlateArgs,

    /// Processing block size
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Seconds of silence appended so the tail can ring out
    #[arg(long, default_value = "2.0")]
    tail: f64,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("--block-size must be at least 1");
    }
    if !SUPPORTED_BIT_DEPTHS.contains(&args.bit_depth) {
        anyhow::bail!("--bit-depth must be 16, 24 or 32, got {}", args.bit_depth);
    }
    if !(args.tail.is_finite() && args.tail >= 0.0) {
        anyhow::bail!("--tail must be a non-negative number of seconds");
    }

    println!("Reading {}...", args.input.display());
    let (mut samples, spec) = read_wav_stereo(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        samples.len(),
        spec.channels,
        spec.sample_rate,
        samples.len() as f64 / f64::from(spec.sample_rate)
    );

    let (mut plate, preset) = args.plate.build(spec.sample_rate)?;
    println!("Plate {} ({})", plate.variant().name().to_uppercase(), preset.name);

    let input_levels = Levels::measure(&samples.left, &samples.right);
    let tail_frames = (args.tail * f64::from(spec.sample_rate)).round() as usize;
    samples.extend_silence(tail_frames);

    let total = samples.len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let (left, right) = render(
        &mut plate,
        &samples.left,
        &samples.right,
        args.block_size,
        |done| pb.set_position(done as u64),
    );
    pb.finish_with_message("done");

    let output = StereoSamples::new(left, right);
    let output_levels = Levels::measure(&output.left, &output.right);

    println!("\nStats:");
    println!("  Input:  {}", input_levels.describe());
    println!("  Output: {}", output_levels.describe());
    println!("  Tail:   {:.2}s appended", tail_frames as f64 / f64::from(spec.sample_rate));

    let out_spec = WavSpec {
        channels: 2,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav_stereo(&args.output, &output, out_spec)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Done!");

    Ok(())
}
