//! Describe how the plate runs at a WAV file's sample rate.

use clap::Args;
use kplate_effects::controls::PREDELAY_RANGE;
use kplate_effects::{PREDELAY_CAPACITY, PlateVariant, cycle_end_for};
use kplate_io::{WavFormat, read_wav_info};

/// Display WAV file information and plate timing at its rate.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: std::path::PathBuf,
}

/// Engine timing at one host sample rate.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlateTiming {
    /// Host frames per engine tick.
    cycle_end: usize,
    /// Engine tick rate in Hz.
    internal_rate: f64,
    /// Longest predelay the engine can honour, in seconds.
    max_predelay: f64,
}

impl PlateTiming {
    fn at(sample_rate: f64) -> Self {
        let cycle_end = cycle_end_for(sample_rate);
        let internal_rate = sample_rate / cycle_end as f64;
        let max_predelay = (PREDELAY_CAPACITY as f64 / internal_rate).min(PREDELAY_RANGE.1);
        Self {
            cycle_end,
            internal_rate,
            max_predelay,
        }
    }

    /// Earliest wet output of `variant` with zero predelay, in milliseconds.
    fn first_arrival_ms(&self, variant: PlateVariant) -> (f64, f64) {
        let (left, right) = variant.config().shortest_path();
        let ms = |ticks: usize| ticks as f64 * 1000.0 / self.internal_rate;
        (ms(left), ms(right))
    }
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;

    let format_str = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };
    let layout = match info.channels {
        1 => " (mono, fed to both plate inputs)",
        2 => "",
        _ => " (first two used)",
    };

    println!("File:        {}", args.file.display());
    println!("Format:      {} {}-bit", format_str, info.bits_per_sample);
    println!("Channels:    {}{}", info.channels, layout);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );

    let timing = PlateTiming::at(f64::from(info.sample_rate));
    println!();
    println!("Plate");
    println!("-----");
    println!(
        "Engine Rate: {:.0} Hz (1 engine tick per {} frame{})",
        timing.internal_rate,
        timing.cycle_end,
        if timing.cycle_end == 1 { "" } else { "s" }
    );
    println!("Predelay:    up to {:.0} ms", timing.max_predelay * 1000.0);
    println!("First wet sample (L / R):");
    for variant in PlateVariant::ALL {
        let (left, right) = timing.first_arrival_ms(variant);
        println!("  {:<8} {:>6.1} ms / {:>6.1} ms", variant.to_string(), left, right);
    }

    Ok(())
}
