//! Tour of the four plates in kplate
//!
//! Fires a short click into each variant, then shows how damping and
//! predelay change the response of one plate.
//!
//! Run with: cargo run --example plate_demo

use kplate_core::{Effect, linear_to_db};
use kplate_effects::{PlateReverb, PlateVariant};

const SAMPLE_RATE: f32 = 48000.0;
const SECONDS: usize = 2;

/// Renders a 1 ms click followed by silence.
fn click_response(plate: &mut PlateReverb) -> (Vec<f32>, Vec<f32>) {
    let frames = SAMPLE_RATE as usize * SECONDS;
    let input: Vec<f32> = (0..frames)
        .map(|i| if i < 48 { 0.5 } else { 0.0 })
        .collect();
    let mut left = vec![0.0; frames];
    let mut right = vec![0.0; frames];
    plate.process_block_stereo(&input, &input, &mut left, &mut right);
    (left, right)
}

/// RMS of `signal` between `start` and `end` seconds, in dB.
fn window_db(signal: &[f32], start: f32, end: f32) -> f32 {
    let a = (start * SAMPLE_RATE) as usize;
    let b = ((end * SAMPLE_RATE) as usize).min(signal.len());
    let window = &signal[a..b];
    let sum: f32 = window.iter().map(|x| x * x).sum();
    linear_to_db((sum / window.len() as f32).sqrt())
}

/// First sample that rises above -80 dB.
fn arrival_ms(signal: &[f32]) -> f32 {
    signal
        .iter()
        .position(|x| x.abs() > 1e-4)
        .map(|i| i as f32 * 1000.0 / SAMPLE_RATE)
        .unwrap_or(f32::NAN)
}

fn main() {
    println!("kplate Plate Demo");
    println!("=================\n");

    println!("1. The Four Plates (fully wet)");
    println!("------------------------------");
    println!("{:<10} {:>12} {:>12} {:>12}", "Plate", "0-100 ms", "0.5-1 s", "1.5-2 s");
    for variant in PlateVariant::ALL {
        let mut plate = PlateReverb::with_variant(variant, SAMPLE_RATE);
        plate.set_wetness(1.0);
        let (left, _) = click_response(&mut plate);
        println!(
            "{:<10} {:>9.1} dB {:>9.1} dB {:>9.1} dB",
            variant.to_string(),
            window_db(&left, 0.0, 0.1),
            window_db(&left, 0.5, 1.0),
            window_db(&left, 1.5, 2.0),
        );
    }

    println!("\n2. Damping on Plate A");
    println!("---------------------");
    for damping in [0.0, 5.0, 10.0] {
        let mut plate = PlateReverb::new(SAMPLE_RATE);
        plate.set_wetness(1.0);
        plate.set_damping(damping);
        let (left, _) = click_response(&mut plate);
        println!(
            "damping {:>4.1}: tail at 1 s {:>7.1} dB",
            damping,
            window_db(&left, 0.9, 1.1)
        );
    }

    println!("\n3. Predelay on Plate C");
    println!("----------------------");
    for predelay_ms in [0.0, 50.0, 200.0] {
        let mut plate = PlateReverb::with_variant(PlateVariant::C, SAMPLE_RATE);
        plate.set_wetness(1.0);
        plate.set_predelay(predelay_ms / 1000.0);
        let (left, _) = click_response(&mut plate);
        println!(
            "predelay {:>5.0} ms: first arrival at {:>6.1} ms",
            predelay_ms,
            arrival_ms(&left)
        );
    }

    println!("\n4. Dry/Wet Submix");
    println!("-----------------");
    for wetness in [0.0, 0.25, 0.5, 1.0] {
        let mut plate = PlateReverb::new(SAMPLE_RATE);
        plate.set_wetness(wetness);
        let (l, _) = plate.process_stereo(0.5, 0.5);
        println!("wetness {:>4.2}: first sample {:+.3}", wetness, l);
    }
}
