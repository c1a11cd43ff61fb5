//! Extreme parameter tests for every plate.
//!
//! Verifies that each variant produces finite, bounded output when its
//! parameters sit at their minimum and maximum values, when the input is
//! pinned at full scale, and when running at extreme sample rates (8 kHz
//! and 384 kHz).

use kplate_core::{Effect, ParameterInfo};
use kplate_effects::{PlateReverb, PlateVariant};

const DEFAULT_SAMPLE_RATE: f32 = 48000.0;
const LOW_SAMPLE_RATE: f32 = 8000.0;
const HIGH_SAMPLE_RATE: f32 = 384000.0;
const NUM_SAMPLES: usize = 6000;

/// Process `NUM_SAMPLES` stereo frames and assert all outputs are finite and
/// inside the submix bound.
fn assert_finite_output(effect: &mut PlateReverb, label: &str) {
    for i in 0..NUM_SAMPLES {
        let input = match i % 3 {
            0 => 1.0,
            1 => -1.0,
            _ => 0.0,
        };
        let (l, r) = effect.process_stereo(input, -input);
        assert!(
            l.is_finite() && r.is_finite(),
            "{}: non-finite output at sample {}: ({}, {})",
            label,
            i,
            l,
            r
        );
        assert!(
            l.abs() <= 2.0 + 1e-5 && r.abs() <= 2.0 + 1e-5,
            "{}: output out of range at sample {}: ({}, {})",
            label,
            i,
            l,
            r
        );
    }
}

/// Set all parameters to their minimum values using ParameterInfo.
fn set_all_params_min(effect: &mut impl ParameterInfo) {
    for i in 0..effect.param_count() {
        if let Some(desc) = effect.param_info(i) {
            effect.set_param(i, desc.min);
        }
    }
}

/// Set all parameters to their maximum values using ParameterInfo.
fn set_all_params_max(effect: &mut impl ParameterInfo) {
    for i in 0..effect.param_count() {
        if let Some(desc) = effect.param_info(i) {
            effect.set_param(i, desc.max);
        }
    }
}

/// Run the full extreme parameter suite for one plate.
fn run_extreme_test(variant: PlateVariant) {
    let create = |sample_rate| PlateReverb::with_variant(variant, sample_rate);

    {
        let mut effect = create(DEFAULT_SAMPLE_RATE);
        set_all_params_min(&mut effect);
        assert_finite_output(&mut effect, &format!("{} (all min)", variant));
    }

    {
        let mut effect = create(DEFAULT_SAMPLE_RATE);
        set_all_params_max(&mut effect);
        assert_finite_output(&mut effect, &format!("{} (all max)", variant));
    }

    {
        let mut effect = create(LOW_SAMPLE_RATE);
        assert_finite_output(&mut effect, &format!("{} (8 kHz)", variant));
    }

    {
        let mut effect = create(HIGH_SAMPLE_RATE);
        assert_finite_output(&mut effect, &format!("{} (384 kHz)", variant));
    }

    {
        let mut effect = create(LOW_SAMPLE_RATE);
        set_all_params_max(&mut effect);
        assert_finite_output(&mut effect, &format!("{} (8 kHz, all max)", variant));
    }

    {
        let mut effect = create(HIGH_SAMPLE_RATE);
        set_all_params_max(&mut effect);
        assert_finite_output(&mut effect, &format!("{} (384 kHz, all max)", variant));
    }

    // Rate changes between blocks keep working on live state
    {
        let mut effect = create(DEFAULT_SAMPLE_RATE);
        set_all_params_max(&mut effect);
        for rate in [192000.0, 44100.0, 132300.0, LOW_SAMPLE_RATE] {
            effect.set_sample_rate(rate);
            assert_finite_output(&mut effect, &format!("{} (switched to {})", variant, rate));
        }
    }
}

#[test]
fn test_extreme_plate_a() {
    run_extreme_test(PlateVariant::A);
}

#[test]
fn test_extreme_plate_b() {
    run_extreme_test(PlateVariant::B);
}

#[test]
fn test_extreme_plate_c() {
    run_extreme_test(PlateVariant::C);
}

#[test]
fn test_extreme_plate_d() {
    run_extreme_test(PlateVariant::D);
}
