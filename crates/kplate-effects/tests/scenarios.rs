//! End-to-end behaviour of the plate engine.
//!
//! Silence, impulse arrival and first-arrival level, predelay reach, dry/wet
//! law, determinism, rate invariance and the DC gain-riding scenario, each
//! driven through `PlateEngine::run`.

use kplate_core::{BiquadCoefficients, arcsine_clip};
use kplate_effects::{
    GROUPS, LINES_PER_GROUP, PlateConfig, PlateControls, PlateEngine, PlateVariant, WET_SCALE,
    cycle_end_for,
};

const BLOCK: usize = 512;
const TAU: f64 = std::f64::consts::TAU;

/// Direct gain of the early reflections: three outputs of `0.5^3`, summed and halved twice.
const EARLY_DIRECT: f64 = 0.09375;

/// Runs a stereo signal through `engine` in fixed-size blocks.
fn render(
    engine: &mut PlateEngine,
    controls: &PlateControls,
    sample_rate: f64,
    left: &[f32],
    right: &[f32],
) -> (Vec<f32>, Vec<f32>) {
    let mut out_l = vec![0.0; left.len()];
    let mut out_r = vec![0.0; right.len()];
    let mut start = 0;
    while start < left.len() {
        let end = (start + BLOCK).min(left.len());
        engine.run(
            controls,
            sample_rate,
            &left[start..end],
            &right[start..end],
            &mut out_l[start..end],
            &mut out_r[start..end],
        );
        start = end;
    }
    (out_l, out_r)
}

fn impulse(len: usize) -> Vec<f32> {
    let mut x = vec![0.0; len];
    x[0] = 1.0;
    x
}

fn wet_only() -> PlateControls {
    PlateControls {
        wetness: 1.0,
        ..PlateControls::default()
    }
}

fn rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&x| f64::from(x) * f64::from(x)).sum();
    (sum / samples.len() as f64).sqrt()
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |m, x| m.max(x.abs()))
}

/// Gain of the route through the shortest line of every group.
///
/// Leaving a group, line 0 passes its loss filter's direct term and the
/// others the half of their two-tap average. Entering the next group the
/// Householder mix gives 3 on the same line and -2 on any other.
fn shortest_route_gain(
    config: &PlateConfig,
    controls: &PlateControls,
    sample_rate: f64,
    length: impl Fn(usize, usize) -> usize,
) -> f64 {
    let scale = controls.corner_scale();
    let a = config.fix_a_hz * scale / sample_rate;
    let d = config.fix_d_hz * scale / sample_rate;
    let corners = [a, (a + a + d) / 3.0, (a + d + d) / 3.0, d];

    let route: Vec<usize> = (0..GROUPS)
        .map(|group| {
            (0..LINES_PER_GROUP)
                .min_by_key(|&line| length(group, line))
                .unwrap()
        })
        .collect();

    let mut gain = 1.0;
    for stage in 1..GROUPS {
        let (from, to) = (route[stage - 1], route[stage]);
        gain *= if from == 0 {
            BiquadCoefficients::bandpass(corners[stage - 1], config.resonance[stage - 1]).a0
        } else {
            0.5
        };
        gain *= if from == to { 3.0 } else { -2.0 };
    }
    gain
}

#[test]
fn silence_stays_silent() {
    for variant in PlateVariant::ALL {
        for sample_rate in [44_100.0, 96_000.0, 192_000.0] {
            let mut engine = PlateEngine::new(variant, 9);
            let zeros = vec![0.0f32; 20 * BLOCK];
            let controls = PlateControls {
                damping: 0.0,
                wetness: 0.5,
                ..PlateControls::default()
            };
            let (l, r) = render(&mut engine, &controls, sample_rate, &zeros, &zeros);
            let p = peak(&l).max(peak(&r));
            assert!(p < 1e-12, "{variant} at {sample_rate} Hz: {p}");
        }
    }
}

#[test]
fn impulse_waits_for_predelay_and_shortest_path() {
    let sample_rate: f64 = 44_100.0;
    let predelay_seconds = 0.01;
    let predelay = (predelay_seconds * sample_rate).floor() as usize;

    for variant in PlateVariant::ALL {
        let mut engine = PlateEngine::new(variant, 5);
        let controls = PlateControls {
            predelay: predelay_seconds,
            ..wet_only()
        };
        let input = impulse(3 * 4096);
        let (l, r) = render(&mut engine, &controls, sample_rate, &input, &input);

        let config = variant.config();
        // Unit impulse through the input compander (post 0.5), the two-tap
        // average and the first step of the low cut.
        let shaped = if config.input_shaping { 1f64.sin() } else { 1.0 };
        let low_cut = (TAU * controls.low_cut_hz() / sample_rate).min(1.0);
        let conditioned = shaped * 0.5 * 0.5 * (1.0 - low_cut) * EARLY_DIRECT;

        let left_gain =
            shortest_route_gain(config, &controls, sample_rate, |g, i| config.left_length(g, i));
        let right_gain =
            shortest_route_gain(config, &controls, sample_rate, |g, i| config.right_length(g, i));
        let (shortest_l, shortest_r) = config.shortest_path();
        for (out, shortest, gain, side) in [
            (&l, shortest_l, left_gain, "left"),
            (&r, shortest_r, right_gain, "right"),
        ] {
            let arrival = predelay + shortest;
            let before = peak(&out[..arrival]);
            assert!(before < 1e-9, "{variant} {side}: {before} before sample {arrival}");

            let expected = arcsine_clip(conditioned * gain * WET_SCALE);
            let first = f64::from(out[arrival]);
            assert!(
                ((first - expected) / expected).abs() < 1e-3,
                "{variant} {side}: first arrival {first}, expected {expected}"
            );
        }
    }
}

#[test]
fn predelay_shifts_arrival() {
    let sample_rate = 44_100.0;
    let onset = |predelay: f64| {
        let mut engine = PlateEngine::new(PlateVariant::B, 5);
        let controls = PlateControls {
            predelay,
            ..wet_only()
        };
        let input = impulse(8192);
        let (l, _) = render(&mut engine, &controls, sample_rate, &input, &input);
        l.iter().position(|x| x.abs() > 1e-8)
    };
    let near = onset(0.0).expect("no output without predelay");
    let far = onset(0.05).expect("no output with predelay");
    assert_eq!(far - near, (0.05f64 * sample_rate).floor() as usize);
}

#[test]
fn full_predelay_is_reachable_between_48_and_88_khz() {
    // One tick per frame, so half a second is 30 000 ticks.
    let sample_rate = 60_000.0;
    assert_eq!(cycle_end_for(sample_rate), 1);
    let onset = |predelay: f64| {
        let mut engine = PlateEngine::new(PlateVariant::B, 5);
        let controls = PlateControls {
            predelay,
            ..wet_only()
        };
        let input = impulse(32_768);
        let (l, _) = render(&mut engine, &controls, sample_rate, &input, &input);
        l.iter().position(|x| x.abs() > 1e-8)
    };
    let near = onset(0.0).expect("no output without predelay");
    let far = onset(0.5).expect("no output with full predelay");
    assert_eq!(far - near, 30_000);
}

#[test]
fn dry_only_reproduces_input() {
    let input: Vec<f32> = (0..4096)
        .map(|i| (i as f32 * 0.013).sin() * 0.8 + if i % 97 == 0 { 0.2 } else { 0.0 })
        .collect();
    for sample_rate in [44_100.0, 88_200.0] {
        let mut engine = PlateEngine::new(PlateVariant::C, 2);
        let controls = PlateControls {
            wetness: 0.0,
            ..PlateControls::default()
        };
        let (l, r) = render(&mut engine, &controls, sample_rate, &input, &input);
        for (i, ((&x, &yl), &yr)) in input.iter().zip(&l).zip(&r).enumerate() {
            assert!((x - yl).abs() <= 1e-6, "left {i}: {x} vs {yl}");
            assert!((x - yr).abs() <= 1e-6, "right {i}: {x} vs {yr}");
        }
    }
}

#[test]
fn submix_is_linear_in_wet_and_dry_gain() {
    let input: Vec<f32> = (0..6000)
        .map(|i| if i < 300 { ((i * 37) % 100) as f32 / 50.0 - 1.0 } else { 0.0 })
        .collect();
    let run = |wetness: f64| {
        let mut engine = PlateEngine::new(PlateVariant::A, 21);
        let controls = PlateControls {
            wetness,
            ..PlateControls::default()
        };
        render(&mut engine, &controls, 44_100.0, &input, &input).0
    };
    let dry = run(0.0);
    let wet = run(1.0);
    let both = run(0.5);
    let quarter = run(0.25);
    for i in 0..input.len() {
        // wet = min(1, 2w), dry = min(1, 2(1 - w))
        let expect_both = wet[i] + dry[i];
        let expect_quarter = 0.5 * wet[i] + dry[i];
        assert!((both[i] - expect_both).abs() < 1e-5, "w=0.5 at {i}");
        assert!((quarter[i] - expect_quarter).abs() < 1e-5, "w=0.25 at {i}");
    }
}

#[test]
fn same_seed_is_bit_identical() {
    let input: Vec<f32> = (0..8000).map(|i| ((i * 7919) % 2000) as f32 / 1000.0 - 1.0).collect();
    let controls = PlateControls {
        predelay: 0.003,
        wetness: 0.7,
        ..PlateControls::default()
    };
    for sample_rate in [44_100.0, 132_300.0] {
        let mut a = PlateEngine::new(PlateVariant::D, 1234);
        let mut b = PlateEngine::new(PlateVariant::D, 1234);
        let first = render(&mut a, &controls, sample_rate, &input, &input);
        let second = render(&mut b, &controls, sample_rate, &input, &input);
        assert_eq!(first, second);

        a.reset();
        let replay = render(&mut a, &controls, sample_rate, &input, &input);
        assert_eq!(first, replay, "reset did not restore the initial state");
    }
}

#[test]
fn tail_envelope_is_rate_invariant() {
    const WINDOW_MS: f64 = 10.0;
    const WINDOWS: usize = 60;

    let envelope = |sample_rate: f64| -> Vec<f64> {
        let len = (sample_rate * WINDOW_MS / 1000.0) as usize * WINDOWS;
        let burst = (0.005 * sample_rate) as usize;
        let input: Vec<f32> = (0..len)
            .map(|n| {
                if n < burst {
                    let t = n as f64 / sample_rate;
                    (0.5 * (2.0 * std::f64::consts::PI * 1000.0 * t).sin()) as f32
                } else {
                    0.0
                }
            })
            .collect();
        let mut engine = PlateEngine::new(PlateVariant::A, 77);
        let (l, _) = render(&mut engine, &wet_only(), sample_rate, &input, &input);
        let window = (sample_rate * WINDOW_MS / 1000.0) as usize;
        l.chunks(window).map(rms).collect()
    };

    let base = envelope(44_100.0);
    let double = envelope(88_200.0);
    let loudest = base.iter().cloned().fold(0.0, f64::max);
    assert!(loudest > 0.0);

    let mut compared = 0;
    for (w, (&a, &b)) in base.iter().zip(&double).enumerate() {
        if a < loudest * 10f64.powf(-50.0 / 20.0) {
            continue;
        }
        let diff_db = 20.0 * (b.max(1e-30) / a).log10();
        assert!(diff_db.abs() < 6.0, "window {w}: {a} vs {b} ({diff_db:.1} dB)");
        compared += 1;
    }
    assert!(compared > 10, "only {compared} windows above the floor");
}

#[test]
fn onset_doubles_with_the_rate() {
    let onset = |sample_rate: f64| {
        let len = (0.1 * sample_rate) as usize;
        let burst = (0.005 * sample_rate) as usize;
        let input: Vec<f32> = (0..len)
            .map(|n| {
                if n < burst {
                    let t = n as f64 / sample_rate;
                    (0.5 * (2.0 * std::f64::consts::PI * 1000.0 * t).sin()) as f32
                } else {
                    0.0
                }
            })
            .collect();
        let mut engine = PlateEngine::new(PlateVariant::A, 77);
        let (l, _) = render(&mut engine, &wet_only(), sample_rate, &input, &input);
        l.iter().position(|x| x.abs() > 1e-9).expect("no onset")
    };
    let base = onset(44_100.0);
    let double = onset(88_200.0);
    assert!(
        double.abs_diff(2 * base) <= 4,
        "onset {base} at 44.1 kHz, {double} at 88.2 kHz"
    );
}

fn dc_controls() -> PlateControls {
    PlateControls {
        low_cut: 0.0,
        ..wet_only()
    }
}

#[test]
fn dc_rides_the_input_gain_down_to_equilibrium() {
    for variant in PlateVariant::ALL {
        let mut engine = PlateEngine::new(variant, 3);
        let controls = dc_controls();
        let mut gains = Vec::with_capacity(10_000);
        let (mut l, mut r) = ([0.0f32], [0.0f32]);
        for _ in 0..10_000 {
            engine.run(&controls, 44_100.0, &[0.5], &[0.5], &mut l, &mut r);
            assert!(l[0].is_finite() && l[0].abs() <= 1.0);
            assert!(r[0].is_finite() && r[0].abs() <= 1.0);

            let (input_gain, output_gain) = engine.compander_gains();
            assert_eq!(input_gain[0], input_gain[1]);
            for g in output_gain {
                assert!((1.0 / 128.0..=1.0).contains(&g), "{variant}: output gain {g}");
            }
            gains.push(input_gain[0]);
        }

        let settled = gains
            .iter()
            .position(|&g| g <= 0.53)
            .expect("input gain never came down");
        assert!(settled > 5 && settled < 200, "{variant}: settled after {settled}");
        for pair in gains[..=settled].windows(2) {
            assert!(pair[1] <= pair[0], "{variant}: {} then {}", pair[0], pair[1]);
        }
        for &g in &gains[settled..] {
            assert!((0.48..=0.54).contains(&g), "{variant}: left equilibrium at {g}");
        }
    }
}

#[test]
fn dc_output_is_compressed_and_decays() {
    for variant in PlateVariant::ALL {
        let dc_response = |level: f32| {
            let mut engine = PlateEngine::new(variant, 3);
            let dc = vec![level; 10_000];
            let out = render(&mut engine, &dc_controls(), 44_100.0, &dc, &dc).0;
            (out, engine.compander_gains().0)
        };
        let (loud, _) = dc_response(0.5);
        let (soft, soft_gain) = dc_response(0.25);

        // A quarter of full scale sits exactly at the threshold
        assert_eq!(soft_gain, [1.0, 1.0], "{variant}");
        // Twice the input, well under twice the output
        let ratio = rms(&loud) / rms(&soft);
        assert!(ratio < 1.5, "{variant}: loud/soft RMS ratio {ratio}");

        let windows: Vec<f64> = loud.chunks(2000).map(rms).collect();
        let loudest = windows
            .iter()
            .enumerate()
            .fold(0, |best, (i, &w)| if w > windows[best] { i } else { best });
        assert!(loudest < windows.len() - 1, "{variant}: still rising at the end");
        for pair in windows[loudest..].windows(2) {
            assert!(pair[1] < pair[0], "{variant}: window RMS {} then {}", pair[0], pair[1]);
        }
    }
}
