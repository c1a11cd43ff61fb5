//! The plate engine: block processing over owned state.
//!
//! Per frame, per channel:
//!
//! ```text
//! input ─ denormal guard ─┬──────────────────────────────────── dry ─┐
//!                         └─ [engine tick, every cycle_end frames]   │
//!                              pad → (sin shaping) → compander →     │
//!                              average → low cut → early             │
//!                              reflections → predelay → matrix →     │
//!                              compander → ladder                    │
//!                         ladder → poles → arcsine clip ─────── wet ─┴─ mix → dither
//! ```
//!
//! Every coefficient is re-derived from the controls and the sample rate at
//! the top of each block. Nothing allocates after construction.

use core::f64::consts::FRAC_PI_2;

use kplate_core::{
    BiquadCoefficients, Compander, DEFAULT_SEED, DelayLine, Mulch, OnePole, Xorshift32,
    arcsine_clip, submix_gains,
};

use crate::config::{PlateConfig, PlateVariant};
use crate::controls::PlateControls;
use crate::early::EarlyReflections;
use crate::matrix::{FILTERS, HouseholderMatrix};
use crate::scheduler::{RateScheduler, ReferenceBuffer};

/// Predelay capacity in engine ticks.
///
/// Half a second at any internal rate below 88.2 kHz, which covers every
/// host rate up to 352.8 kHz. Above that the predelay saturates here.
pub const PREDELAY_CAPACITY: usize = 44_100;

// Unity pre scale: input above a quarter of full scale rides the gain.
const INPUT_PRE: f64 = 1.0;
const INPUT_POST: f64 = 0.5;
const OUTPUT_PRE: f64 = 0.5;
const OUTPUT_POST: f64 = 2.0;

const LEFT: usize = 0;
const RIGHT: usize = 1;

/// Values derived once per block.
#[derive(Debug, Clone, Copy)]
struct BlockGains {
    pad: f64,
    regen: f64,
    wet: f64,
    dry: f64,
}

/// One stereo plate.
///
/// # Example
///
/// ```rust
/// use kplate_effects::{PlateControls, PlateEngine, PlateVariant};
///
/// let mut plate = PlateEngine::new(PlateVariant::C, 1);
/// let controls = PlateControls { wetness: 1.0, ..PlateControls::default() };
///
/// let input = [1.0f32, 0.0, 0.0, 0.0];
/// let (mut left, mut right) = ([0.0f32; 4], [0.0f32; 4]);
/// plate.run(&controls, 44_100.0, &input, &input, &mut left, &mut right);
/// assert!(left.iter().chain(&right).all(|x| x.abs() <= 1.0));
/// ```
#[derive(Debug, Clone)]
pub struct PlateEngine {
    variant: PlateVariant,
    config: &'static PlateConfig,
    early: EarlyReflections,
    predelay: [DelayLine; 2],
    matrix: HouseholderMatrix,
    average: [Mulch; 2],
    low_cut: [OnePole; 2],
    input_compander: [Compander; 2],
    output_compander: [Compander; 2],
    scheduler: RateScheduler,
    reference: [ReferenceBuffer; 2],
    noise: [Xorshift32; 2],
}

impl PlateEngine {
    /// Allocates every buffer for `variant` and leaves the engine reset.
    ///
    /// `seed` drives the denormal guard and the dither; a zero seed is
    /// replaced by [`DEFAULT_SEED`].
    pub fn new(variant: PlateVariant, seed: u32) -> Self {
        let config = variant.config();
        let seed = if seed == 0 { DEFAULT_SEED } else { seed };
        let mut engine = Self {
            variant,
            config,
            early: EarlyReflections::new(&config.early),
            predelay: core::array::from_fn(|_| DelayLine::new(PREDELAY_CAPACITY)),
            matrix: HouseholderMatrix::new(config),
            average: [Mulch::new(); 2],
            low_cut: Default::default(),
            input_compander: [Compander::new(INPUT_PRE, INPUT_POST); 2],
            output_compander: [Compander::new(OUTPUT_PRE, OUTPUT_POST); 2],
            scheduler: RateScheduler::default(),
            reference: [ReferenceBuffer::default(); 2],
            noise: [
                Xorshift32::new(seed),
                Xorshift32::new(seed.rotate_left(16) ^ 0x9E37_79B9),
            ],
        };
        for line in &mut engine.predelay {
            line.set_length(0);
        }
        engine.reset();
        engine
    }

    /// Current plate character.
    pub fn variant(&self) -> PlateVariant {
        self.variant
    }

    /// Table in use.
    pub fn config(&self) -> &'static PlateConfig {
        self.config
    }

    /// Switches plate character. Rebuilds the diffuser and the matrix
    /// (allocating) and resets the engine; a no-op for the current variant.
    pub fn set_variant(&mut self, variant: PlateVariant) {
        if variant == self.variant {
            return;
        }
        self.variant = variant;
        self.config = variant.config();
        self.early = EarlyReflections::new(&self.config.early);
        self.matrix = HouseholderMatrix::new(self.config);
        self.reset();
        #[cfg(feature = "tracing")]
        tracing::debug!(variant = self.config.name, "plate variant changed");
    }

    /// Frames per engine tick at the rate of the last block.
    pub fn cycle_end(&self) -> usize {
        self.scheduler.cycle_end()
    }

    /// Input and output compander gains, `[left, right]` each.
    pub fn compander_gains(&self) -> ([f64; 2], [f64; 2]) {
        (
            [self.input_compander[LEFT].gain(), self.input_compander[RIGHT].gain()],
            [self.output_compander[LEFT].gain(), self.output_compander[RIGHT].gain()],
        )
    }

    /// Silences every buffer, restores unity compander gain, rewinds the
    /// scheduler and the noise generators.
    pub fn reset(&mut self) {
        self.early.reset();
        for line in &mut self.predelay {
            line.reset();
        }
        self.matrix.reset();
        for ch in [LEFT, RIGHT] {
            self.average[ch].reset();
            self.low_cut[ch].reset();
            self.input_compander[ch].reset();
            self.output_compander[ch].reset();
            self.reference[ch].reset();
            self.noise[ch].reset();
        }
        self.scheduler.reset();
        #[cfg(feature = "tracing")]
        tracing::debug!(variant = self.config.name, "plate engine reset");
    }

    /// Processes one block.
    ///
    /// Controls are clamped and every coefficient derived once, up front.
    /// Mismatched slice lengths process the shortest.
    pub fn run(
        &mut self,
        controls: &PlateControls,
        sample_rate: f64,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) {
        let gains = self.prepare(&controls.clamped(), sample_rate);
        let frames = left_in
            .len()
            .min(right_in.len())
            .min(left_out.len())
            .min(right_out.len());
        for i in 0..frames {
            let [l, r] = self.frame([f64::from(left_in[i]), f64::from(right_in[i])], &gains);
            left_out[i] = l;
            right_out[i] = r;
        }
    }

    fn prepare(&mut self, controls: &PlateControls, sample_rate: f64) -> BlockGains {
        self.scheduler.begin_block(sample_rate);
        let internal = self.scheduler.internal_rate(sample_rate);

        let scale = controls.corner_scale();
        let a = self.config.fix_a_hz * scale / internal;
        let d = self.config.fix_d_hz * scale / internal;
        let corners = [a, (a + a + d) / 3.0, (a + d + d) / 3.0, d];
        let resonance = self.config.resonance;
        self.matrix.set_filters(core::array::from_fn::<_, FILTERS, _>(|k| {
            BiquadCoefficients::bandpass(corners[k], resonance[k])
        }));

        let low_cut = controls.low_cut_hz();
        for filter in &mut self.low_cut {
            filter.set_cutoff(low_cut, internal);
        }

        let predelay = libm::floor(controls.predelay * internal) as usize;
        for line in &mut self.predelay {
            line.set_length(predelay);
        }

        let (wet, dry) = submix_gains(controls.wetness);
        BlockGains {
            pad: controls.input_pad,
            regen: controls.regen(),
            wet,
            dry,
        }
    }

    #[inline]
    fn frame(&mut self, input: [f64; 2], gains: &BlockGains) -> [f32; 2] {
        let dry = [
            self.noise[LEFT].guard_denormal(input[LEFT]),
            self.noise[RIGHT].guard_denormal(input[RIGHT]),
        ];

        let cycle_end = self.scheduler.cycle_end();
        if self.scheduler.advance() {
            let wet = self.tick(dry, gains);
            for ch in [LEFT, RIGHT] {
                self.reference[ch].fill(wet[ch], cycle_end);
            }
        }

        let cycle = self.scheduler.cycle();
        let mut out = [0.0f32; 2];
        for ch in [LEFT, RIGHT] {
            let step = self.reference[ch].read(cycle);
            let wet = self.reference[ch].smooth(step, cycle_end);
            let mixed = arcsine_clip(wet) * gains.wet + dry[ch] * gains.dry;
            out[ch] = self.noise[ch].dither_to_f32(mixed);
        }
        out
    }

    /// One run of the reverb proper at the internal rate.
    fn tick(&mut self, input: [f64; 2], gains: &BlockGains) -> [f64; 2] {
        let mut conditioned = [0.0; 2];
        for ch in [LEFT, RIGHT] {
            let mut x = input[ch];
            if gains.pad < 1.0 {
                x *= gains.pad;
            }
            if self.config.input_shaping {
                x = libm::sin(x.clamp(-FRAC_PI_2, FRAC_PI_2));
            }
            x = self.input_compander[ch].process(x);
            x = self.average[ch].process(x);
            conditioned[ch] = self.low_cut[ch].highpass(x);
        }

        let (l, r) = self.early.process(conditioned[LEFT], conditioned[RIGHT]);
        let l = self.predelay[LEFT].tick(l);
        let r = self.predelay[RIGHT].tick(r);
        let (l, r) = self.matrix.process(l, r, gains.regen);
        [
            self.output_compander[LEFT].process(l),
            self.output_compander[RIGHT].process(r),
        ]
    }
}

impl Default for PlateEngine {
    fn default() -> Self {
        Self::new(PlateVariant::default(), DEFAULT_SEED)
    }
}
