//! [`PlateReverb`]: the engine behind the [`Effect`] and [`ParameterInfo`]
//! contracts.

use kplate_core::{
    DEFAULT_SEED, Effect, ParamDescriptor, ParamId, ParamUnit, ParameterInfo,
};

use crate::config::PlateVariant;
use crate::controls::PlateControls;
use crate::engine::PlateEngine;

/// Parameter index of the input pad.
pub const PARAM_INPUT_PAD: usize = 0;
/// Parameter index of the damping.
pub const PARAM_DAMPING: usize = 1;
/// Parameter index of the low cut.
pub const PARAM_LOW_CUT: usize = 2;
/// Parameter index of the predelay.
pub const PARAM_PREDELAY: usize = 3;
/// Parameter index of the wetness.
pub const PARAM_WETNESS: usize = 4;

/// Number of plate parameters.
pub const PARAM_COUNT: usize = 5;

/// Descriptors for every plate parameter, in index order.
///
/// Values are in display units: percent for pad and wetness, milliseconds
/// for predelay.
pub fn param_descriptors() -> [ParamDescriptor; PARAM_COUNT] {
    [
        ParamDescriptor::new("Input Pad", "Pad", ParamUnit::Percent, 0.0, 100.0, 100.0)
            .with_id(ParamId(100), "input_pad"),
        ParamDescriptor::new("Damping", "Damp", ParamUnit::None, 0.0, 10.0, 5.0)
            .with_id(ParamId(101), "damping"),
        ParamDescriptor::new("Low Cut", "LowCut", ParamUnit::None, 0.0, 3.0, 1.0)
            .with_id(ParamId(102), "low_cut"),
        ParamDescriptor::time_ms("Predelay", "PreDly", 0.0, 500.0, 0.0)
            .with_id(ParamId(103), "predelay"),
        ParamDescriptor::new("Wetness", "Wet", ParamUnit::Percent, 0.0, 100.0, 25.0)
            .with_id(ParamId(104), "wetness"),
    ]
}

/// Stereo plate reverb.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Input Pad | 0–100 % | 100 |
/// | 1 | Damping | 0–10 | 5 |
/// | 2 | Low Cut | 0–3 | 1 |
/// | 3 | Predelay | 0–500 ms | 0 |
/// | 4 | Wetness | 0–100 % | 25 |
///
/// Wetness is a submix, not a crossfade: at 50 % both the dry and the wet
/// path are at full level.
///
/// # Example
///
/// ```rust
/// use kplate_core::Effect;
/// use kplate_effects::{PlateReverb, PlateVariant};
///
/// let mut plate = PlateReverb::with_variant(PlateVariant::D, 48000.0);
/// plate.set_damping(2.0);
/// plate.set_wetness(0.4);
///
/// let (l, r) = plate.process_stereo(0.5, -0.5);
/// assert!(l.abs() <= 1.0 && r.abs() <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct PlateReverb {
    engine: PlateEngine,
    controls: PlateControls,
    sample_rate: f32,
}

impl PlateReverb {
    /// Plate A at `sample_rate`.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_variant(PlateVariant::default(), sample_rate)
    }

    /// The given plate at `sample_rate`.
    pub fn with_variant(variant: PlateVariant, sample_rate: f32) -> Self {
        Self::with_seed(variant, sample_rate, DEFAULT_SEED)
    }

    /// The given plate with an explicit noise seed.
    pub fn with_seed(variant: PlateVariant, sample_rate: f32, seed: u32) -> Self {
        Self {
            engine: PlateEngine::new(variant, seed),
            controls: PlateControls::default(),
            sample_rate,
        }
    }

    /// Current plate character.
    pub fn variant(&self) -> PlateVariant {
        self.engine.variant()
    }

    /// Switches plate character, resetting the tail.
    pub fn set_variant(&mut self, variant: PlateVariant) {
        self.engine.set_variant(variant);
    }

    /// Current (clamped) controls.
    pub fn controls(&self) -> PlateControls {
        self.controls
    }

    /// Replaces all five controls at once.
    pub fn set_controls(&mut self, controls: PlateControls) {
        self.controls = controls.clamped();
    }

    /// Linear input gain, `0..=1`.
    pub fn set_input_pad(&mut self, pad: f64) {
        self.set_controls(PlateControls {
            input_pad: pad,
            ..self.controls
        });
    }

    /// Damping, `0..=10`.
    pub fn set_damping(&mut self, damping: f64) {
        self.set_controls(PlateControls {
            damping,
            ..self.controls
        });
    }

    /// Low cut, `0..=3`.
    pub fn set_low_cut(&mut self, low_cut: f64) {
        self.set_controls(PlateControls {
            low_cut,
            ..self.controls
        });
    }

    /// Predelay in seconds, `0..=0.5`.
    pub fn set_predelay(&mut self, seconds: f64) {
        self.set_controls(PlateControls {
            predelay: seconds,
            ..self.controls
        });
    }

    /// Wetness, `0..=1`.
    pub fn set_wetness(&mut self, wetness: f64) {
        self.set_controls(PlateControls {
            wetness,
            ..self.controls
        });
    }

    /// Host sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// The engine, for introspection.
    pub fn engine(&self) -> &PlateEngine {
        &self.engine
    }
}

impl Effect for PlateReverb {
    fn process(&mut self, input: f32) -> f32 {
        let (left, right) = self.process_stereo(input, input);
        (left + right) * 0.5
    }

    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let mut out_l = [0.0];
        let mut out_r = [0.0];
        self.engine.run(
            &self.controls,
            f64::from(self.sample_rate),
            &[left],
            &[right],
            &mut out_l,
            &mut out_r,
        );
        (out_l[0], out_r[0])
    }

    fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) {
        self.engine.run(
            &self.controls,
            f64::from(self.sample_rate),
            left_in,
            right_in,
            left_out,
            right_out,
        );
    }

    fn is_true_stereo(&self) -> bool {
        true
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, "plate sample rate changed");
    }

    fn reset(&mut self) {
        self.engine.reset();
    }
}

impl ParameterInfo for PlateReverb {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        param_descriptors().get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        let c = &self.controls;
        let value = match index {
            PARAM_INPUT_PAD => c.input_pad * 100.0,
            PARAM_DAMPING => c.damping,
            PARAM_LOW_CUT => c.low_cut,
            PARAM_PREDELAY => c.predelay * 1000.0,
            PARAM_WETNESS => c.wetness * 100.0,
            _ => 0.0,
        };
        value as f32
    }

    fn set_param(&mut self, index: usize, value: f32) {
        let Some(desc) = self.param_info(index) else {
            return;
        };
        let value = f64::from(desc.clamp(value));
        match index {
            PARAM_INPUT_PAD => self.set_input_pad(value / 100.0),
            PARAM_DAMPING => self.set_damping(value),
            PARAM_LOW_CUT => self.set_low_cut(value),
            PARAM_PREDELAY => self.set_predelay(value / 1000.0),
            PARAM_WETNESS => self.set_wetness(value / 100.0),
            _ => {}
        }
    }
}
