//! The five per-block controls.

/// Input pad range (linear gain).
pub const INPUT_PAD_RANGE: (f64, f64) = (0.0, 1.0);
/// Damping range.
pub const DAMPING_RANGE: (f64, f64) = (0.0, 10.0);
/// Low cut range.
pub const LOW_CUT_RANGE: (f64, f64) = (0.0, 3.0);
/// Predelay range in seconds.
pub const PREDELAY_RANGE: (f64, f64) = (0.0, 0.5);
/// Wetness range.
pub const WETNESS_RANGE: (f64, f64) = (0.0, 1.0);

/// Control values sampled once per block by [`PlateEngine::run`](crate::PlateEngine::run).
///
/// Out-of-range values are clamped by the engine; non-finite values fall
/// back to the default for that control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateControls {
    /// Linear input gain, `0..=1`.
    pub input_pad: f64,
    /// High-frequency loss and decay shortening, `0..=10`.
    pub damping: f64,
    /// Input highpass, `20 + 200 * low_cut` Hz, `0..=3`.
    pub low_cut: f64,
    /// Predelay in seconds, `0..=0.5`.
    pub predelay: f64,
    /// Submix position, `0..=1`. Both paths are at full level at 0.5.
    pub wetness: f64,
}

impl Default for PlateControls {
    fn default() -> Self {
        Self {
            input_pad: 1.0,
            damping: 5.0,
            low_cut: 1.0,
            predelay: 0.0,
            wetness: 0.25,
        }
    }
}

fn clamp_or(value: f64, range: (f64, f64), fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(range.0, range.1)
    } else {
        fallback
    }
}

impl PlateControls {
    /// Copy with every control clamped into its range.
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            input_pad: clamp_or(self.input_pad, INPUT_PAD_RANGE, d.input_pad),
            damping: clamp_or(self.damping, DAMPING_RANGE, d.damping),
            low_cut: clamp_or(self.low_cut, LOW_CUT_RANGE, d.low_cut),
            predelay: clamp_or(self.predelay, PREDELAY_RANGE, d.predelay),
            wetness: clamp_or(self.wetness, WETNESS_RANGE, d.wetness),
        }
    }

    /// Per-stage feedback gain, `(0.975 - 0.045 * damping) / 3125`.
    ///
    /// Five Householder stages each scale by 5, so the closed loop gain
    /// before filtering is `3125 * regen`, at most 0.975.
    pub fn regen(&self) -> f64 {
        (0.975 - 0.45 * self.damping / 10.0) / 3125.0
    }

    /// Multiplier applied to both loss-filter corners.
    pub fn corner_scale(&self) -> f64 {
        1.0 - 0.5 * self.damping / 10.0
    }

    /// Input highpass corner in Hz.
    pub fn low_cut_hz(&self) -> f64 {
        20.0 + 200.0 * self.low_cut
    }
}
