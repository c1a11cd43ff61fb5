//! Stereo bandpass biquad used as the plate's loss model.
//!
//! Coefficients come from the bilinear transform of the analog bandpass
//! prototype, with the frequency given as a fraction of the sample rate so a
//! filter designed for one internal rate sounds the same at any host rate:
//!
//! ```text
//! K    = tan(pi * f)
//! norm = 1 / (1 + K/Q + K^2)
//! a0   = K/Q * norm      a1 = 0      a2 = -a0
//! b1   = 2 * (K^2 - 1) * norm
//! b2   = (1 - K/Q + K^2) * norm
//! ```
//!
//! Processing is transposed direct form II, one history pair per channel.
//! The peak gain at the centre frequency is unity and DC is fully rejected.

use core::f64::consts::PI;
use libm::tan;

/// Lowest accepted frequency fraction.
const MIN_FRACTION: f64 = 1.0e-6;
/// Highest accepted frequency fraction, just below Nyquist so `tan` stays finite.
const MAX_FRACTION: f64 = 0.49;
/// Lowest accepted resonance.
const MIN_RESONANCE: f64 = 1.0e-4;

/// Derived bandpass coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    /// Feed-forward, current input.
    pub a0: f64,
    /// Feed-forward, one sample back (always zero for the bandpass).
    pub a1: f64,
    /// Feed-forward, two samples back.
    pub a2: f64,
    /// Feedback, one sample back.
    pub b1: f64,
    /// Feedback, two samples back.
    pub b2: f64,
}

impl BiquadCoefficients {
    /// Coefficients that pass the input unchanged.
    pub const PASSTHROUGH: Self = Self {
        a0: 1.0,
        a1: 0.0,
        a2: 0.0,
        b1: 0.0,
        b2: 0.0,
    };

    /// Bandpass centred on `frequency` (fraction of the sample rate) with
    /// resonance `q`.
    ///
    /// Out-of-range inputs are clamped: the fraction into `[1e-6, 0.49]`,
    /// the resonance to at least `1e-4`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kplate_core::BiquadCoefficients;
    ///
    /// let c = BiquadCoefficients::bandpass(1000.0 / 44100.0, 0.7);
    /// assert_eq!(c.a1, 0.0);
    /// assert_eq!(c.a2, -c.a0);
    /// ```
    pub fn bandpass(frequency: f64, q: f64) -> Self {
        let frequency = frequency.clamp(MIN_FRACTION, MAX_FRACTION);
        let q = q.max(MIN_RESONANCE);
        let k = tan(PI * frequency);
        let norm = 1.0 / (1.0 + k / q + k * k);
        let a0 = k / q * norm;
        Self {
            a0,
            a1: 0.0,
            a2: -a0,
            b1: 2.0 * (k * k - 1.0) * norm,
            b2: (1.0 - k / q + k * k) * norm,
        }
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::PASSTHROUGH
    }
}

/// Two-channel transposed direct form II biquad sharing one coefficient set.
///
/// # Example
///
/// ```rust
/// use kplate_core::{BiquadCoefficients, StereoBiquad};
///
/// let mut bp = StereoBiquad::new();
/// bp.set_coefficients(BiquadCoefficients::bandpass(0.05, 0.5));
/// let (l, r) = bp.process(1.0, -1.0);
/// assert_eq!(l, -r);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StereoBiquad {
    coefficients: BiquadCoefficients,
    s_l1: f64,
    s_l2: f64,
    s_r1: f64,
    s_r2: f64,
}

impl StereoBiquad {
    /// Creates a passthrough filter with cleared history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the coefficients, keeping the history.
    #[inline]
    pub fn set_coefficients(&mut self, coefficients: BiquadCoefficients) {
        self.coefficients = coefficients;
    }

    /// Current coefficients.
    pub fn coefficients(&self) -> BiquadCoefficients {
        self.coefficients
    }

    /// Filters the left channel only.
    #[inline]
    pub fn process_left(&mut self, input: f64) -> f64 {
        let c = &self.coefficients;
        let out = input * c.a0 + self.s_l1;
        self.s_l1 = input * c.a1 - out * c.b1 + self.s_l2;
        self.s_l2 = input * c.a2 - out * c.b2;
        out
    }

    /// Filters the right channel only.
    #[inline]
    pub fn process_right(&mut self, input: f64) -> f64 {
        let c = &self.coefficients;
        let out = input * c.a0 + self.s_r1;
        self.s_r1 = input * c.a1 - out * c.b1 + self.s_r2;
        self.s_r2 = input * c.a2 - out * c.b2;
        out
    }

    /// Filters one frame.
    #[inline]
    pub fn process(&mut self, left: f64, right: f64) -> (f64, f64) {
        (self.process_left(left), self.process_right(right))
    }

    /// Clears both histories.
    pub fn reset(&mut self) {
        self.s_l1 = 0.0;
        self.s_l2 = 0.0;
        self.s_r1 = 0.0;
        self.s_r2 = 0.0;
    }
}
