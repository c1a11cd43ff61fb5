//! One-pole smoothers: the input low-cut and the "mulch" averager.
//!
//! [`OnePole`] is the leaky integrator
//!
//! ```text
//! s[n] = s[n-1] * (1 - a) + x[n] * a
//! ```
//!
//! used either as a 6 dB/oct lowpass (`s`) or, by subtracting it from the
//! input, as the matching highpass (`x - s`). The plate uses the highpass
//! form as its low-cut control.
//!
//! [`Mulch`] is the two-tap average `(x[n] + x[n-1]) / 2`: a zero at Nyquist,
//! half a sample of delay, nothing else. The plate runs it on the matrix lines
//! that do not go through a biquad.

use core::f64::consts::TAU;

/// Leaky integrator with a highpass tap.
///
/// # Example
///
/// ```rust
/// use kplate_core::OnePole;
///
/// let mut lc = OnePole::new();
/// lc.set_cutoff(200.0, 44100.0);
/// let mut y = 1.0;
/// for _ in 0..44100 {
///     y = lc.highpass(1.0);
/// }
/// assert!(y.abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OnePole {
    amount: f64,
    state: f64,
}

impl OnePole {
    /// Creates an integrator with a zero coefficient (lowpass holds, highpass passes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the integration amount directly, clamped to `[0, 1]`.
    #[inline]
    pub fn set_amount(&mut self, amount: f64) {
        self.amount = amount.clamp(0.0, 1.0);
    }

    /// Sets the amount from a corner frequency: `min(1, 2 pi fc / rate)`.
    pub fn set_cutoff(&mut self, cutoff_hz: f64, sample_rate: f64) {
        self.set_amount(TAU * cutoff_hz / sample_rate);
    }

    /// Current amount.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Advances the integrator and returns the lowpass output.
    #[inline]
    pub fn lowpass(&mut self, input: f64) -> f64 {
        self.state = self.state * (1.0 - self.amount) + input * self.amount;
        self.state
    }

    /// Advances the integrator and returns `input - lowpass`.
    #[inline]
    pub fn highpass(&mut self, input: f64) -> f64 {
        input - self.lowpass(input)
    }

    /// Clears the integrator.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

/// Half-sample averager, `(current + previous) / 2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mulch {
    previous: f64,
}

impl Mulch {
    /// Creates an averager with zero history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Averages the input with the previous input.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let out = (input + self.previous) * 0.5;
        self.previous = input;
        out
    }

    /// Clears the history.
    pub fn reset(&mut self) {
        self.previous = 0.0;
    }
}
