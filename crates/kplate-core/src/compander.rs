//! Gain-riding compander.
//!
//! A feedback AGC with no attack or release constants. The gain is applied
//! first, then nudged by the sample it just produced:
//!
//! ```text
//! y     = x * pre * gain
//! arg   = 4           if 4|y| > 1
//!         4|y|        otherwise
//! gain += sin(arg) * y^4
//! out   = y * post
//! ```
//!
//! Above a quarter of full scale `sin(4)` is negative and the `y^4` term
//! pulls the gain down fast. Below it the sine is positive and the same term
//! is tiny, so the gain creeps back up. The gain is clamped to
//! `[1/128, 1]` before every use.

use libm::sin;

/// Lowest gain the compander will apply.
pub const MIN_GAIN: f64 = 1.0 / 128.0;
/// Highest gain the compander will apply.
pub const MAX_GAIN: f64 = 1.0;

/// Per-channel gain rider.
///
/// # Example
///
/// ```rust
/// use kplate_core::Compander;
///
/// let mut comp = Compander::new(1.0, 1.0);
/// for _ in 0..200 {
///     comp.process(0.5);
/// }
/// assert!(comp.gain() < 0.6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Compander {
    pre: f64,
    post: f64,
    gain: f64,
}

impl Compander {
    /// Creates a compander with the given fixed pre and post scaling.
    pub fn new(pre: f64, post: f64) -> Self {
        Self {
            pre,
            post,
            gain: MAX_GAIN,
        }
    }

    /// Process one sample, updating the gain.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        self.gain = self.gain.clamp(MIN_GAIN, MAX_GAIN);
        let y = input * self.pre * self.gain;
        let drive = (y * 4.0).abs();
        let arg = if drive > 1.0 { 4.0 } else { drive };
        let y2 = y * y;
        self.gain += sin(arg) * y2 * y2;
        y * self.post
    }

    /// Gain that will be applied to the next sample (after clamping).
    pub fn gain(&self) -> f64 {
        self.gain.clamp(MIN_GAIN, MAX_GAIN)
    }

    /// Returns to unity gain.
    pub fn reset(&mut self) {
        self.gain = MAX_GAIN;
    }
}
