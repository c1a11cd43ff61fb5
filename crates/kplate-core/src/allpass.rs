//! Allpass section for early-reflection diffusion.
//!
//! A Schroeder allpass built on a [`DelayLine`] with a fixed coefficient of
//! one half in both the feed-forward and feedback paths:
//!
//! ```text
//! v[n] = x[n] - g * v[n - L]
//! y[n] = g * v[n] + v[n - L]
//! ```
//!
//! With `g = 0.5` the direct path passes half the input and the delayed path
//! three quarters of it, and the magnitude response is flat.

use crate::DelayLine;

/// Coefficient shared by the feed-forward and feedback paths.
pub const DIFFUSION: f64 = 0.5;

/// Schroeder allpass section with an integer delay.
///
/// # Example
///
/// ```rust
/// use kplate_core::AllpassSection;
///
/// let mut ap = AllpassSection::new(4);
/// assert_eq!(ap.process(1.0), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct AllpassSection {
    line: DelayLine,
}

impl AllpassSection {
    /// Creates a section delaying its internal state by `length` samples.
    pub fn new(length: usize) -> Self {
        Self {
            line: DelayLine::new(length),
        }
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let stored = input - self.line.oldest() * DIFFUSION;
        let delayed = self.line.tick(stored);
        stored * DIFFUSION + delayed
    }

    /// Delay length in samples.
    pub fn length(&self) -> usize {
        self.line.length()
    }

    /// Zeroes the internal line and rewinds its index.
    pub fn reset(&mut self) {
        self.line.reset();
    }
}
