//! Xorshift noise source, denormal guard and float dither.
//!
//! Each output channel owns one [`Xorshift32`]. Its state is used twice:
//!
//! - as a tiny positive offset substituted for near-zero input samples, so
//!   the recursive filters never decay into subnormal territory
//! - as the noise source for the final `f64` to `f32` dither, scaled to the
//!   exponent of the sample so the noise sits around the last `f32` bit
//!
//! The recurrence is the 13/17/5 xorshift, so a given seed always produces
//! the same sequence.

use libm::{frexp, ldexp};

/// Inputs below this magnitude are replaced by noise.
pub const DENORMAL_THRESHOLD: f64 = 1.18e-23;
/// Upper bound of the substituted noise.
pub const DENORMAL_FLOOR: f64 = 1.18e-17;
/// Seed used when a zero seed is requested (zero is a fixed point).
pub const DEFAULT_SEED: u32 = 0x2545_F491;

const DITHER_SCALE: f64 = 5.5e-36;
const DITHER_EXPONENT_OFFSET: i32 = 62;
const HALF_RANGE: f64 = 2_147_483_647.0;
const FULL_RANGE: f64 = 4_294_967_296.0;

/// 32-bit xorshift generator.
///
/// # Example
///
/// ```rust
/// use kplate_core::Xorshift32;
///
/// let mut a = Xorshift32::new(17);
/// let mut b = Xorshift32::new(17);
/// assert_eq!(a.next_u32(), b.next_u32());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xorshift32 {
    seed: u32,
    state: u32,
}

impl Xorshift32 {
    /// Creates a generator. A zero seed is replaced by [`DEFAULT_SEED`].
    pub fn new(seed: u32) -> Self {
        let seed = if seed == 0 { DEFAULT_SEED } else { seed };
        Self { seed, state: seed }
    }

    /// Advances and returns the new state.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Current state without advancing.
    #[inline]
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Seed this generator was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Current state mapped to `[0, 1)`.
    #[inline]
    pub fn unit(&self) -> f64 {
        f64::from(self.state) / FULL_RANGE
    }

    /// Replaces a near-zero sample with a tiny positive value from the state.
    #[inline]
    pub fn guard_denormal(&self, sample: f64) -> f64 {
        if sample.abs() < DENORMAL_THRESHOLD {
            self.unit() * DENORMAL_FLOOR
        } else {
            sample
        }
    }

    /// Adds noise around the last `f32` bit of `sample` and narrows it.
    ///
    /// The generator advances once per call. Exact zero passes through
    /// untouched.
    #[inline]
    pub fn dither_to_f32(&mut self, sample: f64) -> f32 {
        let noise = f64::from(self.next_u32()) - HALF_RANGE;
        if sample == 0.0 {
            return 0.0;
        }
        let (_, exponent) = frexp(sample);
        let scale = ldexp(DITHER_SCALE, exponent + DITHER_EXPONENT_OFFSET);
        (sample + noise * scale) as f32
    }

    /// Rewinds to the seed.
    pub fn reset(&mut self) {
        self.state = self.seed;
    }
}

impl Default for Xorshift32 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
