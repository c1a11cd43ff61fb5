//! Householder feedback matrix.
//!
//! Each channel owns 25 delay lines in five groups of five. One engine tick
//! runs the channel through all five groups:
//!
//! 1. group 0 is written with the predelayed input plus the feedback set
//!    scaled by `regen`
//! 2. for stages 1 to 4, line 0 of the previous group goes through the
//!    stage's bandpass, lines 1 to 4 through their own [`Mulch`], and the
//!    five values are remixed by [`householder`] into the next group
//! 3. group 4 is summed into the wet output, and its Householder mix becomes
//!    the feedback set of the *other* channel for the next tick
//!
//! The cross-channel closure is what makes the two halves one plate rather
//! than two mono reverbs.

use kplate_core::{BiquadCoefficients, DelayLine, Mulch, StereoBiquad};

use crate::config::{GROUPS, LINES_PER_GROUP, PlateConfig};

/// Scale from the final group sum to the wet signal (`1 / 625`).
pub const WET_SCALE: f64 = 0.0016;

/// Loss filters, one between each pair of groups.
pub const FILTERS: usize = GROUPS - 1;

type Group = [DelayLine; LINES_PER_GROUP];
type Taps = [f64; LINES_PER_GROUP];

/// Householder reflection `3 x_i - 2 * sum(x_j, j != i)`.
///
/// Equal to `5 I - 2 J`, five times an orthogonal matrix.
#[inline]
pub fn householder(taps: &Taps) -> Taps {
    let sum: f64 = taps.iter().sum();
    core::array::from_fn(|i| 3.0 * taps[i] - 2.0 * (sum - taps[i]))
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// One channel's lines, smoothers and feedback set.
#[derive(Debug, Clone)]
struct Channel {
    groups: [Group; GROUPS],
    mulch: [[Mulch; LINES_PER_GROUP - 1]; FILTERS],
    feedback: Taps,
}

impl Channel {
    fn new(length: impl Fn(usize, usize) -> usize) -> Self {
        Self {
            groups: core::array::from_fn(|g| {
                core::array::from_fn(|i| DelayLine::new(length(g, i)))
            }),
            mulch: Default::default(),
            feedback: [0.0; LINES_PER_GROUP],
        }
    }

    /// Runs one tick through all groups. Returns the wet sample and the
    /// feedback set destined for the other channel.
    fn cascade(
        &mut self,
        filters: &mut [StereoBiquad; FILTERS],
        side: Side,
        input: f64,
        regen: f64,
    ) -> (f64, Taps) {
        let feedback = self.feedback;
        let mut taps: Taps =
            core::array::from_fn(|i| self.groups[0][i].tick(input + feedback[i] * regen));

        for stage in 1..GROUPS {
            let filter = &mut filters[stage - 1];
            taps[0] = match side {
                Side::Left => filter.process_left(taps[0]),
                Side::Right => filter.process_right(taps[0]),
            };
            for (tap, mulch) in taps[1..].iter_mut().zip(&mut self.mulch[stage - 1]) {
                *tap = mulch.process(*tap);
            }
            let mixed = householder(&taps);
            for ((tap, line), value) in taps.iter_mut().zip(&mut self.groups[stage]).zip(mixed) {
                *tap = line.tick(value);
            }
        }

        let wet = taps.iter().sum::<f64>() * WET_SCALE;
        (wet, householder(&taps))
    }

    fn reset(&mut self) {
        for line in self.groups.iter_mut().flatten() {
            line.reset();
        }
        for mulch in self.mulch.iter_mut().flatten() {
            mulch.reset();
        }
        self.feedback = [0.0; LINES_PER_GROUP];
    }
}

/// Stereo feedback delay network with cross-coupled closure.
#[derive(Debug, Clone)]
pub struct HouseholderMatrix {
    left: Channel,
    right: Channel,
    filters: [StereoBiquad; FILTERS],
}

impl HouseholderMatrix {
    /// Allocates every line at its table length.
    pub fn new(config: &PlateConfig) -> Self {
        Self {
            left: Channel::new(|g, i| config.left_length(g, i)),
            right: Channel::new(|g, i| config.right_length(g, i)),
            filters: Default::default(),
        }
    }

    /// Loads the four loss filters (A through D).
    pub fn set_filters(&mut self, coefficients: [BiquadCoefficients; FILTERS]) {
        for (filter, c) in self.filters.iter_mut().zip(coefficients) {
            filter.set_coefficients(c);
        }
    }

    /// Runs one engine tick and returns the wet pair.
    #[inline]
    pub fn process(&mut self, left: f64, right: f64, regen: f64) -> (f64, f64) {
        let (wet_left, to_right) = self.left.cascade(&mut self.filters, Side::Left, left, regen);
        let (wet_right, to_left) = self.right.cascade(&mut self.filters, Side::Right, right, regen);
        self.left.feedback = to_left;
        self.right.feedback = to_right;
        (wet_left, wet_right)
    }

    /// Feedback sets waiting for the next tick, `(left, right)`.
    pub fn feedback(&self) -> (Taps, Taps) {
        (self.left.feedback, self.right.feedback)
    }

    /// Silences every line, smoother and filter and drops the feedback sets.
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
        for filter in &mut self.filters {
            filter.reset();
        }
    }
}
