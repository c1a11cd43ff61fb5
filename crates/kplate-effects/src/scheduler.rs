//! Fixed-ratio decimation and reconstruction.
//!
//! The delay tables are tuned for an internal rate near 44.1 kHz. At host
//! rates that are a multiple of it the engine fires once every `cycle_end`
//! frames (`cycle_end = clamp(floor(rate / 44100), 1, 4)`); the frames in
//! between are filled from a linear ladder running from the previous engine
//! output to the new one, then smoothed by `cycle_end - 1` averaging poles.

/// Rate the delay tables are tuned for.
pub const REFERENCE_RATE: f64 = 44_100.0;
/// Largest decimation factor (192 kHz and up).
pub const MAX_CYCLE_END: usize = 4;

/// Decimation factor for a host rate.
pub fn cycle_end_for(sample_rate: f64) -> usize {
    let ratio = libm::floor(sample_rate / REFERENCE_RATE);
    if ratio.is_finite() && ratio >= 1.0 {
        (ratio as usize).min(MAX_CYCLE_END)
    } else {
        1
    }
}

/// Cycle counter shared by both channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateScheduler {
    cycle: usize,
    cycle_end: usize,
}

impl Default for RateScheduler {
    fn default() -> Self {
        Self {
            cycle: 0,
            cycle_end: 1,
        }
    }
}

impl RateScheduler {
    /// Scheduler for a host rate, at cycle zero.
    pub fn new(sample_rate: f64) -> Self {
        let mut scheduler = Self::default();
        scheduler.begin_block(sample_rate);
        scheduler
    }

    /// Re-derives the decimation factor and pulls the cycle back into
    /// `0..cycle_end` if the factor shrank.
    pub fn begin_block(&mut self, sample_rate: f64) {
        self.cycle_end = cycle_end_for(sample_rate);
        self.cycle = self.cycle.min(self.cycle_end - 1);
    }

    /// Counts one frame. Returns `true` when the engine fires on this frame.
    #[inline]
    pub fn advance(&mut self) -> bool {
        self.cycle += 1;
        if self.cycle >= self.cycle_end {
            self.cycle = 0;
            true
        } else {
            false
        }
    }

    /// Position within the current cycle; indexes the ladder.
    #[inline]
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Frames per engine tick.
    #[inline]
    pub fn cycle_end(&self) -> usize {
        self.cycle_end
    }

    /// Rate the engine runs at for a given host rate.
    pub fn internal_rate(&self, sample_rate: f64) -> f64 {
        sample_rate / self.cycle_end as f64
    }

    /// Back to cycle zero.
    pub fn reset(&mut self) {
        self.cycle = 0;
    }
}

/// Per-channel reconstruction state: the ladder and the smoothing poles.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReferenceBuffer {
    ladder: [f64; MAX_CYCLE_END + 1],
    poles: [f64; MAX_CYCLE_END - 1],
}

impl ReferenceBuffer {
    /// Spreads a fresh engine output across the ladder.
    ///
    /// Slot 0 takes the previous last reference, the following slots step
    /// linearly towards `sample`, which is kept in slot `cycle_end` for the
    /// next fill. With `cycle_end == 1` the sample is used directly.
    pub fn fill(&mut self, sample: f64, cycle_end: usize) {
        let l = &mut self.ladder;
        match cycle_end {
            4 => {
                l[0] = l[4];
                l[2] = (l[0] + sample) / 2.0;
                l[1] = (l[0] + l[2]) / 2.0;
                l[3] = (l[2] + sample) / 2.0;
                l[4] = sample;
            }
            3 => {
                l[0] = l[3];
                l[1] = (l[0] + l[0] + sample) / 3.0;
                l[2] = (l[0] + sample + sample) / 3.0;
                l[3] = sample;
            }
            2 => {
                l[0] = l[2];
                l[1] = (l[0] + sample) / 2.0;
                l[2] = sample;
            }
            _ => l[0] = sample,
        }
    }

    /// Ladder value for a cycle position.
    #[inline]
    pub fn read(&self, cycle: usize) -> f64 {
        self.ladder[cycle.min(MAX_CYCLE_END)]
    }

    /// Runs `sample` through `cycle_end - 1` two-tap averaging poles.
    #[inline]
    pub fn smooth(&mut self, sample: f64, cycle_end: usize) -> f64 {
        let mut x = sample;
        for stage in (2..=cycle_end.min(MAX_CYCLE_END)).rev() {
            let pole = &mut self.poles[stage - 2];
            let previous = *pole;
            *pole = x;
            x = (x + previous) / 2.0;
        }
        x
    }

    /// Zeroes the ladder and the poles.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
