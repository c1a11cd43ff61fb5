//! Core Effect trait.
//!
//! [`Effect`] is the uniform processing contract every unit in the workspace
//! exposes: one frame in, one frame out, plus block helpers, sample-rate
//! updates and a state reset.
//!
//! ## Design Decisions
//!
//! - **Stereo first**: [`Effect::process_stereo`] is the primary entry point.
//!   Mono [`Effect::process`] exists for simple chains and tests.
//!
//! - **Object-safe**: `dyn Effect` works for runtime selection; generic
//!   dispatch is still preferred on the audio path.
//!
//! - **No allocations**: every method is callable from a real-time thread.

/// Core trait for all audio effects.
///
/// # Example
///
/// ```rust
/// use kplate_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut g = Gain { gain: 0.5 };
/// assert_eq!(g.process_stereo(1.0, -1.0), (0.5, -0.5));
/// ```
pub trait Effect {
    /// Process a single mono sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process one stereo frame.
    ///
    /// Default runs [`process`](Self::process) on each channel in turn, which
    /// is only correct for stateless effects. Effects with internal state
    /// override this.
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        (self.process(left), self.process(right))
    }

    /// Process a block of mono samples.
    ///
    /// # Panics
    /// Debug builds assert `input.len() == output.len()`.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of stereo frames held in separate channel buffers.
    ///
    /// Processes `min` of the four lengths.
    fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) {
        let frames = left_in
            .len()
            .min(right_in.len())
            .min(left_out.len())
            .min(right_out.len());
        for i in 0..frames {
            let (l, r) = self.process_stereo(left_in[i], right_in[i]);
            left_out[i] = l;
            right_out[i] = r;
        }
    }

    /// Whether the two channels interact inside the effect.
    ///
    /// `false` means the effect behaves as two independent mono processors.
    fn is_true_stereo(&self) -> bool {
        false
    }

    /// Update the sample rate.
    ///
    /// Effects recalculate any rate-dependent coefficients here.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal state to silence without touching parameters.
    fn reset(&mut self);

    /// Processing latency in samples. Default is 0.
    fn latency_samples(&self) -> usize {
        0
    }
}
