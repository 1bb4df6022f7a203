//! Core Effect trait.
//!
//! The [`Effect`] trait is the seam between the host-facing adapter and any
//! DSP engine. It covers mono and stereo processing, sample-by-sample or in
//! blocks.
//!
//! ## Design Decisions
//!
//! - **Stereo first-class**: the reverb is a true stereo effect (the right
//!   channel uses detuned delay lines), so stereo processing is a required
//!   method rather than two mono instances.
//!
//! - **Object-safe**: `dyn Effect` works for runtime dispatch, though the
//!   plugin holds its engine by value.
//!
//! - **No allocations**: every method must be callable from the audio thread.

/// Core trait for audio effects.
///
/// # Example
///
/// ```rust
/// use basicverb_core::Effect;
///
/// struct Gain(f32);
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.0
///     }
///
///     fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
///         (left * self.0, right * self.0)
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut gain = Gain(0.5);
/// assert_eq!(gain.process(1.0), 0.5);
/// ```
pub trait Effect {
    /// Process a single mono sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process one stereo frame.
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32);

    /// Process a mono block in place.
    ///
    /// Default implementation calls [`process`](Self::process) per sample.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Process a stereo block in place.
    ///
    /// Both channels must be the same length; extra samples in the longer
    /// channel are left untouched.
    fn process_block_stereo_inplace(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(
            left.len(),
            right.len(),
            "Left and right buffers must have same length"
        );
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let (out_l, out_r) = self.process_stereo(*l, *r);
            *l = out_l;
            *r = out_r;
        }
    }

    /// Update the sample rate.
    ///
    /// Effects recalculate anything sample-rate dependent (delay lengths,
    /// smoothing coefficients). Internal state may be cleared.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal state (delay lines, filter history) without changing
    /// parameters.
    fn reset(&mut self);

    /// Report processing latency in samples. Default is 0.
    fn latency_samples(&self) -> usize {
        0
    }
}
