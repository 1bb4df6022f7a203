//! Lowpass-feedback comb filter, the resonator at the heart of the reverb.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::flush_denormal;

/// Feedback comb filter with a one-pole lowpass in the loop.
///
/// ```text
/// out    = buffer[i]
/// store  = out * (1 - damp) + store * damp
/// buffer[i] = in + store * feedback
/// ```
///
/// The lowpass models high-frequency absorption: each pass round the loop
/// loses a little more treble, so the tail darkens as it decays.
///
/// # Example
///
/// ```rust
/// use basicverb_core::CombFilter;
///
/// let mut comb = CombFilter::new(1000);
/// comb.set_feedback(0.8);
/// comb.set_damp(0.3);
///
/// assert_eq!(comb.process(1.0), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct CombFilter {
    buffer: Vec<f32>,
    index: usize,
    feedback: f32,
    damp: f32,
    store: f32,
}

impl CombFilter {
    /// Create a comb with a delay of `delay_samples` (minimum 1).
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            index: 0,
            feedback: 0.5,
            damp: 0.5,
            store: 0.0,
        }
    }

    /// Set the loop gain, clamped to `[0.0, 1.0]`.
    ///
    /// `1.0` is lossless when damping is zero: the contents recirculate
    /// forever. The reverb relies on this for freeze mode.
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 1.0);
    }

    /// Current loop gain.
    #[inline]
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Set the lowpass coefficient in `[0.0, 1.0]`; 0 is brightest.
    #[inline]
    pub fn set_damp(&mut self, damp: f32) {
        self.damp = damp.clamp(0.0, 1.0);
    }

    /// Current lowpass coefficient.
    #[inline]
    pub fn damp(&self) -> f32 {
        self.damp
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.buffer[self.index];
        self.store = flush_denormal(output * (1.0 - self.damp) + self.store * self.damp);
        self.buffer[self.index] = input + self.store * self.feedback;

        self.index += 1;
        if self.index == self.buffer.len() {
            self.index = 0;
        }
        output
    }

    /// Zero the delay line and the lowpass state.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.index = 0;
        self.store = 0.0;
    }

    /// Delay length in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_returns_after_delay() {
        let mut comb = CombFilter::new(100);
        comb.set_feedback(0.5);
        comb.set_damp(0.0);

        assert_eq!(comb.process(1.0), 0.0);
        for _ in 0..99 {
            assert_eq!(comb.process(0.0), 0.0);
        }
        assert_eq!(comb.process(0.0), 1.0);
    }

    #[test]
    fn test_echoes_decay_by_feedback() {
        let mut comb = CombFilter::new(10);
        comb.set_feedback(0.5);
        comb.set_damp(0.0);

        comb.process(1.0);
        for _ in 0..9 {
            comb.process(0.0);
        }
        assert_eq!(comb.process(0.0), 1.0);
        for _ in 0..9 {
            comb.process(0.0);
        }
        assert!((comb.process(0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_unity_feedback_sustains() {
        let mut comb = CombFilter::new(8);
        comb.set_feedback(1.0);
        comb.set_damp(0.0);
        assert_eq!(comb.feedback(), 1.0);

        comb.process(1.0);
        let mut peak = 0.0f32;
        for _ in 0..8000 {
            peak = peak.max(comb.process(0.0).abs());
        }
        // Still ringing at full level after a thousand round trips
        let mut late = 0.0f32;
        for _ in 0..8 {
            late = late.max(comb.process(0.0).abs());
        }
        assert!((late - 1.0).abs() < 1e-5, "late peak {late}");
        assert!((peak - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_parameter_clamping() {
        let mut comb = CombFilter::new(4);
        comb.set_feedback(1.5);
        assert_eq!(comb.feedback(), 1.0);
        comb.set_feedback(-0.1);
        assert_eq!(comb.feedback(), 0.0);
        comb.set_damp(2.0);
        assert_eq!(comb.damp(), 1.0);
    }

    #[test]
    fn test_damping_removes_energy() {
        let mut bright = CombFilter::new(20);
        bright.set_feedback(0.8);
        bright.set_damp(0.0);

        let mut dark = CombFilter::new(20);
        dark.set_feedback(0.8);
        dark.set_damp(0.8);

        bright.process(1.0);
        dark.process(1.0);

        let mut bright_sum = 0.0f32;
        let mut dark_sum = 0.0f32;
        for _ in 0..200 {
            bright_sum += bright.process(0.0).abs();
            dark_sum += dark.process(0.0).abs();
        }
        assert!(dark_sum < bright_sum);
    }

    #[test]
    fn test_clear() {
        let mut comb = CombFilter::new(10);
        comb.set_feedback(0.9);
        for _ in 0..20 {
            comb.process(1.0);
        }
        comb.clear();
        for _ in 0..20 {
            assert_eq!(comb.process(0.0), 0.0);
        }
    }

    #[test]
    fn test_zero_length_is_one_sample() {
        let mut comb = CombFilter::new(0);
        assert_eq!(comb.capacity(), 1);
        comb.set_feedback(0.0);
        assert_eq!(comb.process(1.0), 0.0);
        assert_eq!(comb.process(0.0), 1.0);
    }

    #[test]
    fn test_no_subnormals_after_long_silence() {
        let mut comb = CombFilter::new(100);
        comb.set_feedback(0.9);
        comb.set_damp(0.3);
        for _ in 0..1000 {
            comb.process(0.5);
        }
        for _ in 0..100_000 {
            let out = comb.process(0.0);
            assert!(out == 0.0 || out.abs() > f32::MIN_POSITIVE, "subnormal {out:e}");
        }
    }
}
