//! Schroeder allpass filter for diffusion.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::flush_denormal;

/// Schroeder allpass with a fixed-length delay line.
///
/// Passes every frequency at (approximately) equal gain but smears the
/// phase, turning the discrete comb echoes into a dense wash.
///
/// ```text
/// delayed   = buffer[i]
/// buffer[i] = in + delayed * feedback
/// out       = delayed - in
/// ```
///
/// # Example
///
/// ```rust
/// use basicverb_core::AllpassFilter;
///
/// let mut allpass = AllpassFilter::new(556);
/// assert_eq!(allpass.process(1.0), -1.0);
/// ```
#[derive(Debug, Clone)]
pub struct AllpassFilter {
    buffer: Vec<f32>,
    index: usize,
    feedback: f32,
}

impl AllpassFilter {
    /// Create an allpass with a delay of `delay_samples` (minimum 1) and
    /// feedback 0.5.
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            index: 0,
            feedback: 0.5,
        }
    }

    /// Set the feedback coefficient, clamped to `[-0.99, 0.99]`.
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(-0.99, 0.99);
    }

    /// Current feedback coefficient.
    #[inline]
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.buffer[self.index];
        self.buffer[self.index] = flush_denormal(input + delayed * self.feedback);

        self.index += 1;
        if self.index == self.buffer.len() {
            self.index = 0;
        }
        delayed - input
    }

    /// Zero the delay line.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.index = 0;
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
    fn test_impulse_response_shape() {
        let mut allpass = AllpassFilter::new(4);

        // Direct path is inverted
        assert_eq!(allpass.process(1.0), -1.0);
        for _ in 0..3 {
            assert_eq!(allpass.process(0.0), 0.0);
        }
        // Delayed copy comes back at full level, then recirculates at half
        assert_eq!(allpass.process(0.0), 1.0);
        for _ in 0..3 {
            allpass.process(0.0);
        }
        assert_eq!(allpass.process(0.0), 0.5);
    }

    #[test]
    fn test_energy_roughly_preserved() {
        let mut allpass = AllpassFilter::new(50);
        let input: f32 = (0..100).map(|_| 1.0f32).sum();

        let mut output = 0.0f32;
        for i in 0..5000 {
            let x = if i < 100 { 1.0 } else { 0.0 };
            let y = allpass.process(x);
            output += y * y;
        }
        let ratio = output / input;
        assert!(ratio > 0.5 && ratio < 2.0, "energy ratio {ratio}");
    }

    #[test]
    fn test_feedback_clamp() {
        let mut allpass = AllpassFilter::new(10);
        allpass.set_feedback(1.5);
        assert_eq!(allpass.feedback(), 0.99);
        allpass.set_feedback(-1.5);
        assert_eq!(allpass.feedback(), -0.99);
    }

    #[test]
    fn test_clear() {
        let mut allpass = AllpassFilter::new(10);
        for _ in 0..30 {
            allpass.process(1.0);
        }
        allpass.clear();
        assert_eq!(allpass.process(0.0), 0.0);
        assert_eq!(allpass.capacity(), 10);
    }
}
