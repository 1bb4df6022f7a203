//! Linear parameter ramps for zipper-free gain changes.
//!
//! When a reverb control moves, the engine does not jump its wet, dry and
//! damping coefficients to the new value. Each one ramps linearly over a
//! fixed time so that automation never clicks.
//!
//! ## Usage
//!
//! ```rust
//! use basicverb_core::SmoothedParam;
//!
//! let mut wet = SmoothedParam::with_config(0.0, 48000.0, 10.0);
//! wet.set_target(1.0);
//!
//! // 10 ms at 48 kHz
//! for _ in 0..480 {
//!     let _gain = wet.advance();
//! }
//! assert!(wet.is_settled());
//! assert_eq!(wet.get(), 1.0);
//! ```

/// A value that ramps linearly towards its target over a fixed time.
///
/// Every call to [`set_target`](Self::set_target) restarts the ramp from the
/// current value, so the transition always takes the configured time
/// regardless of distance.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    current: f32,
    target: f32,
    /// Per-sample increment for the active ramp.
    step: f32,
    /// Samples left until `current == target`.
    remaining: u32,
    sample_rate: f32,
    ramp_time_ms: f32,
}

impl SmoothedParam {
    /// Create a parameter with no ramp (changes are instant).
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            step: 0.0,
            remaining: 0,
            sample_rate: 44100.0,
            ramp_time_ms: 0.0,
        }
    }

    /// Create a parameter with a sample rate and ramp time.
    pub fn with_config(initial: f32, sample_rate: f32, ramp_time_ms: f32) -> Self {
        Self {
            sample_rate,
            ramp_time_ms,
            ..Self::new(initial)
        }
    }

    /// Start ramping towards `target`.
    ///
    /// Setting the same target again is a no-op and does not restart the ramp.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        if target == self.target {
            return;
        }
        self.target = target;

        let samples = self.ramp_samples();
        if samples == 0 {
            self.current = target;
            self.step = 0.0;
            self.remaining = 0;
        } else {
            self.step = (target - self.current) / samples as f32;
            self.remaining = samples;
        }
    }

    /// Update the sample rate. An active ramp finishes immediately.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.snap_to_target();
    }

    /// Advance by one sample and return the new value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        match self.remaining {
            0 => {}
            1 => {
                self.current = self.target;
                self.remaining = 0;
            }
            _ => {
                self.current += self.step;
                self.remaining -= 1;
            }
        }
        self.current
    }

    /// Current value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Value the ramp is heading for.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// `true` once the ramp has reached its target.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.remaining == 0
    }

    /// Finish the active ramp immediately.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
        self.step = 0.0;
        self.remaining = 0;
    }

    fn ramp_samples(&self) -> u32 {
        if self.ramp_time_ms <= 0.0 || self.sample_rate <= 0.0 {
            return 0;
        }
        libm::roundf(self.ramp_time_ms / 1000.0 * self.sample_rate) as u32
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}
