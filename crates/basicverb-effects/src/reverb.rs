//! Stereo Freeverb engine.
//!
//! Eight parallel lowpass-feedback combs feed four series allpasses on each
//! channel. The right channel's delay lines are a fixed number of samples
//! longer than the left's, which decorrelates the two outputs and gives the
//! reverb its stereo image.

use basicverb_core::{AllpassFilter, CombFilter, Effect, SmoothedParam};

/// Comb filter delay times at 44.1 kHz. Mutually prime to avoid stacking
/// resonances.
const COMB_TUNINGS_44K: [usize; 8] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];

/// Allpass filter delay times at 44.1 kHz.
const ALLPASS_TUNINGS_44K: [usize; 4] = [556, 441, 341, 225];

/// Extra delay applied to every right-channel line, at 44.1 kHz.
const STEREO_SPREAD: usize = 23;

/// Reference sample rate for tuning constants.
const REFERENCE_RATE: f32 = 44100.0;

/// The comb bank sums eight lines, so the input is attenuated heavily.
const FIXED_GAIN: f32 = 0.015;
const SCALE_WET: f32 = 3.0;
const SCALE_DRY: f32 = 2.0;
const SCALE_DAMP: f32 = 0.4;
const SCALE_ROOM: f32 = 0.28;
const OFFSET_ROOM: f32 = 0.7;

/// Ramp time for gain, damping and feedback changes.
const SMOOTHING_MS: f32 = 10.0;

/// Scale delay times from reference rate to target rate.
fn scale_to_rate(samples: usize, target_rate: f32) -> usize {
    (libm::roundf(samples as f32 * target_rate / REFERENCE_RATE) as usize).max(1)
}

/// Replace NaN with zero and clamp into `[0, 1]`.
fn unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Everything that determines how the reverb sounds.
///
/// All continuous fields are in `[0.0, 1.0]`. The default matches a
/// general-purpose medium room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbConfig {
    /// Room size. Larger rooms have longer tails.
    pub room_size: f32,
    /// High-frequency absorption. 0 is bright, 1 is dark.
    pub damping: f32,
    /// Level of the reverberated signal.
    pub wet_level: f32,
    /// Level of the unprocessed input.
    pub dry_level: f32,
    /// Stereo width of the tail. 0 is mono, 1 is fully wide.
    pub width: f32,
    /// Hold the current tail indefinitely and ignore new input.
    pub freeze: bool,
}

impl Default for ReverbConfig {
    fn default() -> Self {
        Self {
            room_size: 0.5,
            damping: 0.5,
            wet_level: 0.33,
            dry_level: 0.4,
            width: 1.0,
            freeze: false,
        }
    }
}

impl ReverbConfig {
    /// Copy with every continuous field forced into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            room_size: unit(self.room_size),
            damping: unit(self.damping),
            wet_level: unit(self.wet_level),
            dry_level: unit(self.dry_level),
            width: unit(self.width),
            freeze: self.freeze,
        }
    }
}

/// Stereo Freeverb reverb.
///
/// Configuration arrives as a whole [`ReverbConfig`]; the engine derives its
/// internal gains from it and ramps them over 10 ms.
///
/// # Gain structure
///
/// ```text
/// input  = (left + right) * 0.015      (0 when frozen)
/// wet    = wet_level * 3
/// wet1   = wet * (1 + width) / 2
/// wet2   = wet * (1 - width) / 2
/// dry    = dry_level * 2
/// left'  = tail_l * wet1 + tail_r * wet2 + left * dry
/// right' = tail_r * wet1 + tail_l * wet2 + right * dry
/// ```
///
/// # Example
///
/// ```rust
/// use basicverb_effects::{Reverb, ReverbConfig};
///
/// let config = ReverbConfig { wet_level: 0.0, dry_level: 0.5, ..ReverbConfig::default() };
/// let mut reverb = Reverb::with_config(48000.0, config);
///
/// assert_eq!(reverb.process_mono(0.25), 0.25);
/// ```
#[derive(Debug, Clone)]
pub struct Reverb {
    combs: [[CombFilter; 8]; 2],
    allpasses: [[AllpassFilter; 4]; 2],

    config: ReverbConfig,
    input_gain: f32,

    damping: SmoothedParam,
    feedback: SmoothedParam,
    dry_gain: SmoothedParam,
    wet_gain1: SmoothedParam,
    wet_gain2: SmoothedParam,

    sample_rate: f32,
}

impl Reverb {
    /// Create a reverb with the default configuration.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_config(sample_rate, ReverbConfig::default())
    }

    /// Create a reverb already settled on `config`, with no initial ramp.
    pub fn with_config(sample_rate: f32, config: ReverbConfig) -> Self {
        let mut reverb = Self {
            combs: build_combs(sample_rate),
            allpasses: build_allpasses(sample_rate),
            config,
            input_gain: FIXED_GAIN,
            damping: SmoothedParam::with_config(0.0, sample_rate, SMOOTHING_MS),
            feedback: SmoothedParam::with_config(0.0, sample_rate, SMOOTHING_MS),
            dry_gain: SmoothedParam::with_config(0.0, sample_rate, SMOOTHING_MS),
            wet_gain1: SmoothedParam::with_config(0.0, sample_rate, SMOOTHING_MS),
            wet_gain2: SmoothedParam::with_config(0.0, sample_rate, SMOOTHING_MS),
            sample_rate,
        };
        reverb.set_config(config);
        reverb.snap_smoothers();
        reverb
    }

    /// Replace the whole configuration. Gains ramp to their new values.
    pub fn set_config(&mut self, config: ReverbConfig) {
        let config = config.clamped();
        self.config = config;

        let wet = config.wet_level * SCALE_WET;
        self.wet_gain1.set_target(0.5 * wet * (1.0 + config.width));
        self.wet_gain2.set_target(0.5 * wet * (1.0 - config.width));
        self.dry_gain.set_target(config.dry_level * SCALE_DRY);

        if config.freeze {
            self.input_gain = 0.0;
            self.damping.set_target(0.0);
            self.feedback.set_target(1.0);
        } else {
            self.input_gain = FIXED_GAIN;
            self.damping.set_target(config.damping * SCALE_DAMP);
            self.feedback
                .set_target(config.room_size * SCALE_ROOM + OFFSET_ROOM);
        }
    }

    /// The configuration currently in effect (after clamping).
    pub fn config(&self) -> ReverbConfig {
        self.config
    }

    /// `true` while freeze mode holds the tail.
    pub fn is_frozen(&self) -> bool {
        self.config.freeze
    }

    /// Current sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Process one stereo frame.
    #[inline]
    pub fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let input = (left + right) * self.input_gain;
        self.tune_combs();

        let [combs_l, combs_r] = &mut self.combs;
        let mut out_l = 0.0;
        let mut out_r = 0.0;
        for (comb_l, comb_r) in combs_l.iter_mut().zip(combs_r.iter_mut()) {
            out_l += comb_l.process(input);
            out_r += comb_r.process(input);
        }

        let [allpasses_l, allpasses_r] = &mut self.allpasses;
        for (ap_l, ap_r) in allpasses_l.iter_mut().zip(allpasses_r.iter_mut()) {
            out_l = ap_l.process(out_l);
            out_r = ap_r.process(out_r);
        }

        let dry = self.dry_gain.advance();
        let wet1 = self.wet_gain1.advance();
        let wet2 = self.wet_gain2.advance();

        (
            out_l * wet1 + out_r * wet2 + left * dry,
            out_r * wet1 + out_l * wet2 + right * dry,
        )
    }

    /// Process one mono sample through the left-channel network.
    #[inline]
    pub fn process_mono(&mut self, sample: f32) -> f32 {
        let input = sample * self.input_gain;
        self.tune_combs();

        let mut out = 0.0;
        for comb in &mut self.combs[0] {
            out += comb.process(input);
        }
        for allpass in &mut self.allpasses[0] {
            out = allpass.process(out);
        }

        let dry = self.dry_gain.advance();
        let wet1 = self.wet_gain1.advance();
        // Kept in step with the others for a later switch to stereo
        self.wet_gain2.advance();

        out * wet1 + sample * dry
    }

    fn tune_combs(&mut self) {
        let damp = self.damping.advance();
        let feedback = self.feedback.advance();
        for comb in self.combs.iter_mut().flatten() {
            comb.set_damp(damp);
            comb.set_feedback(feedback);
        }
    }

    fn snap_smoothers(&mut self) {
        self.damping.snap_to_target();
        self.feedback.snap_to_target();
        self.dry_gain.snap_to_target();
        self.wet_gain1.snap_to_target();
        self.wet_gain2.snap_to_target();
    }
}

fn build_combs(sample_rate: f32) -> [[CombFilter; 8]; 2] {
    core::array::from_fn(|channel| {
        core::array::from_fn(|i| {
            let tuning = COMB_TUNINGS_44K[i] + channel * STEREO_SPREAD;
            CombFilter::new(scale_to_rate(tuning, sample_rate))
        })
    })
}

fn build_allpasses(sample_rate: f32) -> [[AllpassFilter; 4]; 2] {
    core::array::from_fn(|channel| {
        core::array::from_fn(|i| {
            let tuning = ALLPASS_TUNINGS_44K[i] + channel * STEREO_SPREAD;
            AllpassFilter::new(scale_to_rate(tuning, sample_rate))
        })
    })
}

impl Effect for Reverb {
    fn process(&mut self, input: f32) -> f32 {
        self.process_mono(input)
    }

    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        Reverb::process_stereo(self, left, right)
    }

    /// Rebuilds every delay line for the new rate. Tails are lost and any
    /// active ramp completes immediately.
    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.combs = build_combs(sample_rate);
        self.allpasses = build_allpasses(sample_rate);

        self.damping.set_sample_rate(sample_rate);
        self.feedback.set_sample_rate(sample_rate);
        self.dry_gain.set_sample_rate(sample_rate);
        self.wet_gain1.set_sample_rate(sample_rate);
        self.wet_gain2.set_sample_rate(sample_rate);
    }

    /// Clear all delay lines. The configuration is kept.
    fn reset(&mut self) {
        for comb in self.combs.iter_mut().flatten() {
            comb.clear();
        }
        for allpass in self.allpasses.iter_mut().flatten() {
            allpass.clear();
        }
    }
}
