//! Audio processor for the reverb plugin.
//!
//! Handles the real-time callback: drains the dirty flag, reconfigures the
//! engine if needed, and processes the host's buffers in place. Nothing
//! here locks, allocates or logs.

use crate::applier::{ProcessMode, UpdateApplier};
use crate::error::PluginError;
use crate::shared::ReverbShared;
use basicverb_core::Effect;
use basicverb_effects::{Reverb, ReverbConfig};

/// Host audio settings fixed for the lifetime of one activation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioConfig {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Largest block the processor handles between two flag checks. Longer
    /// buffers are split.
    pub max_block_size: usize,
    /// Initial processing mode.
    pub mode: ProcessMode,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            max_block_size: 512,
            mode: ProcessMode::Realtime,
        }
    }
}

/// What the host should do after this block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// Keep calling `process` unconditionally.
    Continue,
    /// The output is a decaying tail; the host may stop once it is quiet.
    Tail,
}

/// Audio-thread processor wrapping the reverb engine.
///
/// Created at activation and dropped at deactivation. Owns the engine and
/// the applier; the parameter store it reads is shared with the session.
pub struct ReverbAudioProcessor {
    applier: UpdateApplier,
    reverb: Reverb,
    mode: ProcessMode,
    max_block_size: usize,
}

impl ReverbAudioProcessor {
    /// Build the engine and push the session's full configuration into it.
    ///
    /// Clears the dirty flag: the engine starts in sync with the store.
    pub fn activate(shared: &ReverbShared, config: AudioConfig) -> Result<Self, PluginError> {
        if !config.sample_rate.is_finite() || config.sample_rate <= 0.0 {
            return Err(PluginError::InvalidSampleRate(config.sample_rate));
        }

        let mut applier = shared.applier();
        let reverb = Reverb::with_config(config.sample_rate, applier.sync());

        tracing::info!(
            sample_rate = config.sample_rate,
            max_block_size = config.max_block_size,
            mode = ?config.mode,
            "reverb activated"
        );
        Ok(Self {
            applier,
            reverb,
            mode: config.mode,
            max_block_size: config.max_block_size.max(1),
        })
    }

    /// Switch between realtime and offline rendering.
    pub fn set_mode(&mut self, mode: ProcessMode) {
        self.mode = mode;
    }

    /// Current processing mode.
    pub fn mode(&self) -> ProcessMode {
        self.mode
    }

    /// Process one host buffer in place.
    ///
    /// One channel is processed as mono. Two or more are processed as stereo
    /// on the first two; the rest are left untouched. The dirty flag is
    /// checked once per `max_block_size` frames, and at least once per call.
    pub fn process(&mut self, channels: &mut [&mut [f32]]) -> ProcessStatus {
        let block = self.max_block_size;
        match channels {
            [] => self.begin_block(),
            [mono] => {
                if mono.is_empty() {
                    self.begin_block();
                }
                for chunk in mono.chunks_mut(block) {
                    self.begin_block();
                    self.reverb.process_block_inplace(chunk);
                }
            }
            [left, right, ..] => {
                let frames = left.len().min(right.len());
                if frames == 0 {
                    self.begin_block();
                }
                let left = left[..frames].chunks_mut(block);
                let right = right[..frames].chunks_mut(block);
                for (l, r) in left.zip(right) {
                    self.begin_block();
                    self.reverb.process_block_stereo_inplace(l, r);
                }
            }
        }

        if self.reverb.is_frozen() {
            ProcessStatus::Continue
        } else {
            ProcessStatus::Tail
        }
    }

    /// Clear the engine's tails. The configuration is kept.
    pub fn reset(&mut self) {
        self.reverb.reset();
    }

    /// The configuration the engine is running with.
    pub fn config(&self) -> ReverbConfig {
        self.reverb.config()
    }

    /// Number of reconfigurations since activation.
    pub fn rebuild_count(&self) -> u64 {
        self.applier.rebuild_count()
    }

    /// Sample rate of this activation.
    pub fn sample_rate(&self) -> f32 {
        self.reverb.sample_rate()
    }

    #[inline]
    fn begin_block(&mut self) {
        if let Some(config) = self.applier.apply(self.mode) {
            self.reverb.set_config(config);
        }
    }
}
