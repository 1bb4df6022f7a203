//! Host-facing adapter for the basicverb reverb.
//!
//! At its centre is the hand-off between the control side (GUI, host
//! automation, state restore) and the audio thread:
//!
//! ```text
//! set value ─▶ ParameterStore ─▶ DirtyFlag::mark
//!                                     │
//! audio block ─▶ UpdateApplier ─▶ DirtyFlag::take ─▶ ReverbConfig ─▶ Reverb
//! ```
//!
//! | Type | Role |
//! |------|------|
//! | [`ParameterStore`] | Lock-free atomic values plus descriptors |
//! | [`DirtyFlag`] | One `AtomicBool`, owned by the session |
//! | [`UpdateApplier`] | Test-and-clear per block, rebuild on change or offline |
//! | [`ReverbShared`] | The session: store, flag and resolved handles |
//! | [`ReverbAudioProcessor`] | Audio-thread entry point |
//! | [`ReverbMainThread`] | Parameter metadata, state, layouts, programs |
//!
//! # Example
//!
//! ```rust
//! use basicverb_plugin::{AudioConfig, ReverbAudioProcessor, ReverbShared, params};
//!
//! let shared = ReverbShared::new(None)?;
//! let mut processor = ReverbAudioProcessor::activate(&shared, AudioConfig::default())?;
//!
//! let store = shared.store();
//! if let Some(room) = store.index_of(params::ROOM_SIZE) {
//!     store.set(room, 0.9);
//! }
//!
//! let mut left = vec![0.0f32; 256];
//! let mut right = vec![0.0f32; 256];
//! processor.process(&mut [left.as_mut_slice(), right.as_mut_slice()]);
//! assert_eq!(processor.config().room_size, 0.9);
//! # Ok::<(), basicverb_plugin::PluginError>(())
//! ```

pub mod applier;
pub mod audio;
pub mod error;
pub mod main_thread;
pub mod notifier;
pub mod params;
pub mod preset;
pub mod shared;
pub mod store;

pub use applier::{ProcessMode, ReverbHandles, UpdateApplier};
pub use audio::{AudioConfig, ProcessStatus, ReverbAudioProcessor};
pub use error::PluginError;
pub use main_thread::{ParamInfo, ReverbMainThread};
pub use notifier::DirtyFlag;
pub use params::REVERB_PARAMS;
pub use preset::{Preset, factory_preset, factory_presets, find_preset};
pub use shared::ReverbShared;
pub use store::{BoolHandle, ChangeCallback, FloatHandle, ParameterStore};
