//! basicverb effects - the reverb engine
//!
//! - [`Reverb`] - Stereo Freeverb with freeze, width and separate wet/dry gains
//! - [`ReverbConfig`] - The six values that fully describe the engine's sound
//!
//! ## Example
//!
//! ```rust
//! use basicverb_core::Effect;
//! use basicverb_effects::{Reverb, ReverbConfig};
//!
//! let mut reverb = Reverb::new(48000.0);
//! reverb.set_config(ReverbConfig {
//!     room_size: 0.8,
//!     wet_level: 0.5,
//!     ..ReverbConfig::default()
//! });
//!
//! let (left, right) = reverb.process_stereo(0.5, -0.5);
//! assert!(left.is_finite() && right.is_finite());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod reverb;

pub use reverb::{Reverb, ReverbConfig};
