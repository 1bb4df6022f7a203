//! basicverb core - DSP primitives and parameter descriptors
//!
//! This crate provides the building blocks the reverb engine and the plugin
//! adapter share. Everything here is real-time safe: no allocation happens
//! after construction.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait for mono and stereo block processing
//!
//! ## Parameters
//!
//! - [`ParamDescriptor`] - Metadata for one host-automatable parameter
//! - [`ParamId`] - Stable numeric identifier that survives reordering
//! - [`ParamKind`] - Continuous or boolean
//! - [`SmoothedParam`] - Linear ramps for zipper-free changes
//!
//! ## Reverb Building Blocks
//!
//! - [`CombFilter`] - Lowpass-feedback comb filter
//! - [`AllpassFilter`] - Schroeder allpass for diffusion
//!
//! # Example
//!
//! ```rust
//! use basicverb_core::{CombFilter, AllpassFilter};
//!
//! let mut comb = CombFilter::new(1116);
//! comb.set_feedback(0.84);
//! comb.set_damp(0.2);
//!
//! let mut allpass = AllpassFilter::new(556);
//! let out = allpass.process(comb.process(0.5));
//! assert!(out.is_finite());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod allpass;
pub mod comb;
pub mod effect;
pub mod math;
pub mod param;
pub mod param_info;

pub use allpass::AllpassFilter;
pub use comb::CombFilter;
pub use effect::Effect;
pub use math::{flush_denormal, linear_to_db};
pub use param::SmoothedParam;
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamKind};
