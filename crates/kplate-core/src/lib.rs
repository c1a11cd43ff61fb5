//! kplate Core - DSP primitives for the plate reverb
//!
//! The building blocks the plate engine in `kplate-effects` is assembled
//! from. Everything here is allocation-free once constructed and runs on
//! `f64` internally.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe processing contract (mono, stereo, blocks)
//! - [`ParameterInfo`] - Index-based parameter discovery
//!
//! ## Delay and Diffusion
//!
//! - [`DelayLine`] - Integer-tap circular buffer with range-clamped indexing
//! - [`AllpassSection`] - Schroeder allpass with a fixed one-half coefficient
//!
//! ## Filters
//!
//! - [`StereoBiquad`] / [`BiquadCoefficients`] - Bandpass loss filter
//! - [`OnePole`] - Leaky integrator used as the low-cut highpass
//! - [`Mulch`] - Two-tap averager
//!
//! ## Dynamics and Output
//!
//! - [`Compander`] - Gain rider driven by the fourth power of its output
//! - [`arcsine_clip`] - Bounded output stage
//! - [`submix_gains`] - Wetness to wet/dry gains
//! - [`Xorshift32`] - Noise for the denormal guard and the output dither
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build without the standard library
//! (an allocator is still required for the delay buffers):
//!
//! ```toml
//! [dependencies]
//! kplate-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod allpass;
pub mod biquad;
pub mod compander;
pub mod delay;
pub mod dither;
pub mod effect;
pub mod math;
pub mod one_pole;
pub mod param_info;

// Re-export main types at crate root
pub use allpass::{AllpassSection, DIFFUSION};
pub use biquad::{BiquadCoefficients, StereoBiquad};
pub use compander::{Compander, MAX_GAIN, MIN_GAIN};
pub use delay::DelayLine;
pub use dither::{DEFAULT_SEED, DENORMAL_FLOOR, DENORMAL_THRESHOLD, Xorshift32};
pub use effect::Effect;
pub use math::{CLIP_CEILING, arcsine_clip, db_to_linear, linear_to_db, submix_gains};
pub use one_pole::{Mulch, OnePole};
pub use param_info::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo};
