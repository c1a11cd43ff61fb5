//! kplate Effects - the Householder plate reverb
//!
//! One parameterised engine, four plate characters:
//!
//! - [`PlateEngine`] - Block-based engine over five per-block controls
//! - [`PlateReverb`] - The engine behind [`Effect`](kplate_core::Effect) and
//!   [`ParameterInfo`](kplate_core::ParameterInfo)
//! - [`PlateVariant`] / [`PlateConfig`] - Delay tables and filter constants
//!   for plates A, B, C and D
//!
//! The building blocks are public for analysis and testing:
//! [`EarlyReflections`], [`HouseholderMatrix`], [`RateScheduler`] and
//! [`ReferenceBuffer`].
//!
//! ## Example
//!
//! ```rust
//! use kplate_effects::{PlateControls, PlateEngine, PlateVariant};
//!
//! let mut plate = PlateEngine::new(PlateVariant::A, 1);
//! let controls = PlateControls {
//!     damping: 3.0,
//!     predelay: 0.02,
//!     wetness: 0.35,
//!     ..PlateControls::default()
//! };
//!
//! let left = vec![0.0f32; 512];
//! let right = vec![0.0f32; 512];
//! let mut out_l = vec![0.0f32; 512];
//! let mut out_r = vec![0.0f32; 512];
//! plate.run(&controls, 48000.0, &left, &right, &mut out_l, &mut out_r);
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support
//! - `tracing`: debug events on reset, sample-rate and variant changes

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod config;
pub mod controls;
pub mod early;
pub mod engine;
pub mod matrix;
pub mod plate;
pub mod scheduler;

// Re-export main types at crate root
pub use config::{
    EARLY_SECTIONS, GROUPS, LINES_PER_GROUP, PLATE_A, PLATE_B, PLATE_C, PLATE_D, PlateConfig,
    PlateVariant,
};
pub use controls::PlateControls;
pub use early::EarlyReflections;
pub use engine::{PREDELAY_CAPACITY, PlateEngine};
pub use matrix::{HouseholderMatrix, WET_SCALE, householder};
pub use plate::{
    PARAM_COUNT, PARAM_DAMPING, PARAM_INPUT_PAD, PARAM_LOW_CUT, PARAM_PREDELAY, PARAM_WETNESS,
    PlateReverb, param_descriptors,
};
pub use scheduler::{RateScheduler, ReferenceBuffer, cycle_end_for};
