//! Numeric constants.

pub use std::f32::consts::*;

/// Tolerance used for every approximate comparison in the crate.
pub const EPSILON: f32 = 1e-6;

/// Vectors with a norm at or below this value normalize to zero.
pub const NORMALIZATION_THRESHOLD: f32 = 1e-5;

pub const TWO_PI: f32 = TAU;
