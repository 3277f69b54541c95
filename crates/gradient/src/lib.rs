//! Gradient Interpolation
//!
//! Maps a progress ratio onto one color of an ordered palette.

#![warn(missing_docs)]

pub mod blend;
pub mod interpolator;

pub use interpolator::GradientInterpolator;
