//! Rate Tracking
//!
//! Elapsed time, completed units, and the goal/progress figures derived
//! from a target hourly rate.

#![warn(missing_docs)]

pub mod tracker;
pub mod estimator;

pub use tracker::{RateTracker, RateSnapshot, ProgressError, DEFAULT_CYCLE_SECONDS};
pub use estimator::PaceEstimator;
