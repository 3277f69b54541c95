//! ratehue core data models.
//!
//! This crate defines the value types shared by the rate tracker, the
//! gradient interpolator and the session layer: colors, the optional
//! overlay gradient, session identities and configuration.

#![warn(missing_docs)]

// Core identities
mod id;

// Colors and overlay
mod color;
mod overlay;

// Configuration
mod config;
mod error;

// Re-exports
pub use id::SessionId;
pub use color::Color;
pub use overlay::{GradientOverlay, Point};
pub use config::SessionConfig;
pub use error::{CoreError, Result};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
