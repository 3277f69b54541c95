//! Session layer - drives tracking and coloring from a tick source.
//!
//! ```text
//! tick → RateTracker::tick → snapshot → GradientInterpolator::color_at → renderer
//! ```

#![warn(missing_docs)]

pub mod controller;
pub mod diagnostics;
pub mod runner;

pub use controller::{SessionController, SessionState, Frame};
pub use diagnostics::{
    Diagnostics, DiagnosticObservation, DiagnosticObserver, TracingObserver, RecordingObserver,
};
pub use runner::{SessionRunner, RunnerConfig, Command, FrameRenderer, SessionError};
