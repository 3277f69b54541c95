//! Session controller - call ordering between tracker, gradient and diagnostics.

use ratehue_core::{Color, GradientOverlay, SessionConfig, SessionId};
use ratehue_gradient::GradientInterpolator;
use ratehue_progress::{RateSnapshot, RateTracker};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagnostics::{DiagnosticObserver, Diagnostics};

/// Whether the session accepts ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Not started, or stopped by a reset
    Idle,
    /// Accepting ticks
    Running,
    /// Ticks ignored, counters kept
    Paused,
}

/// What the renderer receives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Fill color
    pub color: Color,

    /// Constant overlay drawn above the fill
    pub overlay: Option<GradientOverlay>,

    /// Figures the color was computed from
    pub snapshot: RateSnapshot,
}

/// Coordinates one tracked process.
///
/// Each accepted tick advances the tracker, reads its progress ratio,
/// picks the matching palette color and offers the snapshot to diagnostics.
#[derive(Debug)]
pub struct SessionController {
    id: SessionId,
    tracker: RateTracker,
    gradient: GradientInterpolator,
    overlay: Option<GradientOverlay>,
    diagnostics: Diagnostics,
    state: SessionState,
}

impl SessionController {
    /// Create a controller from configuration.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            id: SessionId::new(),
            tracker: RateTracker::new(config.rate_per_hour),
            gradient: GradientInterpolator::new(config.palette.clone()),
            overlay: config.overlay.clone(),
            diagnostics: Diagnostics::new(config.logging, config.diagnostic_every_seconds),
            state: SessionState::Idle,
        }
    }

    /// Send diagnostics to `observer` instead of `tracing`.
    pub fn with_observer(mut self, observer: Box<dyn DiagnosticObserver>) -> Self {
        self.diagnostics = self.diagnostics.with_observer(observer);
        self
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current figures.
    pub fn snapshot(&self) -> RateSnapshot {
        self.tracker.snapshot()
    }

    /// Color for the current figures.
    pub fn current_color(&self) -> Color {
        self.gradient.color_at(self.tracker.progress_ratio())
    }

    /// Initial frame showing the start color.
    pub fn setup(&self) -> Frame {
        self.frame(self.gradient.first())
    }

    /// Begin accepting ticks.
    pub fn start(&mut self) {
        debug!(session = %self.id, "Session started");
        self.state = SessionState::Running;
    }

    /// Stop accepting ticks; counters are kept.
    pub fn pause(&mut self) {
        if self.state == SessionState::Running {
            debug!(session = %self.id, "Session paused");
            self.state = SessionState::Paused;
        }
    }

    /// Zero the counters, stop accepting ticks and return the start-color frame.
    pub fn reset(&mut self) -> Frame {
        debug!(session = %self.id, "Session reset");
        self.tracker.reset();
        self.state = SessionState::Idle;
        self.frame(self.gradient.first())
    }

    /// Handle one tick. Returns `None` unless the session is running.
    pub fn on_tick(&mut self) -> Option<Frame> {
        if self.state != SessionState::Running {
            return None;
        }

        self.tracker.tick();
        let snapshot = self.tracker.snapshot();
        let color = self.gradient.color_at(snapshot.progress_ratio);
        self.diagnostics.record(self.id, &snapshot);

        Some(Frame {
            color,
            overlay: self.overlay.clone(),
            snapshot,
        })
    }

    /// Add completed units (negative values correct earlier counts).
    pub fn add_completed(&mut self, count: i64) {
        self.tracker.add_completed(count);
    }

    /// Change the target rate.
    pub fn configure(&mut self, rate_per_hour: u32) {
        self.tracker.configure(rate_per_hour);
    }

    /// Replace the palette.
    pub fn set_palette(&mut self, palette: Vec<Color>) {
        self.gradient.set_palette(palette);
    }

    /// Replace or remove the overlay.
    pub fn set_overlay(&mut self, overlay: Option<GradientOverlay>) {
        self.overlay = overlay;
    }

    /// Turn diagnostics on or off.
    pub fn set_logging(&mut self, enabled: bool) {
        self.diagnostics.set_enabled(enabled);
    }

    fn frame(&self, color: Color) -> Frame {
        Frame {
            color,
            overlay: self.overlay.clone(),
            snapshot: self.tracker.snapshot(),
        }
    }
}
