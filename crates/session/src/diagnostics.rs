//! Periodic diagnostic observations.
//!
//! Observations are side output only: they are built from a snapshot after
//! the color has been computed and never feed back into it.

use std::sync::{Arc, Mutex};

use ratehue_core::{SessionId, Time};
use ratehue_progress::{PaceEstimator, RateSnapshot};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One periodic observation of a running session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticObservation {
    /// Session that produced it
    pub session_id: SessionId,

    /// Wall-clock time of the observation
    pub observed_at: Time,

    /// Seconds since the last reset
    pub elapsed_seconds: u64,

    /// Units completed since the last reset
    pub total_completed: u64,

    /// Configured target per hour
    pub rate_per_hour: u32,

    /// Units expected by now
    pub goal_at_this_instant: f64,

    /// Progress ratio as a percentage
    pub progress_percent: f64,

    /// Hourly average so far; absent during the first minute
    pub average_per_hour_so_far: Option<f64>,

    /// Units short of the goal; 0 when on or ahead of pace
    pub units_behind: f64,

    /// When ahead of pace, seconds until the goal catches up
    pub seconds_until_on_pace: Option<u64>,
}

impl DiagnosticObservation {
    /// Build an observation from a snapshot.
    pub fn from_snapshot(session_id: SessionId, snapshot: &RateSnapshot, estimator: &PaceEstimator) -> Self {
        Self {
            session_id,
            observed_at: chrono::Utc::now(),
            elapsed_seconds: snapshot.elapsed_seconds,
            total_completed: snapshot.completed,
            rate_per_hour: snapshot.rate_per_hour,
            goal_at_this_instant: snapshot.goal_at_this_instant,
            progress_percent: snapshot.progress_percent(),
            average_per_hour_so_far: estimator.average_per_hour(snapshot),
            units_behind: estimator.units_behind(snapshot),
            seconds_until_on_pace: estimator.seconds_until_on_pace(snapshot),
        }
    }
}

/// Receives diagnostic observations.
pub trait DiagnosticObserver: Send {
    /// Handle one observation.
    fn observe(&mut self, observation: &DiagnosticObservation);
}

/// Logs observations as structured `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DiagnosticObserver for TracingObserver {
    fn observe(&mut self, o: &DiagnosticObservation) {
        info!(
            session = %o.session_id,
            elapsed_seconds = o.elapsed_seconds,
            total_completed = o.total_completed,
            rate_per_hour = o.rate_per_hour,
            goal = o.goal_at_this_instant.round(),
            progress_percent = o.progress_percent.round(),
            average_per_hour = ?o.average_per_hour_so_far.map(f64::round),
            units_behind = o.units_behind.ceil(),
            seconds_until_on_pace = ?o.seconds_until_on_pace,
            "Session progress"
        );
    }
}

/// Keeps observations in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    observations: Arc<Mutex<Vec<DiagnosticObservation>>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Observations recorded so far.
    pub fn observations(&self) -> Vec<DiagnosticObservation> {
        match self.observations.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticObserver for RecordingObserver {
    fn observe(&mut self, observation: &DiagnosticObservation) {
        match self.observations.lock() {
            Ok(mut guard) => guard.push(observation.clone()),
            Err(poisoned) => poisoned.into_inner().push(observation.clone()),
        }
    }
}

/// Decides when an observation is due and hands it to the observer.
pub struct Diagnostics {
    enabled: bool,
    every_seconds: u64,
    estimator: PaceEstimator,
    observer: Box<dyn DiagnosticObserver>,
}

impl Diagnostics {
    /// Diagnostics logged through `tracing`, every `every_seconds` elapsed seconds.
    pub fn new(enabled: bool, every_seconds: u64) -> Self {
        Self {
            enabled,
            every_seconds: every_seconds.max(1),
            estimator: PaceEstimator::default(),
            observer: Box::new(TracingObserver),
        }
    }

    /// Replace the observer.
    pub fn with_observer(mut self, observer: Box<dyn DiagnosticObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Turn observations on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether `snapshot` falls on the observation cadence.
    pub fn is_due(&self, snapshot: &RateSnapshot) -> bool {
        self.enabled && snapshot.elapsed_seconds > 0 && snapshot.elapsed_seconds % self.every_seconds == 0
    }

    /// Emit an observation if one is due.
    pub fn record(&mut self, session_id: SessionId, snapshot: &RateSnapshot) -> Option<DiagnosticObservation> {
        if !self.is_due(snapshot) {
            return None;
        }
        let observation = DiagnosticObservation::from_snapshot(session_id, snapshot, &self.estimator);
        self.observer.observe(&observation);
        Some(observation)
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("enabled", &self.enabled)
            .field("every_seconds", &self.every_seconds)
            .finish()
    }
}
