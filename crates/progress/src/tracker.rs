//! Rate tracking service.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Length of the window a rate is measured over: one hour.
pub const DEFAULT_CYCLE_SECONDS: u64 = 3600;

/// Errors raised when building a tracker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    /// The rate window must be at least one second long
    #[error("cycle duration must be > 0 seconds, got {0}")]
    InvalidCycle(u64),
}

/// Progress figures at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Seconds counted since the last reset
    pub elapsed_seconds: u64,

    /// Units completed since the last reset
    pub completed: u64,

    /// Configured target per hour
    pub rate_per_hour: u32,

    /// Units expected by now at the configured rate
    pub goal_at_this_instant: f64,

    /// `completed / goal_at_this_instant`, or 0 when there is no goal yet
    pub progress_ratio: f64,
}

impl RateSnapshot {
    /// Progress ratio on a percent scale.
    pub fn progress_percent(&self) -> f64 {
        self.progress_ratio * 100.0
    }
}

/// Counts elapsed seconds and completed units against an hourly rate.
///
/// Counters only move through [`tick`](Self::tick),
/// [`add_completed`](Self::add_completed) and [`reset`](Self::reset).
/// Derived figures are recomputed on every [`snapshot`](Self::snapshot).
#[derive(Debug, Clone)]
pub struct RateTracker {
    total_elapsed_seconds: u64,
    total_completed: i64,
    rate_per_hour: u32,
    cycle_duration_seconds: u64,
}

impl RateTracker {
    /// Create a tracker measuring `rate_per_hour` over one hour.
    pub fn new(rate_per_hour: u32) -> Self {
        Self {
            total_elapsed_seconds: 0,
            total_completed: 0,
            rate_per_hour,
            cycle_duration_seconds: DEFAULT_CYCLE_SECONDS,
        }
    }

    /// Create a tracker with a custom rate window.
    pub fn with_cycle_seconds(rate_per_hour: u32, cycle_seconds: u64) -> Result<Self, ProgressError> {
        if cycle_seconds == 0 {
            return Err(ProgressError::InvalidCycle(cycle_seconds));
        }
        Ok(Self {
            cycle_duration_seconds: cycle_seconds,
            ..Self::new(rate_per_hour)
        })
    }

    /// Set the target rate. Applies to the next snapshot.
    pub fn configure(&mut self, rate_per_hour: u32) {
        debug!(rate_per_hour, "Rate configured");
        self.rate_per_hour = rate_per_hour;
    }

    /// Count one elapsed second.
    pub fn tick(&mut self) {
        self.total_elapsed_seconds = self.total_elapsed_seconds.saturating_add(1);
    }

    /// Count `seconds` elapsed seconds at once.
    pub fn advance(&mut self, seconds: u64) {
        self.total_elapsed_seconds = self.total_elapsed_seconds.saturating_add(seconds);
    }

    /// Add completed units. Negative counts are corrections.
    ///
    /// The running total is signed and only clamped to zero when read, so
    /// the result does not depend on the order of the calls.
    pub fn add_completed(&mut self, count: i64) {
        self.total_completed = self.total_completed.saturating_add(count);
    }

    /// Zero both counters. The rate is kept.
    pub fn reset(&mut self) {
        self.total_elapsed_seconds = 0;
        self.total_completed = 0;
    }

    /// Seconds counted since the last reset.
    pub fn elapsed_seconds(&self) -> u64 {
        self.total_elapsed_seconds
    }

    /// Units completed since the last reset, never below zero.
    pub fn completed(&self) -> u64 {
        self.total_completed.max(0) as u64
    }

    /// Configured target per hour.
    pub fn rate_per_hour(&self) -> u32 {
        self.rate_per_hour
    }

    /// Length of the rate window in seconds.
    pub fn cycle_duration_seconds(&self) -> u64 {
        self.cycle_duration_seconds
    }

    /// Share of the rate window elapsed so far.
    pub fn fraction_of_cycle_elapsed(&self) -> f64 {
        self.total_elapsed_seconds as f64 / self.cycle_duration_seconds as f64
    }

    /// Units expected by now.
    pub fn goal_at_this_instant(&self) -> f64 {
        self.fraction_of_cycle_elapsed() * self.rate_per_hour as f64
    }

    /// Completed units relative to the goal; 0 while the goal is 0.
    pub fn progress_ratio(&self) -> f64 {
        let goal = self.goal_at_this_instant();
        if goal <= 0.0 {
            return 0.0;
        }
        self.completed() as f64 / goal
    }

    /// Current figures.
    pub fn snapshot(&self) -> RateSnapshot {
        RateSnapshot {
            elapsed_seconds: self.total_elapsed_seconds,
            completed: self.completed(),
            rate_per_hour: self.rate_per_hour,
            goal_at_this_instant: self.goal_at_this_instant(),
            progress_ratio: self.progress_ratio(),
        }
    }
}

impl Default for RateTracker {
    fn default() -> Self {
        Self::new(1)
    }
}
