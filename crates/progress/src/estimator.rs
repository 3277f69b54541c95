//! Pace estimation.

use crate::tracker::{RateSnapshot, DEFAULT_CYCLE_SECONDS};

/// Seconds that must pass before an hourly average is reported.
const MIN_SECONDS_FOR_AVERAGE: u64 = 60;

/// Pace estimator over a tracker's snapshots.
#[derive(Debug, Clone, Copy)]
pub struct PaceEstimator {
    cycle_seconds: u64,
}

impl PaceEstimator {
    /// Estimator for a rate window of `cycle_seconds` (clamped to at least 1).
    pub fn new(cycle_seconds: u64) -> Self {
        Self {
            cycle_seconds: cycle_seconds.max(1),
        }
    }

    /// Completions per rate window so far. Only reported after the first minute.
    pub fn average_per_hour(&self, snapshot: &RateSnapshot) -> Option<f64> {
        if snapshot.elapsed_seconds <= MIN_SECONDS_FOR_AVERAGE {
            return None;
        }
        Some(snapshot.completed as f64 * self.cycle_seconds as f64 / snapshot.elapsed_seconds as f64)
    }

    /// How many units short of the goal the session is (0 when on or ahead of pace).
    pub fn units_behind(&self, snapshot: &RateSnapshot) -> f64 {
        (snapshot.goal_at_this_instant - snapshot.completed as f64).max(0.0)
    }

    /// When ahead of pace, seconds until the goal catches up with the completed count.
    pub fn seconds_until_on_pace(&self, snapshot: &RateSnapshot) -> Option<u64> {
        if snapshot.rate_per_hour == 0 || snapshot.completed as f64 <= snapshot.goal_at_this_instant {
            return None;
        }
        let catch_up_at = snapshot.completed as f64 * self.cycle_seconds as f64 / snapshot.rate_per_hour as f64;
        Some((catch_up_at.ceil() as u64).saturating_sub(snapshot.elapsed_seconds))
    }
}

impl Default for PaceEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_CYCLE_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::RateTracker;

    fn snapshot(rate: u32, seconds: u64, completed: i64) -> RateSnapshot {
        let mut tracker = RateTracker::new(rate);
        for _ in 0..seconds {
            tracker.tick();
        }
        tracker.add_completed(completed);
        tracker.snapshot()
    }

    #[test]
    fn test_average_needs_a_minute() {
        let estimator = PaceEstimator::default();
        assert!(estimator.average_per_hour(&snapshot(80, 30, 2)).is_none());
        assert!(estimator.average_per_hour(&snapshot(80, 60, 2)).is_none());

        let average = estimator.average_per_hour(&snapshot(80, 1800, 30)).unwrap();
        assert!((average - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_units_behind() {
        let estimator = PaceEstimator::default();
        assert!((estimator.units_behind(&snapshot(80, 1800, 30)) - 10.0).abs() < 1e-9);
        assert_eq!(estimator.units_behind(&snapshot(80, 1800, 50)), 0.0);
    }

    #[test]
    fn test_seconds_until_on_pace() {
        let estimator = PaceEstimator::default();
        // 50 units at 80/h are due at 2250 s.
        assert_eq!(estimator.seconds_until_on_pace(&snapshot(80, 1800, 50)), Some(450));
        assert_eq!(estimator.seconds_until_on_pace(&snapshot(80, 1800, 40)), None);
        assert_eq!(estimator.seconds_until_on_pace(&snapshot(0, 1800, 40)), None);
    }
}
