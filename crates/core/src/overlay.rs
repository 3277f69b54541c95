//! Overlay model - a constant gradient drawn above the animated fill.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{CoreError, Result};

/// A point in unit space, `(0, 0)` top-left and `(1, 1)` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A constant overlay that fades from `color` to clear along an axis.
///
/// The axis ends at `position` and starts at its mirror `(1 - x, 1 - y)`,
/// so `position` marks where the animated color shows through most.
/// `locations` holds the two stops: the overlay is solid up to
/// `locations[0]` and fully faded at `locations[1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientOverlay {
    /// Overlay color
    pub color: Color,

    /// End point of the overlay axis
    pub position: Point,

    /// Stop locations along the axis
    pub locations: Vec<f64>,
}

impl GradientOverlay {
    /// Create a validated overlay.
    pub fn new(color: Color, position: Point, locations: Vec<f64>) -> Result<Self> {
        let overlay = Self { color, position, locations };
        overlay.validate()?;
        Ok(overlay)
    }

    /// Shape checks: finite position, two ordered stops in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !self.position.x.is_finite() || !self.position.y.is_finite() {
            return Err(CoreError::InvalidConfig("overlay position must be finite".into()));
        }
        if self.locations.len() != 2 {
            return Err(CoreError::InvalidConfig(format!(
                "overlay needs exactly 2 locations, got {}",
                self.locations.len()
            )));
        }
        if self.locations.iter().any(|l| !l.is_finite() || !(0.0..=1.0).contains(l)) {
            return Err(CoreError::InvalidConfig("overlay locations must be in [0, 1]".into()));
        }
        if self.locations[0] > self.locations[1] {
            return Err(CoreError::InvalidConfig("overlay locations must be ascending".into()));
        }
        Ok(())
    }

    /// Start of the overlay axis.
    pub fn start_point(&self) -> Point {
        Point::new(1.0 - self.position.x, 1.0 - self.position.y)
    }

    /// End of the overlay axis.
    pub fn end_point(&self) -> Point {
        self.position
    }

    /// Project `point` onto the axis; 0 at the start point, 1 at the end point.
    pub fn axis_position(&self, point: Point) -> f64 {
        let start = self.start_point();
        let end = self.end_point();
        let (dx, dy) = (end.x - start.x, end.y - start.y);
        let length_sq = dx * dx + dy * dy;
        if length_sq <= f64::EPSILON {
            return 0.0;
        }
        ((point.x - start.x) * dx + (point.y - start.y) * dy) / length_sq
    }

    /// Overlay opacity at axis position `t`.
    pub fn weight_at(&self, t: f64) -> f64 {
        let (solid, faded) = (self.locations[0], self.locations[1]);
        if t <= solid {
            1.0
        } else if t >= faded {
            0.0
        } else {
            1.0 - (t - solid) / (faded - solid)
        }
    }

    /// Composite the overlay above `base` at `point`.
    pub fn apply(&self, base: &Color, point: Point) -> Color {
        let weight = self.weight_at(self.axis_position(point)) * self.color.alpha();
        base.mix(&self.color, weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bottom_overlay() -> GradientOverlay {
        GradientOverlay::new(Color::GRAY, Point::new(0.5, 1.2), vec![0.75, 1.0]).unwrap()
    }

    #[test]
    fn test_start_point_mirrors_position() {
        let overlay = bottom_overlay();
        let start = overlay.start_point();
        assert!((start.x - 0.5).abs() < 1e-9);
        assert!((start.y + 0.2).abs() < 1e-9);
        assert_eq!(overlay.end_point(), Point::new(0.5, 1.2));
    }

    #[test]
    fn test_axis_projection() {
        let overlay = bottom_overlay();
        assert!(overlay.axis_position(Point::new(0.5, -0.2)).abs() < 1e-9);
        assert!((overlay.axis_position(Point::new(0.1, 1.2)) - 1.0).abs() < 1e-9);
        assert!((overlay.axis_position(Point::new(0.5, 0.5)) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_weight_ramp() {
        let overlay = bottom_overlay();
        assert_eq!(overlay.weight_at(0.2), 1.0);
        assert_eq!(overlay.weight_at(0.75), 1.0);
        assert!((overlay.weight_at(0.875) - 0.5).abs() < 1e-9);
        assert_eq!(overlay.weight_at(1.0), 0.0);
        assert_eq!(overlay.weight_at(3.0), 0.0);
    }

    #[test]
    fn test_apply_blends_toward_overlay() {
        let overlay = bottom_overlay();
        // Near the start the overlay is solid.
        assert_eq!(overlay.apply(&Color::RED, Point::new(0.5, 0.0)), Color::GRAY);
        // Past the last stop the base shows through.
        assert_eq!(overlay.apply(&Color::RED, Point::new(0.5, 1.2)), Color::RED);
    }

    #[test]
    fn test_validate_rejects_bad_shapes() {
        assert!(GradientOverlay::new(Color::GRAY, Point::new(0.5, 1.0), vec![0.5]).is_err());
        assert!(GradientOverlay::new(Color::GRAY, Point::new(0.5, 1.0), vec![0.9, 0.1]).is_err());
        assert!(GradientOverlay::new(Color::GRAY, Point::new(0.5, 1.0), vec![0.0, 1.5]).is_err());
        assert!(GradientOverlay::new(Color::GRAY, Point::new(f64::NAN, 1.0), vec![0.0, 1.0]).is_err());
    }
}
