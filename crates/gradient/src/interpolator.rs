//! Palette interpolation.

use ratehue_core::Color;
use tracing::warn;

use crate::blend::{bucket_width, find_bucket, local_fraction, to_percent};

/// Maps a progress ratio onto an ordered palette.
///
/// Index 0 is the "no progress" color and the last index is "goal met or
/// exceeded". The palette is used exactly in the order supplied.
#[derive(Debug, Clone, Default)]
pub struct GradientInterpolator {
    palette: Vec<Color>,
}

impl GradientInterpolator {
    /// Create an interpolator over `palette`.
    pub fn new(palette: Vec<Color>) -> Self {
        let mut interpolator = Self::default();
        interpolator.set_palette(palette);
        interpolator
    }

    /// Replace the palette. An empty palette makes every query return
    /// [`Color::CLEAR`].
    pub fn set_palette(&mut self, palette: Vec<Color>) {
        if palette.is_empty() {
            warn!("Empty palette, falling back to a clear color");
        }
        self.palette = palette;
    }

    /// The palette in use.
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Start color, or the fallback when the palette is empty.
    pub fn first(&self) -> Color {
        self.palette.first().copied().unwrap_or(Color::CLEAR)
    }

    /// Goal color, or the fallback when the palette is empty.
    pub fn last(&self) -> Color {
        self.palette.last().copied().unwrap_or(Color::CLEAR)
    }

    /// Color for `progress_ratio`.
    ///
    /// Ratios at or below 0 (and NaN) give the first color, ratios at or
    /// above 1 give the last. Anything between blends the two palette
    /// colors around the ratio's percent bucket; blended colors are opaque.
    pub fn color_at(&self, progress_ratio: f64) -> Color {
        let percent = to_percent(progress_ratio);

        if self.palette.len() <= 1 || percent <= 0.0 {
            return self.first();
        }
        if percent >= 100.0 {
            return self.last();
        }

        let buckets = self.palette.len() - 1;
        let width = bucket_width(self.palette.len());
        let bucket = find_bucket(percent, width, buckets);
        let fraction = local_fraction(percent, width, bucket);

        self.palette[bucket - 1].mix(&self.palette[bucket], fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traffic_light() -> GradientInterpolator {
        GradientInterpolator::new(vec![Color::GREEN, Color::YELLOW, Color::ORANGE, Color::RED])
    }

    fn assert_close(actual: Color, expected: Color) {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert!(
            close(actual.red(), expected.red())
                && close(actual.green(), expected.green())
                && close(actual.blue(), expected.blue())
                && close(actual.alpha(), expected.alpha()),
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_at_or_below_zero_is_first() {
        let gradient = traffic_light();
        assert_eq!(gradient.color_at(0.0), Color::GREEN);
        assert_eq!(gradient.color_at(-3.0), Color::GREEN);
        assert_eq!(gradient.color_at(f64::NAN), Color::GREEN);
        assert_eq!(gradient.color_at(f64::NEG_INFINITY), Color::GREEN);
    }

    #[test]
    fn test_at_or_above_one_is_last() {
        let gradient = traffic_light();
        assert_eq!(gradient.color_at(1.0), Color::RED);
        assert_eq!(gradient.color_at(1.7), Color::RED);
        assert_eq!(gradient.color_at(f64::INFINITY), Color::RED);
    }

    #[test]
    fn test_halfway_blends_yellow_to_orange() {
        let fraction = (50.0 - 33.0) / 33.0;
        let expected = Color::rgb(1.0, 1.0 - 0.5 * fraction, 0.0);
        assert_close(traffic_light().color_at(0.5), expected);
    }

    #[test]
    fn test_bucket_edges_hit_palette_colors() {
        let gradient = traffic_light();
        assert_close(gradient.color_at(0.33), Color::YELLOW);
        assert_close(gradient.color_at(0.66), Color::ORANGE);
    }

    #[test]
    fn test_residual_sliver_reaches_last_color() {
        let palette = vec![
            Color::GREEN,
            Color::CYAN,
            Color::BLUE,
            Color::PURPLE,
            Color::MAGENTA,
            Color::ORANGE,
            Color::RED,
        ];
        let gradient = GradientInterpolator::new(palette);
        assert_close(gradient.color_at(0.98), Color::RED);
    }

    #[test]
    fn test_two_colors_is_linear() {
        let gradient = GradientInterpolator::new(vec![Color::BLACK, Color::WHITE]);
        assert_close(gradient.color_at(0.25), Color::rgb(0.25, 0.25, 0.25));
        assert_close(gradient.color_at(0.75), Color::rgb(0.75, 0.75, 0.75));
    }

    #[test]
    fn test_blends_are_opaque() {
        let gradient = GradientInterpolator::new(vec![Color::CLEAR, Color::WHITE]);
        assert_eq!(gradient.color_at(0.0), Color::CLEAR);
        assert_eq!(gradient.color_at(0.5).alpha(), 1.0);
    }

    #[test]
    fn test_single_color_palette() {
        let gradient = GradientInterpolator::new(vec![Color::BLUE]);
        assert_eq!(gradient.color_at(0.0), Color::BLUE);
        assert_eq!(gradient.color_at(0.5), Color::BLUE);
        assert_eq!(gradient.color_at(2.0), Color::BLUE);
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let mut gradient = traffic_light();
        gradient.set_palette(vec![]);
        assert_eq!(gradient.color_at(0.5), Color::CLEAR);
        assert_eq!(gradient.color_at(0.0), Color::CLEAR);
        assert_eq!(gradient.color_at(1.5), Color::CLEAR);
        assert_eq!(gradient.first(), Color::CLEAR);
    }

    #[test]
    fn test_palette_order_is_kept() {
        let gradient = traffic_light();
        assert_eq!(gradient.palette()[0], Color::GREEN);
        assert_eq!(gradient.first(), Color::GREEN);
        assert_eq!(gradient.last(), Color::RED);
    }

    #[test]
    fn test_large_palette_does_not_panic() {
        let palette: Vec<Color> = (0..=200u8).map(|v| Color::from_rgb8(v, 0, 0)).collect();
        let gradient = GradientInterpolator::new(palette);
        for step in 0..=100 {
            let color = gradient.color_at(step as f64 / 100.0);
            assert!((0.0..=1.0).contains(&color.red()));
        }
    }
}
