//! Numeric helpers for percent buckets.
//!
//! The percent range `[0, 100)` is split into `palette_len - 1` buckets of
//! integer width. Integer widths can leave a sliver below 100 that no bucket
//! covers; [`find_bucket`] assigns it to the last bucket and
//! [`local_fraction`] clamps so the blend never overshoots the last color.

/// Progress ratio on a percent scale. NaN maps to 0.
pub fn to_percent(ratio: f64) -> f64 {
    if ratio.is_nan() {
        return 0.0;
    }
    ratio * 100.0
}

/// Width of each percent bucket: `floor(100 / (palette_len - 1))`, at least 1.
pub fn bucket_width(palette_len: usize) -> u32 {
    let buckets = palette_len.saturating_sub(1).max(1);
    ((100 / buckets) as u32).max(1)
}

/// 1-based index of the bucket holding `percent`.
///
/// Buckets are scanned upward with inclusive ranges `[(i-1)w, iw]` matched
/// on the integer part of `percent`; the first match wins.
pub fn find_bucket(percent: f64, width: u32, buckets: usize) -> usize {
    let whole = percent.max(0.0) as u64;
    let width = width as u64;
    (1..=buckets)
        .find(|&i| {
            let start = (i as u64 - 1) * width;
            let end = i as u64 * width;
            (start..=end).contains(&whole)
        })
        .unwrap_or(buckets)
}

/// Position of `percent` inside bucket `bucket`, clamped to `[0, 1]`.
pub fn local_fraction(percent: f64, width: u32, bucket: usize) -> f64 {
    let start = width as f64 * (bucket as f64 - 1.0);
    ((percent - start) / width as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_percent() {
        assert_eq!(to_percent(0.5), 50.0);
        assert_eq!(to_percent(f64::NAN), 0.0);
        assert_eq!(to_percent(-1.0), -100.0);
        assert!(to_percent(f64::INFINITY).is_infinite());
    }

    #[test]
    fn test_bucket_width() {
        assert_eq!(bucket_width(2), 100);
        assert_eq!(bucket_width(3), 50);
        assert_eq!(bucket_width(4), 33);
        assert_eq!(bucket_width(7), 16);
        assert_eq!(bucket_width(200), 1);
    }

    #[test]
    fn test_find_bucket_first_match_wins() {
        // [0,33] [33,66] [66,99]
        assert_eq!(find_bucket(0.5, 33, 3), 1);
        assert_eq!(find_bucket(33.0, 33, 3), 1);
        assert_eq!(find_bucket(33.9, 33, 3), 1);
        assert_eq!(find_bucket(34.0, 33, 3), 2);
        assert_eq!(find_bucket(50.0, 33, 3), 2);
        assert_eq!(find_bucket(99.5, 33, 3), 3);
    }

    #[test]
    fn test_find_bucket_residual_uses_last() {
        // Seven colors: six buckets of 16 cover up to 96.
        assert_eq!(find_bucket(97.0, 16, 6), 6);
        assert_eq!(find_bucket(99.9, 16, 6), 6);
    }

    #[test]
    fn test_local_fraction_clamped() {
        assert!((local_fraction(50.0, 33, 2) - 17.0 / 33.0).abs() < 1e-12);
        assert_eq!(local_fraction(33.9, 33, 1), 1.0);
        assert_eq!(local_fraction(98.0, 16, 6), 1.0);
        assert_eq!(local_fraction(0.0, 33, 1), 0.0);
    }
}
