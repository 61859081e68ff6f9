//! Direction quantization into angular bins.
//!
//! Bin 0 points along +x and bins increase counter-clockwise, so with 8 bins
//! 2 is +y, 4 is -x and 6 is -y.

use std::f64::consts::TAU;

use super::point::Point2;

/// Segments shorter than this (squared) carry no usable direction.
pub const MIN_SEGMENT_LENGTH_SQUARED: f64 = 1e-6;

/// Quantize each segment's heading to the nearest of `bins` sectors.
///
/// Near-zero segments are skipped and consecutive repeats collapse into one
/// entry, so the result is usually shorter than `points.len() - 1`.
#[must_use]
pub fn quantize_directions(points: &[Point2], bins: usize) -> Vec<usize> {
    let mut dirs: Vec<usize> = Vec::new();
    if points.len() < 2 || bins == 0 {
        return dirs;
    }

    for w in points.windows(2) {
        let v = w[1] - w[0];
        if v.length_squared() < MIN_SEGMENT_LENGTH_SQUARED {
            continue;
        }

        let idx = direction_bin(v, bins);
        if dirs.last() != Some(&idx) {
            dirs.push(idx);
        }
    }

    dirs
}

/// Bin index of a single non-zero vector.
#[must_use]
pub fn direction_bin(v: Point2, bins: usize) -> usize {
    let mut angle = v.y.atan2(v.x);
    if angle < 0.0 {
        angle += TAU;
    }

    let fraction = angle / TAU;
    let idx = (fraction * bins as f64 + 0.5).floor() as usize;
    idx % bins
}

/// Shortest distance between two bins around the circle.
#[must_use]
pub fn circular_bin_difference(a: usize, b: usize, bins: usize) -> usize {
    let diff = a.abs_diff(b);
    diff.min(bins.saturating_sub(diff))
}

/// Comma-separated rendering, `"(none)"` when empty.
#[must_use]
pub fn direction_string(dirs: &[usize]) -> String {
    if dirs.is_empty() {
        return "(none)".to_string();
    }
    dirs.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point2> {
        raw.iter().map(|&p| p.into()).collect()
    }

    #[test]
    fn test_rightward_is_zero() {
        let line = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        assert_eq!(quantize_directions(&line, 8), vec![0]);
    }

    #[test]
    fn test_cardinal_and_diagonal_bins() {
        assert_eq!(direction_bin(Point2::new(1.0, 1.0), 8), 1);
        assert_eq!(direction_bin(Point2::new(0.0, 1.0), 8), 2);
        assert_eq!(direction_bin(Point2::new(-1.0, 0.0), 8), 4);
        assert_eq!(direction_bin(Point2::new(0.0, -1.0), 8), 6);
        assert_eq!(direction_bin(Point2::new(1.0, -1.0), 8), 7);
    }

    #[test]
    fn test_wraparound_to_zero() {
        // Just below 2π rounds up into bin 0.
        assert_eq!(direction_bin(Point2::new(1.0, -0.01), 8), 0);
        assert_eq!(direction_bin(Point2::new(1.0, -0.01), 4), 0);
    }

    #[test]
    fn test_square_collapses_runs() {
        let square = pts(&[
            (0.0, 0.0),
            (0.5, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.5),
            (0.0, 0.0),
        ]);
        assert_eq!(quantize_directions(&square, 8), vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_skips_zero_length_segments() {
        let stutter = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (1.0, 0.0005), (2.0, 0.0)]);
        assert_eq!(quantize_directions(&stutter, 8), vec![0]);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(quantize_directions(&[], 8).is_empty());
        assert!(quantize_directions(&pts(&[(1.0, 1.0)]), 8).is_empty());
        assert!(quantize_directions(&pts(&[(0.0, 0.0), (1.0, 0.0)]), 0).is_empty());
    }

    #[test]
    fn test_circular_difference() {
        assert_eq!(circular_bin_difference(0, 7, 8), 1);
        assert_eq!(circular_bin_difference(7, 0, 8), 1);
        assert_eq!(circular_bin_difference(0, 4, 8), 4);
        assert_eq!(circular_bin_difference(2, 5, 8), 3);
        assert_eq!(circular_bin_difference(3, 3, 8), 0);
    }

    #[test]
    fn test_direction_string() {
        assert_eq!(direction_string(&[]), "(none)");
        assert_eq!(direction_string(&[0, 2, 4]), "0,2,4");
    }
}
