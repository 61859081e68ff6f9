//! Stroke capture buffer.
//!
//! This module provides [`StrokeBuffer`], which accumulates timestamped
//! samples for one gesture attempt, and [`Stroke`], the drained result.

use tracing::trace;

use crate::config::SamplingPolicy;
use crate::math::{path_length, Point2, TimedPoint};

/// Points captured during one gesture attempt, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    points: Vec<TimedPoint>,
}

impl Stroke {
    #[must_use]
    pub fn points(&self) -> &[TimedPoint] {
        &self.points
    }

    /// Positions without timing.
    #[must_use]
    pub fn positions(&self) -> Vec<Point2> {
        self.points.iter().map(|p| p.position).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Elapsed time of the last sample, zero when empty.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.elapsed)
    }

    /// Path length in capture units (e.g. pixels), before normalization.
    #[must_use]
    pub fn raw_length(&self) -> f64 {
        path_length(&self.positions())
    }
}

/// Accumulates samples between `begin` and `end`.
///
/// A buffer holds at most one capture. Starting again discards whatever the
/// previous capture left behind.
///
/// # Example
///
/// ```
/// use stroke_gesture::{Point2, SamplingPolicy, StrokeBuffer};
///
/// let mut buffer = StrokeBuffer::new(SamplingPolicy::MinDistance(2.0));
/// buffer.begin(10.0);
/// assert!(buffer.update(Point2::new(0.0, 0.0), 10.0));
/// assert!(!buffer.update(Point2::new(1.0, 0.0), 10.1)); // too close
/// assert!(buffer.update(Point2::new(3.0, 0.0), 10.2));
///
/// let stroke = buffer.end();
/// assert_eq!(stroke.len(), 2);
/// assert!((stroke.duration() - 0.2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StrokeBuffer {
    policy: SamplingPolicy,
    points: Vec<TimedPoint>,
    start_time: f64,
    capturing: bool,
}

impl StrokeBuffer {
    #[must_use]
    pub fn new(policy: SamplingPolicy) -> Self {
        Self {
            policy,
            points: Vec::with_capacity(64),
            start_time: 0.0,
            capturing: false,
        }
    }

    /// Start a capture at time `now` (seconds), discarding any prior points.
    pub fn begin(&mut self, now: f64) {
        self.points.clear();
        self.start_time = now;
        self.capturing = true;
    }

    /// Offer a sample. Returns whether it was recorded.
    ///
    /// Samples outside a capture are ignored. Under
    /// [`SamplingPolicy::MinDistance`] a sample closer than the minimum to
    /// the last recorded point is dropped.
    pub fn update(&mut self, point: Point2, now: f64) -> bool {
        if !self.capturing {
            return false;
        }

        if let (SamplingPolicy::MinDistance(min), Some(last)) = (self.policy, self.points.last()) {
            if last.position.distance(point) < min {
                return false;
            }
        }

        let elapsed = (now - self.start_time).max(0.0);
        self.points.push(TimedPoint::new(point, elapsed));
        trace!(x = point.x, y = point.y, elapsed, count = self.points.len(), "sample recorded");
        true
    }

    /// Finish the capture and hand over its points. The buffer is left empty.
    pub fn end(&mut self) -> Stroke {
        self.capturing = false;
        Stroke {
            points: std::mem::take(&mut self.points),
        }
    }

    /// Drop the current capture without returning it.
    pub fn abort(&mut self) {
        self.points.clear();
        self.capturing = false;
    }

    /// Time passed to the most recent `begin`.
    #[must_use]
    pub const fn start_time(&self) -> f64 {
        self.start_time
    }

    #[must_use]
    pub const fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Points recorded so far in the current capture.
    #[must_use]
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub const fn policy(&self) -> SamplingPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unconditional_keeps_everything() {
        let mut buffer = StrokeBuffer::new(SamplingPolicy::Unconditional);
        buffer.begin(0.0);
        for _ in 0..5 {
            assert!(buffer.update(Point2::new(1.0, 1.0), 0.5));
        }
        assert_eq!(buffer.n_points(), 5);
    }

    #[test]
    fn test_min_distance_spacing() {
        let mut buffer = StrokeBuffer::new(SamplingPolicy::MinDistance(2.0));
        buffer.begin(0.0);
        for i in 0..10 {
            buffer.update(Point2::new(f64::from(i), 0.0), f64::from(i) * 0.1);
        }

        let stroke = buffer.end();
        let xs: Vec<f64> = stroke.points().iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        for w in stroke.points().windows(2) {
            assert!(w[0].position.distance(w[1].position) >= 2.0);
        }
    }

    #[test]
    fn test_elapsed_relative_to_begin() {
        let mut buffer = StrokeBuffer::new(SamplingPolicy::Unconditional);
        buffer.begin(100.0);
        buffer.update(Point2::ZERO, 100.0);
        buffer.update(Point2::new(1.0, 0.0), 100.25);
        // Clock going backwards clamps to zero.
        buffer.update(Point2::new(2.0, 0.0), 99.0);

        let stroke = buffer.end();
        let elapsed: Vec<f64> = stroke.points().iter().map(|p| p.elapsed).collect();
        assert_eq!(elapsed, vec![0.0, 0.25, 0.0]);
    }

    #[test]
    fn test_end_drains_buffer() {
        let mut buffer = StrokeBuffer::new(SamplingPolicy::Unconditional);
        buffer.begin(0.0);
        buffer.update(Point2::ZERO, 0.0);
        buffer.update(Point2::new(3.0, 4.0), 0.1);

        let stroke = buffer.end();
        assert_eq!(stroke.len(), 2);
        assert_relative_eq!(stroke.raw_length(), 5.0);
        assert!(!buffer.is_capturing());
        assert_eq!(buffer.n_points(), 0);
        assert!(buffer.end().is_empty());
    }

    #[test]
    fn test_restart_discards_prior_points() {
        let mut buffer = StrokeBuffer::new(SamplingPolicy::Unconditional);
        buffer.begin(0.0);
        buffer.update(Point2::new(9.0, 9.0), 0.1);
        buffer.update(Point2::new(8.0, 8.0), 0.2);

        buffer.begin(1.0);
        buffer.update(Point2::new(1.0, 1.0), 1.5);
        assert_eq!(buffer.start_time(), 1.0);

        let stroke = buffer.end();
        assert_eq!(stroke.positions(), vec![Point2::new(1.0, 1.0)]);
        assert_relative_eq!(stroke.duration(), 0.5);
    }

    #[test]
    fn test_updates_outside_capture_ignored() {
        let mut buffer = StrokeBuffer::new(SamplingPolicy::Unconditional);
        assert!(!buffer.update(Point2::ZERO, 0.0));

        buffer.begin(0.0);
        buffer.update(Point2::ZERO, 0.0);
        buffer.abort();
        assert!(!buffer.is_capturing());
        assert!(!buffer.update(Point2::new(1.0, 0.0), 0.1));
        assert_eq!(buffer.n_points(), 0);
    }
}
