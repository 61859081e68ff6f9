//! Motion-derived strokes.
//!
//! Controllers without a pointer report 3D acceleration. This module projects
//! each sample onto a plane and treats the result as the heading of
//! a virtual pen. The pen advances by `magnitude * step_scale * dt`, and
//! positions are recorded only once they are far enough from the last
//! recorded one. That keeps sensor noise from flooding the stroke.

use tracing::{debug, trace};

use crate::config::{MotionConfig, Projection, ProjectionPlane};
use crate::controller::{CaptureController, GestureOutcome};
use crate::error::Result;
use crate::math::{Point2, MIN_SEGMENT_LENGTH_SQUARED};

/// Smallest spacing the builder accepts.
pub const MIN_BUILDER_SPACING: f64 = 1e-4;

impl Projection {
    /// Map a 3D vector into stroke space.
    #[must_use]
    pub fn project(&self, v: [f64; 3]) -> Point2 {
        let [x, y, z] = v;
        let mut p = match self.plane {
            ProjectionPlane::XY => Point2::new(x, y),
            ProjectionPlane::XZ => Point2::new(x, z),
            ProjectionPlane::YZ => Point2::new(y, z),
        };
        if self.invert_x {
            p.x = -p.x;
        }
        if self.invert_y {
            p.y = -p.y;
        }
        p
    }
}

/// Integrates headings into a spaced polyline.
#[derive(Debug, Clone)]
pub struct MotionStrokeBuilder {
    points: Vec<Point2>,
    min_sample_distance: f64,
    current: Point2,
}

impl MotionStrokeBuilder {
    /// Create a builder. Spacing below [`MIN_BUILDER_SPACING`] is raised to it.
    #[must_use]
    pub fn new(min_sample_distance: f64) -> Self {
        Self {
            points: Vec::new(),
            min_sample_distance: min_sample_distance.max(MIN_BUILDER_SPACING),
            current: Point2::ZERO,
        }
    }

    /// Start a new stroke at `start`, which is recorded immediately.
    pub fn begin(&mut self, start: Point2) {
        self.points.clear();
        self.current = start;
        self.points.push(start);
    }

    /// Move the pen `distance` along `direction`.
    ///
    /// The pen always moves, but the new position is only recorded,
    /// and returned, when it is at least the minimum spacing away from the
    /// last recorded point.
    pub fn step(&mut self, direction: Point2, distance: f64) -> Option<Point2> {
        if distance <= 0.0 || direction.length_squared() < MIN_SEGMENT_LENGTH_SQUARED {
            return None;
        }

        self.current = self.current + direction.normalized() * distance;

        let far_enough = self
            .points
            .last()
            .map_or(true, |last| last.distance(self.current) >= self.min_sample_distance);
        if far_enough {
            self.points.push(self.current);
            Some(self.current)
        } else {
            None
        }
    }

    /// Current pen position, recorded or not.
    #[must_use]
    pub const fn current(&self) -> Point2 {
        self.current
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn n_points(&self) -> usize {
        self.points.len()
    }
}

/// Gate-driven adapter from acceleration samples to a [`CaptureController`].
#[derive(Debug, Clone)]
pub struct MotionInput {
    config: MotionConfig,
    builder: MotionStrokeBuilder,
    gate_pressed: bool,
}

impl MotionInput {
    /// Create an adapter from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: MotionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            builder: MotionStrokeBuilder::new(config.min_sample_distance),
            config,
            gate_pressed: false,
        })
    }

    /// Process one input poll.
    ///
    /// When the gate goes down, a capture starts with the pen at the origin.
    /// While it is held, each acceleration sample moves the pen.
    /// When it is released, the capture ends and its outcome is returned.
    pub fn drive(
        &mut self,
        controller: &mut CaptureController,
        accel: [f64; 3],
        gate_pressed: bool,
        dt: f64,
        now: f64,
    ) -> Option<GestureOutcome> {
        let was_pressed = std::mem::replace(&mut self.gate_pressed, gate_pressed);

        if gate_pressed && !was_pressed {
            self.begin(controller, now);
        }
        if gate_pressed {
            self.feed(controller, accel, dt, now);
            return None;
        }
        if was_pressed {
            debug!(recorded = self.builder.n_points(), "motion stroke ended");
            return controller.end(now);
        }
        None
    }

    fn begin(&mut self, controller: &mut CaptureController, now: f64) {
        self.builder.begin(Point2::ZERO);
        controller.start(now);
        controller.update(Point2::ZERO, now);
    }

    /// Step the pen with one sample. Returns the recorded position, if any.
    fn feed(
        &mut self,
        controller: &mut CaptureController,
        accel: [f64; 3],
        dt: f64,
        now: f64,
    ) -> Option<Point2> {
        let projected = self.config.projection.project(accel);
        let magnitude = projected.length();
        if magnitude < self.config.accel_magnitude_threshold {
            trace!(magnitude, "acceleration below threshold");
            return None;
        }

        let step = magnitude * self.config.step_scale * dt;
        let recorded = self.builder.step(projected, step)?;
        controller.update(recorded, now);
        Some(recorded)
    }

    #[must_use]
    pub const fn builder(&self) -> &MotionStrokeBuilder {
        &self.builder
    }

    #[must_use]
    pub const fn config(&self) -> &MotionConfig {
        &self.config
    }
}
