//! Configuration for stroke capture and gesture matching.
//!
//! [`RecognizerConfig`] centralizes the pipeline parameters, [`MatchingConfig`]
//! the scoring parameters, and [`MotionConfig`] the motion-to-stroke
//! conversion. The cost and threshold defaults were tuned on recorded strokes
//! and are meant to be adjusted, not treated as derived constants.
//!
//! # Example
//!
//! ```
//! use stroke_gesture::{MatchingConfig, RecognizerConfig, ScoringMethod};
//!
//! let config = RecognizerConfig::default();
//! assert_eq!(config.matching.method, ScoringMethod::WeightedEdit);
//!
//! let pointer = RecognizerConfig::pointer()
//!     .with_matching(MatchingConfig::legacy().with_accept_threshold(3.5));
//! assert!(pointer.validate().is_ok());
//! ```

use crate::error::{GestureError, Result};
use crate::{DEFAULT_DIRECTION_BINS, DEFAULT_RESAMPLE_COUNT};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the capture buffer decides whether to keep a sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SamplingPolicy {
    /// Keep every sample. Used when spacing is enforced upstream.
    #[default]
    Unconditional,
    /// Keep a sample only if it lies at least this far from the last kept one.
    MinDistance(f64),
}

/// Sequence distance used to compare input against templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScoringMethod {
    /// Index-aligned circular difference with edge extension and a
    /// length-mismatch penalty.
    Legacy,
    /// Weighted Levenshtein distance. Tolerates extra or missing bends.
    #[default]
    WeightedEdit,
}

/// Scoring parameters for the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchingConfig {
    /// Scoring algorithm.
    pub method: ScoringMethod,

    /// Cost of inserting or deleting one direction token (edit distance only).
    /// Lower is more tolerant.
    pub insert_delete_cost: f64,

    /// Multiplier applied to the circular bin difference on substitution
    /// (edit distance only).
    pub substitution_scale: f64,

    /// Best scores above this are rejected as Invalid.
    pub accept_threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            method: ScoringMethod::WeightedEdit,
            insert_delete_cost: 0.75,
            substitution_scale: 1.0,
            accept_threshold: 5.0,
        }
    }
}

impl MatchingConfig {
    /// Legacy fixed-window scoring with its tighter threshold.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            method: ScoringMethod::Legacy,
            accept_threshold: 4.0,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_method(mut self, method: ScoringMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub const fn with_accept_threshold(mut self, threshold: f64) -> Self {
        self.accept_threshold = threshold;
        self
    }

    #[must_use]
    pub const fn with_edit_costs(mut self, insert_delete: f64, substitution_scale: f64) -> Self {
        self.insert_delete_cost = insert_delete;
        self.substitution_scale = substitution_scale;
        self
    }

    /// Validate the matching parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if a cost or the threshold is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("insert_delete_cost", self.insert_delete_cost)?;
        check_non_negative("substitution_scale", self.substitution_scale)?;
        check_non_negative("accept_threshold", self.accept_threshold)?;
        Ok(())
    }
}

/// Pipeline configuration for a capture controller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecognizerConfig {
    /// Number of points after arc-length resampling.
    pub resample_count: usize,

    /// Number of angular sectors. 8 covers cardinal and diagonal directions.
    pub direction_bins: usize,

    /// Strokes with fewer captured points are rejected without classification.
    pub min_point_count: usize,

    /// Sample spacing rule applied by the capture buffer.
    pub sampling: SamplingPolicy,

    /// Classifier scoring parameters.
    pub matching: MatchingConfig,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            resample_count: DEFAULT_RESAMPLE_COUNT,
            direction_bins: DEFAULT_DIRECTION_BINS,
            min_point_count: 8,
            sampling: SamplingPolicy::Unconditional,
            matching: MatchingConfig::default(),
        }
    }
}

impl RecognizerConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset for pointer drags in pixel coordinates.
    ///
    /// Drops samples closer than 2 px and scores with the legacy distance.
    #[must_use]
    pub fn pointer() -> Self {
        Self {
            sampling: SamplingPolicy::MinDistance(2.0),
            matching: MatchingConfig::legacy(),
            ..Self::default()
        }
    }

    /// Preset for motion-derived strokes.
    ///
    /// Spacing is enforced by the motion builder, so the buffer keeps all samples.
    #[must_use]
    pub fn motion() -> Self {
        Self {
            sampling: SamplingPolicy::Unconditional,
            matching: MatchingConfig::default(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_resample_count(mut self, count: usize) -> Self {
        self.resample_count = count;
        self
    }

    #[must_use]
    pub const fn with_direction_bins(mut self, bins: usize) -> Self {
        self.direction_bins = bins;
        self
    }

    #[must_use]
    pub const fn with_min_point_count(mut self, count: usize) -> Self {
        self.min_point_count = count;
        self
    }

    #[must_use]
    pub const fn with_sampling(mut self, sampling: SamplingPolicy) -> Self {
        self.sampling = sampling;
        self
    }

    #[must_use]
    pub const fn with_matching(mut self, matching: MatchingConfig) -> Self {
        self.matching = matching;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.resample_count < 2 {
            return Err(GestureError::invalid_config(
                "resample_count must be at least 2",
            ));
        }
        if self.direction_bins == 0 {
            return Err(GestureError::invalid_config(
                "direction_bins must be at least 1",
            ));
        }
        if let SamplingPolicy::MinDistance(d) = self.sampling {
            check_non_negative("sampling distance", d)?;
        }
        self.matching.validate()
    }
}

/// Plane onto which 3D acceleration is projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProjectionPlane {
    /// Keep x and y.
    #[default]
    XY,
    /// Keep x and z.
    XZ,
    /// Keep y and z.
    YZ,
}

/// Projection of 3D acceleration into stroke space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Projection {
    pub plane: ProjectionPlane,
    /// Negate the horizontal axis after projection.
    pub invert_x: bool,
    /// Negate the vertical axis after projection.
    pub invert_y: bool,
}

/// Parameters for turning acceleration samples into a virtual pen stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionConfig {
    /// Minimum distance between recorded pen positions, in virtual units.
    pub min_sample_distance: f64,

    /// How far the pen moves per second per unit of projected acceleration.
    pub step_scale: f64,

    /// Projected accelerations weaker than this are treated as noise.
    pub accel_magnitude_threshold: f64,

    pub projection: Projection,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            min_sample_distance: 0.02,
            step_scale: 1.0,
            accel_magnitude_threshold: 0.05,
            projection: Projection::default(),
        }
    }
}

impl MotionConfig {
    #[must_use]
    pub const fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    #[must_use]
    pub const fn with_step_scale(mut self, scale: f64) -> Self {
        self.step_scale = scale;
        self
    }

    #[must_use]
    pub const fn with_min_sample_distance(mut self, distance: f64) -> Self {
        self.min_sample_distance = distance;
        self
    }

    #[must_use]
    pub const fn with_accel_magnitude_threshold(mut self, threshold: f64) -> Self {
        self.accel_magnitude_threshold = threshold;
        self
    }

    /// Validate the motion parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("min_sample_distance", self.min_sample_distance)?;
        check_non_negative("step_scale", self.step_scale)?;
        check_non_negative("accel_magnitude_threshold", self.accel_magnitude_threshold)?;
        Ok(())
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(GestureError::invalid_config(format!(
            "{name} must be finite and non-negative, got {value}"
        )));
    }
    Ok(())
}
