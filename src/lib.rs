//! Stroke Gesture Library
//!
//! Direction-sequence gesture recognition for pointer drags and
//! motion-sensor strokes.
//!
//! A captured stroke is normalized to a unit box and resampled to a fixed
//! number of points by arc length. Each segment is then quantized into one of
//! N direction bins. The resulting direction sequence is matched against named
//! templates with either a weighted edit distance or the legacy fixed-window
//! distance.
//!
//! # Features
//!
//! - **Engine-agnostic**: driven by explicit start/update/end calls with
//!   caller-supplied timestamps
//! - **Two scoring methods**: see [`ScoringMethod`]
//! - **Motion input**: 3D acceleration projected onto a plane and integrated
//!   into a spaced stroke
//! - **Diagnostics**: every outcome carries its score, nearest template,
//!   normalized length and direction sequence
//!
//! # Quick Start
//!
//! ```
//! use stroke_gesture::{
//!     CaptureController, GestureKind, GestureTemplate, Point2, RecognizerConfig, TemplateStore,
//! };
//!
//! let store = TemplateStore::new(
//!     vec![
//!         GestureTemplate::new("AttackR", vec![0]),
//!         GestureTemplate::new("Magic", vec![0, 2, 4, 6]),
//!     ],
//!     8,
//! )?;
//! let mut controller = CaptureController::new(RecognizerConfig::default(), store)?;
//!
//! controller.start(0.0);
//! for i in 0..=40 {
//!     let s = f64::from(i) / 10.0;
//!     // Counter-clockwise square: right, up, left, down.
//!     let p = match i / 10 {
//!         0 => Point2::new(s, 0.0),
//!         1 => Point2::new(1.0, s - 1.0),
//!         2 => Point2::new(3.0 - s, 1.0),
//!         _ => Point2::new(0.0, 4.0 - s),
//!     };
//!     controller.update(p * 100.0, s * 0.1);
//! }
//!
//! let outcome = controller.end(0.4).expect("capture was active");
//! assert_eq!(outcome.kind, GestureKind::Magic);
//! # Ok::<(), stroke_gesture::GestureError>(())
//! ```
//!
//! # Direction Bins (8)
//!
//! | Bin | Heading |
//! |-----|---------|
//! | 0 | +x (right) |
//! | 2 | +y (up) |
//! | 4 | -x (left) |
//! | 6 | -y (down) |
//!
//! Odd bins are the diagonals between them.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod capture;
pub mod classifier;
pub mod config;
pub mod controller;
pub mod distance;
pub mod error;
pub mod math;
pub mod motion;
pub mod template;

// Re-exports for convenient access
pub use capture::{Stroke, StrokeBuffer};
pub use classifier::{Classification, Classifier};
pub use config::{
    MatchingConfig, MotionConfig, Projection, ProjectionPlane, RecognizerConfig, SamplingPolicy,
    ScoringMethod,
};
pub use controller::{
    analyze_stroke, CaptureController, CaptureState, GestureOutcome, GestureSink, Rejection,
    StrokeAnalysis,
};
pub use distance::{legacy_distance, sequence_distance, weighted_edit_distance};
pub use error::{GestureError, Result};
pub use math::{
    circular_bin_difference, normalize, path_length, quantize_directions, resample, Point2,
    TimedPoint,
};
pub use motion::{MotionInput, MotionStrokeBuilder};
pub use template::{GestureKind, GestureTemplate, TemplateStore};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of resampled points.
pub const DEFAULT_RESAMPLE_COUNT: usize = 16;

/// Default number of direction bins.
pub const DEFAULT_DIRECTION_BINS: usize = 8;

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f64, per_edge: u32) -> Vec<Point2> {
        let corners = [
            Point2::new(0.0, 0.0),
            Point2::new(side, 0.0),
            Point2::new(side, side),
            Point2::new(0.0, side),
            Point2::new(0.0, 0.0),
        ];
        let mut points = Vec::new();
        for w in corners.windows(2) {
            for s in 0..per_edge {
                points.push(w[0].lerp(w[1], f64::from(s) / f64::from(per_edge)));
            }
        }
        points.push(corners[4]);
        points
    }

    #[test]
    fn test_full_pipeline() {
        let analysis = analyze_stroke(
            &square(100.0, 10),
            DEFAULT_RESAMPLE_COUNT,
            DEFAULT_DIRECTION_BINS,
        );

        assert_eq!(analysis.resampled.len(), DEFAULT_RESAMPLE_COUNT);
        // The up-to-left corner is cut by one diagonal segment.
        assert_eq!(analysis.directions, vec![0, 2, 3, 4, 6]);
        assert!((analysis.normalized_length - 4.0).abs() < 1e-9);

        let store =
            TemplateStore::new(vec![GestureTemplate::new("Magic", vec![0, 2, 4, 6])], 8).unwrap();
        let classifier = Classifier::new(store, MatchingConfig::default());
        let result = classifier.classify(&analysis.directions);
        assert_eq!(result.kind, GestureKind::Magic);
        assert!((result.score - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_defaults_match_config() {
        let config = RecognizerConfig::default();
        assert_eq!(config.resample_count, DEFAULT_RESAMPLE_COUNT);
        assert_eq!(config.direction_bins, DEFAULT_DIRECTION_BINS);
        assert!(!VERSION.is_empty());
    }
}
