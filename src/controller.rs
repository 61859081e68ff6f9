//! Capture controller: start/update/end orchestration.
//!
//! [`CaptureController`] owns a [`StrokeBuffer`] and a [`Classifier`] and runs
//! the full pipeline when a capture ends:
//!
//! 1. Reject strokes with fewer than `min_point_count` samples
//! 2. Normalize to a unit box centered at the origin
//! 3. Measure the normalized path length (diagnostic)
//! 4. Resample to `resample_count` points by arc length
//! 5. Quantize into `direction_bins` directions
//! 6. Classify against the template store
//!
//! The outcome is returned to the caller and passed to the optional
//! [`GestureSink`].

use std::fmt;

use tracing::debug;

use crate::capture::StrokeBuffer;
use crate::classifier::{Classification, Classifier};
use crate::config::RecognizerConfig;
use crate::error::{GestureError, Result};
use crate::math::{direction_string, normalize, path_length, quantize_directions, resample, Point2};
use crate::template::{GestureKind, TemplateStore};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Controller state. Classification runs synchronously inside
/// [`CaptureController::end`], so it never appears as a resting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing,
}

/// Why a stroke was not classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rejection {
    /// Fewer samples than the configured minimum.
    TooFewPoints { min: usize, actual: usize },
}

/// Geometry derived from a stroke, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeAnalysis {
    pub normalized: Vec<Point2>,
    /// Path length of the normalized stroke.
    pub normalized_length: f64,
    pub resampled: Vec<Point2>,
    pub directions: Vec<usize>,
}

/// Run normalize → length → resample → quantize on raw positions.
#[must_use]
pub fn analyze_stroke(points: &[Point2], resample_count: usize, bins: usize) -> StrokeAnalysis {
    let normalized = normalize(points);
    let normalized_length = path_length(&normalized);
    let resampled = resample(&normalized, resample_count);
    let directions = quantize_directions(&resampled, bins);

    StrokeAnalysis {
        normalized,
        normalized_length,
        resampled,
        directions,
    }
}

/// Everything the controller knows about a finished capture.
///
/// Serializes for logs and debug views. It is not read back, because an
/// unscored `score` of `+∞` has no JSON number form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GestureOutcome {
    pub kind: GestureKind,
    /// Present when the stroke reached the classifier.
    pub classification: Option<Classification>,
    /// Present when the stroke was rejected before classification.
    pub rejection: Option<Rejection>,
    pub point_count: usize,
    /// Seconds from `start` to `end`.
    pub duration: f64,
    /// Path length in capture units (e.g. pixels), before normalization.
    pub raw_length: f64,
    /// Zero when rejected before normalization.
    pub normalized_length: f64,
    pub directions: Vec<usize>,
}

impl GestureOutcome {
    /// Best template distance, if the stroke was scored.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        self.classification
            .as_ref()
            .map(|c| c.score)
            .filter(|s| s.is_finite())
    }

    /// Name of the closest template, if any was scored.
    #[must_use]
    pub fn best_template(&self) -> Option<&str> {
        self.classification
            .as_ref()
            .and_then(|c| c.best_template.as_deref())
    }

    /// Direction sequence as `"0,2,4"`.
    #[must_use]
    pub fn directions_string(&self) -> String {
        direction_string(&self.directions)
    }
}

/// Consumer of finished gestures, such as an action dispatcher or a debug view.
pub trait GestureSink {
    fn on_gesture(&mut self, outcome: &GestureOutcome);
}

impl<F> GestureSink for F
where
    F: FnMut(&GestureOutcome),
{
    fn on_gesture(&mut self, outcome: &GestureOutcome) {
        self(outcome);
    }
}

/// Drives one capture buffer through `Idle → Capturing → Idle`.
///
/// # Example
///
/// ```
/// use stroke_gesture::{
///     CaptureController, GestureKind, GestureTemplate, Point2, RecognizerConfig, TemplateStore,
/// };
///
/// let store = TemplateStore::new(vec![GestureTemplate::new("AttackR", vec![0])], 8)?;
/// let mut controller = CaptureController::new(RecognizerConfig::default(), store)?;
///
/// controller.start(0.0);
/// for i in 0..20 {
///     let t = f64::from(i) * 0.016;
///     controller.update(Point2::new(f64::from(i) * 10.0, 0.0), t);
/// }
/// let outcome = controller.end(0.32).expect("capture was active");
/// assert_eq!(outcome.kind, GestureKind::AttackRight);
/// # Ok::<(), stroke_gesture::GestureError>(())
/// ```
pub struct CaptureController {
    config: RecognizerConfig,
    buffer: StrokeBuffer,
    classifier: Classifier,
    state: CaptureState,
    gate_pressed: bool,
    sink: Option<Box<dyn GestureSink>>,
}

impl CaptureController {
    /// Create a controller from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the store was
    /// built with a different bin count.
    pub fn new(config: RecognizerConfig, store: TemplateStore) -> Result<Self> {
        config.validate()?;
        if !store.is_empty() && store.direction_bins() != config.direction_bins {
            return Err(GestureError::invalid_config(format!(
                "template store uses {} direction bins, config uses {}",
                store.direction_bins(),
                config.direction_bins
            )));
        }

        Ok(Self {
            buffer: StrokeBuffer::new(config.sampling),
            classifier: Classifier::new(store, config.matching),
            state: CaptureState::Idle,
            gate_pressed: false,
            sink: None,
            config,
        })
    }

    /// Deliver every finished outcome to `sink` as well as returning it.
    #[must_use]
    pub fn with_sink(mut self, sink: impl GestureSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Begin a capture. Restarting mid-capture discards the unfinished stroke.
    pub fn start(&mut self, now: f64) {
        if self.state == CaptureState::Capturing {
            debug!(discarded = self.buffer.n_points(), "capture restarted");
        } else {
            debug!("capture started");
        }
        self.buffer.begin(now);
        self.state = CaptureState::Capturing;
    }

    /// Feed a sample. Returns whether the buffer recorded it.
    pub fn update(&mut self, point: Point2, now: f64) -> bool {
        if self.state != CaptureState::Capturing {
            return false;
        }
        self.buffer.update(point, now)
    }

    /// Finish the capture at time `now` and classify it.
    ///
    /// The duration runs to `now` rather than to the last recorded sample, so
    /// samples dropped by spacing at the end of a stroke still count.
    /// Returns `None` if no capture was active.
    pub fn end(&mut self, now: f64) -> Option<GestureOutcome> {
        if self.state != CaptureState::Capturing {
            return None;
        }

        let duration = (now - self.buffer.start_time()).max(0.0);
        let stroke = self.buffer.end();
        let point_count = stroke.len();
        let raw_length = stroke.raw_length();

        let outcome = if point_count < self.config.min_point_count {
            debug!(
                point_count,
                raw_length,
                min = self.config.min_point_count,
                "capture ended with too few points"
            );
            GestureOutcome {
                kind: GestureKind::Invalid,
                classification: None,
                rejection: Some(Rejection::TooFewPoints {
                    min: self.config.min_point_count,
                    actual: point_count,
                }),
                point_count,
                duration,
                raw_length,
                normalized_length: 0.0,
                directions: Vec::new(),
            }
        } else {
            let analysis = analyze_stroke(
                &stroke.positions(),
                self.config.resample_count,
                self.config.direction_bins,
            );
            let classification = self.classifier.classify(&analysis.directions);
            debug!(
                point_count,
                duration,
                raw_length,
                normalized_length = analysis.normalized_length,
                kind = %classification.kind,
                "capture ended"
            );
            GestureOutcome {
                kind: classification.kind,
                classification: Some(classification),
                rejection: None,
                point_count,
                duration,
                raw_length,
                normalized_length: analysis.normalized_length,
                directions: analysis.directions,
            }
        };

        self.state = CaptureState::Idle;
        if let Some(sink) = self.sink.as_mut() {
            sink.on_gesture(&outcome);
        }
        Some(outcome)
    }

    /// Drop the current capture without classifying or notifying the sink.
    pub fn abort(&mut self) {
        if self.state == CaptureState::Capturing {
            debug!(discarded = self.buffer.n_points(), "capture aborted");
        }
        self.buffer.abort();
        self.state = CaptureState::Idle;
    }

    /// Edge-triggered input: a press starts, holding updates, a release ends.
    ///
    /// Call once per input poll. The sample from the
    /// press poll is recorded, but the one from the release poll is not.
    pub fn update_gate(
        &mut self,
        pressed: bool,
        point: Point2,
        now: f64,
    ) -> Option<GestureOutcome> {
        let was_pressed = std::mem::replace(&mut self.gate_pressed, pressed);

        if pressed && !was_pressed {
            self.start(now);
        }
        if pressed {
            self.update(point, now);
            return None;
        }
        if was_pressed {
            return self.end(now);
        }
        None
    }

    #[must_use]
    pub const fn state(&self) -> CaptureState {
        self.state
    }

    #[must_use]
    pub const fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    #[must_use]
    pub const fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Samples recorded in the current capture.
    #[must_use]
    pub fn n_points(&self) -> usize {
        self.buffer.n_points()
    }
}

impl fmt::Debug for CaptureController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("n_points", &self.buffer.n_points())
            .field("has_sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}
