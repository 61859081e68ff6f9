//! Geometry utilities for stroke processing.
//!
//! This module provides:
//! - [`point`]: 2D point and timed sample types
//! - [`path`]: path length, normalization and arc-length resampling
//! - [`direction`]: direction quantization and circular bin arithmetic

pub mod direction;
pub mod path;
pub mod point;

pub use direction::{
    circular_bin_difference, direction_bin, direction_string, quantize_directions,
    MIN_SEGMENT_LENGTH_SQUARED,
};
pub use path::{normalize, path_length, resample, BoundingBox, DEGENERATE_EXTENT};
pub use point::{Point2, TimedPoint};
