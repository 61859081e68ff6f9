//! Polyline geometry: length, bounding-box normalization, arc-length resampling.

use super::point::Point2;

/// Extent below which a stroke is treated as a single spot.
pub const DEGENERATE_EXTENT: f64 = 1e-5;

/// Total polyline length. Zero for fewer than two points.
#[must_use]
pub fn path_length(points: &[Point2]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Axis-aligned bounding box of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox {
    /// Bounding box of `points`, or `None` when empty.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Larger of width and height.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.width().max(self.height())
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        (self.min + self.max) * 0.5
    }
}

/// Center a stroke on its bounding-box midpoint and scale its larger
/// dimension to 1.0.
///
/// Strokes whose extent is below [`DEGENERATE_EXTENT`] are returned as an
/// unscaled copy.
#[must_use]
pub fn normalize(points: &[Point2]) -> Vec<Point2> {
    let Some(bbox) = BoundingBox::from_points(points) else {
        return Vec::new();
    };

    let scale = bbox.extent();
    if scale < DEGENERATE_EXTENT {
        return points.to_vec();
    }

    let center = bbox.center();
    points.iter().map(|&p| (p - center) / scale).collect()
}

/// Resample a polyline to `target_count` points spaced uniformly by arc length.
///
/// Each emitted sample replaces the vertex it was interpolated from, so the
/// walk resumes from the sample rather than from the original vertex.
/// The first output point is always the first input point.
///
/// Edge cases:
/// - empty input gives empty output
/// - one input point, or `target_count <= 1`, gives just the first point
/// - a stroke shorter than [`DEGENERATE_EXTENT`] gives `target_count` copies
///   of the first point
#[must_use]
pub fn resample(points: &[Point2], target_count: usize) -> Vec<Point2> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };

    if points.len() == 1 || target_count <= 1 {
        return vec![first];
    }

    let total = path_length(points);
    if total < DEGENERATE_EXTENT {
        return vec![first; target_count];
    }

    let step = total / (target_count - 1) as f64;
    let mut local = points.to_vec();
    let mut resampled = Vec::with_capacity(target_count);
    resampled.push(first);

    let mut index = 1;
    let mut dist_since_last = 0.0;

    while resampled.len() < target_count && index < local.len() {
        let prev = local[index - 1];
        let curr = local[index];
        let seg_len = prev.distance(curr);

        if dist_since_last + seg_len >= step {
            let remaining = step - dist_since_last;
            let t = if seg_len > 0.0 { remaining / seg_len } else { 0.0 };
            let sample = prev.lerp(curr, t);

            resampled.push(sample);
            local[index - 1] = sample;
            dist_since_last = 0.0;
        } else {
            dist_since_last += seg_len;
            index += 1;
        }
    }

    // Rounding can leave the walk one short of the end.
    let last = local[local.len() - 1];
    resampled.resize(target_count, last);

    resampled
}
