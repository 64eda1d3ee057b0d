use crate::foundation::core::Point;
use crate::geometry::path::PathGeometry;

/// Points sampled at equal arc-length intervals for one frame.
///
/// A fresh value is produced every frame; nothing carries over between frames.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SampleSet {
    /// Arc length of the first sample.
    pub offset: f64,
    /// Arc-length distance between consecutive samples (`0` for a no-op frame).
    pub step: f64,
    /// Sampled coordinates in path order.
    pub points: Vec<Point>,
}

impl SampleSet {
    /// A frame with nothing to draw.
    pub fn empty(offset: f64) -> Self {
        Self {
            offset,
            step: 0.0,
            points: Vec::new(),
        }
    }

    /// Number of sampled points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Return `true` when no points were sampled.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Half-open range `[start, stop)` stepped by `step`.
///
/// Values are generated as `start + i * step` for `i in 0..ceil((stop - start) / step)`, so
/// accumulated rounding never adds or drops an element. A non-positive or non-finite step, or
/// non-finite bounds, yield an empty range.
pub fn arc_range(start: f64, stop: f64, step: f64) -> impl Iterator<Item = f64> {
    let n = if step > 0.0 && step.is_finite() && start.is_finite() && stop.is_finite() {
        ((stop - start) / step).ceil().max(0.0) as usize
    } else {
        0
    };
    (0..n).map(move |i| start + (i as f64) * step)
}

/// Arc-length distance between samples, or `None` when the frame would be a no-op.
pub fn step_length(geometry: &PathGeometry, count: usize) -> Option<f64> {
    if count == 0 || geometry.is_degenerate() {
        return None;
    }
    Some(geometry.total_length() / (count as f64))
}

/// Sample `count` positions spaced by `total_length / count`, starting at `offset`.
///
/// Positions at or past the end of the path are dropped rather than wrapped, so an offset of
/// one full step yields `count - 1` points. Never more than `count` points are produced, even
/// when `total_length / step` rounds just above `count`. Degenerate geometry yields an empty set.
pub fn sample(geometry: &PathGeometry, count: usize, offset: f64) -> SampleSet {
    let Some(step) = step_length(geometry, count) else {
        return SampleSet::empty(offset);
    };
    let points = arc_range(offset, geometry.total_length(), step)
        .take(count)
        .map(|l| geometry.point_at_length(l))
        .collect();
    SampleSet {
        offset,
        step,
        points,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sample/sampler.rs"]
mod tests;
