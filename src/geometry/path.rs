use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{PathflowError, PathflowResult};
use crate::geometry::curve::{CurveKind, build_path};
use kurbo::{ParamCurve, ParamCurveArclen, PathSeg};

/// Accuracy passed to kurbo arc-length queries. Line segments are exact regardless.
const ARCLEN_ACCURACY: f64 = 1e-9;

/// An immutable path through ordered control points, queryable by arc length.
///
/// The total length is computed once at construction. Queries outside `[0, total_length]`
/// clamp to the nearest endpoint instead of failing.
#[derive(Clone, Debug)]
pub struct PathGeometry {
    control_points: Vec<Point>,
    curve: CurveKind,
    path: BezPath,
    segments: Vec<PathSeg>,
    // Cumulative arc length at the end of each segment.
    ends: Vec<f64>,
    total_length: f64,
}

impl PathGeometry {
    /// Build geometry from control points in drawing order.
    pub fn new(control_points: Vec<Point>, curve: CurveKind) -> PathflowResult<Self> {
        if control_points.is_empty() {
            return Err(PathflowError::validation(
                "path geometry needs at least one control point",
            ));
        }
        if let Some(i) = control_points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(PathflowError::validation(format!(
                "control point {i} has a non-finite coordinate"
            )));
        }

        let path = build_path(&control_points, curve);
        let segments: Vec<PathSeg> = path.segments().collect();
        let mut ends = Vec::with_capacity(segments.len());
        let mut acc = 0.0;
        for seg in &segments {
            acc += seg.arclen(ARCLEN_ACCURACY);
            ends.push(acc);
        }

        Ok(Self {
            control_points,
            curve,
            path,
            segments,
            ends,
            total_length: acc,
        })
    }

    /// Control points in drawing order.
    pub fn control_points(&self) -> &[Point] {
        &self.control_points
    }

    /// Interpolation used between control points.
    pub fn curve(&self) -> CurveKind {
        self.curve
    }

    /// The interpolated path.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// SVG path data (`d` attribute) for the interpolated path.
    pub fn to_svg_path_d(&self) -> String {
        self.path.to_svg()
    }

    /// Cumulative arc length of the whole path.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Return `true` when the path has zero length (all control points coincide).
    pub fn is_degenerate(&self) -> bool {
        self.total_length <= 0.0
    }

    /// Effective start of the curve.
    pub fn start(&self) -> Point {
        match self.segments.first() {
            Some(seg) => seg.start(),
            None => self.control_points[0],
        }
    }

    /// Effective end of the curve.
    pub fn end(&self) -> Point {
        match self.segments.last() {
            Some(seg) => seg.end(),
            None => self.control_points[0],
        }
    }

    /// Coordinate at arc length `l` from the start, clamped to the path's endpoints.
    ///
    /// `NaN` clamps to the start.
    pub fn point_at_length(&self, l: f64) -> Point {
        if l.is_nan() || l <= 0.0 {
            return self.start();
        }
        if l >= self.total_length {
            return self.end();
        }

        let i = self.ends.partition_point(|&end| end < l);
        let seg = self.segments[i];
        let seg_start = if i == 0 { 0.0 } else { self.ends[i - 1] };
        let seg_len = self.ends[i] - seg_start;
        if seg_len <= 0.0 {
            return seg.start();
        }
        let t = seg.inv_arclen(l - seg_start, ARCLEN_ACCURACY);
        seg.eval(t.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/path.rs"]
mod tests;
