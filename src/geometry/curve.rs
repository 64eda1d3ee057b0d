use crate::foundation::core::{BezPath, Point};

/// Interpolation used to connect consecutive control points.
///
/// The step variants produce only horizontal and vertical segments. `Step` turns at the
/// x-midpoint between two points, `StepBefore` goes vertical first, `StepAfter` goes
/// horizontal first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Straight segments between control points.
    Linear,
    /// Horizontal to the x-midpoint, vertical to the next y, then horizontal.
    #[default]
    Step,
    /// Vertical to the next y, then horizontal.
    StepBefore,
    /// Horizontal to the next x, then vertical.
    StepAfter,
}

impl CurveKind {
    /// Fraction of the x-distance travelled before turning vertical.
    fn step_fraction(self) -> Option<f64> {
        match self {
            CurveKind::Linear => None,
            CurveKind::Step => Some(0.5),
            CurveKind::StepBefore => Some(0.0),
            CurveKind::StepAfter => Some(1.0),
        }
    }
}

/// Build the path through `points` (in order) using `curve`.
///
/// An empty slice yields an empty path; a single point yields a lone `MoveTo`.
pub fn build_path(points: &[Point], curve: CurveKind) -> BezPath {
    let mut path = BezPath::new();
    let Some((&first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(first);

    let Some(t) = curve.step_fraction() else {
        for &p in rest {
            path.line_to(p);
        }
        return path;
    };

    let mut prev = first;
    for &p in rest {
        if t <= 0.0 {
            path.line_to((prev.x, p.y));
            path.line_to(p);
        } else {
            let x1 = prev.x * (1.0 - t) + p.x * t;
            path.line_to((x1, prev.y));
            path.line_to((x1, p.y));
        }
        prev = p;
    }

    // The midpoint variant stops half-way; finish the last horizontal run.
    if t > 0.0 && t < 1.0 && !rest.is_empty() {
        path.line_to(prev);
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/curve.rs"]
mod tests;
