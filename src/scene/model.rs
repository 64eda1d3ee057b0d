use crate::animation::state::AnimationState;
use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point};
use crate::foundation::error::{PathflowError, PathflowResult};
use crate::geometry::curve::CurveKind;
use crate::geometry::path::PathGeometry;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// How control points are ordered before the path is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointOrder {
    /// Sort by descending x, so markers travel right to left.
    #[default]
    DescendingX,
    /// Keep the order found in the file.
    AsGiven,
}

fn default_sample_count() -> usize {
    10
}

fn default_speed() -> f64 {
    AnimationState::DEFAULT_SPEED
}

fn default_duration() -> u64 {
    120
}

/// JSON-facing description of one animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Surface size shared by the outline and marker layers.
    pub canvas: Canvas,
    /// Control points of the path.
    pub points: Vec<Point>,
    /// Ordering applied to `points` before building the path.
    #[serde(default)]
    pub order: PointOrder,
    /// Interpolation between control points.
    #[serde(default)]
    pub curve: CurveKind,
    /// Markers sampled per frame.
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
    /// Travel speed in pixels per second.
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Frame rate for offline rendering and realtime pacing.
    #[serde(default)]
    pub fps: Fps,
    /// Length of an offline render, in frames.
    #[serde(default = "default_duration")]
    pub duration: u64,
}

impl Scene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PathflowResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PathflowError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON string.
    pub fn from_json_str(s: &str) -> PathflowResult<Self> {
        serde_json::from_str(s).map_err(|e| PathflowError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PathflowResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PathflowError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every field for values the renderer and sampler cannot use.
    pub fn validate(&self) -> PathflowResult<()> {
        self.canvas.to_u16()?;
        if self.points.is_empty() {
            return Err(PathflowError::validation(
                "scene needs at least one control point",
            ));
        }
        if let Some(i) = self
            .points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(PathflowError::validation(format!(
                "point {i} has a non-finite coordinate"
            )));
        }
        if self.sample_count == 0 {
            return Err(PathflowError::validation("sample_count must be > 0"));
        }
        if !self.speed.is_finite() {
            return Err(PathflowError::validation("speed must be finite"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if self.duration == 0 {
            return Err(PathflowError::validation("duration must be > 0 frames"));
        }
        Ok(())
    }

    /// Control points after applying [`Scene::order`].
    pub fn ordered_points(&self) -> Vec<Point> {
        let mut points = self.points.clone();
        if self.order == PointOrder::DescendingX {
            points.sort_by(|a, b| b.x.total_cmp(&a.x));
        }
        points
    }

    /// Build the path geometry described by this scene.
    pub fn geometry(&self) -> PathflowResult<PathGeometry> {
        PathGeometry::new(self.ordered_points(), self.curve)
    }

    /// All frames of an offline render, `[0, duration)`.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.duration),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
