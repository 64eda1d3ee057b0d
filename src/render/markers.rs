use crate::foundation::core::{BezPath, Canvas, Point};
use crate::foundation::error::{PathflowError, PathflowResult};
use kurbo::Shape;

/// Flattening tolerance for marker circles, in pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// Marker appearance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    /// Circle radius in pixels.
    pub radius: f64,
    /// Fill color, straight-alpha RGBA8.
    pub color: [u8; 4],
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 3.0,
            color: [0, 0, 0, 255],
        }
    }
}

/// One path holding a circle subpath per point.
///
/// All markers are filled together, so overlapping markers never stack their alpha.
pub fn marker_path(points: &[Point], radius: f64) -> BezPath {
    let mut path = BezPath::new();
    for &p in points {
        for el in kurbo::Circle::new(p, radius).path_elements(CIRCLE_TOLERANCE) {
            path.push(el);
        }
    }
    path
}

/// Raster layer holding the animated markers.
pub struct MarkerLayer {
    canvas: Canvas,
    style: MarkerStyle,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    drawn: usize,
}

impl MarkerLayer {
    /// Allocate a blank layer covering `canvas`.
    pub fn new(canvas: Canvas, style: MarkerStyle) -> PathflowResult<Self> {
        let (w, h) = canvas.to_u16()?;
        if !(style.radius.is_finite() && style.radius >= 0.0) {
            return Err(PathflowError::validation(
                "marker radius must be finite and >= 0",
            ));
        }
        Ok(Self {
            canvas,
            style,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            drawn: 0,
        })
    }

    /// Layer dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Clear the whole layer, then fill one marker per point in a single fill.
    pub fn draw(&mut self, points: &[Point]) {
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.drawn = points.len();
        if points.is_empty() {
            return;
        }

        let path = bezpath_to_cpu(&marker_path(points, self.style.radius));
        let [r, g, b, a] = self.style.color;

        self.ctx.reset();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx.fill_path(&path);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }

    /// Number of markers in the last [`MarkerLayer::draw`].
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Premultiplied RGBA8 pixels of the layer.
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/markers.rs"]
mod tests;
