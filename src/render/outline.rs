use crate::foundation::core::Canvas;
use crate::foundation::error::{PathflowError, PathflowResult};
use crate::geometry::path::PathGeometry;
use anyhow::Context as _;

/// Stroke used for the static path outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineStyle {
    /// Stroke color, straight RGB.
    pub stroke_rgb: [u8; 3],
    /// Stroke width in pixels.
    pub stroke_width: f64,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self {
            stroke_rgb: [100, 100, 100],
            stroke_width: 2.0,
        }
    }
}

/// SVG document drawing the path outline at canvas size.
pub fn outline_svg(geometry: &PathGeometry, canvas: Canvas, style: OutlineStyle) -> String {
    let [r, g, b] = style.stroke_rgb;
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<path d="{d}" fill="none" stroke="rgb({r},{g},{b})" stroke-width="{sw}"/>"#,
            "</svg>"
        ),
        w = canvas.width,
        h = canvas.height,
        d = geometry.to_svg_path_d(),
        r = r,
        g = g,
        b = b,
        sw = style.stroke_width,
    )
}

/// Vector layer holding the static path outline, rasterized once.
#[derive(Clone, Debug)]
pub struct OutlineLayer {
    canvas: Canvas,
    svg: String,
    rgba8_premul: Vec<u8>,
}

impl OutlineLayer {
    /// Build the outline document for `geometry` and rasterize it.
    pub fn rasterize(
        geometry: &PathGeometry,
        canvas: Canvas,
        style: OutlineStyle,
    ) -> PathflowResult<Self> {
        canvas.to_u16()?;
        if !(style.stroke_width.is_finite() && style.stroke_width >= 0.0) {
            return Err(PathflowError::validation(
                "outline stroke width must be finite and >= 0",
            ));
        }

        let svg = outline_svg(geometry, canvas, style);
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse outline svg")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| PathflowError::render("failed to allocate outline pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            "outline layer rasterized"
        );
        Ok(Self {
            canvas,
            svg,
            rgba8_premul: pixmap.data().to_vec(),
        })
    }

    /// Layer dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// The SVG document the layer was rasterized from.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Premultiplied RGBA8 pixels of the layer.
    pub fn pixels(&self) -> &[u8] {
        &self.rgba8_premul
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/outline.rs"]
mod tests;
