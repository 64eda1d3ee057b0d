use crate::foundation::core::{Canvas, Point, Rgba8Premul};
use crate::foundation::error::PathflowResult;
use crate::geometry::path::PathGeometry;
use crate::render::composite::{fill_in_place, over_in_place};
use crate::render::markers::{MarkerLayer, MarkerStyle};
use crate::render::outline::{OutlineLayer, OutlineStyle};
use crate::render::surface::FrameRGBA;

/// Renderer settings.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderSettings {
    /// If set, the composed frame is cleared to this straight-alpha RGBA8 color first.
    pub clear_rgba: Option<[u8; 4]>,
    /// Marker appearance.
    pub markers: MarkerStyle,
    /// Outline appearance.
    pub outline: OutlineStyle,
}

/// Two stacked same-size layers: the static outline below, the animated markers above.
pub struct Renderer {
    canvas: Canvas,
    clear: Option<Rgba8Premul>,
    outline: OutlineLayer,
    markers: MarkerLayer,
}

impl Renderer {
    /// Rasterize the outline of `geometry` and allocate a blank marker layer.
    pub fn new(
        geometry: &PathGeometry,
        canvas: Canvas,
        settings: RenderSettings,
    ) -> PathflowResult<Self> {
        let outline = OutlineLayer::rasterize(geometry, canvas, settings.outline)?;
        let markers = MarkerLayer::new(canvas, settings.markers)?;
        let clear = settings.clear_rgba.map(Rgba8Premul::from_straight);
        Ok(Self {
            canvas,
            clear,
            outline,
            markers,
        })
    }

    /// Surface dimensions shared by both layers.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Color frames are cleared to before the layers go on, if any.
    pub fn background(&self) -> Option<Rgba8Premul> {
        self.clear
    }

    /// Clear the marker layer and draw one marker per point.
    pub fn draw(&mut self, points: &[Point]) {
        self.markers.draw(points);
    }

    /// Flatten clear color, outline and markers into one frame.
    pub fn compose(&self) -> PathflowResult<FrameRGBA> {
        let mut data = vec![0u8; self.canvas.rgba8_len()];
        if let Some(c) = self.clear {
            fill_in_place(&mut data, c.to_array());
        }
        over_in_place(&mut data, self.outline.pixels())?;
        over_in_place(&mut data, self.markers.pixels())?;
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
            premultiplied: true,
        })
    }

    /// Draw `points` and compose the resulting frame.
    pub fn render(&mut self, points: &[Point]) -> PathflowResult<FrameRGBA> {
        self.draw(points);
        self.compose()
    }

    /// The static outline layer.
    pub fn outline(&self) -> &OutlineLayer {
        &self.outline
    }

    /// The animated marker layer.
    pub fn markers(&self) -> &MarkerLayer {
        &self.markers
    }
}
