//! Raster output: the static outline layer, the animated marker layer, and their composition.

pub(crate) mod composite;
/// Animated marker layer (`vello_cpu`).
pub mod markers;
/// Static path outline layer (SVG via `usvg`/`resvg`).
pub mod outline;
/// Layer stack and frame composition.
pub mod renderer;
/// Rendered frame buffers.
pub mod surface;
