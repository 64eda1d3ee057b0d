//! Pathflow animates evenly spaced markers flowing along a 2D path.
//!
//! A path is built once from control points (step or linear interpolation) and measured by
//! arc length. Every frame, elapsed time times speed is wrapped into one sample step and the
//! path is sampled at that offset, so markers appear to stream from the path's start toward its
//! end. Frames are rasterized on the CPU as a static outline layer with a marker layer on top.
//!
//! - Load and validate a [`Scene`]
//! - Create a [`Session`]
//! - Render single frames, stream a range into a [`FrameSink`], or run in wall-clock time
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Per-frame timing, the animation loop and frame schedulers.
pub mod animation;
/// Frame sinks (PNG sequences, ffmpeg MP4).
pub mod encode;
/// Path construction and arc-length queries.
pub mod geometry;
/// Outline and marker layers and their composition.
pub mod render;
/// Arc-length sampling.
pub mod sample;
/// JSON scene model.
pub mod scene;
/// Session-oriented rendering API.
pub mod session;

pub use crate::foundation::core::{
    BezPath, Canvas, Fps, FrameIndex, FrameRange, Point, Rgba8Premul,
};
pub use crate::foundation::error::{PathflowError, PathflowResult};

pub use crate::animation::runner::{AnimationLoop, LoopPhase, frame_samples};
pub use crate::animation::scheduler::{
    Clock, FixedRateScheduler, FrameScheduler, FrameTick, HaltHandle, MonotonicClock,
    RealtimeScheduler,
};
pub use crate::animation::state::AnimationState;
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig, write_png};
pub use crate::geometry::curve::{CurveKind, build_path};
pub use crate::geometry::path::PathGeometry;
pub use crate::render::markers::{MarkerLayer, MarkerStyle};
pub use crate::render::outline::{OutlineLayer, OutlineStyle};
pub use crate::render::renderer::{RenderSettings, Renderer};
pub use crate::render::surface::FrameRGBA;
pub use crate::sample::sampler::{SampleSet, sample};
pub use crate::scene::model::{PointOrder, Scene};
pub use crate::session::{RenderStats, Session, SessionOpts};
