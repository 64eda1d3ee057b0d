use crate::animation::runner::{AnimationLoop, frame_samples};
use crate::animation::scheduler::{
    Clock as _, FixedRateScheduler, FrameScheduler, FrameTick, RealtimeScheduler,
};
use crate::animation::state::AnimationState;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8Premul};
use crate::foundation::error::PathflowResult;
use crate::geometry::path::PathGeometry;
use crate::render::renderer::{RenderSettings, Renderer};
use crate::render::surface::FrameRGBA;
use crate::sample::sampler::SampleSet;
use crate::scene::model::Scene;
use std::time::Duration;

/// Options for creating a [`Session`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionOpts {
    /// Renderer settings (clear color and layer styles).
    pub render: RenderSettings,
}

/// Counters collected while driving frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames produced.
    pub frames: u64,
    /// Markers drawn across all frames.
    pub markers: u64,
    /// Frames that had nothing to draw.
    pub empty_frames: u64,
}

impl RenderStats {
    fn record(&mut self, samples: &SampleSet) {
        self.frames += 1;
        self.markers += samples.len() as u64;
        if samples.is_empty() {
            self.empty_frames += 1;
        }
    }
}

/// Owns everything needed to turn a [`Scene`] into frames.
///
/// The path geometry and animation state are fixed when the session is created; only the
/// renderer's marker layer changes from frame to frame.
pub struct Session {
    geometry: PathGeometry,
    state: AnimationState,
    sample_count: usize,
    fps: Fps,
    canvas: Canvas,
    renderer: Renderer,
}

impl Session {
    /// Validate `scene`, build its geometry and rasterize the static outline.
    #[tracing::instrument(skip(scene, opts))]
    pub fn new(scene: &Scene, opts: SessionOpts) -> PathflowResult<Self> {
        scene.validate()?;
        let geometry = scene.geometry()?;
        let state = AnimationState::new(Duration::ZERO, scene.speed)?;
        let renderer = Renderer::new(&geometry, scene.canvas, opts.render)?;

        tracing::info!(
            total_length = geometry.total_length(),
            start = ?geometry.start(),
            end = ?geometry.end(),
            control_points = geometry.control_points().len(),
            "path geometry ready"
        );

        Ok(Self {
            geometry,
            state,
            sample_count: scene.sample_count,
            fps: scene.fps,
            canvas: scene.canvas,
            renderer,
        })
    }

    /// The path markers travel along.
    pub fn geometry(&self) -> &PathGeometry {
        &self.geometry
    }

    /// Start time and speed used for offline frames.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Markers sampled per frame.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Frame rate of offline renders.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Output surface size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Timeline time of frame `idx`.
    pub fn frame_time(&self, idx: FrameIndex) -> Duration {
        self.fps.frames_to_duration(idx.0)
    }

    /// Samples for frame `idx`, without drawing.
    pub fn frame_samples(&self, idx: FrameIndex) -> SampleSet {
        frame_samples(
            &self.geometry,
            &self.state,
            self.sample_count,
            self.frame_time(idx),
        )
    }

    /// Render a single frame.
    #[tracing::instrument(skip(self))]
    pub fn render_frame(&mut self, idx: FrameIndex) -> PathflowResult<FrameRGBA> {
        let samples = self.frame_samples(idx);
        self.renderer.render(&samples.points)
    }

    /// Render every frame of `range` into `sink`, in order.
    #[tracing::instrument(skip(self, sink))]
    pub fn render_range(
        &mut self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
    ) -> PathflowResult<RenderStats> {
        let background = self.renderer.background().unwrap_or(Rgba8Premul::WHITE);
        sink.begin(SinkConfig::new(self.canvas, self.fps).with_background(background))?;
        let mut scheduler = FixedRateScheduler::new(self.fps, range);
        let state = self.state;
        let stats = self.drive(state, &mut scheduler, |tick, frame| {
            sink.push_frame(tick.index, frame)
        })?;
        sink.end()?;
        tracing::info!(
            frames = stats.frames,
            markers = stats.markers,
            "render range finished"
        );
        Ok(stats)
    }

    /// Run in wall-clock time until `scheduler` stops, handing each frame to `on_frame`.
    ///
    /// The animation starts at the scheduler clock's current reading.
    pub fn run_live<F>(
        &mut self,
        scheduler: &mut RealtimeScheduler,
        on_frame: F,
    ) -> PathflowResult<RenderStats>
    where
        F: FnMut(FrameTick, &FrameRGBA) -> PathflowResult<()>,
    {
        let state = AnimationState::new(scheduler.clock().now(), self.state.speed())?;
        self.drive(state, scheduler, on_frame)
    }

    fn drive<F>(
        &mut self,
        state: AnimationState,
        scheduler: &mut dyn FrameScheduler,
        mut on_frame: F,
    ) -> PathflowResult<RenderStats>
    where
        F: FnMut(FrameTick, &FrameRGBA) -> PathflowResult<()>,
    {
        let mut stats = RenderStats::default();
        let renderer = &mut self.renderer;
        let mut animation = AnimationLoop::new(&self.geometry, state, self.sample_count);
        animation.run(scheduler, |tick, samples| {
            let frame = renderer.render(&samples.points)?;
            stats.record(samples);
            on_frame(tick, &frame)
        })?;
        Ok(stats)
    }
}
