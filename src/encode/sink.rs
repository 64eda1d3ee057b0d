use crate::foundation::core::{Canvas, Fps, FrameIndex, Rgba8Premul};
use crate::foundation::error::{PathflowError, PathflowResult};
use crate::render::surface::FrameRGBA;
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// What a sink learns about a render before its first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Size every pushed frame has.
    pub canvas: Canvas,
    /// Playback rate of the frames.
    pub fps: Fps,
    /// Color to flatten translucent pixels over, for outputs without alpha.
    pub background: Rgba8Premul,
}

impl SinkConfig {
    /// Frames of `canvas` size at `fps`, flattened over white.
    pub fn new(canvas: Canvas, fps: Fps) -> Self {
        Self {
            canvas,
            fps,
            background: Rgba8Premul::WHITE,
        }
    }

    /// Replace the flattening background.
    pub fn with_background(mut self, background: Rgba8Premul) -> Self {
        self.background = background;
        self
    }
}

/// Consumer of rendered frames.
///
/// `begin` comes first, then `push_frame` with strictly increasing indices, then `end`.
pub trait FrameSink {
    /// Prepare for frames described by `cfg`.
    fn begin(&mut self, cfg: SinkConfig) -> PathflowResult<()>;
    /// Accept the frame at `idx`.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PathflowResult<()>;
    /// Flush and close the output.
    fn end(&mut self) -> PathflowResult<()>;
}

/// Checks a sink's frames arrive after `begin`, in order, and at the configured size.
#[derive(Debug, Default)]
pub(crate) struct FrameOrder {
    cfg: Option<SinkConfig>,
    last: Option<FrameIndex>,
    admitted: u64,
}

impl FrameOrder {
    pub(crate) fn start(&mut self, cfg: SinkConfig) {
        *self = Self {
            cfg: Some(cfg),
            ..Self::default()
        };
    }

    /// Configuration of the running output, once `idx` and `frame` pass every check.
    pub(crate) fn admit(
        &mut self,
        sink: &str,
        idx: FrameIndex,
        frame: &FrameRGBA,
    ) -> PathflowResult<SinkConfig> {
        let Some(cfg) = self.cfg else {
            return Err(PathflowError::encode(format!(
                "{sink} sink got frame {} before begin",
                idx.0
            )));
        };
        if let Some(last) = self.last
            && idx <= last
        {
            return Err(PathflowError::encode(format!(
                "{sink} sink got frame {} after frame {}",
                idx.0, last.0
            )));
        }
        if frame.canvas() != cfg.canvas {
            return Err(PathflowError::validation(format!(
                "{sink} sink got a {} frame, expected {}",
                frame.canvas(),
                cfg.canvas
            )));
        }
        self.last = Some(idx);
        self.admitted += 1;
        Ok(cfg)
    }

    pub(crate) fn admitted(&self) -> u64 {
        self.admitted
    }

    /// Close the output; `None` when it was never started.
    pub(crate) fn finish(&mut self) -> Option<SinkConfig> {
        self.last = None;
        self.cfg.take()
    }
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    order: FrameOrder,
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration passed to the last `begin`.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Frames received since the last `begin`, in order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` has been called since the last `begin`.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> PathflowResult<()> {
        self.order.start(cfg);
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PathflowResult<()> {
        self.order.admit("in-memory", idx, frame)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> PathflowResult<()> {
        self.order.finish();
        self.ended = true;
        Ok(())
    }
}

/// Writes `frame_NNNNN.png` files into one directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    order: FrameOrder,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing into `dir`, which `begin` creates.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            order: FrameOrder::default(),
            written: Vec::new(),
        }
    }

    /// File name of frame `idx`.
    pub fn file_name(idx: FrameIndex) -> String {
        format!("frame_{:05}.png", idx.0)
    }

    /// Files written since the last `begin`.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> PathflowResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frame directory '{}'", self.dir.display()))?;
        self.order.start(cfg);
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PathflowResult<()> {
        self.order.admit("png", idx, frame)?;
        let path = self.dir.join(Self::file_name(idx));
        write_png(&path, frame)?;
        tracing::debug!(frame = idx.0, path = %path.display(), "png frame written");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> PathflowResult<()> {
        self.order.finish();
        tracing::info!(
            frames = self.written.len(),
            dir = %self.dir.display(),
            "png sequence finished"
        );
        Ok(())
    }
}

/// Save `frame` as a straight-alpha RGBA8 PNG, creating parent directories.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> PathflowResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Create the directory `path` lives in, if it has one.
pub fn ensure_parent_dir(path: &Path) -> PathflowResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
