use crate::encode::sink::{FrameOrder, FrameSink, SinkConfig, ensure_parent_dir};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PathflowError, PathflowResult};
use crate::render::composite;
use crate::render::surface::FrameRGBA;
use std::ffi::OsString;
use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

/// Where [`FfmpegSink`] writes its MP4.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output file.
    pub out_path: PathBuf,
    /// Replace `out_path` when it exists instead of failing.
    pub overwrite: bool,
}

impl FfmpegSinkOpts {
    /// Write to `out_path`, refusing to replace an existing file.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: false,
        }
    }

    /// Set whether an existing output is replaced.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Command line for an ffmpeg that reads opaque RGBA frames of `cfg` on stdin and writes
/// H.264 `yuv420p` to `out`.
pub fn ffmpeg_args(cfg: &SinkConfig, out: &Path, overwrite: bool) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![if overwrite { "-y" } else { "-n" }.into()];
    args.extend(
        [
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
        ]
        .map(OsString::from),
    );
    // rawvideo has no header, so size and rate go before `-i`.
    args.push("-s".into());
    args.push(cfg.canvas.to_string().into());
    args.push("-r".into());
    args.push(cfg.fps.to_string().into());
    args.extend(
        [
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]
        .map(OsString::from),
    );
    args.push(out.as_os_str().to_owned());
    args
}

/// A running ffmpeg process.
///
/// stderr is read on its own thread so a chatty encoder cannot fill the pipe and stall.
struct Encoder {
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
}

impl Encoder {
    fn spawn(args: &[OsString]) -> PathflowResult<Self> {
        let mut child = Command::new("ffmpeg")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| PathflowError::encode(format!("failed to spawn ffmpeg: {e}")))?;
        let (Some(stdin), Some(mut stderr)) = (child.stdin.take(), child.stderr.take()) else {
            return Err(PathflowError::encode("ffmpeg started without piped stdio"));
        };
        let stderr = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    fn write_frame(&mut self, rgba: &[u8]) -> PathflowResult<()> {
        self.stdin
            .write_all(rgba)
            .map_err(|e| PathflowError::encode(format!("ffmpeg stopped reading frames: {e}")))
    }

    /// Close stdin and wait for the file to be finalized.
    fn finish(self) -> PathflowResult<()> {
        let Self {
            mut child,
            stdin,
            stderr,
        } = self;
        drop(stdin);
        let status = child
            .wait()
            .map_err(|e| PathflowError::encode(format!("waiting for ffmpeg failed: {e}")))?;
        let log = stderr
            .join()
            .map_err(|_| PathflowError::encode("ffmpeg stderr reader panicked"))?
            .map_err(|e| PathflowError::encode(format!("reading ffmpeg stderr failed: {e}")))?;
        if !status.success() {
            return Err(PathflowError::encode(format!(
                "ffmpeg exited with {status}: {}",
                String::from_utf8_lossy(&log).trim()
            )));
        }
        Ok(())
    }
}

/// Streams frames into a system `ffmpeg`, producing an MP4.
///
/// MP4 has no alpha, so each frame is flattened over [`SinkConfig::background`] first.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    order: FrameOrder,
    encoder: Option<Encoder>,
    scratch: Vec<u8>,
}

impl FfmpegSink {
    /// Sink that starts ffmpeg on `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            order: FrameOrder::default(),
            encoder: None,
            scratch: Vec::new(),
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> PathflowResult<()> {
        if self.encoder.is_some() {
            return Err(PathflowError::encode("ffmpeg sink is already running"));
        }
        cfg.canvas.to_u16()?;
        if !cfg.canvas.is_even() {
            return Err(PathflowError::validation(format!(
                "mp4 output needs even canvas sides for yuv420p, got {}",
                cfg.canvas
            )));
        }

        let out = &self.opts.out_path;
        ensure_parent_dir(out)?;
        if !self.opts.overwrite && out.exists() {
            return Err(PathflowError::validation(format!(
                "output file '{}' already exists",
                out.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(PathflowError::encode(
                "mp4 output needs ffmpeg, which was not found on PATH",
            ));
        }

        let encoder = Encoder::spawn(&ffmpeg_args(&cfg, out, self.opts.overwrite))?;
        tracing::info!(
            out = %out.display(),
            canvas = %cfg.canvas,
            fps = %cfg.fps,
            "ffmpeg started"
        );
        self.scratch = vec![0; cfg.canvas.rgba8_len()];
        self.encoder = Some(encoder);
        self.order.start(cfg);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PathflowResult<()> {
        let cfg = self.order.admit("ffmpeg", idx, frame)?;
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(PathflowError::encode("ffmpeg sink is not running"));
        };
        composite::flatten_into(&mut self.scratch, &frame.data, cfg.background)?;
        encoder.write_frame(&self.scratch)?;
        tracing::debug!(frame = idx.0, piped = self.order.admitted(), "mp4 frame piped");
        Ok(())
    }

    fn end(&mut self) -> PathflowResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| PathflowError::encode("ffmpeg sink ended before begin"))?;
        self.order.finish();
        encoder.finish()?;
        tracing::info!(
            frames = self.order.admitted(),
            out = %self.opts.out_path.display(),
            "mp4 finished"
        );
        Ok(())
    }
}

/// `true` when `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}
