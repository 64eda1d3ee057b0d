use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pathflow", version)]
struct Cli {
    /// Log per-frame debug events to stderr.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print path length, endpoints and the first frame's samples as JSON.
    Inspect(InspectArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a range of frames as a PNG sequence.
    Frames(FramesArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Run in wall-clock time, rewriting one PNG every frame.
    Live(LiveArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Background color as `r,g,b,a` (transparent when omitted).
    #[arg(long, value_parser = parse_rgba)]
    background: Option<[u8; 4]>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive); defaults to the scene duration.
    #[arg(long)]
    end: Option<u64>,

    /// Background color as `r,g,b,a` (transparent when omitted).
    #[arg(long, value_parser = parse_rgba)]
    background: Option<[u8; 4]>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Replace the output file if it already exists.
    #[arg(long)]
    overwrite: bool,

    /// Background color the frames are flattened over, as `r,g,b,a`.
    #[arg(long, value_parser = parse_rgba, default_value = "255,255,255,255")]
    background: [u8; 4],
}

#[derive(Parser, Debug)]
struct LiveArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// PNG rewritten with the latest frame.
    #[arg(long)]
    out: PathBuf,

    /// Stop after this many seconds (runs until killed when omitted).
    #[arg(long)]
    seconds: Option<f64>,

    /// Background color as `r,g,b,a` (transparent when omitted).
    #[arg(long, value_parser = parse_rgba)]
    background: Option<[u8; 4]>,
}

#[derive(serde::Serialize)]
struct Inspection {
    total_length: f64,
    start: pathflow::Point,
    end: pathflow::Point,
    control_points: usize,
    sample_count: usize,
    step: Option<f64>,
    frame0: pathflow::SampleSet,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
        Command::Live(args) => cmd_live(args),
    }
}

fn open_session(
    in_path: &Path,
    background: Option<[u8; 4]>,
) -> anyhow::Result<(pathflow::Scene, pathflow::Session)> {
    let scene = pathflow::Scene::from_path(in_path)
        .with_context(|| format!("load scene '{}'", in_path.display()))?;
    let opts = pathflow::SessionOpts {
        render: pathflow::RenderSettings {
            clear_rgba: background,
            ..Default::default()
        },
    };
    let session = pathflow::Session::new(&scene, opts)?;
    Ok((scene, session))
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let (scene, session) = open_session(&args.in_path, None)?;
    let geometry = session.geometry();
    let frame0 = session.frame_samples(pathflow::FrameIndex(0));
    let step = pathflow::sample::sampler::step_length(geometry, scene.sample_count);

    let report = Inspection {
        total_length: geometry.total_length(),
        start: geometry.start(),
        end: geometry.end(),
        control_points: geometry.control_points().len(),
        sample_count: scene.sample_count,
        step,
        frame0,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (_, mut session) = open_session(&args.in_path, args.background)?;
    let frame = session.render_frame(pathflow::FrameIndex(args.frame))?;
    pathflow::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let (scene, mut session) = open_session(&args.in_path, args.background)?;
    let end = args.end.unwrap_or(scene.duration);
    let range = pathflow::FrameRange::new(
        pathflow::FrameIndex(args.start),
        pathflow::FrameIndex(end),
    )?;

    let mut sink = pathflow::PngSequenceSink::new(&args.out_dir);
    let stats = session.render_range(range, &mut sink)?;

    eprintln!("wrote {} frames to {}", stats.frames, args.out_dir.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (scene, mut session) = open_session(&args.in_path, Some(args.background))?;

    let sink_opts = pathflow::FfmpegSinkOpts::new(&args.out).overwrite(args.overwrite);
    let mut sink = pathflow::FfmpegSink::new(sink_opts);
    let _stats = session.render_range(scene.frame_range(), &mut sink)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_live(args: LiveArgs) -> anyhow::Result<()> {
    let (scene, mut session) = open_session(&args.in_path, args.background)?;
    let limit = match args.seconds {
        Some(s) if s.is_finite() && s >= 0.0 => Some(Duration::from_secs_f64(s)),
        Some(s) => anyhow::bail!("--seconds must be a finite, non-negative number (got {s})"),
        None => None,
    };

    let mut scheduler = pathflow::RealtimeScheduler::new(scene.fps).with_limit(limit);
    let out = args.out.clone();
    let stats = session.run_live(&mut scheduler, |_, frame| pathflow::write_png(&out, frame))?;

    eprintln!("ran {} frames, last written to {}", stats.frames, args.out.display());
    Ok(())
}

fn parse_rgba(s: &str) -> Result<[u8; 4], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [r, g, b, a] = parts.as_slice() else {
        return Err(format!("expected `r,g,b,a`, got '{s}'"));
    };
    let channel = |c: &str| {
        c.parse::<u8>()
            .map_err(|e| format!("invalid color channel '{c}': {e}"))
    };
    Ok([channel(*r)?, channel(*g)?, channel(*b)?, channel(*a)?])
}
