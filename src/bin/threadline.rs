use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use threadline::{
    ArtResult, CpuBackend, CpuBackendOpts, CropBox, DragInput, FrameClock, PlaybackState,
    SceneBackend, SvgBackend, UiEvent, Visualizer, VisualizerConfig, WheelInput,
};

#[derive(Parser, Debug)]
#[command(name = "threadline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as PNG (or SVG when `--out` ends in `.svg`).
    Frame(FrameArgs),
    /// Render the whole animation as a numbered PNG sequence.
    Play(PlayArgs),
    /// Crop an image to a square PNG.
    Crop(CropArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Input string-art result JSON (`{"nails": [...], "path": [...]}`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Visualizer config JSON; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reveal step per tick (1-50).
    #[arg(long)]
    step: Option<usize>,

    /// Draw nail index labels.
    #[arg(long)]
    labels: bool,

    /// Hide nail markers.
    #[arg(long)]
    no_nails: bool,

    /// Hide the dashed board boundary.
    #[arg(long)]
    no_boundary: bool,

    /// Font file used for labels and the progress readout in PNG output.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output path (`.svg` for SVG, anything else for PNG).
    #[arg(long)]
    out: PathBuf,

    /// Number of playback ticks to run after start.
    #[arg(long, default_value_t = 0, conflicts_with = "all")]
    ticks: usize,

    /// Reveal the whole path.
    #[arg(long)]
    all: bool,

    /// Wheel notches to zoom by (positive zooms in).
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    zoom: i32,

    /// Zoom anchor in surface pixels, `X,Y` (defaults to the stage center).
    #[arg(long, value_parser = parse_pair)]
    pointer: Option<(f64, f64)>,

    /// Pan offset in surface pixels, `DX,DY`.
    #[arg(long, value_parser = parse_pair, allow_hyphen_values = true)]
    pan: Option<(f64, f64)>,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output directory for `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out_dir: PathBuf,

    /// Write one frame every N ticks (the final frame is always written).
    #[arg(long, default_value_t = 1)]
    every: usize,
}

#[derive(Args, Debug)]
struct CropArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Left edge; requires `--y` and `--size`. Defaults to the centered square.
    #[arg(long, requires_all = ["y", "size"])]
    x: Option<u32>,

    /// Top edge.
    #[arg(long, requires_all = ["x", "size"])]
    y: Option<u32>,

    /// Edge length.
    #[arg(long, requires_all = ["x", "y"])]
    size: Option<u32>,
}

fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `A,B`, got '{s}'"))?;
    let a = a.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let b = b.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok((a, b))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
        Command::Crop(args) => cmd_crop(args),
    }
}

fn read_result_json(path: &Path) -> anyhow::Result<ArtResult> {
    let f = File::open(path).with_context(|| format!("open result '{}'", path.display()))?;
    let result = ArtResult::from_reader(BufReader::new(f))
        .with_context(|| format!("parse result JSON '{}'", path.display()))?;
    Ok(result)
}

fn build_visualizer(args: &SceneArgs) -> anyhow::Result<Visualizer<FrameClock>> {
    let mut cfg = match &args.config {
        Some(p) => VisualizerConfig::from_path(p)?,
        None => VisualizerConfig::default(),
    };
    if let Some(step) = args.step {
        cfg.step = step;
    }
    cfg.show_labels |= args.labels;
    cfg.show_nails &= !args.no_nails;
    cfg.show_boundary &= !args.no_boundary;

    let mut vis = Visualizer::with_config(&cfg, FrameClock::new())?;
    vis.load(read_result_json(&args.in_path)?);
    Ok(vis)
}

fn make_cpu_backend(font: Option<&Path>) -> anyhow::Result<CpuBackend> {
    let opts = match font {
        Some(p) => CpuBackendOpts::default().with_font_path(p)?,
        None => CpuBackendOpts::default(),
    };
    Ok(CpuBackend::new(opts)?)
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut vis = build_visualizer(&args.scene)?;

    if args.all {
        vis.handle(UiEvent::ShowAll);
    } else if args.ticks > 0 {
        vis.handle(UiEvent::Start);
        for _ in 0..args.ticks {
            if vis.advance(std::time::Duration::ZERO) == 0 {
                break;
            }
        }
    }

    if let Some((dx, dy)) = args.pan {
        vis.handle(UiEvent::Drag(DragInput {
            delta_x: dx,
            delta_y: dy,
        }));
    }
    let stage = vis.mapping().stage();
    let (px, py) = args
        .pointer
        .unwrap_or((stage.width / 2.0, stage.height / 2.0));
    for _ in 0..args.zoom.unsigned_abs() {
        vis.handle(UiEvent::Wheel(WheelInput {
            pointer_x: px,
            pointer_y: py,
            delta_y: -f64::from(args.zoom.signum()),
        }));
    }

    let scene = vis.render();
    tracing::info!(
        reveal = vis.reveal(),
        segments = scene.stats.segments_drawn,
        skipped = scene.stats.segments_skipped,
        "frame composed"
    );

    if is_svg(&args.out) {
        let svg = SvgBackend::default().render_scene(&scene)?;
        ensure_parent_dir(&args.out)?;
        std::fs::write(&args.out, svg)
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    } else {
        let mut backend = make_cpu_backend(args.scene.font.as_deref())?;
        let frame = backend.render_scene(&scene)?;
        frame.save_png(&args.out)?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut vis = build_visualizer(&args.scene)?;
    let mut backend = make_cpu_backend(args.scene.font.as_deref())?;
    let every = args.every.max(1);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut written = 0usize;
    let mut write = |vis: &mut Visualizer<FrameClock>| -> anyhow::Result<()> {
        let frame = backend.render_scene(&vis.render())?;
        frame.save_png(&args.out_dir.join(format!("frame_{written:05}.png")))?;
        written += 1;
        Ok(())
    };

    vis.handle(UiEvent::Start);
    write(&mut vis)?;
    let mut ticks = 0usize;
    while vis.state() == PlaybackState::Animating {
        vis.advance(std::time::Duration::ZERO);
        ticks += 1;
        if ticks % every == 0 || vis.state() != PlaybackState::Animating {
            write(&mut vis)?;
        }
    }
    drop(write);

    eprintln!(
        "wrote {written} frames ({ticks} ticks) to {}",
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_crop(args: CropArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let region = match (args.x, args.y, args.size) {
        (Some(x), Some(y), Some(size)) => CropBox { x, y, size },
        _ => {
            let (w, h) = image::image_dimensions(&args.in_path)
                .with_context(|| format!("probe image '{}'", args.in_path.display()))?;
            CropBox::centered(w, h)
        }
    };
    let png = threadline::crop_square(&bytes, region)?;
    ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, png).with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
