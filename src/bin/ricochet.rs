use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use ricochet::{
    Fps, FrameBudget, FrameSink, InputSource, LabelSource, LoadOpts,
    NoInput, NullSink, PngSequenceSink, Rgb8, Scene, SceneDescription, SceneLimits, Simulation,
    SimulationOpts, SoftwareSurface,
};

#[derive(Parser, Debug)]
#[command(name = "ricochet", version)]
struct Cli {
    /// Log at DEBUG level.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a scene and run the bounce loop headlessly.
    Run(RunArgs),
    /// Parse a scene description and print it as JSON.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input scene description.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Stop after this many frames (default: run until interrupted).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    frames: Option<u64>,

    /// Target frames per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Write every presented frame as a PNG into this directory.
    #[arg(long)]
    png_dir: Option<PathBuf>,

    /// Label font, overriding the scene's `Font` directive.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Label size in pixels when `--font` is given.
    #[arg(long, default_value_t = 24.0)]
    font_size: f32,

    /// Render as fast as possible instead of holding the frame rate.
    #[arg(long)]
    no_pacing: bool,

    /// Circle capacity.
    #[arg(long, default_value_t = 100)]
    max_circles: usize,

    /// Rectangle capacity.
    #[arg(long, default_value_t = 100)]
    max_rectangles: usize,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input scene description.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_tracing(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else if cli.quiet {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let labels = match &args.font {
        Some(path) => LabelSource::Font {
            path: path.clone(),
            size_px: args.font_size,
            color: Rgb8::WHITE,
        },
        None => LabelSource::SceneOrBlocks,
    };
    let opts = LoadOpts {
        limits: SceneLimits {
            max_circles: args.max_circles,
            max_rectangles: args.max_rectangles,
        },
        labels,
    };
    let scene = Scene::load_path(&args.in_path, &opts)
        .with_context(|| format!("load scene '{}'", args.in_path.display()))?;

    let fps = Fps::new(args.fps, 1)?;
    let sink: Box<dyn FrameSink> = match &args.png_dir {
        Some(dir) => Box::new(PngSequenceSink::new(dir)),
        None => Box::new(NullSink::new()),
    };
    let mut surface = SoftwareSurface::new(scene.canvas, fps, sink)?;

    let mut input: Box<dyn InputSource> = match args.frames {
        Some(n) => Box::new(FrameBudget::frames(n)),
        None => Box::new(NoInput),
    };
    let mut sim = Simulation::with_system_clock(
        scene,
        SimulationOpts {
            fps,
            pacing: !args.no_pacing,
        },
    );
    let stats = sim.run(input.as_mut(), &mut surface)?;
    surface.finish().context("finish output")?;

    if let Some(dir) = &args.png_dir {
        eprintln!("wrote {} frames to {}", stats.frames, dir.display());
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let src = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read scene '{}'", args.in_path.display()))?;
    let desc = SceneDescription::parse(&src)
        .with_context(|| format!("parse scene '{}'", args.in_path.display()))?;
    let json = serde_json::to_string_pretty(&desc).context("serialize scene")?;
    println!("{json}");
    Ok(())
}
