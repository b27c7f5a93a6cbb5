use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use whiteboard::{Canvas, EngineConfig, Fps, PreparedScene, SceneInput, Strategy};

#[derive(Parser, Debug)]
#[command(name = "whiteboard", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the plan summary and schedule of a scene as JSON.
    Plan(PlanArgs),
    /// Print the reveal snapshot of one frame as JSON.
    Frame(FrameArgs),
    /// Convert an SVG document into a scene JSON.
    ImportSvg(ImportSvgArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
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
}

#[derive(Parser, Debug)]
struct ImportSvgArgs {
    /// Input SVG document.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output scene JSON. Prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Frames available for drawing.
    #[arg(long, default_value_t = 150)]
    budget_frames: u64,

    /// Drawing order: sequential, parallel or balanced.
    #[arg(long, default_value = "sequential")]
    strategy: Strategy,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Frame(args) => cmd_frame(args),
        Command::ImportSvg(args) => cmd_import_svg(args),
    }
}

fn prepare(path: &Path) -> anyhow::Result<PreparedScene> {
    let input = SceneInput::from_path(path)?;
    let prepared = PreparedScene::prepare(&input)
        .with_context(|| format!("prepare scene '{}'", path.display()))?;
    if !prepared.status().has_content() {
        eprintln!("scene has no content: {:?}", prepared.status());
    }
    Ok(prepared)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("encode JSON output")?;
    println!("{s}");
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let prepared = prepare(&args.in_path)?;
    print_json(&serde_json::json!({
        "summary": prepared.summary(),
        "schedule": prepared.schedule(),
    }))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let prepared = prepare(&args.in_path)?;
    print_json(&prepared.sample(args.frame))
}

fn cmd_import_svg(args: ImportSvgArgs) -> anyhow::Result<()> {
    let data = std::fs::read(&args.in_path)
        .with_context(|| format!("read svg '{}'", args.in_path.display()))?;
    let import = whiteboard::import_svg(&data)?;

    let input = SceneInput {
        canvas: Canvas {
            width: args.width,
            height: args.height,
        },
        fps: Fps::new(args.fps, 1)?,
        draw_budget_frames: args.budget_frames,
        strategy: args.strategy,
        source_size: Some(import.size),
        shapes: import.shapes,
        config: EngineConfig::default(),
    };
    input.validate()?;

    let json = serde_json::to_string_pretty(&input).context("encode scene JSON")?;
    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json)
                .with_context(|| format!("write scene '{}'", out.display()))?;
            eprintln!("wrote {} ({} shapes)", out.display(), input.shapes.len());
        }
        None => println!("{json}"),
    }
    Ok(())
}
