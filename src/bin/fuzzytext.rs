use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fuzzytext", version)]
struct Cli {
    /// Log verbosity on stderr (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the frame visible at a point in time as a PNG.
    Frame(FrameArgs),
    /// Render the whole scenario as an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the resolved layout, motion profile, and font as JSON.
    Inspect(InspectArgs),
    /// Convert every PNG under a directory to a lossless WebP sibling.
    ConvertImages(ConvertArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Time in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    time_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Overwrite output if it already exists.
    #[arg(long, default_value_t = true)]
    overwrite: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Root directory to scan.
    #[arg(long, default_value = "public/images")]
    dir: PathBuf,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::ConvertImages(args) => cmd_convert(args),
    }
}

fn load(path: &std::path::Path) -> anyhow::Result<(fuzzytext::Scenario, fuzzytext::VelloTextBackend)> {
    let scenario = fuzzytext::Scenario::from_path(path)
        .with_context(|| format!("load scenario '{}'", path.display()))?;
    scenario.validate()?;
    let backend = scenario.text_backend()?;
    Ok((scenario, backend))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (scenario, mut backend) = load(&args.in_path)?;
    let frame = fuzzytext::render_frame_at(&scenario, args.time_ms, &mut backend)?;
    frame
        .save_png(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (scenario, mut backend) = load(&args.in_path)?;
    fuzzytext::render_to_mp4(
        &scenario,
        fuzzytext::RenderToMp4Opts {
            out_path: args.out.clone(),
            overwrite: args.overwrite,
        },
        &mut backend,
    )?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let (scenario, mut backend) = load(&args.in_path)?;
    let report = fuzzytext::inspect(&scenario, &mut backend)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize inspect report")?
    );
    Ok(())
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    eprintln!("converting PNG images under {} to WebP", args.dir.display());
    let converted = fuzzytext::convert_png_tree(&args.dir)?;
    for c in &converted {
        eprintln!(
            "{} -> {} ({:.1}% smaller)",
            c.input.display(),
            c.output.display(),
            c.savings_percent()
        );
    }
    eprintln!("done: {} file(s)", converted.len());
    Ok(())
}
