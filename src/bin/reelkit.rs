use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "reelkit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate a storyboard.
    Check(CheckArgs),
    /// Simulate a playback session and print one JSON tick per frame.
    Preview(PreviewArgs),
    /// Print per-character curve offsets for a word as JSON.
    Curve(CurveArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Simulated host frame rate.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Override the hold time after the last scene.
    #[arg(long)]
    end_buffer_ms: Option<f64>,
}

#[derive(Parser, Debug)]
struct CurveArgs {
    /// Word to curve.
    #[arg(long)]
    word: String,

    /// Curve amount; negative values bend the other way.
    #[arg(long, allow_hyphen_values = true)]
    amount: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Curve(args) => cmd_curve(args),
    }
}

fn read_storyboard(path: &Path) -> anyhow::Result<reelkit::Storyboard> {
    let board = reelkit::Storyboard::from_path(path)
        .with_context(|| format!("load storyboard '{}'", path.display()))?;
    board.validate()?;
    Ok(board)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let board = read_storyboard(&args.in_path)?;
    let total = reelkit::total_duration_s(&board.scenes);
    println!("scenes: {}", board.scenes.len());
    println!("total_duration_s: {total}");
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    if !args.fps.is_finite() || args.fps <= 0.0 {
        anyhow::bail!("fps must be finite and > 0");
    }
    let mut board = read_storyboard(&args.in_path)?;
    if let Some(ms) = args.end_buffer_ms {
        board.config.playback.end_buffer_ms = ms;
    }

    let mut editor = reelkit::Editor::from_storyboard(board, reelkit::ManualFrameHost::new())?;
    let frame_ms = 1000.0 / args.fps;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut emit = |tick: &reelkit::Tick| -> anyhow::Result<()> {
        serde_json::to_writer(&mut out, tick).context("serialize tick")?;
        writeln!(out).context("write tick")?;
        Ok(())
    };

    let Some(first) = editor.start_playback(0.0) else {
        anyhow::bail!("storyboard has nothing to play");
    };
    emit(&first)?;

    let mut frame = 0u64;
    loop {
        let pending = editor.host_mut().take_pending();
        let Some(&request) = pending.first() else {
            break;
        };
        frame += 1;
        let Some(tick) = editor.on_frame(request, frame as f64 * frame_ms) else {
            break;
        };
        emit(&tick)?;
        if tick.finished {
            break;
        }
    }

    tracing::info!(frames = frame, "preview finished");
    Ok(())
}

fn cmd_curve(args: CurveArgs) -> anyhow::Result<()> {
    let offsets = reelkit::curve(&args.word, args.amount);
    let json = serde_json::to_string_pretty(offsets.as_slice()).context("serialize offsets")?;
    println!("{json}");
    Ok(())
}
