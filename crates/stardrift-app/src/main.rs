//! The `stardrift` binary: renders the particle field headlessly and writes
//! PNG captures.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use stardrift_app::{AppError, HeadlessOptions, PlatformDirs, ResizeScript, run_headless};
use stardrift_config::{CliArgs, Config};

/// Render a drifting star field without a window.
#[derive(Parser, Debug)]
#[command(name = "stardrift", version, about = "Headless Stardrift renderer")]
struct DemoArgs {
    #[command(flatten)]
    overrides: CliArgs,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// Directory for PNG captures.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Capture every n-th frame.
    #[arg(long, default_value_t = 30)]
    every: u32,

    /// Replay a drag-resize to WIDTHxHEIGHT halfway through the run.
    #[arg(long, value_parser = parse_size)]
    resize_to: Option<(u32, u32)>,

    /// Print final frame statistics as JSON.
    #[arg(long)]
    stats: bool,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{s}`"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid dimension `{v}`: {e}"))
    };
    Ok((parse(w)?, parse(h)?))
}

fn main() -> ExitCode {
    let args = DemoArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("stardrift: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &DemoArgs) -> Result<(), AppError> {
    let dirs = match &args.overrides.config {
        Some(root) => PlatformDirs::resolve_with_root(root),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(&args.overrides);
    config.validate()?;

    stardrift_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    tracing::info!(
        "Config from {}, logs in {}",
        dirs.config_dir.display(),
        dirs.log_dir.display()
    );

    let frame_ms = 1000.0 / f64::from(config.host.target_fps);
    let options = HeadlessOptions {
        frames: args.frames,
        output_dir: args.out.clone(),
        capture_every: args.every,
        resize: args.resize_to.map(|(width, height)| ResizeScript {
            width,
            height,
            start_ms: f64::from(args.frames / 2) * frame_ms,
            events: 10,
            spacing_ms: frame_ms,
        }),
    };

    let stats = run_headless(&config, &options)?;
    if args.stats {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }
    Ok(())
}
