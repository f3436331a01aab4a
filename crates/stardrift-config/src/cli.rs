//! Command-line argument parsing for Stardrift.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Stardrift configuration overrides.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "stardrift", about = "Stardrift particle field")]
pub struct CliArgs {
    /// Viewport width in logical pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height in logical pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Device pixel ratio.
    #[arg(long)]
    pub pixel_ratio: Option<f64>,

    /// Particle generation seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Velocity multiplier.
    #[arg(long)]
    pub speed_scale: Option<f32>,

    /// Resize debounce window in milliseconds.
    #[arg(long)]
    pub debounce_ms: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ratio) = args.pixel_ratio {
            self.window.pixel_ratio = ratio;
        }
        if let Some(seed) = args.seed {
            self.field.seed = seed;
        }
        if let Some(scale) = args.speed_scale {
            self.field.motion.speed_scale = scale;
        }
        if let Some(ms) = args.debounce_ms {
            self.host.resize_debounce_ms = ms;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
