//! Configuration system for Stardrift.
//!
//! Provides the particle field options, runtime settings that persist to disk
//! as RON files, CLI overrides via clap, hot-reload detection, and validation
//! that rejects degenerate settings before any particle is generated.

mod cli;
mod color;
mod config;
mod error;
mod field;

pub use cli::CliArgs;
pub use color::{Rgb, Rgba};
pub use config::{Config, DebugConfig, HostConfig, WindowConfig};
pub use error::ConfigError;
pub use field::{
    CountRange, FieldConfig, LightBeam, MotionConfig, NebulaSettings, OverlayConfig, Palette,
    Range, StarLayer, StarSpeed, TwinkleConfig, Vignette,
};
