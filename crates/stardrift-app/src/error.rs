//! Application error types.

use stardrift_config::ConfigError;
use stardrift_render::RenderError;

use crate::platform::PlatformError;

/// Errors that stop the host before or while animating.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Exporting a rendered frame failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// No drawable surface was supplied at startup.
    #[error("no drawable surface is available")]
    SurfaceUnavailable,

    /// Platform directories could not be resolved or created.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Frame statistics could not be serialized.
    #[error("failed to serialize frame statistics: {0}")]
    Stats(#[from] serde_json::Error),
}
