//! Stardrift host driver.
//!
//! Connects a [`stardrift_field::ParticleField`] to host callbacks: frame
//! scheduling, debounced resizes, and a drawing surface. Also provides a
//! headless host used by the `stardrift` binary.

pub mod animator;
pub mod debounce;
pub mod error;
pub mod headless;
pub mod host;
pub mod platform;

pub use animator::{Animator, FPS_WINDOW_FRAMES, FrameReport, FrameStats};
pub use debounce::ResizeDebouncer;
pub use error::AppError;
pub use headless::{HeadlessOptions, ResizeScript, ScriptedResizes, SimulatedClock, run_headless};
pub use host::{FrameRequests, FrameScheduler, ResizeEvent, ResizeSource};
pub use platform::{PlatformDirs, PlatformError};
