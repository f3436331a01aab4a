//! Frame painting: the drawing-surface abstraction, a software rasterizer,
//! a recording surface for inspection, and PNG export.

pub mod error;
pub mod export;
pub mod painter;
pub mod pixel;
pub mod recording;
pub mod surface;

pub use error::RenderError;
pub use export::{encode_png, write_png};
pub use painter::{GLOW_STRENGTH, render};
pub use pixel::PixelSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::Surface;
