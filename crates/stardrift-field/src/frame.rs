//! Drawable frame description produced by each tick.
//!
//! A frame holds fully resolved geometry and colors in logical pixels, so
//! painting it is a pure function of the frame.

use stardrift_config::{OverlayConfig, Rgba};

use crate::viewport::Viewport;

/// A filled star circle with an optional glow halo.
#[derive(Clone, Debug, PartialEq)]
pub struct StarDisc {
    pub center: glam::Vec2,
    pub radius: f32,
    /// Star color with its twinkled, clamped alpha.
    pub color: Rgba,
    /// Glow blur radius beyond `radius`; `0.0` for none.
    pub glow: f32,
}

/// A radial gradient from `color` at the center to transparent at `radius`.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientDisc {
    pub center: glam::Vec2,
    pub radius: f32,
    pub color: Rgba,
}

impl GradientDisc {
    /// Whether any part of the disc intersects the viewport.
    pub fn intersects(&self, viewport: &Viewport) -> bool {
        self.center.x + self.radius > 0.0
            && self.center.y + self.radius > 0.0
            && self.center.x - self.radius < viewport.width()
            && self.center.y - self.radius < viewport.height()
    }
}

/// Everything needed to paint one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub viewport: Viewport,
    /// Timestamp the frame was produced for.
    pub timestamp_ms: f64,
    pub background: Rgba,
    /// Nebula blobs, painted first.
    pub nebulae: Vec<GradientDisc>,
    /// Stars, painted over the nebulae.
    pub stars: Vec<StarDisc>,
    /// Full-frame overlays, painted last.
    pub overlay: OverlayConfig,
}

impl Frame {
    /// An empty frame for a viewport with nothing generated yet.
    pub fn empty(viewport: Viewport, timestamp_ms: f64) -> Self {
        Self {
            viewport,
            timestamp_ms,
            background: Rgba::TRANSPARENT,
            nebulae: Vec::new(),
            stars: Vec::new(),
            overlay: OverlayConfig::default(),
        }
    }

    /// Number of primitive draw calls needed to paint this frame, excluding the clear.
    pub fn draw_call_count(&self) -> usize {
        let glows = self.stars.iter().filter(|s| s.glow > 0.0).count();
        let overlays = usize::from(self.overlay.vignette.is_some())
            + usize::from(self.overlay.light_beam.is_some());
        self.nebulae.len() + self.stars.len() + glows + overlays
    }
}
