//! Viewport dimensions that normalize host-reported sizes.
//!
//! Hosts report zero sizes while minimized and fractional or sub-1 pixel
//! ratios on some displays; both are clamped so generation never divides the
//! view into an empty area.

/// Minimum logical viewport dimension.
pub const MIN_VIEWPORT_DIMENSION: f32 = 1.0;

/// Physical pixel dimensions of the drawable surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

/// Logical drawable area plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    pixel_ratio: f64,
}

impl Viewport {
    /// Creates a viewport, clamping dimensions to at least 1×1 and the pixel
    /// ratio to at least 1.0.
    pub fn new(width: f32, height: f32, pixel_ratio: f64) -> Self {
        let sanitize = |v: f32| {
            if v.is_finite() {
                v.max(MIN_VIEWPORT_DIMENSION)
            } else {
                MIN_VIEWPORT_DIMENSION
            }
        };
        let pixel_ratio = if pixel_ratio.is_finite() {
            pixel_ratio.max(1.0)
        } else {
            1.0
        };
        Self {
            width: sanitize(width),
            height: sanitize(height),
            pixel_ratio,
        }
    }

    /// Logical width in CSS-style pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Logical height in CSS-style pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Physical pixels per logical pixel.
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Backing-store size: logical size × pixel ratio, rounded.
    pub fn physical_size(&self) -> PhysicalSize {
        PhysicalSize {
            width: ((self.width as f64 * self.pixel_ratio).round() as u32).max(1),
            height: ((self.height as f64 * self.pixel_ratio).round() as u32).max(1),
        }
    }

    /// Whether a point lies inside `[0, width) × [0, height)`.
    pub fn contains(&self, point: glam::Vec2) -> bool {
        (0.0..self.width).contains(&point.x) && (0.0..self.height).contains(&point.y)
    }
}

impl From<&stardrift_config::WindowConfig> for Viewport {
    fn from(window: &stardrift_config::WindowConfig) -> Self {
        Self::new(window.width as f32, window.height as f32, window.pixel_ratio)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(MIN_VIEWPORT_DIMENSION, MIN_VIEWPORT_DIMENSION, 1.0)
    }
}
