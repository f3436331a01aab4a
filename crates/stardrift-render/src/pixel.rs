//! Software rasterizer: an RGBA buffer with source-over compositing.

use stardrift_config::{LightBeam, Rgba, Vignette};
use stardrift_field::PhysicalSize;

use crate::surface::Surface;

/// A CPU-side RGBA surface. Pixels are stored as straight-alpha `f32`
/// channels and quantized on export.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelSurface {
    size: PhysicalSize,
    pixels: Vec<[f32; 4]>,
}

impl PixelSurface {
    /// Creates a transparent surface, clamping dimensions to at least 1×1.
    pub fn new(width: u32, height: u32) -> Self {
        let size = PhysicalSize {
            width: width.max(1),
            height: height.max(1),
        };
        Self {
            size,
            pixels: vec![[0.0; 4]; (size.width * size.height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let [r, g, b, a] = self.pixels[(y * self.size.width + x) as usize];
        Some(Rgba::new(r, g, b, a))
    }

    /// Quantize to row-major RGBA8 pixels.
    pub fn to_rgba8(&self) -> Vec<[u8; 4]> {
        self.pixels
            .iter()
            .map(|&[r, g, b, a]| Rgba::new(r, g, b, a).to_u8())
            .collect()
    }

    /// Source-over blend `color`, scaled by `coverage`, onto one pixel.
    #[inline]
    fn blend(&mut self, x: u32, y: u32, color: Rgba, coverage: f32) {
        let src_a = (color.a * coverage).clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let idx = (y * self.size.width + x) as usize;
        let dst = &mut self.pixels[idx];
        let dst_a = dst[3];
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            *dst = [0.0; 4];
            return;
        }
        let src = [color.r, color.g, color.b];
        for (channel, &s) in dst.iter_mut().take(3).zip(&src) {
            *channel = (s * src_a + *channel * dst_a * (1.0 - src_a)) / out_a;
        }
        dst[3] = out_a;
    }

    /// Pixel index bounds of the square around `center` with half-size `extent`.
    fn bounds(&self, center: glam::Vec2, extent: f32) -> Option<(u32, u32, u32, u32)> {
        let x0 = (center.x - extent).floor().max(0.0);
        let y0 = (center.y - extent).floor().max(0.0);
        let x1 = (center.x + extent).ceil().min(self.size.width as f32);
        let y1 = (center.y + extent).ceil().min(self.size.height as f32);
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    fn for_each_pixel(&mut self, mut shade: impl FnMut(glam::Vec2) -> Option<(Rgba, f32)>) {
        for y in 0..self.size.height {
            for x in 0..self.size.width {
                let p = glam::Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if let Some((color, coverage)) = shade(p) {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> PhysicalSize {
        self.size
    }

    fn resize(&mut self, size: PhysicalSize) {
        let size = PhysicalSize {
            width: size.width.max(1),
            height: size.height.max(1),
        };
        if size == self.size {
            return;
        }
        log::trace!("Pixel surface resized to {}x{}", size.width, size.height);
        self.size = size;
        self.pixels = vec![[0.0; 4]; (size.width * size.height) as usize];
    }

    fn clear(&mut self, color: Rgba) {
        let fill = [color.r, color.g, color.b, color.a.clamp(0.0, 1.0)];
        self.pixels.fill(fill);
    }

    fn fill_circle(&mut self, center: glam::Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }
        // Half a pixel of feathering on the rim.
        let Some((x0, y0, x1, y1)) = self.bounds(center, radius + 1.0) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = glam::Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (radius + 0.5 - p.distance(center)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    fn fill_radial_gradient(&mut self, center: glam::Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.bounds(center, radius) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = glam::Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let falloff = 1.0 - p.distance(center) / radius;
                if falloff > 0.0 {
                    self.blend(x, y, color, falloff);
                }
            }
        }
    }

    fn apply_vignette(&mut self, vignette: &Vignette) {
        if vignette.strength <= 0.0 {
            return;
        }
        let half = glam::Vec2::new(self.size.width as f32, self.size.height as f32) * 0.5;
        let half_diagonal = half.length();
        let color = vignette.color.with_alpha(vignette.strength);
        self.for_each_pixel(|p| {
            let d = p.distance(half) / half_diagonal;
            let t = smoothstep(vignette.inner, vignette.outer, d);
            (t > 0.0).then_some((color, t))
        });
    }

    fn fill_light_beam(&mut self, beam: &LightBeam) {
        let width = self.size.width as f32;
        let half_width = beam.width_fraction * width;
        if half_width <= 0.0 || beam.alpha <= 0.0 {
            return;
        }
        let angle = beam.angle_deg.to_radians();
        let direction = glam::Vec2::new(angle.cos(), angle.sin());
        let normal = direction.perp();
        let origin = glam::Vec2::new(
            width * (0.5 + beam.offset_fraction),
            self.size.height as f32 * 0.5,
        );
        let color = beam.color.with_alpha(beam.alpha);
        self.for_each_pixel(|p| {
            let d = (p - origin).dot(normal).abs();
            let falloff = 1.0 - d / half_width;
            (falloff > 0.0).then_some((color, falloff))
        });
    }
}

/// Hermite interpolation of `x` between `edge0` and `edge1`; a hard step when the edges meet.
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x >= edge0 { 1.0 } else { 0.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
