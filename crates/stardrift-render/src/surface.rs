//! The drawing surface abstraction frames are painted onto.

use stardrift_config::{LightBeam, Rgba, Vignette};
use stardrift_field::PhysicalSize;

/// A 2D drawing target addressed in physical pixels.
///
/// Implementations only mutate their own pixels; they must not keep state
/// between calls that changes how later calls paint.
pub trait Surface {
    /// Current backing-store size.
    fn size(&self) -> PhysicalSize;

    /// Reallocate the backing store. Contents after a resize are unspecified
    /// until the next [`clear`](Self::clear).
    fn resize(&mut self, size: PhysicalSize);

    /// Replace every pixel with `color`.
    fn clear(&mut self, color: Rgba);

    /// Fill an anti-aliased circle.
    fn fill_circle(&mut self, center: glam::Vec2, radius: f32, color: Rgba);

    /// Fill a disc whose alpha falls linearly from `color.a` at the center to
    /// zero at `radius`.
    fn fill_radial_gradient(&mut self, center: glam::Vec2, radius: f32, color: Rgba);

    /// Darken toward the corners.
    fn apply_vignette(&mut self, vignette: &Vignette);

    /// Paint a soft straight band of light across the surface.
    fn fill_light_beam(&mut self, beam: &LightBeam);
}
