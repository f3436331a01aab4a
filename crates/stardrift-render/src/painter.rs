//! Paints a frame description onto a surface.

use stardrift_field::Frame;

use crate::surface::Surface;

/// Center opacity of a star's glow halo relative to the star's own alpha.
pub const GLOW_STRENGTH: f32 = 0.35;

/// Paint `frame` onto `surface`: clear, nebula blobs, star glows and discs,
/// then overlays.
///
/// The surface is resized to the frame's physical size first if needed.
/// Logical coordinates are scaled by the frame's pixel ratio. Painting the
/// same frame twice yields the same surface.
pub fn render<S: Surface + ?Sized>(frame: &Frame, surface: &mut S) {
    let physical = frame.viewport.physical_size();
    if surface.size() != physical {
        surface.resize(physical);
    }

    let scale = frame.viewport.pixel_ratio() as f32;
    surface.clear(frame.background);

    for disc in &frame.nebulae {
        surface.fill_radial_gradient(disc.center * scale, disc.radius * scale, disc.color);
    }

    for star in &frame.stars {
        let center = star.center * scale;
        if star.glow > 0.0 {
            let halo = star.color.with_alpha(star.color.a * GLOW_STRENGTH);
            surface.fill_radial_gradient(center, (star.radius + star.glow) * scale, halo);
        }
        surface.fill_circle(center, star.radius * scale, star.color);
    }

    if let Some(vignette) = &frame.overlay.vignette {
        surface.apply_vignette(vignette);
    }
    if let Some(beam) = &frame.overlay.light_beam {
        surface.fill_light_beam(beam);
    }
}
