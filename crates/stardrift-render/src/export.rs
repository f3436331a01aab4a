//! PNG export of rendered pixel surfaces.

use std::path::Path;

use crate::error::RenderError;
use crate::pixel::PixelSurface;

/// Encode the surface as an 8-bit RGBA PNG.
pub fn encode_png(surface: &PixelSurface) -> Result<Vec<u8>, RenderError> {
    let pixels = surface.to_rgba8();
    let mut png_buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(
            std::io::Cursor::new(&mut png_buf),
            surface.width(),
            surface.height(),
        );
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(bytemuck::cast_slice(&pixels))?;
        writer.finish()?;
    }
    Ok(png_buf)
}

/// Encode the surface and write it to `path`.
pub fn write_png(surface: &PixelSurface, path: &Path) -> Result<(), RenderError> {
    let bytes = encode_png(surface)?;
    std::fs::write(path, bytes)?;
    log::debug!(
        "Wrote {}x{} frame to {}",
        surface.width(),
        surface.height(),
        path.display()
    );
    Ok(())
}
