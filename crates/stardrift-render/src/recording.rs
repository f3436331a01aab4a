//! A surface that records draw calls instead of rasterizing them.

use stardrift_config::{LightBeam, Rgba, Vignette};
use stardrift_field::PhysicalSize;

use crate::surface::Surface;

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Resize(PhysicalSize),
    Clear(Rgba),
    Circle {
        center: glam::Vec2,
        radius: f32,
        color: Rgba,
    },
    RadialGradient {
        center: glam::Vec2,
        radius: f32,
        color: Rgba,
    },
    Vignette(Vignette),
    LightBeam(LightBeam),
}

/// Records every call in order. Useful for inspecting what a frame paints
/// without touching pixels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSurface {
    size: Option<PhysicalSize>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands, keeping the current size.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> PhysicalSize {
        self.size.unwrap_or(PhysicalSize {
            width: 0,
            height: 0,
        })
    }

    fn resize(&mut self, size: PhysicalSize) {
        self.size = Some(size);
        self.commands.push(DrawCommand::Resize(size));
    }

    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_circle(&mut self, center: glam::Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_radial_gradient(&mut self, center: glam::Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::RadialGradient {
            center,
            radius,
            color,
        });
    }

    fn apply_vignette(&mut self, vignette: &Vignette) {
        self.commands.push(DrawCommand::Vignette(vignette.clone()));
    }

    fn fill_light_beam(&mut self, beam: &LightBeam) {
        self.commands.push(DrawCommand::LightBeam(beam.clone()));
    }
}
