//! Nebula clouds: clusters of soft radial-gradient blobs drifting across the view.

use rand::Rng;
use stardrift_config::{FieldConfig, Rgb};

use crate::motion;
use crate::star::sample;
use crate::viewport::Viewport;

/// One soft disc belonging to a nebula.
#[derive(Clone, Debug, PartialEq)]
pub struct Blob {
    /// Offset of the blob center from the nebula center.
    pub offset: glam::Vec2,
    pub radius: f32,
    /// Center opacity before the nebula's own alpha is applied.
    pub alpha: f32,
    pub color: Rgb,
}

impl Blob {
    /// Distance from the nebula center to the far edge of this blob, per axis.
    pub fn extent(&self) -> glam::Vec2 {
        self.offset.abs() + glam::Vec2::splat(self.radius)
    }
}

/// A drifting cluster of blobs.
#[derive(Clone, Debug, PartialEq)]
pub struct Nebula {
    pub center: glam::Vec2,
    /// Drift in logical pixels per reference frame.
    pub velocity: glam::Vec2,
    /// Opacity multiplied into every blob.
    pub alpha: f32,
    pub blobs: Vec<Blob>,
    /// Wrap margin per axis: the largest blob extent.
    pub margin: glam::Vec2,
}

impl Nebula {
    /// Drift by `steps` reference frames. The center wraps only once every
    /// blob is fully outside the view, so nothing pops in at an edge.
    pub fn advance(&mut self, steps: f32, viewport: &Viewport) {
        let next = self.center + self.velocity * steps;
        self.center = glam::Vec2::new(
            motion::wrap_with_margin(next.x, viewport.width(), self.margin.x),
            motion::wrap_with_margin(next.y, viewport.height(), self.margin.y),
        );
    }

    /// Resolved center of each blob.
    pub fn blob_centers(&self) -> impl Iterator<Item = glam::Vec2> + '_ {
        self.blobs.iter().map(|b| self.center + b.offset)
    }
}

/// Generate the configured nebulae, centers spawned in the upper part of the view.
pub fn generate_nebulae(
    config: &FieldConfig,
    viewport: &Viewport,
    rng: &mut impl Rng,
) -> Vec<Nebula> {
    let settings = &config.nebula;
    let palette = &config.palette;
    let spawn_height = viewport.height() * settings.spawn_height_fraction;

    (0..settings.count)
        .map(|_| {
            let center = glam::Vec2::new(
                rng.random::<f32>() * viewport.width(),
                rng.random::<f32>() * spawn_height,
            );
            let alpha = sample(rng, &settings.alpha);
            let velocity = glam::Vec2::new(
                sample(rng, &settings.speed_x),
                sample(rng, &settings.speed_y),
            );

            let blob_count = rng.random_range(settings.blobs.min..=settings.blobs.max);
            let blobs: Vec<Blob> = (0..blob_count)
                .map(|_| {
                    let offset = glam::Vec2::new(
                        sample(rng, &settings.blob_offset_x),
                        sample(rng, &settings.blob_offset_y),
                    );
                    let radius = sample(rng, &settings.blob_radius);
                    let alpha = sample(rng, &settings.blob_alpha);
                    let hue = sample(rng, &palette.nebula_hue);
                    Blob {
                        offset,
                        radius,
                        alpha,
                        color: Rgb::from_hsl(
                            hue,
                            palette.nebula_saturation,
                            palette.nebula_lightness,
                        ),
                    }
                })
                .collect();

            let margin = blobs
                .iter()
                .map(Blob::extent)
                .fold(glam::Vec2::ZERO, glam::Vec2::max);

            Nebula {
                center,
                velocity,
                alpha,
                blobs,
                margin,
            }
        })
        .collect()
}
