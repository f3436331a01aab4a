//! Point-light stars: batch generation per layer and per-frame twinkle.

use rand::Rng;
use stardrift_config::{FieldConfig, Rgb, TwinkleConfig};

use crate::motion;
use crate::viewport::Viewport;

/// A single point-light particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    /// Position in logical pixels, always inside the viewport.
    pub position: glam::Vec2,
    /// Drift in logical pixels per reference frame.
    pub velocity: glam::Vec2,
    /// Radius in logical pixels.
    pub size: f32,
    /// Alpha the twinkle oscillates around.
    pub base_alpha: f32,
    pub color: Rgb,
    /// Glow blur radius in logical pixels; `0.0` disables the glow.
    pub glow: f32,
    /// Index of the layer this star was generated for.
    pub layer: usize,
}

impl Star {
    /// Advance by `steps` reference frames, wrapping at the viewport edges.
    pub fn advance(&mut self, steps: f32, viewport: &Viewport) {
        let next = self.position + self.velocity * steps;
        self.position = glam::Vec2::new(
            motion::wrap(next.x, viewport.width()),
            motion::wrap(next.y, viewport.height()),
        );
    }

    /// Twinkled alpha at absolute time `time_ms`, before clamping.
    ///
    /// The phase is keyed on position so neighbouring stars flicker out of step.
    pub fn twinkle_alpha(&self, time_ms: f64, twinkle: &TwinkleConfig) -> f32 {
        let phase = time_ms * twinkle.frequency as f64
            + self.position.x as f64
            + self.position.y as f64;
        self.base_alpha + twinkle.amplitude * phase.sin() as f32
    }
}

/// Uniform sample in `[0, 1)` mapped onto a config range.
pub(crate) fn sample(rng: &mut impl Rng, range: &stardrift_config::Range) -> f32 {
    range.lerp(rng.random::<f32>())
}

/// Generate every configured star layer scattered over the viewport.
pub fn generate_stars(config: &FieldConfig, viewport: &Viewport, rng: &mut impl Rng) -> Vec<Star> {
    let mut stars = Vec::with_capacity(config.star_count());
    let palette = &config.palette.stars;

    for (layer_index, layer) in config.layers.iter().enumerate() {
        for _ in 0..layer.count {
            let color = palette[rng.random_range(0..palette.len())];
            let position = glam::Vec2::new(
                rng.random::<f32>() * viewport.width(),
                rng.random::<f32>() * viewport.height(),
            );
            let size = sample(rng, &layer.size);
            let base_alpha = sample(rng, &config.star_alpha);
            let velocity = glam::Vec2::new(
                sample(rng, &config.star_speed.x),
                sample(rng, &config.star_speed.y),
            );
            // Always drawn so toggling glow leaves the rest of the stream unchanged.
            let glow = sample(rng, &config.glow);

            stars.push(Star {
                position: glam::Vec2::new(
                    motion::wrap(position.x, viewport.width()),
                    motion::wrap(position.y, viewport.height()),
                ),
                velocity,
                size,
                base_alpha,
                color,
                glow: if config.glow_enabled { glow } else { 0.0 },
                layer: layer_index,
            });
        }
    }

    stars
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn stars_for(config: &FieldConfig, seed: u64) -> Vec<Star> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generate_stars(config, &Viewport::new(800.0, 600.0, 1.0), &mut rng)
    }

    #[test]
    fn test_star_count_matches_layers() {
        let stars = stars_for(&FieldConfig::default(), 42);
        assert_eq!(stars.len(), 645);
        assert_eq!(stars.iter().filter(|s| s.layer == 0).count(), 500);
        assert_eq!(stars.iter().filter(|s| s.layer == 1).count(), 120);
        assert_eq!(stars.iter().filter(|s| s.layer == 2).count(), 25);
    }

    #[test]
    fn test_star_attributes_within_configured_ranges() {
        let config = FieldConfig::default();
        let stars = stars_for(&config, 42);
        for (i, star) in stars.iter().enumerate() {
            let layer = &config.layers[star.layer];
            assert!(
                layer.size.contains(star.size),
                "Star {i} size {} outside layer range",
                star.size
            );
            assert!(config.star_alpha.contains(star.base_alpha));
            assert!(config.star_speed.x.contains(star.velocity.x));
            assert!(config.star_speed.y.contains(star.velocity.y));
            assert!(config.glow.contains(star.glow));
            assert!(config.palette.stars.contains(&star.color));
        }
    }

    #[test]
    fn test_stars_start_inside_viewport() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        for star in stars_for(&FieldConfig::default(), 7) {
            assert!(viewport.contains(star.position), "{:?}", star.position);
        }
    }

    #[test]
    fn test_glow_disabled_keeps_positions() {
        let with_glow = stars_for(&FieldConfig::default(), 3);
        let config = FieldConfig {
            glow_enabled: false,
            ..Default::default()
        };
        let without_glow = stars_for(&config, 3);
        for (a, b) in with_glow.iter().zip(&without_glow) {
            assert_eq!(a.position, b.position);
            assert_eq!(b.glow, 0.0);
        }
    }

    #[test]
    fn test_same_seed_produces_same_stars() {
        let config = FieldConfig::default();
        assert_eq!(stars_for(&config, 123), stars_for(&config, 123));
    }

    #[test]
    fn test_different_seed_produces_different_stars() {
        let config = FieldConfig::default();
        let a = stars_for(&config, 1);
        let b = stars_for(&config, 9999);
        let differences = a
            .iter()
            .zip(&b)
            .filter(|(a, b)| (a.position - b.position).length() > 1.0)
            .count();
        assert!(differences > 600, "only {differences}/645 stars differed");
    }

    #[test]
    fn test_advance_wraps_at_edges() {
        let viewport = Viewport::new(100.0, 100.0, 1.0);
        let mut star = Star {
            position: glam::Vec2::new(99.5, 0.2),
            velocity: glam::Vec2::new(1.0, -0.5),
            size: 1.0,
            base_alpha: 0.5,
            color: Rgb::WHITE,
            glow: 0.0,
            layer: 0,
        };
        star.advance(1.0, &viewport);
        assert!((star.position.x - 0.5).abs() < 1e-4);
        assert!((star.position.y - 99.7).abs() < 1e-4);
    }

    #[test]
    fn test_twinkle_bounded_by_amplitude() {
        let twinkle = TwinkleConfig::default();
        let star = Star {
            position: glam::Vec2::new(10.0, 20.0),
            velocity: glam::Vec2::ZERO,
            size: 1.0,
            base_alpha: 0.6,
            color: Rgb::WHITE,
            glow: 0.0,
            layer: 0,
        };
        for step in 0..200 {
            let alpha = star.twinkle_alpha(step as f64 * 37.0, &twinkle);
            assert!((alpha - 0.6).abs() <= twinkle.amplitude + 1e-6);
        }
    }
}
