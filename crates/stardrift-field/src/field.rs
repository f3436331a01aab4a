//! The particle field state object: configure once, resize on viewport
//! changes, tick once per display refresh.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stardrift_config::{ConfigError, FieldConfig};

use crate::frame::{Frame, GradientDisc, StarDisc};
use crate::motion;
use crate::nebula::{Nebula, generate_nebulae};
use crate::star::{Star, generate_stars};
use crate::viewport::Viewport;

/// Stars and nebulae for one viewport, owned by the caller.
///
/// Multiple fields can coexist; nothing here touches global state. Randomness
/// is only consumed by [`resize`](Self::resize); [`tick`](Self::tick) is pure
/// arithmetic over the current state and the timestamp.
pub struct ParticleField {
    config: FieldConfig,
    rng: ChaCha8Rng,
    viewport: Viewport,
    stars: Vec<Star>,
    nebulae: Vec<Nebula>,
    last_tick_ms: Option<f64>,
    generation: u64,
}

impl ParticleField {
    /// Validate `config` and create an empty field.
    ///
    /// No particles exist until the first [`resize`](Self::resize).
    pub fn configure(config: FieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            rng,
            viewport: Viewport::default(),
            stars: Vec::new(),
            nebulae: Vec::new(),
            last_tick_ms: None,
            generation: 0,
        })
    }

    /// Replace the viewport and regenerate every particle at fresh random
    /// positions inside it. Prior particle state is discarded.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.stars = generate_stars(&self.config, &viewport, &mut self.rng);
        self.nebulae = generate_nebulae(&self.config, &viewport, &mut self.rng);
        self.last_tick_ms = None;
        self.generation += 1;

        let physical = viewport.physical_size();
        log::debug!(
            "Regenerated field #{} for {}x{} (ratio {:.2}, {}x{} physical): {} stars, {} nebulae",
            self.generation,
            viewport.width(),
            viewport.height(),
            viewport.pixel_ratio(),
            physical.width,
            physical.height,
            self.stars.len(),
            self.nebulae.len()
        );
    }

    /// Advance one frame to `timestamp_ms` and describe what to draw.
    ///
    /// The first tick after a resize establishes the time baseline and does
    /// not move anything.
    pub fn tick(&mut self, timestamp_ms: f64) -> Frame {
        let elapsed = self
            .last_tick_ms
            .map_or(0.0, |last| timestamp_ms - last);
        self.last_tick_ms = Some(timestamp_ms);

        let motion_config = &self.config.motion;
        let steps = motion::frame_steps(
            elapsed,
            motion_config.max_frame_ms,
            motion_config.speed_scale,
        );

        for star in &mut self.stars {
            star.advance(steps, &self.viewport);
        }
        for nebula in &mut self.nebulae {
            nebula.advance(steps, &self.viewport);
        }

        self.describe(timestamp_ms)
    }

    /// Build the frame for the current state without advancing it.
    pub fn describe(&self, timestamp_ms: f64) -> Frame {
        let nebulae = self
            .nebulae
            .iter()
            .flat_map(|nebula| {
                nebula.blobs.iter().map(move |blob| GradientDisc {
                    center: nebula.center + blob.offset,
                    radius: blob.radius,
                    color: blob.color.with_alpha(blob.alpha * nebula.alpha),
                })
            })
            .filter(|disc| disc.intersects(&self.viewport))
            .collect();

        let stars = self
            .stars
            .iter()
            .map(|star| StarDisc {
                center: star.position,
                radius: star.size,
                color: star.color.with_alpha(self.star_alpha(star, timestamp_ms)),
                glow: star.glow,
            })
            .collect();

        Frame {
            viewport: self.viewport,
            timestamp_ms,
            background: self.config.background,
            nebulae,
            stars,
            overlay: self.config.overlay.clone(),
        }
    }

    /// Rendered alpha of `star` at `timestamp_ms`: twinkle, clamped to the configured band.
    pub fn star_alpha(&self, star: &Star, timestamp_ms: f64) -> f32 {
        self.config
            .alpha_clamp
            .clamp(star.twinkle_alpha(timestamp_ms, &self.config.twinkle))
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn nebulae(&self) -> &[Nebula] {
        &self.nebulae
    }

    /// Number of regenerations performed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stardrift_config::{CountRange, Range, StarLayer};

    fn field_with(config: FieldConfig, viewport: Viewport) -> ParticleField {
        let mut field = ParticleField::configure(config).unwrap();
        field.resize(viewport);
        field
    }

    #[test]
    fn test_configure_rejects_inverted_range() {
        let mut config = FieldConfig::default();
        config.star_speed.y = Range::new(0.5, -0.5);
        assert!(matches!(
            ParticleField::configure(config),
            Err(ConfigError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_configure_generates_nothing() {
        let field = ParticleField::configure(FieldConfig::default()).unwrap();
        assert!(field.stars().is_empty());
        assert!(field.nebulae().is_empty());
        assert_eq!(field.generation(), 0);
    }

    #[test]
    fn test_resize_regenerates_configured_counts() {
        let mut field = field_with(FieldConfig::default(), Viewport::new(800.0, 600.0, 1.0));
        assert_eq!(field.stars().len(), 645);
        for (w, h, ratio) in [(320.0, 240.0, 2.0), (1920.0, 1080.0, 1.0), (1.0, 1.0, 3.0)] {
            field.resize(Viewport::new(w, h, ratio));
            assert_eq!(field.stars().len(), 645);
            assert_eq!(field.nebulae().len(), 6);
        }
        assert_eq!(field.generation(), 4);
    }

    #[test]
    fn test_resize_scales_positions_to_new_bounds() {
        let mut field = field_with(FieldConfig::default(), Viewport::new(1920.0, 1080.0, 1.0));
        let small = Viewport::new(200.0, 100.0, 1.0);
        field.resize(small);
        assert!(field.stars().iter().all(|s| small.contains(s.position)));
    }

    #[test]
    fn test_positions_stay_in_bounds_over_many_ticks() {
        let mut config = FieldConfig::default();
        config.star_speed.x = Range::new(-7.0, 7.0);
        config.star_speed.y = Range::new(-5.0, 5.0);
        config.motion.speed_scale = 3.0;
        let viewport = Viewport::new(320.0, 200.0, 1.0);
        let mut field = field_with(config, viewport);

        let mut t = 0.0;
        for frame in 0..2000 {
            // Irregular frame pacing, including stalls past the clamp.
            t += match frame % 7 {
                0 => 400.0,
                1 => 0.0,
                _ => 16.0 + (frame % 5) as f64,
            };
            field.tick(t);
            for star in field.stars() {
                assert!(
                    viewport.contains(star.position),
                    "star escaped to {:?} at frame {frame}",
                    star.position
                );
            }
        }
    }

    #[test]
    fn test_rendered_alpha_within_clamp_band() {
        for band in [Range::new(0.1, 1.0), Range::new(0.08, 0.95)] {
            let config = FieldConfig {
                alpha_clamp: band,
                ..Default::default()
            };
            let mut field = field_with(config, Viewport::new(640.0, 480.0, 1.0));
            for i in 0..120 {
                let frame = field.tick(i as f64 * 16.7);
                for star in &frame.stars {
                    assert!(
                        band.contains(star.color.a),
                        "alpha {} outside [{}, {}]",
                        star.color.a,
                        band.min,
                        band.max
                    );
                }
            }
        }
    }

    #[test]
    fn test_first_tick_establishes_baseline() {
        let mut field = field_with(FieldConfig::default(), Viewport::new(640.0, 480.0, 1.0));
        let before: Vec<_> = field.stars().iter().map(|s| s.position).collect();
        field.tick(5_000.0);
        let after: Vec<_> = field.stars().iter().map(|s| s.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_motion_is_deterministic() {
        let config = FieldConfig {
            seed: 77,
            ..Default::default()
        };
        let viewport = Viewport::new(1024.0, 768.0, 2.0);
        let mut a = field_with(config.clone(), viewport);
        let mut b = field_with(config, viewport);

        for i in 0..300 {
            let t = 1_000.0 + i as f64 * 16.6;
            let frame_a = a.tick(t);
            let frame_b = b.tick(t);
            assert_eq!(frame_a, frame_b);
        }
        assert_eq!(a.stars(), b.stars());
        assert_eq!(a.nebulae(), b.nebulae());
    }

    #[test]
    fn test_tick_has_no_hidden_randomness() {
        let mut field = field_with(FieldConfig::default(), Viewport::new(640.0, 480.0, 1.0));
        field.tick(0.0);
        let first = field.describe(500.0);
        let second = field.describe(500.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_velocity_applied_per_reference_frame() {
        let config = FieldConfig {
            layers: vec![StarLayer {
                count: 1,
                size: Range::new(1.0, 1.0),
            }],
            star_speed: stardrift_config::StarSpeed {
                x: Range::new(2.0, 2.0),
                y: Range::new(0.0, 0.0),
            },
            ..Default::default()
        };
        let mut field = field_with(config, Viewport::new(1000.0, 1000.0, 1.0));
        let start = field.stars()[0].position;
        field.tick(0.0);
        field.tick(motion::REFERENCE_FRAME_MS * 10.0);
        let moved = field.stars()[0].position;
        let expected = motion::wrap(start.x + 20.0, 1000.0);
        assert!((moved.x - expected).abs() < 1e-3);
        assert_eq!(moved.y, start.y);
    }

    #[test]
    fn test_frame_blob_alpha_combines_nebula_alpha() {
        let mut config = FieldConfig::default();
        config.nebula.count = 1;
        config.nebula.blobs = CountRange::new(1, 1);
        config.nebula.blob_offset_x = Range::new(0.0, 0.0);
        config.nebula.blob_offset_y = Range::new(0.0, 0.0);
        let field = field_with(config, Viewport::new(800.0, 600.0, 1.0));
        let nebula = &field.nebulae()[0];
        let frame = field.describe(0.0);
        assert_eq!(frame.nebulae.len(), 1);
        let expected = nebula.blobs[0].alpha * nebula.alpha;
        assert!((frame.nebulae[0].color.a - expected).abs() < 1e-6);
    }

    #[test]
    fn test_offscreen_blobs_are_culled() {
        let field = field_with(FieldConfig::default(), Viewport::new(800.0, 600.0, 1.0));
        let viewport = field.viewport();
        let frame = field.describe(0.0);
        assert!(frame.nebulae.iter().all(|d| d.intersects(&viewport)));
    }
}
