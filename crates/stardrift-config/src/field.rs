//! Particle field options: star layers, nebulae, palette, motion, twinkle and overlays.

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Rgba};
use crate::error::ConfigError;

/// A closed interval `[min, max]` that values are sampled from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map `t` in `[0, 1)` onto the interval.
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + (self.max - self.min) * t
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(ConfigError::InvalidRange {
                field,
                min: self.min as f64,
                max: self.max as f64,
            });
        }
        Ok(())
    }

    fn check_non_negative(&self, field: &'static str) -> Result<(), ConfigError> {
        self.check(field)?;
        if self.min < 0.0 {
            return Err(ConfigError::InvalidValue {
                field,
                reason: format!("lower bound {} is negative", self.min),
            });
        }
        Ok(())
    }

    fn check_unit(&self, field: &'static str) -> Result<(), ConfigError> {
        self.check_non_negative(field)?;
        if self.max > 1.0 {
            return Err(ConfigError::InvalidValue {
                field,
                reason: format!("upper bound {} exceeds 1.0", self.max),
            });
        }
        Ok(())
    }
}

/// An inclusive integer interval used for per-nebula blob counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// One depth layer of stars sharing a size band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarLayer {
    /// Number of stars generated for this layer on every resize.
    pub count: u32,
    /// Star radius in logical pixels.
    pub size: Range,
}

impl Default for StarLayer {
    fn default() -> Self {
        Self {
            count: 100,
            size: Range::new(0.8, 1.5),
        }
    }
}

/// Per-axis star drift, in logical pixels per reference frame (1/60 s).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarSpeed {
    pub x: Range,
    pub y: Range,
}

impl Default for StarSpeed {
    fn default() -> Self {
        Self {
            x: Range::new(-0.05, 0.05),
            y: Range::new(-0.03, 0.03),
        }
    }
}

/// Colors available to generated particles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Palette {
    /// Star tints; each star picks one uniformly.
    pub stars: Vec<Rgb>,
    /// Nebula hue band in degrees.
    pub nebula_hue: Range,
    pub nebula_saturation: f32,
    pub nebula_lightness: f32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            stars: vec![
                Rgb::from_u8(255, 255, 255), // white
                Rgb::from_u8(255, 245, 200), // warm yellow
                Rgb::from_u8(200, 220, 255), // icy blue
                Rgb::from_u8(255, 180, 150), // soft orange
                Rgb::from_u8(210, 255, 220), // pale greenish-white
                Rgb::from_u8(255, 220, 255), // light pinkish-white
            ],
            nebula_hue: Range::new(220.0, 260.0),
            nebula_saturation: 0.7,
            nebula_lightness: 0.6,
        }
    }
}

/// Nebula population and blob shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NebulaSettings {
    /// Number of nebulae generated on every resize.
    pub count: u32,
    /// Blobs per nebula (inclusive).
    pub blobs: CountRange,
    pub blob_offset_x: Range,
    pub blob_offset_y: Range,
    pub blob_radius: Range,
    pub blob_alpha: Range,
    /// Whole-nebula opacity, multiplied into every blob.
    pub alpha: Range,
    pub speed_x: Range,
    pub speed_y: Range,
    /// Nebula centers spawn within this fraction of the view height, from the top.
    pub spawn_height_fraction: f32,
}

impl Default for NebulaSettings {
    fn default() -> Self {
        Self {
            count: 6,
            blobs: CountRange::new(6, 12),
            blob_offset_x: Range::new(-150.0, 150.0),
            blob_offset_y: Range::new(-120.0, 120.0),
            blob_radius: Range::new(100.0, 250.0),
            blob_alpha: Range::new(0.05, 0.15),
            alpha: Range::new(0.1, 0.25),
            speed_x: Range::new(0.005, 0.02),
            speed_y: Range::new(-0.005, 0.005),
            spawn_height_fraction: 0.5,
        }
    }
}

/// Global motion scaling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Multiplier applied to every velocity.
    pub speed_scale: f32,
    /// Longest frame gap (ms) advanced in one tick; longer gaps are clamped.
    pub max_frame_ms: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed_scale: 1.0,
            max_frame_ms: 250.0,
        }
    }
}

/// Sinusoidal star alpha modulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TwinkleConfig {
    pub amplitude: f32,
    /// Angular frequency in radians per millisecond.
    pub frequency: f32,
}

impl Default for TwinkleConfig {
    fn default() -> Self {
        Self {
            amplitude: 0.35,
            frequency: 0.002,
        }
    }
}

/// Radial darkening toward the frame corners.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Vignette {
    /// Fraction of the half diagonal where darkening starts.
    pub inner: f32,
    /// Fraction of the half diagonal where darkening reaches `strength`.
    pub outer: f32,
    pub strength: f32,
    pub color: Rgb,
}

impl Default for Vignette {
    fn default() -> Self {
        Self {
            inner: 0.55,
            outer: 1.0,
            strength: 0.6,
            color: Rgb::BLACK,
        }
    }
}

/// A soft diagonal band of light across the frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightBeam {
    /// Beam direction in degrees, measured from the +x axis.
    pub angle_deg: f32,
    /// Beam half-width as a fraction of the view width.
    pub width_fraction: f32,
    /// Beam center offset from the view center, as a fraction of the view width.
    pub offset_fraction: f32,
    pub color: Rgb,
    pub alpha: f32,
}

impl Default for LightBeam {
    fn default() -> Self {
        Self {
            angle_deg: 60.0,
            width_fraction: 0.12,
            offset_fraction: -0.2,
            color: Rgb::from_u8(200, 210, 255),
            alpha: 0.08,
        }
    }
}

/// Full-frame overlays painted after the particles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    pub vignette: Option<Vignette>,
    pub light_beam: Option<LightBeam>,
}

/// Everything the particle field needs to generate and animate itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Seed for particle generation.
    pub seed: u64,
    pub layers: Vec<StarLayer>,
    /// Base alpha each star twinkles around.
    pub star_alpha: Range,
    pub star_speed: StarSpeed,
    pub glow_enabled: bool,
    /// Glow blur radius in logical pixels.
    pub glow: Range,
    pub palette: Palette,
    pub nebula: NebulaSettings,
    pub motion: MotionConfig,
    pub twinkle: TwinkleConfig,
    /// Band every rendered star alpha is clamped into.
    pub alpha_clamp: Range,
    pub overlay: OverlayConfig,
    /// Clear color painted before each frame.
    pub background: Rgba,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            layers: vec![
                StarLayer {
                    count: 500,
                    size: Range::new(0.3, 0.8),
                },
                StarLayer {
                    count: 120,
                    size: Range::new(0.8, 1.5),
                },
                StarLayer {
                    count: 25,
                    size: Range::new(1.5, 2.0),
                },
            ],
            star_alpha: Range::new(0.3, 1.0),
            star_speed: StarSpeed::default(),
            glow_enabled: true,
            glow: Range::new(8.0, 20.0),
            palette: Palette::default(),
            nebula: NebulaSettings::default(),
            motion: MotionConfig::default(),
            twinkle: TwinkleConfig::default(),
            alpha_clamp: Range::new(0.1, 1.0),
            overlay: OverlayConfig::default(),
            background: Rgba::TRANSPARENT,
        }
    }
}

impl FieldConfig {
    /// Total number of stars produced by one generation pass.
    pub fn star_count(&self) -> usize {
        self.layers.iter().map(|l| l.count as usize).sum()
    }

    /// Reject inverted, non-finite, or out-of-domain settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for layer in &self.layers {
            layer.size.check_non_negative("layers.size")?;
        }
        self.star_alpha.check_unit("star_alpha")?;
        self.star_speed.x.check("star_speed.x")?;
        self.star_speed.y.check("star_speed.y")?;
        self.glow.check_non_negative("glow")?;
        self.alpha_clamp.check_unit("alpha_clamp")?;

        if self.palette.stars.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "palette.stars",
                reason: "star palette is empty".to_string(),
            });
        }
        if let Some(bad) = self.palette.stars.iter().find(|c| !c.is_normalized()) {
            return Err(ConfigError::InvalidValue {
                field: "palette.stars",
                reason: format!("color {bad:?} has channels outside [0, 1]"),
            });
        }
        self.palette.nebula_hue.check("palette.nebula_hue")?;
        check_unit_scalar("palette.nebula_saturation", self.palette.nebula_saturation)?;
        check_unit_scalar("palette.nebula_lightness", self.palette.nebula_lightness)?;

        let nebula = &self.nebula;
        if nebula.blobs.min > nebula.blobs.max {
            return Err(ConfigError::InvalidRange {
                field: "nebula.blobs",
                min: nebula.blobs.min as f64,
                max: nebula.blobs.max as f64,
            });
        }
        nebula.blob_offset_x.check("nebula.blob_offset_x")?;
        nebula.blob_offset_y.check("nebula.blob_offset_y")?;
        nebula.blob_radius.check_non_negative("nebula.blob_radius")?;
        nebula.blob_alpha.check_unit("nebula.blob_alpha")?;
        nebula.alpha.check_unit("nebula.alpha")?;
        nebula.speed_x.check("nebula.speed_x")?;
        nebula.speed_y.check("nebula.speed_y")?;
        check_unit_scalar("nebula.spawn_height_fraction", nebula.spawn_height_fraction)?;

        check_non_negative_scalar("motion.speed_scale", self.motion.speed_scale as f64)?;
        check_non_negative_scalar("motion.max_frame_ms", self.motion.max_frame_ms)?;
        check_non_negative_scalar("twinkle.amplitude", self.twinkle.amplitude as f64)?;
        check_non_negative_scalar("twinkle.frequency", self.twinkle.frequency as f64)?;

        if let Some(v) = &self.overlay.vignette {
            check_unit_scalar("overlay.vignette.strength", v.strength)?;
            Range::new(v.inner, v.outer).check_non_negative("overlay.vignette")?;
        }
        if let Some(beam) = &self.overlay.light_beam {
            check_unit_scalar("overlay.light_beam.alpha", beam.alpha)?;
            check_non_negative_scalar(
                "overlay.light_beam.width_fraction",
                beam.width_fraction as f64,
            )?;
            if !beam.angle_deg.is_finite() || !beam.offset_fraction.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field: "overlay.light_beam",
                    reason: "angle and offset must be finite".to_string(),
                });
            }
        }
        Ok(())
    }
}

pub(crate) fn check_non_negative_scalar(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("{value} must be finite and non-negative"),
        });
    }
    Ok(())
}

fn check_unit_scalar(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("{value} must lie in [0, 1]"),
        });
    }
    Ok(())
}
