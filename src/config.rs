//! Tunable constants, loadable from TOML.
//!
//! Every field has a default equal to the shipped game constant in
//! [`crate::sim::physics`], so an empty file (or no file) reproduces the
//! stock behaviour exactly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::physics;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub track: TrackConfig,
    pub particles: ParticleConfig,
    pub performance: PerformanceConfig,
}

/// Track geometry and surface response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Asphalt width in meters.
    pub width: f32,
    /// Interpolated samples per control point.
    pub segments_per_point: usize,
    pub grip_mod_off_track: f32,
    pub drag_mod_off_track: f32,
    pub asphalt_friction: f32,
    pub grass_friction: f32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            width: physics::TRACK_WIDTH,
            segments_per_point: physics::SEGMENTS_PER_POINT,
            grip_mod_off_track: physics::GRIP_MOD_OFF_TRACK,
            drag_mod_off_track: physics::DRAG_MOD_OFF_TRACK,
            asphalt_friction: physics::ASPHALT_FRICTION,
            grass_friction: physics::GRASS_FRICTION,
        }
    }
}

/// Per-kind particle physics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Velocity multiplier applied to smoke once per update call.
    pub smoke_drag_per_tick: f32,
    /// Smoke radius growth, units per second.
    pub smoke_growth_rate: f32,
    /// Flame radius shrink, units per second.
    pub flame_shrink_rate: f32,
    /// Downward spark acceleration, units per second squared.
    pub spark_gravity: f32,
    /// Lifetime in seconds when emission options do not set one.
    pub default_life: f32,
    /// Live particle cap; emission beyond it is dropped.
    pub max_particles: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            smoke_drag_per_tick: physics::SMOKE_DRAG_PER_TICK,
            smoke_growth_rate: physics::SMOKE_GROWTH_RATE,
            flame_shrink_rate: physics::FLAME_SHRINK_RATE,
            spark_gravity: physics::SPARK_GRAVITY,
            default_life: physics::DEFAULT_PARTICLE_LIFE,
            max_particles: physics::MAX_PARTICLES,
        }
    }
}

/// Integration settings for the performance estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Integration rate in steps per simulated second.
    pub hz: f32,
    /// Upper bound for any time estimate; also the saturated result.
    pub max_time: f32,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            hz: physics::HZ,
            max_time: physics::MAX_ESTIMATE_TIME,
        }
    }
}

impl SimConfig {
    /// Parse and validate a TOML document. Missing tables and keys fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded sim config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.track.validate()?;
        self.particles.validate()?;
        self.performance.validate()
    }
}

fn require(ok: bool, msg: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidConfig(msg.to_string()))
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl TrackConfig {
    pub fn validate(&self) -> Result<()> {
        require(positive(self.width), "track.width must be finite and > 0")?;
        require(
            self.segments_per_point > 0,
            "track.segments_per_point must be > 0",
        )?;
        require(
            positive(self.grip_mod_off_track),
            "track.grip_mod_off_track must be finite and > 0",
        )?;
        require(
            positive(self.drag_mod_off_track),
            "track.drag_mod_off_track must be finite and > 0",
        )?;
        require(
            positive(self.asphalt_friction) && positive(self.grass_friction),
            "track frictions must be finite and > 0",
        )?;
        require(
            self.asphalt_friction >= self.grass_friction,
            "track.asphalt_friction must be >= track.grass_friction",
        )
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> Result<()> {
        require(
            positive(self.smoke_drag_per_tick) && self.smoke_drag_per_tick <= 1.0,
            "particles.smoke_drag_per_tick must be in (0, 1]",
        )?;
        require(
            self.smoke_growth_rate.is_finite() && self.smoke_growth_rate >= 0.0,
            "particles.smoke_growth_rate must be finite and >= 0",
        )?;
        require(
            self.flame_shrink_rate.is_finite() && self.flame_shrink_rate >= 0.0,
            "particles.flame_shrink_rate must be finite and >= 0",
        )?;
        require(
            self.spark_gravity.is_finite(),
            "particles.spark_gravity must be finite",
        )?;
        require(
            positive(self.default_life),
            "particles.default_life must be finite and > 0",
        )?;
        require(self.max_particles > 0, "particles.max_particles must be > 0")
    }
}

impl PerformanceConfig {
    pub fn validate(&self) -> Result<()> {
        require(positive(self.hz), "performance.hz must be finite and > 0")?;
        require(
            positive(self.max_time),
            "performance.max_time must be finite and > 0",
        )
    }

    pub fn dt(&self) -> f32 {
        1.0 / self.hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_match_stable_constants() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.track.width, 24.0);
        assert_eq!(cfg.track.segments_per_point, 10);
        assert_eq!(cfg.track.grip_mod_off_track, 0.6);
        assert_eq!(cfg.track.drag_mod_off_track, 5.0);
        assert_eq!(cfg.particles.smoke_drag_per_tick, 0.95);
        assert_eq!(cfg.particles.smoke_growth_rate, 10.0);
        assert_eq!(cfg.particles.flame_shrink_rate, 5.0);
        assert_eq!(cfg.particles.spark_gravity, 98.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_document_is_default() -> Result<()> {
        let cfg = SimConfig::from_toml_str("")?;
        assert_eq!(cfg, SimConfig::default());
        Ok(())
    }

    #[test]
    fn partial_document_overrides_only_given_keys() -> Result<()> {
        let cfg = SimConfig::from_toml_str(
            r#"
            [track]
            width = 30.0

            [particles]
            spark_gravity = 50.0
            "#,
        )?;
        assert_relative_eq!(cfg.track.width, 30.0);
        assert_eq!(cfg.track.segments_per_point, 10);
        assert_relative_eq!(cfg.particles.spark_gravity, 50.0);
        assert_relative_eq!(cfg.particles.smoke_growth_rate, 10.0);
        Ok(())
    }

    #[test]
    fn zero_width_rejected() {
        let err = SimConfig::from_toml_str("[track]\nwidth = 0.0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.to_string().contains("track.width"));
    }

    #[test]
    fn grass_grippier_than_asphalt_rejected() {
        let err = SimConfig::from_toml_str("[track]\ngrass_friction = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("asphalt_friction"));
    }

    #[test]
    fn drag_factor_above_one_rejected() {
        let err =
            SimConfig::from_toml_str("[particles]\nsmoke_drag_per_tick = 1.2\n").unwrap_err();
        assert!(err.to_string().contains("smoke_drag_per_tick"));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = SimConfig::from_toml_str("[track\nwidth = 1").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = SimConfig::load("/nonexistent/racecore.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
