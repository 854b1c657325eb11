use crate::config::ParticleConfig;
use crate::sim::{Float2, Rgb};

/// Selects the per-tick physics branch.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// Grows, fades and loses speed every tick.
    Smoke,
    /// Shrinks and fades, no drag.
    Flame,
    /// Falls under exaggerated gravity and fades.
    Spark,
}

impl ParticleKind {
    pub const fn default_color(self) -> Rgb {
        match self {
            ParticleKind::Smoke => Rgb::GREY,
            ParticleKind::Flame | ParticleKind::Spark => Rgb::ORANGE,
        }
    }

    pub const fn default_size(self) -> f32 {
        match self {
            ParticleKind::Smoke => 6.0,
            ParticleKind::Flame => 5.0,
            ParticleKind::Spark => 2.0,
        }
    }

    /// Base launch speed in meters per second.
    pub const fn default_speed(self) -> f32 {
        match self {
            ParticleKind::Smoke => 20.0,
            ParticleKind::Flame => 40.0,
            ParticleKind::Spark => 120.0,
        }
    }
}

/// A single visual particle. Owned by `ParticleSystem`; never handed out mutably.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Float2,
    pub velocity: Float2,
    /// Seconds remaining.
    pub life: f32,
    /// Seconds at emission.
    pub max_life: f32,
    pub size: f32,
    pub color: Rgb,
    /// Opacity in [0, 1].
    pub alpha: f32,
    /// Alpha lost per second.
    pub decay: f32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Fully opaque particle whose alpha reaches zero exactly at expiry.
    pub fn new(
        kind: ParticleKind,
        position: Float2,
        velocity: Float2,
        life: f32,
        size: f32,
        color: Rgb,
    ) -> Self {
        Self {
            position,
            velocity,
            life,
            max_life: life,
            size,
            color,
            alpha: 1.0,
            decay: 1.0 / life,
            kind,
        }
    }

    pub fn with_decay(mut self, decay: f32) -> Self {
        self.decay = decay;
        self
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    /// Advances the particle by `dt` seconds. Returns false once expired.
    ///
    /// Life is spent first; an expired particle is not integrated. Smoke drag
    /// is applied once per call, independent of `dt`.
    pub fn tick(&mut self, dt: f32, config: &ParticleConfig) -> bool {
        self.life -= dt;
        if self.life <= 0.0 {
            return false;
        }

        self.position += self.velocity * dt;

        match self.kind {
            ParticleKind::Smoke => {
                self.size += config.smoke_growth_rate * dt;
                self.velocity = self.velocity * config.smoke_drag_per_tick;
            }
            ParticleKind::Flame => {
                self.size = (self.size - config.flame_shrink_rate * dt).max(0.0);
            }
            ParticleKind::Spark => {
                self.velocity.y += config.spark_gravity * dt;
            }
        }
        self.alpha = (self.alpha - self.decay * dt).max(0.0);

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-5;

    fn make(kind: ParticleKind) -> Particle {
        Particle::new(
            kind,
            Float2::ZERO,
            Float2::new(10.0, 0.0),
            1.0,
            kind.default_size(),
            kind.default_color(),
        )
    }

    #[test]
    fn decay_defaults_to_inverse_life() {
        let p = Particle::new(ParticleKind::Flame, Float2::ZERO, Float2::ZERO, 0.5, 3.0, Rgb::ORANGE);
        assert_relative_eq!(p.decay, 2.0, epsilon = TOLERANCE);
        assert_relative_eq!(p.max_life, 0.5, epsilon = TOLERANCE);
        assert_relative_eq!(p.alpha, 1.0);
    }

    #[test]
    fn tick_integrates_position() {
        let cfg = ParticleConfig::default();
        let mut p = make(ParticleKind::Flame);
        assert!(p.tick(0.1, &cfg));
        assert_relative_eq!(p.position.x, 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(p.life, 0.9, epsilon = TOLERANCE);
    }

    #[test]
    fn smoke_grows_and_drags() {
        let cfg = ParticleConfig::default();
        let mut p = make(ParticleKind::Smoke);
        let size = p.size;
        assert!(p.tick(0.1, &cfg));
        assert_relative_eq!(p.size, size + 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(p.velocity.x, 9.5, epsilon = TOLERANCE);
        assert_relative_eq!(p.alpha, 0.9, epsilon = TOLERANCE);
    }

    #[test]
    fn smoke_drag_is_per_call_not_per_second() {
        let cfg = ParticleConfig::default();
        let mut a = make(ParticleKind::Smoke);
        let mut b = make(ParticleKind::Smoke);
        a.tick(0.01, &cfg);
        b.tick(0.2, &cfg);
        assert_relative_eq!(a.velocity.x, b.velocity.x, epsilon = TOLERANCE);
    }

    #[test]
    fn flame_shrinks_without_drag() {
        let cfg = ParticleConfig::default();
        let mut p = make(ParticleKind::Flame);
        assert!(p.tick(0.2, &cfg));
        assert_relative_eq!(p.size, 4.0, epsilon = TOLERANCE);
        assert_relative_eq!(p.velocity.x, 10.0, epsilon = TOLERANCE);
    }

    #[test]
    fn flame_size_floors_at_zero() {
        let cfg = ParticleConfig::default();
        let mut p = make(ParticleKind::Flame).with_decay(0.0);
        p.life = 100.0;
        for _ in 0..50 {
            p.tick(0.1, &cfg);
        }
        assert_relative_eq!(p.size, 0.0);
    }

    #[test]
    fn spark_falls() {
        let cfg = ParticleConfig::default();
        let mut p = make(ParticleKind::Spark);
        assert!(p.tick(0.1, &cfg));
        assert_relative_eq!(p.velocity.y, 9.8, epsilon = 1e-4);
        assert_relative_eq!(p.velocity.x, 10.0, epsilon = TOLERANCE);
    }

    #[test]
    fn expired_particle_is_not_integrated() {
        let cfg = ParticleConfig::default();
        let mut p = make(ParticleKind::Spark);
        assert!(!p.tick(1.5, &cfg));
        assert_eq!(p.position, Float2::ZERO);
    }

    #[test]
    fn default_colors() {
        assert_eq!(ParticleKind::Smoke.default_color(), Rgb::GREY);
        assert_eq!(ParticleKind::Flame.default_color(), Rgb::ORANGE);
        assert_eq!(ParticleKind::Spark.default_color(), Rgb::ORANGE);
    }
}
