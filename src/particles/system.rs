use rand::{rng, rngs::StdRng, Rng, SeedableRng};

use super::emit::{EffectEvent, EmitOptions};
use super::particle::{Particle, ParticleKind};
use crate::config::ParticleConfig;
use crate::sim::{Float2, Rgb};

/// What the renderer draws for one live particle: a filled circle.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParticleSprite {
    pub position: Float2,
    pub size: f32,
    pub color: Rgb,
    pub alpha: f32,
}

/// Owner of every live effect particle for one race session.
///
/// Particles live in a dense arena. `update` walks it back to front and
/// swap-removes expired entries, so each live particle is advanced exactly
/// once per call and removal is O(1). Emission is fire-and-forget: callers
/// never get particle handles back.
///
/// The random source is injected so effects can be replayed from a seed.
#[derive(Debug, Clone)]
pub struct ParticleSystem<R = StdRng> {
    particles: Vec<Particle>,
    config: ParticleConfig,
    rng: R,
}

impl ParticleSystem<StdRng> {
    /// `seed: None` draws a seed from the thread RNG.
    pub fn new(config: ParticleConfig, seed: Option<u64>) -> Self {
        let rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };
        Self::with_rng(config, rng)
    }
}

impl Default for ParticleSystem<StdRng> {
    fn default() -> Self {
        Self::new(ParticleConfig::default(), None)
    }
}

impl<R: Rng> ParticleSystem<R> {
    pub fn with_rng(config: ParticleConfig, rng: R) -> Self {
        Self {
            particles: Vec::new(),
            config,
            rng,
        }
    }

    /// Spawns `count` particles of `kind` at `(x, y)`.
    ///
    /// Each gets a launch angle uniform in `angle ± spread / 2` and a speed of
    /// `speed * U(0.5, 1.5)`. `count == 0` is a no-op. Emission past
    /// `max_particles` is dropped.
    pub fn emit(&mut self, x: f32, y: f32, count: usize, kind: ParticleKind, options: EmitOptions) {
        if count == 0 {
            return;
        }

        let room = self.config.max_particles.saturating_sub(self.particles.len());
        if room < count {
            tracing::warn!(
                requested = count,
                room,
                max = self.config.max_particles,
                "particle cap reached, truncating emission"
            );
        }
        let count = count.min(room);
        if count == 0 {
            return;
        }

        let life = options
            .life
            .filter(|l| l.is_finite() && *l > 0.0)
            .unwrap_or(self.config.default_life);
        let base_speed = options
            .speed
            .filter(|s| s.is_finite())
            .unwrap_or_else(|| kind.default_speed());
        let size = options.size.unwrap_or_else(|| kind.default_size());
        let color = options.color.unwrap_or_else(|| kind.default_color());
        let half_spread = if options.spread.is_finite() {
            options.spread.abs() / 2.0
        } else {
            0.0
        };
        let base_angle = if options.angle.is_finite() {
            options.angle
        } else {
            0.0
        };
        let origin = Float2::new(x, y);

        self.particles.reserve(count);
        for _ in 0..count {
            let angle = base_angle + self.rng.random_range(-half_spread..=half_spread);
            let speed = base_speed * self.rng.random_range(0.5..1.5);
            let velocity = Float2::from_angle(angle) * speed;

            let mut particle = Particle::new(kind, origin, velocity, life, size, color);
            if let Some(decay) = options.decay {
                particle = particle.with_decay(decay);
            }
            self.particles.push(particle);
        }
    }

    /// Emits the preset for `event` from a vehicle at `(x, y)` facing `heading`.
    pub fn emit_event(&mut self, x: f32, y: f32, heading: f32, event: EffectEvent) {
        let preset = event.preset(heading);
        self.emit(x, y, preset.count, preset.kind, preset.options);
    }

    /// Advances every live particle by `delta_seconds` and drops the expired ones.
    ///
    /// Call once per frame with the real frame delta. Negative or non-finite
    /// deltas are treated as zero.
    pub fn update(&mut self, delta_seconds: f32) {
        let dt = if delta_seconds.is_finite() && delta_seconds >= 0.0 {
            delta_seconds
        } else {
            tracing::warn!(delta_seconds, "invalid particle time step, using 0");
            0.0
        };

        let mut i = self.particles.len();
        while i > 0 {
            i -= 1;
            if !self.particles[i].tick(dt, &self.config) {
                // The element moved into `i` comes from the already-visited tail.
                self.particles.swap_remove(i);
            }
        }
    }

    /// Removes every particle. Idempotent.
    pub fn clear(&mut self) {
        if !self.particles.is_empty() {
            tracing::debug!(removed = self.particles.len(), "cleared particles");
        }
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter()
    }

    /// Render snapshot of visible particles; fully transparent ones are skipped.
    pub fn sprites(&self) -> impl Iterator<Item = ParticleSprite> + '_ {
        self.particles
            .iter()
            .filter(|p| p.alpha > 0.0)
            .map(|p| ParticleSprite {
                position: p.position,
                size: p.size,
                color: p.color,
                alpha: p.alpha,
            })
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn system() -> ParticleSystem {
        ParticleSystem::new(ParticleConfig::default(), Some(7))
    }

    #[test]
    fn emit_count() {
        let mut ps = system();
        ps.emit(1.0, 2.0, 5, ParticleKind::Smoke, EmitOptions::default());
        assert_eq!(ps.len(), 5);
        for p in ps.iter() {
            assert_eq!(p.position, Float2::new(1.0, 2.0));
            assert_relative_eq!(p.life, 1.0);
            assert_relative_eq!(p.max_life, 1.0);
            assert_relative_eq!(p.decay, 1.0);
            assert_eq!(p.color, Rgb::GREY);
        }
    }

    #[test]
    fn emit_zero_is_noop() {
        let mut ps = system();
        ps.emit(0.0, 0.0, 0, ParticleKind::Spark, EmitOptions::default());
        assert!(ps.is_empty());
    }

    #[test]
    fn emitted_speed_within_band() {
        let mut ps = system();
        let opts = EmitOptions::directed(0.0, 0.0).with_speed(10.0);
        ps.emit(0.0, 0.0, 200, ParticleKind::Flame, opts);
        for p in ps.iter() {
            assert!(p.speed() >= 5.0 - 1e-3 && p.speed() <= 15.0 + 1e-3);
            // Zero spread: every particle launches along +x.
            assert_relative_eq!(p.velocity.y, 0.0, epsilon = 1e-4);
            assert!(p.velocity.x > 0.0);
        }
    }

    #[test]
    fn emitted_angles_within_spread() {
        let mut ps = system();
        let opts = EmitOptions::directed(1.0, 0.4);
        ps.emit(0.0, 0.0, 200, ParticleKind::Spark, opts);
        for p in ps.iter() {
            let angle = p.velocity.angle();
            assert!(angle >= 0.8 - 1e-4 && angle <= 1.2 + 1e-4, "angle {angle}");
        }
    }

    #[test]
    fn options_override_defaults() {
        let mut ps = system();
        let opts = EmitOptions::default()
            .with_life(2.0)
            .with_size(9.0)
            .with_color(Rgb::WHITE)
            .with_decay(0.1);
        ps.emit(0.0, 0.0, 1, ParticleKind::Flame, opts);
        let p = ps.iter().next().unwrap();
        assert_relative_eq!(p.max_life, 2.0);
        assert_relative_eq!(p.size, 9.0);
        assert_eq!(p.color, Rgb::WHITE);
        assert_relative_eq!(p.decay, 0.1);
    }

    #[test]
    fn seeded_systems_are_deterministic() {
        let mut a = system();
        let mut b = system();
        a.emit(0.0, 0.0, 10, ParticleKind::Smoke, EmitOptions::default());
        b.emit(0.0, 0.0, 10, ParticleKind::Smoke, EmitOptions::default());
        let va: Vec<_> = a.iter().cloned().collect();
        let vb: Vec<_> = b.iter().cloned().collect();
        assert_eq!(va, vb);
    }

    #[test]
    fn update_removes_only_expired() {
        let mut ps = system();
        ps.emit(0.0, 0.0, 3, ParticleKind::Smoke, EmitOptions::default().with_life(0.5));
        ps.emit(0.0, 0.0, 4, ParticleKind::Flame, EmitOptions::default().with_life(2.0));
        ps.emit(0.0, 0.0, 2, ParticleKind::Spark, EmitOptions::default().with_life(0.5));
        ps.update(1.0);
        assert_eq!(ps.len(), 4);
        assert!(ps.iter().all(|p| p.kind == ParticleKind::Flame));
        for p in ps.iter() {
            assert_relative_eq!(p.life, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn invalid_delta_is_zero() {
        let mut ps = system();
        ps.emit(0.0, 0.0, 2, ParticleKind::Flame, EmitOptions::default());
        ps.update(f32::NAN);
        ps.update(-1.0);
        assert_eq!(ps.len(), 2);
        for p in ps.iter() {
            assert_relative_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn cap_truncates_emission() {
        let config = ParticleConfig {
            max_particles: 8,
            ..ParticleConfig::default()
        };
        let mut ps = ParticleSystem::new(config, Some(1));
        ps.emit(0.0, 0.0, 5, ParticleKind::Smoke, EmitOptions::default());
        ps.emit(0.0, 0.0, 5, ParticleKind::Smoke, EmitOptions::default());
        assert_eq!(ps.len(), 8);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut ps = system();
        ps.emit(0.0, 0.0, 10, ParticleKind::Spark, EmitOptions::default());
        ps.clear();
        assert!(ps.is_empty());
        ps.clear();
        assert!(ps.is_empty());
    }

    #[test]
    fn sprites_skip_transparent() {
        let mut ps = system();
        ps.emit(0.0, 0.0, 3, ParticleKind::Flame, EmitOptions::default());
        ps.emit(0.0, 0.0, 2, ParticleKind::Flame, EmitOptions::default().with_decay(50.0));
        ps.update(0.1);
        assert_eq!(ps.len(), 5);
        assert_eq!(ps.sprites().count(), 3);
    }

    #[test]
    fn emit_event_uses_preset() {
        let mut ps = system();
        ps.emit_event(0.0, 0.0, 0.0, EffectEvent::Collision);
        let preset = EffectEvent::Collision.preset(0.0);
        assert_eq!(ps.len(), preset.count);
        assert!(ps.iter().all(|p| p.kind == ParticleKind::Spark));
    }
}
