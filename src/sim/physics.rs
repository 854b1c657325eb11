//! Physical and tuning constants shared by the track, particle and
//! performance layers.
//!
//! These are the stable configuration surface: changing any of them changes
//! observable game behaviour. `crate::config` defaults are built from them.

pub const G: f32 = 9.80665;
pub const EPSILON: f32 = 1.192_093e-7;

// Track
pub const TRACK_WIDTH: f32 = 24.0;
pub const SEGMENTS_PER_POINT: usize = 10;
pub const GRIP_MOD_OFF_TRACK: f32 = 0.6;
pub const DRAG_MOD_OFF_TRACK: f32 = 5.0;
pub const ASPHALT_FRICTION: f32 = 1.0;
pub const GRASS_FRICTION: f32 = 0.6;

// Particles
pub const SMOKE_DRAG_PER_TICK: f32 = 0.95;
pub const SMOKE_GROWTH_RATE: f32 = 10.0;
pub const FLAME_SHRINK_RATE: f32 = 5.0;
pub const SPARK_GRAVITY: f32 = 98.0;
pub const DEFAULT_PARTICLE_LIFE: f32 = 1.0;
pub const MAX_PARTICLES: usize = 4096;

// Performance estimation
pub const HZ: f32 = 100.0;
pub const MAX_ESTIMATE_TIME: f32 = 60.0;
pub const AIR_DENSITY: f32 = 1.225;
pub const SIXTY_MPH: f32 = 26.8224;
pub const QUARTER_MILE: f32 = 402.336;
pub const MPS_TO_KMH: f32 = 3.6;

/// Advances a longitudinal speed by one explicit Euler step.
///
/// Speed never goes negative: a decelerating body stops, it does not reverse.
pub fn step_velocity(velocity: f32, acceleration: f32, dt: f32) -> f32 {
    (velocity + acceleration * dt).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-4;

    #[test]
    fn constants_gravity_matches_standard() {
        assert_relative_eq!(G, 9.80665, epsilon = TOLERANCE);
    }

    #[test]
    fn off_track_modifiers_penalize() {
        assert!(GRIP_MOD_OFF_TRACK < 1.0);
        assert!(DRAG_MOD_OFF_TRACK > 1.0);
        assert!(ASPHALT_FRICTION >= GRASS_FRICTION);
    }

    #[test]
    fn sixty_mph_in_meters_per_second() {
        assert_relative_eq!(SIXTY_MPH * MPS_TO_KMH, 96.56064, epsilon = TOLERANCE);
    }

    #[test]
    fn step_velocity_accelerates() {
        assert_relative_eq!(step_velocity(10.0, 5.0, 0.1), 10.5, epsilon = TOLERANCE);
    }

    #[test]
    fn step_velocity_clamps_to_zero() {
        assert_relative_eq!(step_velocity(1.0, -50.0, 0.1), 0.0, epsilon = TOLERANCE);
    }
}
