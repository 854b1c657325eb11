use serde::{Deserialize, Serialize};

use super::tuning::TuningState;
use crate::config::PerformanceConfig;
use crate::sim::physics::{self, AIR_DENSITY, G, MPS_TO_KMH, QUARTER_MILE, SIXTY_MPH};

/// Bisection ceiling for the power/drag equilibrium, in m/s.
const MAX_SPEED: f32 = 1000.0;
const BISECTION_STEPS: usize = 64;

/// All three tuning-screen figures for one tune.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceFigures {
    pub zero_to_sixty_s: f32,
    pub quarter_mile_s: f32,
    pub top_speed_kmh: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Target {
    Speed(f32),
    Distance(f32),
}

/// Straight-line launch simulator.
///
/// Longitudinal acceleration is the lesser of the tire limit `grip * g` and
/// the power limit `(P_wheel / v - F_aero - F_roll) / m`, cut to zero at the
/// gear-limited speed. It is integrated from rest at a fixed step of
/// `1 / hz`. Every estimate is a pure function of the tune: nothing is cached
/// between calls.
///
/// Non-physical tunes (non-positive power, mass or grip, non-finite fields)
/// saturate: times become `max_time` and top speed becomes 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceSimulator {
    config: PerformanceConfig,
}

impl PerformanceSimulator {
    pub fn new(config: PerformanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PerformanceConfig {
        &self.config
    }

    /// Seconds from rest to 60 mph (26.8224 m/s).
    pub fn zero_to_sixty(&self, tuning: &TuningState) -> f32 {
        self.time_to(tuning, Target::Speed(SIXTY_MPH))
    }

    /// Seconds from rest to cover a quarter mile (402.336 m).
    pub fn quarter_mile(&self, tuning: &TuningState) -> f32 {
        self.time_to(tuning, Target::Distance(QUARTER_MILE))
    }

    /// Maximum sustainable speed in km/h.
    pub fn top_speed(&self, tuning: &TuningState) -> f32 {
        if !tuning.is_physical() {
            tracing::warn!(?tuning, "non-physical tune, top speed saturated to 0");
            return 0.0;
        }

        let wheel_power = tuning.wheel_power_w();
        let surplus = |v: f32| wheel_power - resistance(tuning, v) * v;

        let drag_limited = if surplus(MAX_SPEED) > 0.0 {
            MAX_SPEED
        } else {
            let (mut lo, mut hi) = (0.0_f32, MAX_SPEED);
            for _ in 0..BISECTION_STEPS {
                let mid = 0.5 * (lo + hi);
                if surplus(mid) > 0.0 {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            lo
        };

        drag_limited.min(tuning.gear_limited_speed()) * MPS_TO_KMH
    }

    pub fn estimate(&self, tuning: &TuningState) -> PerformanceFigures {
        PerformanceFigures {
            zero_to_sixty_s: self.zero_to_sixty(tuning),
            quarter_mile_s: self.quarter_mile(tuning),
            top_speed_kmh: self.top_speed(tuning),
        }
    }

    fn time_to(&self, tuning: &TuningState, target: Target) -> f32 {
        let max_time = self.config.max_time;
        if !tuning.is_physical() {
            tracing::warn!(?tuning, max_time, "non-physical tune, time saturated");
            return max_time;
        }

        let dt = self.config.dt();
        let steps = (max_time / dt).ceil() as usize;
        let gear_limit = tuning.gear_limited_speed();
        let (mut v, mut x) = (0.0_f32, 0.0_f32);

        for n in 0..steps {
            let a = acceleration(tuning, v, gear_limit);
            let v_next = physics::step_velocity(v, a, dt).min(gear_limit);
            let x_next = x + 0.5 * (v + v_next) * dt;

            let (prev, next, goal) = match target {
                Target::Speed(goal) => (v, v_next, goal),
                Target::Distance(goal) => (x, x_next, goal),
            };
            if next >= goal {
                let frac = if next > prev {
                    (goal - prev) / (next - prev)
                } else {
                    0.0
                };
                return ((n as f32 + frac) * dt).min(max_time);
            }

            // Stalled below the target: it will never be reached.
            let stalled = match target {
                Target::Speed(_) => v_next <= v,
                Target::Distance(_) => v_next <= 0.0,
            };
            if stalled {
                break;
            }

            v = v_next;
            x = x_next;
        }

        max_time
    }
}

/// Aerodynamic drag plus rolling resistance at speed `v`, in newtons.
fn resistance(tuning: &TuningState, v: f32) -> f32 {
    let aero = 0.5 * AIR_DENSITY * tuning.drag_coefficient * tuning.frontal_area_m2 * v * v;
    let rolling = tuning.rolling_resistance * tuning.mass_kg * G;
    aero + rolling
}

fn acceleration(tuning: &TuningState, v: f32, gear_limit: f32) -> f32 {
    let grip_limited = tuning.tire_grip * G;
    let power_limited = if v <= physics::EPSILON {
        f32::INFINITY
    } else {
        (tuning.wheel_power_w() / v - resistance(tuning, v)) / tuning.mass_kg
    };

    let a = grip_limited.min(power_limited);
    if v >= gear_limit {
        a.min(0.0)
    } else {
        a
    }
}

/// [`PerformanceSimulator::zero_to_sixty`] with default integration settings.
pub fn estimate_zero_to_sixty(tuning: &TuningState) -> f32 {
    PerformanceSimulator::default().zero_to_sixty(tuning)
}

/// [`PerformanceSimulator::quarter_mile`] with default integration settings.
pub fn estimate_quarter_mile(tuning: &TuningState) -> f32 {
    PerformanceSimulator::default().quarter_mile(tuning)
}

/// [`PerformanceSimulator::top_speed`] with default integration settings.
pub fn estimate_top_speed(tuning: &TuningState) -> f32 {
    PerformanceSimulator::default().top_speed(tuning)
}

pub fn estimate_all(tuning: &TuningState) -> PerformanceFigures {
    PerformanceSimulator::default().estimate(tuning)
}
