use serde::{Deserialize, Serialize};

/// Vehicle parameters exposed on the tuning screen.
///
/// Values are plain SI units. The estimators read but never modify them.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningState {
    /// Peak engine power in kilowatts.
    pub power_kw: f32,
    /// Curb weight plus driver in kilograms.
    pub mass_kg: f32,
    /// Fraction of engine power reaching the wheels.
    pub drivetrain_efficiency: f32,
    /// Peak tire friction coefficient.
    pub tire_grip: f32,
    pub drag_coefficient: f32,
    pub frontal_area_m2: f32,
    pub rolling_resistance: f32,
    pub redline_rpm: f32,
    pub top_gear_ratio: f32,
    pub final_drive: f32,
    pub wheel_radius_m: f32,
}

impl TuningState {
    /// Stock tune with power and weight replaced.
    pub fn new(power_kw: f32, mass_kg: f32) -> Self {
        Self {
            power_kw,
            mass_kg,
            ..Self::default()
        }
    }

    pub fn with_power(mut self, power_kw: f32) -> Self {
        self.power_kw = power_kw;
        self
    }

    pub fn with_mass(mut self, mass_kg: f32) -> Self {
        self.mass_kg = mass_kg;
        self
    }

    pub fn with_grip(mut self, tire_grip: f32) -> Self {
        self.tire_grip = tire_grip;
        self
    }

    pub fn with_drag(mut self, drag_coefficient: f32) -> Self {
        self.drag_coefficient = drag_coefficient;
        self
    }

    /// Power delivered to the road, in watts.
    pub fn wheel_power_w(&self) -> f32 {
        self.power_kw * 1000.0 * self.drivetrain_efficiency
    }

    /// Road speed at redline in top gear, in m/s.
    pub fn gear_limited_speed(&self) -> f32 {
        let wheel_rps = self.redline_rpm / 60.0 / (self.top_gear_ratio * self.final_drive);
        wheel_rps * std::f32::consts::TAU * self.wheel_radius_m
    }

    /// True when every field is finite and the model can produce a meaningful estimate.
    pub fn is_physical(&self) -> bool {
        let finite = [
            self.power_kw,
            self.mass_kg,
            self.drivetrain_efficiency,
            self.tire_grip,
            self.drag_coefficient,
            self.frontal_area_m2,
            self.rolling_resistance,
            self.redline_rpm,
            self.top_gear_ratio,
            self.final_drive,
            self.wheel_radius_m,
        ]
        .iter()
        .all(|v| v.is_finite());

        finite
            && self.power_kw > 0.0
            && self.mass_kg > 0.0
            && self.drivetrain_efficiency > 0.0
            && self.tire_grip > 0.0
            && self.drag_coefficient >= 0.0
            && self.frontal_area_m2 >= 0.0
            && self.rolling_resistance >= 0.0
            && self.redline_rpm > 0.0
            && self.top_gear_ratio > 0.0
            && self.final_drive > 0.0
            && self.wheel_radius_m > 0.0
    }
}

impl Default for TuningState {
    fn default() -> Self {
        Self {
            power_kw: 110.0,
            mass_kg: 1250.0,
            drivetrain_efficiency: 0.85,
            tire_grip: 1.0,
            drag_coefficient: 0.32,
            frontal_area_m2: 2.2,
            rolling_resistance: 0.012,
            redline_rpm: 6800.0,
            top_gear_ratio: 0.82,
            final_drive: 3.9,
            wheel_radius_m: 0.31,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new() {
        let tuning = TuningState::new(200.0, 1100.0);
        assert_eq!(tuning.power_kw, 200.0);
        assert_eq!(tuning.mass_kg, 1100.0);
        assert_eq!(tuning.tire_grip, TuningState::default().tire_grip);
    }

    #[test]
    fn test_default_is_physical() {
        assert!(TuningState::default().is_physical());
    }

    #[test]
    fn test_non_physical_inputs() {
        assert!(!TuningState::default().with_power(0.0).is_physical());
        assert!(!TuningState::default().with_mass(-5.0).is_physical());
        assert!(!TuningState::default().with_power(f32::NAN).is_physical());
        assert!(!TuningState::default().with_grip(0.0).is_physical());
    }

    #[test]
    fn test_gear_limited_speed() {
        let tuning = TuningState {
            redline_rpm: 6000.0,
            top_gear_ratio: 1.0,
            final_drive: 1.0,
            wheel_radius_m: 0.5,
            ..TuningState::default()
        };
        // 100 rev/s * pi m/rev
        assert_relative_eq!(
            tuning.gear_limited_speed(),
            100.0 * std::f32::consts::PI,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_wheel_power() {
        let tuning = TuningState::default();
        assert_relative_eq!(tuning.wheel_power_w(), 93_500.0, epsilon = 1.0);
    }
}
