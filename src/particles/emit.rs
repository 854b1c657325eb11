use std::f32::consts::{PI, TAU};

use super::particle::ParticleKind;
use crate::sim::Rgb;

/// Per-call emission settings. Unset fields fall back to kind defaults.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EmitOptions {
    /// Centre of the launch cone, radians from +x.
    pub angle: f32,
    /// Full cone width in radians; launch angles are uniform in `angle ± spread / 2`.
    pub spread: f32,
    /// Base launch speed; each particle gets `speed * U(0.5, 1.5)`.
    pub speed: Option<f32>,
    /// Lifetime in seconds.
    pub life: Option<f32>,
    pub size: Option<f32>,
    pub color: Option<Rgb>,
    /// Alpha loss per second; defaults to `1 / life`.
    pub decay: Option<f32>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            angle: 0.0,
            spread: TAU,
            speed: None,
            life: None,
            size: None,
            color: None,
            decay: None,
        }
    }
}

impl EmitOptions {
    pub fn directed(angle: f32, spread: f32) -> Self {
        Self {
            angle,
            spread,
            ..Self::default()
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_life(mut self, life: f32) -> Self {
        self.life = Some(life);
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_decay(mut self, decay: f32) -> Self {
        self.decay = Some(decay);
        self
    }
}

/// Gameplay and physics events that produce effects.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EffectEvent {
    /// Driven wheels slipping under throttle.
    WheelSpin,
    /// Hard deceleration.
    Braking,
    /// Wheels on grass.
    OffTrack,
    /// Backfire from the exhaust.
    Exhaust,
    /// Impact against a barrier or another car.
    Collision,
}

/// What an [`EffectEvent`] emits.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EmissionPreset {
    pub kind: ParticleKind,
    pub count: usize,
    pub options: EmitOptions,
}

impl EffectEvent {
    /// Preset for a vehicle facing `heading` radians. Smoke and flame trail
    /// behind the car; sparks spray in every direction.
    pub fn preset(self, heading: f32) -> EmissionPreset {
        let behind = heading + PI;
        match self {
            EffectEvent::WheelSpin => EmissionPreset {
                kind: ParticleKind::Smoke,
                count: 3,
                options: EmitOptions::directed(behind, PI / 3.0)
                    .with_speed(15.0)
                    .with_life(1.2),
            },
            EffectEvent::Braking => EmissionPreset {
                kind: ParticleKind::Smoke,
                count: 2,
                options: EmitOptions::directed(behind, PI / 4.0)
                    .with_speed(10.0)
                    .with_life(0.8)
                    .with_size(4.0),
            },
            EffectEvent::OffTrack => EmissionPreset {
                kind: ParticleKind::Smoke,
                count: 4,
                options: EmitOptions::directed(behind, PI / 2.0)
                    .with_speed(12.0)
                    .with_life(0.6)
                    .with_color(Rgb::DUST),
            },
            EffectEvent::Exhaust => EmissionPreset {
                kind: ParticleKind::Flame,
                count: 2,
                options: EmitOptions::directed(behind, PI / 8.0)
                    .with_speed(30.0)
                    .with_life(0.25),
            },
            EffectEvent::Collision => EmissionPreset {
                kind: ParticleKind::Spark,
                count: 12,
                options: EmitOptions::default().with_speed(150.0).with_life(0.5),
            },
        }
    }
}
