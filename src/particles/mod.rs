//! Visual effect particles: tire smoke, exhaust flame and sparks.
//!
//! The vehicle-dynamics step reports events; [`ParticleSystem::emit`] or
//! [`ParticleSystem::emit_event`] turns them into particles and
//! [`ParticleSystem::update`] runs once per frame. All emissions for a frame
//! must happen entirely before or entirely after that frame's update.

mod emit;
mod particle;
mod system;

pub use emit::{EffectEvent, EmissionPreset, EmitOptions};
pub use particle::{Particle, ParticleKind};
pub use system::{ParticleSprite, ParticleSystem};
