//! Pure 2D math primitives and physics constants.
//!
//! This module has no dependencies on the rest of the crate.

mod color;
mod math;

pub mod physics;

pub use color::Rgb;
pub use math::Float2;
pub use physics::{EPSILON, G, HZ};

/// World-space point in meters. Control points, path samples, particle and
/// vehicle positions all share this type.
pub type Point = Float2;
