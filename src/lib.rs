//! racecore - simulation core for a top-down racing game.
//!
//! # Architecture
//!
//! Layered modules with strict inward-only dependencies:
//!
//! - **sim**: Math and physics primitives (Float2, Rgb, shared constants)
//! - **config** / **error**: Tunable constants from TOML, crate error type
//! - **track**: Spline smoothing, surface classification, render descriptor
//! - **particles**: Smoke, flame and spark effects
//! - **perf**: Straight-line performance estimates for the tuning screen
//! - **ffi**: C FFI bindings
//!
//! Vehicle dynamics, input, rendering and UI live outside this crate; they
//! query [`TrackModel`], feed [`ParticleSystem`] and read [`PerformanceFigures`].
//!
//! # Usage
//!
//! ```ignore
//! use racecore::{track::TrackModel, perf::{estimate_all, TuningState}};
//! ```
//!
//! For C/C#/Unity, link the cdylib and use `rc_*` FFI functions.

pub mod config;
pub mod error;
pub mod particles;
pub mod perf;
pub mod sim;
pub mod track;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types at crate root
pub use config::SimConfig;
pub use error::{Error, Result};
pub use particles::{EffectEvent, EmitOptions, ParticleKind, ParticleSystem};
pub use perf::{PerformanceFigures, TuningState};
pub use sim::{Float2, Point, Rgb};
pub use track::{SurfaceQuery, TrackModel};
