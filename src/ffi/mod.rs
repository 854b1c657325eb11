//! Handle-based FFI for racecore.
//!
//! Functions:
//! - `rc_track_new_default` / `rc_track_free` - stock circuit handle
//! - `rc_track_classify` - surface query at a world position
//! - `rc_track_path` - copy the smoothed centerline into a caller buffer
//! - `rc_particles_*` - particle system lifecycle, emission, update, snapshot
//! - `rc_perf_estimate` - tuning-screen figures
//!
//! # Error Codes
//! - `0`: Success
//! - `-1`: Null pointer
//! - `-2`: Invalid argument
//! - `-3`: Buffer overflow (resize and retry)

use crate::config::ParticleConfig;
use crate::particles::{EffectEvent, EmitOptions, ParticleKind, ParticleSprite, ParticleSystem};
use crate::perf::{self, PerformanceFigures, TuningState};
use crate::sim::Float2;
use crate::track::{SurfaceQuery, TrackModel};

/// Opaque handle to a built track.
pub type RcTrackHandle = *mut std::ffi::c_void;

/// Opaque handle to a particle system.
pub type RcParticlesHandle = *mut std::ffi::c_void;

/// Emission settings for `rc_particles_emit`.
///
/// `speed`, `life`, `size` and `decay` fall back to the kind default when
/// NaN or not positive.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct RcEmitOptions {
    pub angle: f32,
    pub spread: f32,
    pub speed: f32,
    pub life: f32,
    pub size: f32,
    pub decay: f32,
}

impl From<RcEmitOptions> for EmitOptions {
    fn from(raw: RcEmitOptions) -> Self {
        let set = |v: f32| (v.is_finite() && v > 0.0).then_some(v);
        EmitOptions {
            angle: raw.angle,
            spread: raw.spread,
            speed: set(raw.speed),
            life: set(raw.life),
            size: set(raw.size),
            color: None,
            decay: set(raw.decay),
        }
    }
}

// ============================================================================
// Track
// ============================================================================

/// Build the stock circuit.
///
/// # Returns
/// - Valid handle on success (non-null)
/// - Null on error
#[no_mangle]
pub extern "C" fn rc_track_new_default() -> RcTrackHandle {
    match TrackModel::default_circuit() {
        Ok(track) => Box::into_raw(Box::new(track)) as RcTrackHandle,
        Err(err) => {
            tracing::error!(%err, "failed to build default circuit");
            std::ptr::null_mut()
        }
    }
}

/// Free a track handle.
///
/// # Safety
/// - `handle` must be a valid handle returned by `rc_track_new_default`, or null
#[no_mangle]
pub unsafe extern "C" fn rc_track_free(handle: RcTrackHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle as *mut TrackModel));
    }
}

/// Classify a world position against the track.
///
/// # Safety
/// - `handle` must be a valid handle from `rc_track_new_default`
/// - `out` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn rc_track_classify(
    handle: RcTrackHandle,
    x: f32,
    y: f32,
    out: *mut SurfaceQuery,
) -> i32 {
    if handle.is_null() || out.is_null() {
        return -1;
    }
    let track = &*(handle as *const TrackModel);
    *out = track.classify(x, y);
    0
}

/// Copy the smoothed centerline into `buffer`.
///
/// # Returns
/// - `0` on success
/// - `-1` on null pointer
/// - `-3` if buffer too small (`count` contains required size)
///
/// # Safety
/// - `handle` must be a valid handle from `rc_track_new_default`
/// - `buffer` must point to at least `capacity` elements
/// - `count` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn rc_track_path(
    handle: RcTrackHandle,
    buffer: *mut Float2,
    capacity: usize,
    count: *mut usize,
) -> i32 {
    if handle.is_null() || buffer.is_null() || count.is_null() {
        return -1;
    }
    let track = &*(handle as *const TrackModel);
    copy_out(track.path(), buffer, capacity, count)
}

// ============================================================================
// Particles
// ============================================================================

/// Create a particle system with default constants.
///
/// # Safety
/// - `seed` must be null (random seed) or point to a valid `u64`
#[no_mangle]
pub unsafe extern "C" fn rc_particles_new(seed: *const u64) -> RcParticlesHandle {
    let seed = if seed.is_null() { None } else { Some(*seed) };
    let system = ParticleSystem::new(ParticleConfig::default(), seed);
    Box::into_raw(Box::new(system)) as RcParticlesHandle
}

/// Free a particle system handle.
///
/// # Safety
/// - `handle` must be a valid handle returned by `rc_particles_new`, or null
#[no_mangle]
pub unsafe extern "C" fn rc_particles_free(handle: RcParticlesHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle as *mut ParticleSystem));
    }
}

/// Emit `count` particles. `kind`: 0 smoke, 1 flame, 2 spark.
/// A null `options` uses an omnidirectional burst with kind defaults.
///
/// # Safety
/// - `handle` must be a valid handle from `rc_particles_new`
/// - `options` must be null or a valid pointer
#[no_mangle]
pub unsafe extern "C" fn rc_particles_emit(
    handle: RcParticlesHandle,
    x: f32,
    y: f32,
    count: u32,
    kind: u32,
    options: *const RcEmitOptions,
) -> i32 {
    if handle.is_null() {
        return -1;
    }
    let Some(kind) = kind_from_raw(kind) else {
        return -2;
    };
    let options = if options.is_null() {
        EmitOptions::default()
    } else {
        EmitOptions::from(*options)
    };
    let system = &mut *(handle as *mut ParticleSystem);
    system.emit(x, y, count as usize, kind, options);
    0
}

/// Emit the preset for a gameplay event.
/// `event`: 0 wheel spin, 1 braking, 2 off track, 3 exhaust, 4 collision.
///
/// # Safety
/// - `handle` must be a valid handle from `rc_particles_new`
#[no_mangle]
pub unsafe extern "C" fn rc_particles_emit_event(
    handle: RcParticlesHandle,
    x: f32,
    y: f32,
    heading: f32,
    event: u32,
) -> i32 {
    if handle.is_null() {
        return -1;
    }
    let Some(event) = event_from_raw(event) else {
        return -2;
    };
    let system = &mut *(handle as *mut ParticleSystem);
    system.emit_event(x, y, heading, event);
    0
}

/// Advance all particles by `delta_seconds`.
///
/// # Safety
/// - `handle` must be a valid handle from `rc_particles_new`
#[no_mangle]
pub unsafe extern "C" fn rc_particles_update(handle: RcParticlesHandle, delta_seconds: f32) -> i32 {
    if handle.is_null() {
        return -1;
    }
    let system = &mut *(handle as *mut ParticleSystem);
    system.update(delta_seconds);
    0
}

/// Remove every particle.
///
/// # Safety
/// - `handle` must be a valid handle from `rc_particles_new`
#[no_mangle]
pub unsafe extern "C" fn rc_particles_clear(handle: RcParticlesHandle) -> i32 {
    if handle.is_null() {
        return -1;
    }
    let system = &mut *(handle as *mut ParticleSystem);
    system.clear();
    0
}

/// Copy visible particles into `buffer`.
///
/// # Returns
/// - `0` on success
/// - `-1` on null pointer
/// - `-3` if buffer too small (`count` contains required size)
///
/// # Safety
/// - `handle` must be a valid handle from `rc_particles_new`
/// - `buffer` must point to at least `capacity` elements
/// - `count` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn rc_particles_snapshot(
    handle: RcParticlesHandle,
    buffer: *mut ParticleSprite,
    capacity: usize,
    count: *mut usize,
) -> i32 {
    if handle.is_null() || buffer.is_null() || count.is_null() {
        return -1;
    }
    let system = &*(handle as *const ParticleSystem);
    let sprites: Vec<ParticleSprite> = system.sprites().collect();
    copy_out(&sprites, buffer, capacity, count)
}

// ============================================================================
// Performance
// ============================================================================

/// Compute 0-60, quarter mile and top speed for a tune.
///
/// # Safety
/// - `tuning` and `out` must be valid pointers
#[no_mangle]
pub unsafe extern "C" fn rc_perf_estimate(
    tuning: *const TuningState,
    out: *mut PerformanceFigures,
) -> i32 {
    if tuning.is_null() || out.is_null() {
        return -1;
    }
    *out = perf::estimate_all(&*tuning);
    0
}

// --- Helpers ---

unsafe fn copy_out<T: Copy>(src: &[T], buffer: *mut T, capacity: usize, count: *mut usize) -> i32 {
    *count = src.len();
    if src.len() > capacity {
        return -3;
    }
    std::ptr::copy_nonoverlapping(src.as_ptr(), buffer, src.len());
    0
}

fn kind_from_raw(raw: u32) -> Option<ParticleKind> {
    match raw {
        0 => Some(ParticleKind::Smoke),
        1 => Some(ParticleKind::Flame),
        2 => Some(ParticleKind::Spark),
        _ => None,
    }
}

fn event_from_raw(raw: u32) -> Option<EffectEvent> {
    match raw {
        0 => Some(EffectEvent::WheelSpin),
        1 => Some(EffectEvent::Braking),
        2 => Some(EffectEvent::OffTrack),
        3 => Some(EffectEvent::Exhaust),
        4 => Some(EffectEvent::Collision),
        _ => None,
    }
}
