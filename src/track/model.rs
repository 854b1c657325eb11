use super::geometry::{closest_on_segment, nearest_segment_linear};
use super::index::SegmentGrid;
use super::layout;
use super::render::TrackRenderData;
use super::spline;
use crate::config::TrackConfig;
use crate::error::Result;
use crate::sim::Float2;

/// Surface under a queried point.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SurfaceKind {
    Asphalt,
    Grass,
}

/// Result of [`TrackModel::classify`]. Recomputed on every call, never stored.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceQuery {
    pub is_on_track: bool,
    /// Traction multiplier for the dynamics step (1.0 on asphalt).
    pub grip_mod: f32,
    /// Resistance multiplier for the dynamics step (1.0 on asphalt).
    pub drag_mod: f32,
    /// Distance to the nearest centerline segment, in meters.
    pub distance_to_center: f32,
    pub surface: SurfaceKind,
    /// Surface friction coefficient (asphalt or grass).
    pub friction: f32,
    /// Index `i` of the nearest segment `path[i]..path[i + 1]`.
    pub nearest_segment: usize,
}

/// Immutable circuit: the smoothed centerline plus surface constants.
///
/// Built once, then only queried. Shared freely between vehicles; it has no
/// interior mutability.
#[derive(Debug, Clone)]
pub struct TrackModel {
    control_points: Vec<Float2>,
    path: Vec<Float2>,
    arcs: Vec<f32>,
    grid: SegmentGrid,
    config: TrackConfig,
}

impl TrackModel {
    /// Smooths `control_points` into a closed centerline.
    ///
    /// Errors:
    /// - `Error::DegenerateTrack` with fewer than 4 control points.
    /// - `Error::InvalidConfig` if `config` fails validation or a point is non-finite.
    pub fn new(control_points: Vec<Float2>, config: TrackConfig) -> Result<Self> {
        config.validate()?;
        let path = spline::try_build(&control_points, config.segments_per_point)?;
        let arcs = spline::arc_lengths(&path);
        let grid = SegmentGrid::build(&path, config.width);

        let (cols, rows) = grid.dimensions();
        tracing::debug!(
            control_points = control_points.len(),
            path_len = path.len(),
            length = arcs.last().copied().unwrap_or(0.0),
            grid_cols = cols,
            grid_rows = rows,
            "built track"
        );

        Ok(Self {
            control_points,
            path,
            arcs,
            grid,
            config,
        })
    }

    /// The stock 20-point circuit with default constants.
    pub fn default_circuit() -> Result<Self> {
        Self::new(layout::default_control_points(), TrackConfig::default())
    }

    /// Classifies `(x, y)` against the track using the segment grid.
    pub fn classify(&self, x: f32, y: f32) -> SurfaceQuery {
        let nearest = self.grid.nearest(&self.path, Float2::new(x, y));
        self.surface_from(nearest)
    }

    /// Same as [`classify`](Self::classify) but by exhaustive scan over every segment.
    pub fn classify_linear(&self, x: f32, y: f32) -> SurfaceQuery {
        let nearest = nearest_segment_linear(&self.path, Float2::new(x, y));
        self.surface_from(nearest)
    }

    pub fn distance_to_center(&self, x: f32, y: f32) -> f32 {
        self.classify(x, y).distance_to_center
    }

    /// Lap progress of the centerline point nearest `(x, y)`, in [0, 1).
    pub fn progress(&self, x: f32, y: f32) -> f32 {
        let p = Float2::new(x, y);
        let length = self.length();
        let Some((seg, _)) = self.grid.nearest(&self.path, p) else {
            return 0.0;
        };
        if length <= 0.0 {
            return 0.0;
        }
        let (t, _) = closest_on_segment(p, self.path[seg], self.path[seg + 1]);
        let arc = self.arcs[seg] + (self.arcs[seg + 1] - self.arcs[seg]) * t;
        let fraction = arc / length;
        if fraction >= 1.0 {
            0.0
        } else {
            fraction
        }
    }

    fn surface_from(&self, nearest: Option<(usize, f32)>) -> SurfaceQuery {
        let (nearest_segment, distance_to_center) = nearest.unwrap_or((0, f32::INFINITY));
        let is_on_track = distance_to_center < self.config.width / 2.0;

        if is_on_track {
            SurfaceQuery {
                is_on_track,
                grip_mod: 1.0,
                drag_mod: 1.0,
                distance_to_center,
                surface: SurfaceKind::Asphalt,
                friction: self.config.asphalt_friction,
                nearest_segment,
            }
        } else {
            SurfaceQuery {
                is_on_track,
                grip_mod: self.config.grip_mod_off_track,
                drag_mod: self.config.drag_mod_off_track,
                distance_to_center,
                surface: SurfaceKind::Grass,
                friction: self.config.grass_friction,
                nearest_segment,
            }
        }
    }

    pub fn control_points(&self) -> &[Float2] {
        &self.control_points
    }

    pub fn path(&self) -> &[Float2] {
        &self.path
    }

    pub fn width(&self) -> f32 {
        self.config.width
    }

    pub fn asphalt_friction(&self) -> f32 {
        self.config.asphalt_friction
    }

    pub fn grass_friction(&self) -> f32 {
        self.config.grass_friction
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// Total centerline length in meters.
    pub fn length(&self) -> f32 {
        self.arcs.last().copied().unwrap_or(0.0)
    }

    /// Everything the renderer needs to draw the circuit, in draw order.
    pub fn render_data(&self) -> TrackRenderData<'_> {
        TrackRenderData::new(&self.path, self.config.width)
    }
}
