//! Circuit geometry: spline smoothing, surface classification and the
//! renderer-facing track description.
//!
//! A [`TrackModel`] is built once from control points and then queried every
//! frame for every vehicle.

mod geometry;
mod index;
mod layout;
mod model;
mod render;

pub mod spline;

pub use geometry::{closest_on_segment, nearest_segment_linear, point_segment_distance};
pub use index::SegmentGrid;
pub use layout::{default_control_points, DEFAULT_CONTROL_POINTS};
pub use model::{SurfaceKind, SurfaceQuery, TrackModel};
pub use render::{LayerStyle, RenderLayer, StartFinish, TrackRenderData, LAYER_ORDER};
