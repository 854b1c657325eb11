//! Renderer-facing description of the circuit.
//!
//! The core never draws. It hands the renderer the centerline, the width and
//! a fixed layer order; stroking each layer along the path in order reproduces
//! the intended look: grass border, dashed two-tone curb, asphalt body,
//! racing-line groove, then the start/finish checkerboard on top.

use crate::sim::{Float2, Rgb};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderLayer {
    GrassBorder,
    Curb,
    Asphalt,
    RacingLine,
    StartFinish,
}

/// Draw order, bottom to top.
pub const LAYER_ORDER: [RenderLayer; 5] = [
    RenderLayer::GrassBorder,
    RenderLayer::Curb,
    RenderLayer::Asphalt,
    RenderLayer::RacingLine,
    RenderLayer::StartFinish,
];

const GRASS_MARGIN: f32 = 16.0;
const CURB_MARGIN: f32 = 4.0;
const CURB_DASH: f32 = 6.0;
const GROOVE_WIDTH: f32 = 2.0;
const CHECKER_SQUARE: f32 = 3.0;

/// Stroke parameters for one layer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayerStyle {
    pub layer: RenderLayer,
    /// Full stroke width in meters, centred on the path.
    pub stroke_width: f32,
    /// Primary color, then the alternate for dashed or checkered layers.
    pub colors: [Rgb; 2],
    /// `[on, off]` dash lengths in meters; `None` for a solid stroke.
    pub dash: Option<[f32; 2]>,
}

impl LayerStyle {
    pub fn for_layer(layer: RenderLayer, track_width: f32) -> Self {
        match layer {
            RenderLayer::GrassBorder => Self {
                layer,
                stroke_width: track_width + GRASS_MARGIN,
                colors: [Rgb::GRASS, Rgb::GRASS],
                dash: None,
            },
            RenderLayer::Curb => Self {
                layer,
                stroke_width: track_width + CURB_MARGIN,
                colors: [Rgb::RED, Rgb::WHITE],
                dash: Some([CURB_DASH, CURB_DASH]),
            },
            RenderLayer::Asphalt => Self {
                layer,
                stroke_width: track_width,
                colors: [Rgb::ASPHALT, Rgb::ASPHALT],
                dash: None,
            },
            RenderLayer::RacingLine => Self {
                layer,
                stroke_width: GROOVE_WIDTH,
                colors: [Rgb::GROOVE, Rgb::GROOVE],
                dash: None,
            },
            RenderLayer::StartFinish => Self {
                layer,
                stroke_width: track_width,
                colors: [Rgb::BLACK, Rgb::WHITE],
                dash: Some([CHECKER_SQUARE, CHECKER_SQUARE]),
            },
        }
    }
}

/// Start/finish line anchored at `path[0]`, oriented along the tangent to `path[1]`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StartFinish {
    pub position: Float2,
    /// Unit tangent of the first path segment.
    pub direction: Float2,
    /// `direction` as an angle in radians from +x.
    pub angle: f32,
    /// Line length across the track.
    pub width: f32,
    /// Checkerboard square edge.
    pub square_size: f32,
}

impl StartFinish {
    pub fn from_path(path: &[Float2], width: f32) -> Self {
        let position = path.first().copied().unwrap_or(Float2::ZERO);
        let direction = match path.get(1) {
            Some(next) => (*next - position).normalize(),
            None => Float2::RIGHT,
        };
        Self {
            position,
            direction,
            angle: direction.angle(),
            width,
            square_size: CHECKER_SQUARE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrackRenderData<'a> {
    pub path: &'a [Float2],
    pub width: f32,
    /// Styles in [`LAYER_ORDER`].
    pub layers: [LayerStyle; 5],
    pub start_finish: StartFinish,
}

impl<'a> TrackRenderData<'a> {
    pub fn new(path: &'a [Float2], width: f32) -> Self {
        Self {
            path,
            width,
            layers: LAYER_ORDER.map(|layer| LayerStyle::for_layer(layer, width)),
            start_finish: StartFinish::from_path(path, width),
        }
    }
}
