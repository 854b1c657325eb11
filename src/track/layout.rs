use crate::sim::Float2;

/// The stock circuit: 20 hand-placed control points, closed at the origin.
///
/// Runs east along the start straight, sweeps through a long right-hander at
/// the far end, returns along a kinked back section and climbs the west
/// hairpin back onto the straight.
pub const DEFAULT_CONTROL_POINTS: [(f32, f32); 20] = [
    (0.0, 0.0),
    (150.0, 0.0),
    (300.0, -20.0),
    (420.0, -80.0),
    (500.0, -180.0),
    (480.0, -300.0),
    (380.0, -360.0),
    (250.0, -340.0),
    (180.0, -260.0),
    (100.0, -250.0),
    (0.0, -320.0),
    (-120.0, -360.0),
    (-250.0, -330.0),
    (-330.0, -240.0),
    (-340.0, -130.0),
    (-280.0, -40.0),
    (-200.0, 20.0),
    (-120.0, 40.0),
    (-50.0, 25.0),
    (0.0, 0.0),
];

pub fn default_control_points() -> Vec<Float2> {
    DEFAULT_CONTROL_POINTS
        .iter()
        .copied()
        .map(Float2::from)
        .collect()
}
