use crate::error::{Error, Result};
use crate::sim::Float2;

/// Minimum control points for a closed Catmull-Rom loop (one 4-point window).
pub const MIN_CONTROL_POINTS: usize = 4;

/// Evaluates the uniform Catmull-Rom segment between `p1` and `p2` at `t` in [0, 1].
///
/// `p0` and `p3` only shape the tangents; the curve passes through `p1` at
/// `t = 0` and `p2` at `t = 1`.
pub fn catmull_rom(p0: Float2, p1: Float2, p2: Float2, p3: Float2, t: f32) -> Float2 {
    let t2 = t * t;
    let t3 = t2 * t;

    fn axis(a: f32, b: f32, c: f32, d: f32, t: f32, t2: f32, t3: f32) -> f32 {
        0.5 * ((2.0 * b)
            + (-a + c) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (-a + 3.0 * b - 3.0 * c + d) * t3)
    }

    Float2::new(
        axis(p0.x, p1.x, p2.x, p3.x, t, t2, t3),
        axis(p0.y, p1.y, p2.y, p3.y, t, t2, t3),
    )
}

/// Builds a dense closed path through `control_points`.
///
/// The first and last control points are expected to coincide. Neighbours
/// wrap around the seam: the point before index 0 is `n - 2`, the point after
/// `n - 1` is index 1. Each window contributes `segments_per_point` samples at
/// `t = 0, 1/s, .., (s-1)/s`, and the last control point is appended once to
/// close the loop, giving `(n - 1) * s + 1` points.
///
/// Callers must supply at least [`MIN_CONTROL_POINTS`] points and a non-zero
/// `segments_per_point`; use [`try_build`] when the input is not trusted.
pub fn build(control_points: &[Float2], segments_per_point: usize) -> Vec<Float2> {
    let n = control_points.len();
    debug_assert!(n >= MIN_CONTROL_POINTS, "build called with {n} control points");
    if n < 2 || segments_per_point == 0 {
        return control_points.to_vec();
    }

    let mut path = Vec::with_capacity((n - 1) * segments_per_point + 1);
    let step = 1.0 / segments_per_point as f32;

    for i in 0..n - 1 {
        let p0 = if i == 0 {
            control_points[n - 2]
        } else {
            control_points[i - 1]
        };
        let p1 = control_points[i];
        let p2 = control_points[i + 1];
        let p3 = if i + 2 >= n {
            control_points[1]
        } else {
            control_points[i + 2]
        };

        for s in 0..segments_per_point {
            path.push(catmull_rom(p0, p1, p2, p3, s as f32 * step));
        }
    }

    path.push(control_points[n - 1]);
    path
}

/// Checked variant of [`build`].
pub fn try_build(control_points: &[Float2], segments_per_point: usize) -> Result<Vec<Float2>> {
    if control_points.len() < MIN_CONTROL_POINTS {
        return Err(Error::DegenerateTrack {
            points: control_points.len(),
        });
    }
    if segments_per_point == 0 {
        return Err(Error::InvalidConfig(
            "segments_per_point must be > 0".to_string(),
        ));
    }
    if !control_points.iter().all(|p| p.is_finite()) {
        return Err(Error::InvalidConfig(
            "control points must be finite".to_string(),
        ));
    }
    Ok(build(control_points, segments_per_point))
}

/// Cumulative centerline length at each path sample; `result[0] == 0`.
pub fn arc_lengths(path: &[Float2]) -> Vec<f32> {
    let mut arcs = Vec::with_capacity(path.len());
    let mut total = 0.0;
    for (i, point) in path.iter().enumerate() {
        if i > 0 {
            total += path[i - 1].distance(*point);
        }
        arcs.push(total);
    }
    arcs
}
