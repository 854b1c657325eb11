use crate::sim::Float2;

/// Closest point on segment `a..b` to `p`, with its projection parameter clamped to [0, 1].
///
/// A zero-length segment degenerates to the point `a` (parameter 0).
pub fn closest_on_segment(p: Float2, a: Float2, b: Float2) -> (f32, Float2) {
    let ab = b - a;
    let len_sq = ab.magnitude_squared();
    if len_sq <= f32::EPSILON {
        return (0.0, a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (t, a + ab * t)
}

/// Euclidean distance from `p` to segment `a..b`.
pub fn point_segment_distance(p: Float2, a: Float2, b: Float2) -> f32 {
    let (_, closest) = closest_on_segment(p, a, b);
    p.distance(closest)
}

/// Nearest segment of `path` to `p` by exhaustive scan: `(segment index, distance)`.
///
/// Ties keep the lowest index. Returns `None` for paths with fewer than two points.
pub fn nearest_segment_linear(path: &[Float2], p: Float2) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, pair) in path.windows(2).enumerate() {
        let d = point_segment_distance(p, pair[0], pair[1]);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best
}
