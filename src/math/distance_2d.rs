use super::Vector3D;

/// Closest point to `p` on segment `a-b`, measured in the XY plane.
///
/// The projection parameter is clamped to `[0, 1]`; the returned point is
/// interpolated in 3D so it keeps the segment's `z`.
#[must_use]
pub fn closest_point_on_segment(p: &Vector3D, a: &Vector3D, b: &Vector3D) -> Vector3D {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return *a;
    }

    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
    a.lerp(b, t.clamp(0.0, 1.0))
}

/// Minimum XY distance from `p` to segment `a-b`.
#[must_use]
pub fn point_to_segment_dist(p: &Vector3D, a: &Vector3D, b: &Vector3D) -> f64 {
    let c = closest_point_on_segment(p, a, b);
    ((p.x - c.x).powi(2) + (p.y - c.y).powi(2)).sqrt()
}
