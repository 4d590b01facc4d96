use super::Vector3D;

/// 2D cross product of `(b - a)` and `(c - a)`: positive when `a -> b -> c`
/// turns counter-clockwise.
#[inline]
#[must_use]
pub fn orient_2d(a: &Vector3D, b: &Vector3D, c: &Vector3D) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Returns `true` if segments `a0-a1` and `b0-b1` cross at a single interior point.
///
/// Each segment's endpoints must lie strictly on opposite sides of the other
/// segment's supporting line, so touching endpoints and collinear overlaps
/// do not count.
#[must_use]
pub fn segments_properly_intersect(
    a0: &Vector3D,
    a1: &Vector3D,
    b0: &Vector3D,
    b1: &Vector3D,
) -> bool {
    let d1 = orient_2d(b0, b1, a0);
    let d2 = orient_2d(b0, b1, a1);
    let d3 = orient_2d(a0, a1, b0);
    let d4 = orient_2d(a0, a1, b1);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

/// Returns `true` if any two non-adjacent edges of the closed ring properly cross.
#[must_use]
pub fn ring_self_intersects(points: &[Vector3D]) -> bool {
    let n = points.len();
    if n < 4 {
        return false;
    }
    for i in 0..n {
        let a0 = &points[i];
        let a1 = &points[(i + 1) % n];
        for j in (i + 2)..n {
            // Edge n-1 shares a vertex with edge 0.
            if i == 0 && j == n - 1 {
                continue;
            }
            let b0 = &points[j];
            let b1 = &points[(j + 1) % n];
            if segments_properly_intersect(a0, a1, b0, b1) {
                return true;
            }
        }
    }
    false
}

/// Ray-casting parity test in the XY plane.
///
/// Casts a ray towards `+X` and counts edge crossings. Points exactly on an
/// edge may fall on either side.
#[must_use]
pub fn point_in_ring(point: &Vector3D, ring: &[Vector3D]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&ring[i], &ring[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
