use super::{Vector3D, TOLERANCE};

/// Computes the signed area of a polygon in the XY plane (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Vector3D]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns `true` if every non-negligible turn of the polygon has the same sign.
///
/// Turns whose cross product magnitude is below [`TOLERANCE`] (collinear
/// vertices) are ignored.
#[must_use]
pub fn is_convex_2d(points: &[Vector3D]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut sign = 0.0_f64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
        if cross.abs() < TOLERANCE {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

/// Removes consecutive near-duplicate vertices and a closing vertex that
/// repeats the first one.
#[must_use]
pub fn dedup_ring(points: &[Vector3D]) -> Vec<Vector3D> {
    let mut ring: Vec<Vector3D> = Vec::with_capacity(points.len());
    for &p in points {
        if ring.last().is_none_or(|last| last.distance(&p) >= TOLERANCE) {
            ring.push(p);
        }
    }
    while ring.len() > 1 && ring[0].distance(&ring[ring.len() - 1]) < TOLERANCE {
        ring.pop();
    }
    ring
}

/// Arithmetic mean of the vertices.
#[must_use]
pub fn vertex_mean(points: &[Vector3D]) -> Vector3D {
    if points.is_empty() {
        return Vector3D::ZERO;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    points.iter().fold(Vector3D::ZERO, |acc, p| acc + *p) / n
}
