use super::{Vector3D, TOLERANCE};

/// A triangle in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vector3D,
    pub b: Vector3D,
    pub c: Vector3D,
}

impl Triangle {
    #[must_use]
    pub fn new(a: Vector3D, b: Vector3D, c: Vector3D) -> Self {
        Self { a, b, c }
    }

    /// Unit normal following the right-hand rule over `a -> b -> c`.
    /// Degenerate triangles yield the zero vector.
    #[must_use]
    pub fn normal(&self) -> Vector3D {
        (self.b - self.a).cross(&(self.c - self.a)).normalize()
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        0.5 * (self.b - self.a).cross(&(self.c - self.a)).length()
    }

    #[must_use]
    pub fn centroid(&self) -> Vector3D {
        (self.a + self.b + self.c) / 3.0
    }

    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.a.distance(&self.b) + self.b.distance(&self.c) + self.c.distance(&self.a)
    }

    /// Same triangle with reversed winding.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self::new(self.a, self.c, self.b)
    }

    /// Barycentric weights `(u, v, w)` of `p` for vertices `(a, b, c)`.
    ///
    /// Returns `None` for degenerate triangles.
    #[must_use]
    pub fn barycentric(&self, p: &Vector3D) -> Option<(f64, f64, f64)> {
        let v0 = self.b - self.a;
        let v1 = self.c - self.a;
        let v2 = *p - self.a;
        let d00 = v0.dot(&v0);
        let d01 = v0.dot(&v1);
        let d11 = v1.dot(&v1);
        let d20 = v2.dot(&v0);
        let d21 = v2.dot(&v1);
        let denom = d00 * d11 - d01 * d01;
        if denom.abs() < TOLERANCE {
            return None;
        }
        let v = (d11 * d20 - d01 * d21) / denom;
        let w = (d00 * d21 - d01 * d20) / denom;
        Some((1.0 - v - w, v, w))
    }

    /// Inclusive containment test for a point lying in the triangle's plane.
    #[must_use]
    pub fn contains_point(&self, p: &Vector3D) -> bool {
        self.barycentric(p)
            .is_some_and(|(u, v, w)| u >= -TOLERANCE && v >= -TOLERANCE && w >= -TOLERANCE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn tri() -> Triangle {
        Triangle::new(
            Vector3D::new(0.0, 0.0, 0.0),
            Vector3D::new(4.0, 0.0, 0.0),
            Vector3D::new(0.0, 3.0, 0.0),
        )
    }

    #[test]
    fn derived_properties() {
        let t = tri();
        assert_eq!(t.normal(), Vector3D::UNIT_Z);
        assert_eq!(t.flipped().normal(), -Vector3D::UNIT_Z);
        assert_abs_diff_eq!(t.area(), 6.0);
        assert_abs_diff_eq!(t.perimeter(), 12.0);
        assert_eq!(t.centroid(), Vector3D::new(4.0 / 3.0, 1.0, 0.0));
    }

    #[test]
    fn containment() {
        let t = tri();
        assert!(t.contains_point(&Vector3D::new(1.0, 1.0, 0.0)));
        assert!(t.contains_point(&Vector3D::new(2.0, 0.0, 0.0)));
        assert!(!t.contains_point(&Vector3D::new(3.0, 3.0, 0.0)));
    }

    #[test]
    fn degenerate_has_no_barycentric() {
        let t = Triangle::new(Vector3D::ZERO, Vector3D::UNIT_X, Vector3D::UNIT_X * 2.0);
        assert!(t.barycentric(&Vector3D::ZERO).is_none());
        assert!(!t.contains_point(&Vector3D::ZERO));
        assert_eq!(t.normal(), Vector3D::ZERO);
    }

    #[test]
    fn barycentric_weights_sum_to_one() {
        let (u, v, w) = tri().barycentric(&Vector3D::new(1.0, 1.0, 0.0)).unwrap();
        assert_abs_diff_eq!(u + v + w, 1.0, epsilon = 1e-12);
    }
}
