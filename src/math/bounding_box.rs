use serde::{Deserialize, Serialize};

use super::Vector3D;

/// Axis-aligned bounding box.
///
/// Corners are normalized at construction so that `min <= max` per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min: Vector3D,
    max: Vector3D,
}

impl BoundingBox {
    /// Creates a box from two corners, swapping components where needed.
    #[must_use]
    pub fn new(a: Vector3D, b: Vector3D) -> Self {
        Self {
            min: a.min(&b),
            max: a.max(&b),
        }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Vector3D]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> Vector3D {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Vector3D {
        self.max
    }

    #[must_use]
    pub fn size(&self) -> Vector3D {
        self.max - self.min
    }

    #[must_use]
    pub fn center(&self) -> Vector3D {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        let s = self.size();
        s.x * s.y * s.z
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: &Vector3D) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Returns a box grown to include `p`.
    #[must_use]
    pub fn expand(&self, p: &Vector3D) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(&other.min),
            max: self.max.max(&other.max),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn corners_are_swapped() {
        let b = BoundingBox::new(Vector3D::new(2.0, 0.0, 5.0), Vector3D::new(0.0, 3.0, 1.0));
        assert_eq!(b.min(), Vector3D::new(0.0, 0.0, 1.0));
        assert_eq!(b.max(), Vector3D::new(2.0, 3.0, 5.0));
        assert_eq!(b.size(), Vector3D::new(2.0, 3.0, 4.0));
        assert_eq!(b.center(), Vector3D::new(1.0, 1.5, 3.0));
        assert_abs_diff_eq!(b.volume(), 24.0);
    }

    #[test]
    fn from_points_and_contains() {
        let b = BoundingBox::from_points(&[
            Vector3D::new(1.0, 1.0, 1.0),
            Vector3D::new(-1.0, 2.0, 0.0),
            Vector3D::new(0.0, -3.0, 4.0),
        ])
        .unwrap();
        assert!(b.contains(&Vector3D::new(0.0, 0.0, 2.0)));
        assert!(!b.contains(&Vector3D::new(0.0, 0.0, 5.0)));
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn intersects_and_union() {
        let a = BoundingBox::new(Vector3D::ZERO, Vector3D::ONE);
        let b = BoundingBox::new(Vector3D::new(0.5, 0.5, 0.5), Vector3D::new(2.0, 2.0, 2.0));
        let c = BoundingBox::new(Vector3D::new(3.0, 3.0, 3.0), Vector3D::new(4.0, 4.0, 4.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert_eq!(a.union(&c).max(), Vector3D::new(4.0, 4.0, 4.0));
        assert_eq!(a.expand(&Vector3D::new(-1.0, 0.0, 0.0)).min(), Vector3D::new(-1.0, 0.0, 0.0));
    }
}
