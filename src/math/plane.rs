use crate::error::{GeometryError, Result};

use super::{Vector3D, TOLERANCE};

/// An infinite plane defined by a point on it and a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Vector3D,
    normal: Vector3D,
}

impl Plane {
    /// Creates a plane from a point and a normal vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_normal(point: Vector3D, normal: Vector3D) -> Result<Self> {
        if normal.length() < TOLERANCE {
            return Err(GeometryError::Degenerate("plane normal is zero-length".into()).into());
        }
        Ok(Self {
            point,
            normal: normal.normalize(),
        })
    }

    /// Creates the plane through three points. The normal follows the
    /// right-hand rule over `a -> b -> c`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear.
    pub fn from_points(a: Vector3D, b: Vector3D, c: Vector3D) -> Result<Self> {
        let normal = (b - a).cross(&(c - a));
        if normal.length() < TOLERANCE {
            return Err(GeometryError::Degenerate("plane points are collinear".into()).into());
        }
        Ok(Self {
            point: a,
            normal: normal.normalize(),
        })
    }

    /// The XY plane through the origin, normal `+Z`.
    #[must_use]
    pub fn xy() -> Self {
        Self {
            point: Vector3D::ZERO,
            normal: Vector3D::UNIT_Z,
        }
    }

    #[must_use]
    pub fn point(&self) -> Vector3D {
        self.point
    }

    #[must_use]
    pub fn normal(&self) -> Vector3D {
        self.normal
    }

    /// Signed distance, positive on the side the normal points to.
    #[must_use]
    pub fn signed_distance(&self, p: &Vector3D) -> f64 {
        (*p - self.point).dot(&self.normal)
    }

    #[must_use]
    pub fn project_point(&self, p: &Vector3D) -> Vector3D {
        *p - self.normal * self.signed_distance(p)
    }
}
