use std::ops::Mul;

use nalgebra::{Matrix3, Rotation3, Vector3};

use super::Vector3D;

/// A 3x3 rotation matrix.
///
/// Only rotations are constructed, so the transpose is also the inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3x3 {
    inner: Matrix3<f64>,
}

impl Matrix3x3 {
    #[must_use]
    pub fn identity() -> Self {
        Self {
            inner: Matrix3::identity(),
        }
    }

    /// Rotation about the X axis by `angle` radians.
    #[must_use]
    pub fn rotation_x(angle: f64) -> Self {
        Self::from_axis_angle(&Vector3::x_axis(), angle)
    }

    /// Rotation about the Y axis by `angle` radians.
    #[must_use]
    pub fn rotation_y(angle: f64) -> Self {
        Self::from_axis_angle(&Vector3::y_axis(), angle)
    }

    /// Rotation about the Z axis by `angle` radians.
    #[must_use]
    pub fn rotation_z(angle: f64) -> Self {
        Self::from_axis_angle(&Vector3::z_axis(), angle)
    }

    /// Combined rotation applying `angles.x` first, then `angles.y`, then `angles.z`.
    #[must_use]
    pub fn from_euler(angles: &Vector3D) -> Self {
        Self::rotation_z(angles.z) * Self::rotation_y(angles.y) * Self::rotation_x(angles.x)
    }

    fn from_axis_angle(axis: &nalgebra::Unit<Vector3<f64>>, angle: f64) -> Self {
        Self {
            inner: Rotation3::from_axis_angle(axis, angle).into_inner(),
        }
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        Self {
            inner: self.inner.transpose(),
        }
    }

    /// Inverse rotation (equal to the transpose).
    #[must_use]
    pub fn inverse(&self) -> Self {
        self.transpose()
    }

    /// Returns the element at `(row, col)`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.inner[(row, col)]
    }

    #[must_use]
    pub fn transform(&self, v: &Vector3D) -> Vector3D {
        (self.inner * Vector3::from(*v)).into()
    }

    /// Underlying `nalgebra` matrix.
    #[must_use]
    pub fn as_nalgebra(&self) -> &Matrix3<f64> {
        &self.inner
    }
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix3x3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            inner: self.inner * rhs.inner,
        }
    }
}

impl Mul<Vector3D> for Matrix3x3 {
    type Output = Vector3D;

    fn mul(self, rhs: Vector3D) -> Vector3D {
        self.transform(&rhs)
    }
}
