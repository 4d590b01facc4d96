use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::{Matrix3x3, TOLERANCE};

/// Immutable 3D vector of `f64` components.
///
/// Equality is approximate: two vectors compare equal when every component
/// differs by less than [`TOLERANCE`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3D {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector in the XY plane.
    #[must_use]
    pub const fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    fn na(&self) -> nalgebra::Vector3<f64> {
        (*self).into()
    }

    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.na().dot(&other.na())
    }

    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        self.na().cross(&other.na()).into()
    }

    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.na().norm_squared()
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.na().norm()
    }

    /// Returns the unit vector in the same direction.
    ///
    /// A vector shorter than [`TOLERANCE`] normalizes to [`Vector3D::ZERO`].
    #[must_use]
    pub fn normalize(&self) -> Self {
        self.na().try_normalize(TOLERANCE).map_or(Self::ZERO, Self::from)
    }

    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        (*self - *other).length_squared()
    }

    /// Linear interpolation: `self + (other - self) * t`. `t` is not clamped.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        *self + (*other - *self) * t
    }

    /// Unsigned angle to `other` in radians, or 0 if either vector is zero-length.
    #[must_use]
    pub fn angle_to(&self, other: &Self) -> f64 {
        let denom = self.length() * other.length();
        if denom < TOLERANCE {
            return 0.0;
        }
        (self.dot(other) / denom).clamp(-1.0, 1.0).acos()
    }

    /// Projects `self` onto `onto`. Projection onto a zero vector yields zero.
    #[must_use]
    pub fn project_onto(&self, onto: &Self) -> Self {
        let denom = onto.length_squared();
        if denom < TOLERANCE {
            return Self::ZERO;
        }
        *onto * (self.dot(onto) / denom)
    }

    /// Component-wise product.
    #[must_use]
    pub fn scale_by(&self, factors: &Self) -> Self {
        Self::new(self.x * factors.x, self.y * factors.y, self.z * factors.z)
    }

    #[must_use]
    pub fn min(&self, other: &Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    #[must_use]
    pub fn max(&self, other: &Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Rotates about the X axis by `angle` radians (right-handed).
    #[must_use]
    pub fn rotate_x(&self, angle: f64) -> Self {
        Matrix3x3::rotation_x(angle) * *self
    }

    /// Rotates about the Y axis by `angle` radians (right-handed).
    #[must_use]
    pub fn rotate_y(&self, angle: f64) -> Self {
        Matrix3x3::rotation_y(angle) * *self
    }

    /// Rotates about the Z axis by `angle` radians (right-handed).
    #[must_use]
    pub fn rotate_z(&self, angle: f64) -> Self {
        Matrix3x3::rotation_z(angle) * *self
    }

    /// Applies Euler rotations `angles.x`, then `angles.y`, then `angles.z`.
    #[must_use]
    pub fn rotate_euler(&self, angles: &Self) -> Self {
        Matrix3x3::from_euler(angles) * *self
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl PartialEq for Vector3D {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < TOLERANCE
            && (self.y - other.y).abs() < TOLERANCE
            && (self.z - other.z).abs() < TOLERANCE
    }
}

impl Add for Vector3D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3D {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector3D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3D {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector3D> for f64 {
    type Output = Vector3D;

    fn mul(self, rhs: Vector3D) -> Vector3D {
        rhs * self
    }
}

impl Div<f64> for Vector3D {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vector3D {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<nalgebra::Vector3<f64>> for Vector3D {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3D> for nalgebra::Vector3<f64> {
    fn from(v: Vector3D) -> Self {
        nalgebra::Vector3::new(v.x, v.y, v.z)
    }
}

impl From<nalgebra::Point3<f64>> for Vector3D {
    fn from(p: nalgebra::Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Vector3D> for nalgebra::Point3<f64> {
    fn from(v: Vector3D) -> Self {
        nalgebra::Point3::new(v.x, v.y, v.z)
    }
}

impl From<[f64; 3]> for Vector3D {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}
