//! Conversions between WGS84 geodetic coordinates, Earth-Centered Earth-Fixed
//! (ECEF) cartesian coordinates and local East-North-Up (ENU) frames.

use crate::math::Vector3D;

use super::GeoCoordinate;

/// WGS84 semi-major axis (equatorial radius) in meters.
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS84 semi-minor axis (polar radius) in meters.
pub const WGS84_B: f64 = 6_356_752.314_245;

/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// WGS84 first eccentricity squared.
pub const WGS84_E2: f64 = 0.006_694_379_990_14;

/// Number of latitude refinement passes in [`cartesian_to_geo`].
const GEO_ITERATIONS: usize = 10;

/// Below this distance from the polar axis (meters) latitude is taken as ±90°.
const POLAR_AXIS_EPSILON: f64 = 1e-9;

/// Prime-vertical radius of curvature at geodetic latitude `lat` (radians).
#[must_use]
pub fn prime_vertical_radius(lat: f64) -> f64 {
    let s = lat.sin();
    WGS84_A / (1.0 - WGS84_E2 * s * s).sqrt()
}

/// Converts a geodetic coordinate to ECEF meters.
#[must_use]
pub fn geo_to_cartesian(geo: &GeoCoordinate) -> Vector3D {
    let lat = geo.latitude_radians();
    let lon = geo.longitude_radians();
    let h = geo.altitude();
    let n = prime_vertical_radius(lat);
    let (slat, clat) = lat.sin_cos();
    let (slon, clon) = lon.sin_cos();
    Vector3D::new(
        (n + h) * clat * clon,
        (n + h) * clat * slon,
        (n * (1.0 - WGS84_E2) + h) * slat,
    )
}

/// Converts ECEF meters back to a geodetic coordinate.
///
/// Latitude is refined with a fixed number of fixed-point passes; there is
/// no convergence check.
#[must_use]
pub fn cartesian_to_geo(ecef: &Vector3D) -> GeoCoordinate {
    let lon = ecef.y.atan2(ecef.x);
    let p = ecef.x.hypot(ecef.y);

    if p < POLAR_AXIS_EPSILON {
        let lat = if ecef.z >= 0.0 { 90.0 } else { -90.0 };
        return GeoCoordinate::from_computed(lat, lon.to_degrees(), ecef.z.abs() - WGS84_B);
    }

    let mut lat = ecef.z.atan2(p * (1.0 - WGS84_E2));
    for _ in 0..GEO_ITERATIONS {
        let n = prime_vertical_radius(lat);
        let h = p / lat.cos() - n;
        lat = ecef.z.atan2(p * (1.0 - WGS84_E2 * n / (n + h)));
    }
    let alt = p / lat.cos() - prime_vertical_radius(lat);

    GeoCoordinate::from_computed(lat.to_degrees(), lon.to_degrees(), alt)
}

/// Maps a point from a local frame (rotated by Euler `rotation`, applied X
/// then Y then Z, and placed at `origin`) into world space.
#[must_use]
pub fn local_to_world(local: &Vector3D, origin: &Vector3D, rotation: &Vector3D) -> Vector3D {
    local.rotate_euler(rotation) + *origin
}

/// Inverse of [`local_to_world`]: removes the translation, then undoes the
/// rotations in reverse order (Z, Y, X) with negated angles.
#[must_use]
pub fn world_to_local(world: &Vector3D, origin: &Vector3D, rotation: &Vector3D) -> Vector3D {
    (*world - *origin)
        .rotate_z(-rotation.z)
        .rotate_y(-rotation.y)
        .rotate_x(-rotation.x)
}

/// East, North and Up unit vectors (in ECEF axes) of the tangent plane at `geo`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentPlane {
    pub east: Vector3D,
    pub north: Vector3D,
    pub up: Vector3D,
}

#[must_use]
pub fn local_tangent_plane(geo: &GeoCoordinate) -> TangentPlane {
    let (slat, clat) = geo.latitude_radians().sin_cos();
    let (slon, clon) = geo.longitude_radians().sin_cos();
    TangentPlane {
        east: Vector3D::new(-slon, clon, 0.0),
        north: Vector3D::new(-slat * clon, -slat * slon, clat),
        up: Vector3D::new(clat * clon, clat * slon, slat),
    }
}

/// Position of `point` in the ENU frame anchored at `reference`, in meters.
#[must_use]
pub fn geo_to_enu(point: &GeoCoordinate, reference: &GeoCoordinate) -> Vector3D {
    let delta = geo_to_cartesian(point) - geo_to_cartesian(reference);
    let frame = local_tangent_plane(reference);
    Vector3D::new(
        delta.dot(&frame.east),
        delta.dot(&frame.north),
        delta.dot(&frame.up),
    )
}

/// Inverse of [`geo_to_enu`].
#[must_use]
pub fn enu_to_geo(enu: &Vector3D, reference: &GeoCoordinate) -> GeoCoordinate {
    let frame = local_tangent_plane(reference);
    let ecef =
        geo_to_cartesian(reference) + frame.east * enu.x + frame.north * enu.y + frame.up * enu.z;
    cartesian_to_geo(&ecef)
}
