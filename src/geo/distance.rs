//! Great-circle and ellipsoidal distances, bearings and derived positions.
//!
//! Angles returned by bearing functions are in radians unless the function
//! name says otherwise; distances are in meters.

use std::f64::consts::{PI, TAU};

use tracing::debug;

use super::transform::{WGS84_A, WGS84_B, WGS84_F};
use super::GeoCoordinate;

/// Mean Earth radius used by the spherical formulas, in meters.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

const VINCENTY_MAX_ITERATIONS: usize = 100;
const VINCENTY_TOLERANCE: f64 = 1e-12;

/// Great-circle distance on a sphere of radius [`EARTH_RADIUS`]. Altitude is ignored.
#[must_use]
pub fn haversine_distance(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    let lat1 = a.latitude_radians();
    let lat2 = b.latitude_radians();
    let dlat = lat2 - lat1;
    let dlon = b.longitude_radians() - a.longitude_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS * c
}

/// Geodesic distance on the WGS84 ellipsoid (Vincenty inverse formula).
///
/// Returns 0 for coincident points. If λ has not converged after 100
/// iterations (nearly antipodal points) the Haversine distance is returned.
#[must_use]
#[allow(clippy::many_single_char_names, clippy::similar_names)]
pub fn vincenty_distance(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    let f = WGS84_F;
    let l = b.longitude_radians() - a.longitude_radians();
    let u1 = ((1.0 - f) * a.latitude_radians().tan()).atan();
    let u2 = ((1.0 - f) * b.latitude_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    for _ in 0..VINCENTY_MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            return 0.0;
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // Both points on the equator.
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let lambda_prev = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if (lambda - lambda_prev).abs() < VINCENTY_TOLERANCE {
            let u_sq = cos_sq_alpha * (WGS84_A.powi(2) - WGS84_B.powi(2)) / WGS84_B.powi(2);
            let big_a =
                1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = big_b
                * sin_sigma
                * (cos_2sigma_m
                    + big_b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                            - big_b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma.powi(2))
                                * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));
            return WGS84_B * big_a * (sigma - delta_sigma);
        }
    }

    debug!(
        iterations = VINCENTY_MAX_ITERATIONS,
        "vincenty did not converge, falling back to haversine"
    );
    haversine_distance(a, b)
}

/// Straight-line distance combining the geodesic surface distance with the
/// altitude difference.
#[must_use]
pub fn distance_3d(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    vincenty_distance(a, b).hypot(b.altitude() - a.altitude())
}

/// Initial great-circle bearing from `from` to `to`, clockwise from north,
/// normalized to `[0, 2π)`.
#[must_use]
pub fn initial_bearing(from: &GeoCoordinate, to: &GeoCoordinate) -> f64 {
    let lat1 = from.latitude_radians();
    let lat2 = to.latitude_radians();
    let dlon = to.longitude_radians() - from.longitude_radians();
    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    normalize_angle(y.atan2(x))
}

/// [`initial_bearing`] in degrees, `[0, 360)`.
#[must_use]
pub fn initial_bearing_degrees(from: &GeoCoordinate, to: &GeoCoordinate) -> f64 {
    initial_bearing(from, to).to_degrees()
}

/// Bearing on arrival at `to` when travelling the great circle from `from`,
/// in radians `[0, 2π)`.
#[must_use]
pub fn final_bearing(from: &GeoCoordinate, to: &GeoCoordinate) -> f64 {
    normalize_angle(initial_bearing(to, from) + PI)
}

/// Point reached after travelling `distance` meters from `start` along the
/// great circle with initial `bearing` (radians). Altitude is carried over.
#[must_use]
pub fn destination_point(start: &GeoCoordinate, bearing: f64, distance: f64) -> GeoCoordinate {
    let delta = distance / EARTH_RADIUS;
    let lat1 = start.latitude_radians();
    let lon1 = start.longitude_radians();

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    GeoCoordinate::from_computed(lat2.to_degrees(), lon2.to_degrees(), start.altitude())
}

/// Great-circle midpoint of `a` and `b`, at their mean altitude.
#[must_use]
pub fn midpoint(a: &GeoCoordinate, b: &GeoCoordinate) -> GeoCoordinate {
    let lat1 = a.latitude_radians();
    let lat2 = b.latitude_radians();
    let lon1 = a.longitude_radians();
    let dlon = b.longitude_radians() - lon1;

    let bx = lat2.cos() * dlon.cos();
    let by = lat2.cos() * dlon.sin();
    let lat3 = (lat1.sin() + lat2.sin()).atan2(((lat1.cos() + bx).powi(2) + by * by).sqrt());
    let lon3 = lon1 + by.atan2(lat1.cos() + bx);

    GeoCoordinate::from_computed(
        lat3.to_degrees(),
        lon3.to_degrees(),
        (a.altitude() + b.altitude()) / 2.0,
    )
}

fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if a >= TAU {
        0.0
    } else {
        a
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    fn geo(lat: f64, lon: f64) -> GeoCoordinate {
        GeoCoordinate::new(lat, lon, 0.0).unwrap()
    }

    fn london() -> GeoCoordinate {
        geo(51.5074, -0.1278)
    }

    fn paris() -> GeoCoordinate {
        geo(48.8566, 2.3522)
    }

    // ── haversine ──

    #[test]
    fn haversine_london_paris() {
        let d = haversine_distance(&london(), &paris());
        assert!((d - 343_500.0).abs() < 1_500.0, "d={d}");
    }

    #[test]
    fn haversine_one_degree_of_longitude_at_equator() {
        let d = haversine_distance(&geo(0.0, 0.0), &geo(0.0, 1.0));
        assert_relative_eq!(d, EARTH_RADIUS * 1f64.to_radians(), max_relative = 1e-12);
    }

    // ── vincenty ──

    #[test]
    fn vincenty_coincident_is_zero() {
        let a = london();
        assert_eq!(vincenty_distance(&a, &a), 0.0);
    }

    #[test]
    fn vincenty_is_symmetric() {
        let pairs = [
            (london(), paris()),
            (geo(-33.86, 151.21), geo(40.71, -74.01)),
            (geo(0.0, 0.0), geo(0.0, 90.0)),
        ];
        for (a, b) in pairs {
            let ab = vincenty_distance(&a, &b);
            let ba = vincenty_distance(&b, &a);
            assert_relative_eq!(ab, ba, max_relative = 1e-6);
        }
    }

    #[test]
    fn vincenty_equator_quarter() {
        // A quarter of the equator is a quarter of its circumference.
        let d = vincenty_distance(&geo(0.0, 0.0), &geo(0.0, 90.0));
        assert_relative_eq!(d, WGS84_A * FRAC_PI_2, max_relative = 1e-9);
    }

    #[test]
    fn vincenty_known_distance() {
        // Flinders Peak to Buninyong, the classic Vincenty test pair.
        let a = geo(-37.951_033_42, 144.424_867_89);
        let b = geo(-37.652_821_14, 143.926_495_53);
        let d = vincenty_distance(&a, &b);
        assert_abs_diff_eq!(d, 54_972.271, epsilon = 0.05);
    }

    #[test]
    fn vincenty_nearly_antipodal_falls_back() {
        let a = geo(0.0, 0.0);
        let b = geo(0.5, 179.7);
        let d = vincenty_distance(&a, &b);
        assert!(d.is_finite());
        assert!(d > 19_000_000.0 && d < 20_100_000.0, "d={d}");
    }

    #[test]
    fn distance_3d_includes_altitude() {
        let a = GeoCoordinate::new(10.0, 10.0, 0.0).unwrap();
        let b = GeoCoordinate::new(10.0, 10.0, 300.0).unwrap();
        assert_abs_diff_eq!(distance_3d(&a, &b), 300.0, epsilon = 1e-9);
    }

    // ── bearings ──

    #[test]
    fn bearing_cardinal_directions() {
        let origin = geo(0.0, 0.0);
        assert_abs_diff_eq!(initial_bearing(&origin, &geo(1.0, 0.0)), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(initial_bearing(&origin, &geo(0.0, 1.0)), FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(initial_bearing(&origin, &geo(-1.0, 0.0)), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(
            initial_bearing_degrees(&origin, &geo(0.0, -1.0)),
            270.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn bearing_is_in_range() {
        let b = initial_bearing(&london(), &paris());
        assert!((0.0..TAU).contains(&b));
        let f = final_bearing(&london(), &paris());
        assert!((0.0..TAU).contains(&f));
    }

    // ── destination / midpoint ──

    #[test]
    fn destination_round_trip() {
        let start = london();
        let bearing = initial_bearing(&start, &paris());
        let distance = haversine_distance(&start, &paris());
        let end = destination_point(&start, bearing, distance);
        assert_abs_diff_eq!(end.latitude(), paris().latitude(), epsilon = 1e-6);
        assert_abs_diff_eq!(end.longitude(), paris().longitude(), epsilon = 1e-6);
    }

    #[test]
    fn midpoint_on_equator() {
        let m = midpoint(&geo(0.0, 0.0), &geo(0.0, 90.0));
        assert_abs_diff_eq!(m.latitude(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(m.longitude(), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn midpoint_is_equidistant() {
        let m = midpoint(&london(), &paris());
        let d1 = haversine_distance(&london(), &m);
        let d2 = haversine_distance(&m, &paris());
        assert_relative_eq!(d1, d2, max_relative = 1e-9);
    }
}
