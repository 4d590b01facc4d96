use serde::{Deserialize, Serialize};

use crate::error::{GeodesyError, GeoformError, Result};

/// A WGS84 geographic position in degrees, with altitude in meters above
/// the ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoCoordinate")]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

impl GeoCoordinate {
    /// Creates a coordinate.
    ///
    /// # Errors
    ///
    /// Returns an error if latitude is outside `[-90, 90]`, longitude is
    /// outside `[-180, 180]`, or altitude is not finite.
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeodesyError::LatitudeOutOfRange(latitude).into());
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeodesyError::LongitudeOutOfRange(longitude).into());
        }
        if !altitude.is_finite() {
            return Err(GeodesyError::NonFinite("altitude").into());
        }
        Ok(Self {
            latitude,
            longitude,
            altitude,
        })
    }

    /// Builds a coordinate from values already known to be in range, wrapping
    /// longitude into `[-180, 180]` and clamping latitude against rounding.
    pub(crate) fn from_computed(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: wrap_longitude(longitude),
            altitude,
        }
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[must_use]
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    #[must_use]
    pub fn latitude_radians(&self) -> f64 {
        self.latitude.to_radians()
    }

    #[must_use]
    pub fn longitude_radians(&self) -> f64 {
        self.longitude.to_radians()
    }

    /// Same position at a different altitude.
    #[must_use]
    pub fn with_altitude(&self, altitude: f64) -> Self {
        Self { altitude, ..*self }
    }
}

#[derive(Deserialize)]
struct RawGeoCoordinate {
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

impl TryFrom<RawGeoCoordinate> for GeoCoordinate {
    type Error = GeoformError;

    fn try_from(raw: RawGeoCoordinate) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude, raw.altitude)
    }
}

/// Wraps a longitude in degrees into `[-180, 180]`.
fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        return lon;
    }
    (lon + 180.0).rem_euclid(360.0) - 180.0
}
