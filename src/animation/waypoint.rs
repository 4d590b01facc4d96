use serde::{Deserialize, Serialize};

use crate::math::Vector3D;

/// What the vehicle is expected to do on reaching a waypoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaypointType {
    #[default]
    Navigate,
    Takeoff,
    Land,
    Hover,
    /// Take a photo or sensor reading.
    Capture,
}

/// A time-stamped position on a flight path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Vector3D,
    /// Seconds from the start of the path.
    pub time: f64,
    /// Requested ground speed in m/s, informational only.
    pub speed: Option<f64>,
    pub waypoint_type: WaypointType,
}

impl Waypoint {
    #[must_use]
    pub fn new(position: Vector3D, time: f64) -> Self {
        Self {
            position,
            time,
            speed: None,
            waypoint_type: WaypointType::Navigate,
        }
    }

    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    #[must_use]
    pub fn with_type(mut self, waypoint_type: WaypointType) -> Self {
        self.waypoint_type = waypoint_type;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn builders() {
        let wp = Waypoint::new(Vector3D::new(1.0, 2.0, 3.0), 4.0)
            .with_speed(12.5)
            .with_type(WaypointType::Capture);
        assert_eq!(wp.speed, Some(12.5));
        assert_eq!(wp.waypoint_type, WaypointType::Capture);
        assert_eq!(Waypoint::new(Vector3D::ZERO, 0.0).waypoint_type, WaypointType::Navigate);
    }

    #[test]
    fn serde_shape() {
        let wp = Waypoint::new(Vector3D::new(1.0, 0.0, 0.0), 2.0).with_type(WaypointType::Land);
        let json = serde_json::to_string(&wp).unwrap();
        assert!(json.contains("\"waypoint_type\":\"Land\""));
        let back: Waypoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wp);
    }
}
