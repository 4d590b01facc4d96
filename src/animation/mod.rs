pub mod flight_path;
pub mod waypoint;

pub use flight_path::{FlightPath, FlightPathBuilder, InterpolationMode};
pub use waypoint::{Waypoint, WaypointType};
