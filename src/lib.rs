pub mod animation;
pub mod error;
pub mod export;
pub mod geo;
pub mod geometry;
pub mod math;

pub use animation::{FlightPath, FlightPathBuilder, InterpolationMode, Waypoint, WaypointType};
pub use error::{GeoformError, Result};
pub use geo::GeoCoordinate;
pub use geometry::{
    ExtrusionOptions, Polygon2D, Polygon3D, PolygonBuilder, PolygonValidator, Pyramid,
    PyramidBuilder, ValidationResult, WindingOrder,
};
pub use math::{BoundingBox, Matrix3x3, Plane, Triangle, Vector3D};
