pub mod coordinate;
pub mod distance;
pub mod transform;

pub use coordinate::GeoCoordinate;
pub use transform::TangentPlane;
