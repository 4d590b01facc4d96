pub mod bounding_box;
pub mod distance_2d;
pub mod intersect_2d;
pub mod matrix;
pub mod plane;
pub mod polygon_2d;
pub mod triangle;
pub mod vector;

pub use bounding_box::BoundingBox;
pub use matrix::Matrix3x3;
pub use plane::Plane;
pub use triangle::Triangle;
pub use vector::Vector3D;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Polygons with a smaller (nonzero) area are reported with a warning.
pub const SMALL_AREA_THRESHOLD: f64 = 1e-6;

/// Maximum apex offset from the base centroid for a pyramid to count as regular.
pub const REGULARITY_TOLERANCE: f64 = 1e-6;

/// Time step (seconds) of the forward difference used for flight path velocity.
pub const VELOCITY_STEP: f64 = 0.001;
