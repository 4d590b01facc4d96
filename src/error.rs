use thiserror::Error;

/// Top-level error type for the Geoform engine.
#[derive(Debug, Error)]
pub enum GeoformError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Geodesy(#[from] GeodesyError),

    #[error(transparent)]
    FlightPath(#[from] FlightPathError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors raised while building or querying geometric shapes.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("polygon requires at least 3 distinct vertices, found {found}")]
    TooFewVertices { found: usize },

    #[error("parameter {parameter} = {value} is out of range ({min}, {max})")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to geographic coordinates.
#[derive(Debug, Error)]
pub enum GeodesyError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("{0} must be finite")]
    NonFinite(&'static str),
}

/// Errors related to flight path construction.
#[derive(Debug, Error)]
pub enum FlightPathError {
    #[error("flight path requires at least one waypoint")]
    Empty,

    #[error("waypoint time {0} is not finite")]
    NonFiniteTime(f64),

    #[error("speed must be positive, got {0}")]
    InvalidSpeed(f64),

    #[error("invalid flight path parameter: {0}")]
    InvalidParameter(String),
}

/// Errors raised while exporting geometry.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`GeoformError`].
pub type Result<T> = std::result::Result<T, GeoformError>;
