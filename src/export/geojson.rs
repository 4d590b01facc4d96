//! GeoJSON `Feature` documents.
//!
//! Local coordinates are treated as ENU metres. When a reference
//! [`GeoCoordinate`] is given they are converted to `[lon, lat]` (polygons)
//! or `[lon, lat, alt]` (line strings); otherwise the raw local values are
//! written.

use serde::Serialize;
use tracing::trace;

use crate::animation::FlightPath;
use crate::error::{ExportError, Result};
use crate::geo::transform::enu_to_geo;
use crate::geo::GeoCoordinate;
use crate::geometry::{Geometry3D, Polygon3D, Pyramid, Triangulatable};
use crate::math::Vector3D;

#[derive(Serialize)]
struct Feature<P> {
    #[serde(rename = "type")]
    kind: &'static str,
    geometry: Geometry,
    properties: P,
}

#[derive(Serialize)]
#[serde(tag = "type", content = "coordinates")]
enum Geometry {
    Polygon(Vec<Vec<Vec<f64>>>),
    LineString(Vec<Vec<f64>>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SolidProperties {
    volume: f64,
    surface_area: f64,
    centroid: [f64; 3],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PathProperties {
    total_distance: f64,
    total_duration: f64,
    waypoint_count: usize,
    is_looping: bool,
}

fn position_2d(v: &Vector3D, reference: Option<&GeoCoordinate>) -> Vec<f64> {
    match reference {
        Some(r) => {
            let g = enu_to_geo(v, r);
            vec![g.longitude(), g.latitude()]
        }
        None => vec![v.x, v.y],
    }
}

fn position_3d(v: &Vector3D, reference: Option<&GeoCoordinate>) -> Vec<f64> {
    match reference {
        Some(r) => {
            let g = enu_to_geo(v, r);
            vec![g.longitude(), g.latitude(), g.altitude()]
        }
        None => vec![v.x, v.y, v.z],
    }
}

fn to_json<P: Serialize>(geometry: Geometry, properties: P) -> Result<String> {
    let feature = Feature {
        kind: "Feature",
        geometry,
        properties,
    };
    serde_json::to_string_pretty(&feature).map_err(|e| ExportError::from(e).into())
}

/// Footprint ring (closed) plus solid measurements.
fn solid_feature<S: Geometry3D>(
    ring: &[Vector3D],
    solid: &S,
    reference: Option<&GeoCoordinate>,
) -> Result<String> {
    let mut coordinates: Vec<Vec<f64>> = ring.iter().map(|v| position_2d(v, reference)).collect();
    if let Some(first) = coordinates.first().cloned() {
        coordinates.push(first);
    }
    let c = solid.centroid();
    to_json(
        Geometry::Polygon(vec![coordinates]),
        SolidProperties {
            volume: solid.volume(),
            surface_area: solid.surface_area(),
            centroid: [c.x, c.y, c.z],
        },
    )
}

/// Polygon feature for the bottom ring of an extruded solid.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if serialization fails.
pub fn polygon3d_to_geojson(mesh: &Polygon3D, reference: Option<&GeoCoordinate>) -> Result<String> {
    trace!(ring = mesh.ring_size(), georeferenced = reference.is_some(), "polygon3d geojson");
    solid_feature(mesh.bottom_ring(), mesh, reference)
}

/// Polygon feature for a pyramid's base.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if serialization fails.
pub fn pyramid_to_geojson(pyramid: &Pyramid, reference: Option<&GeoCoordinate>) -> Result<String> {
    let n = pyramid.base().vertex_count();
    trace!(ring = n, georeferenced = reference.is_some(), "pyramid geojson");
    solid_feature(&pyramid.vertices()[..n], pyramid, reference)
}

/// Line string of `samples` evenly timed positions along the path (at
/// least two).
///
/// # Errors
///
/// Returns [`ExportError::Json`] if serialization fails.
pub fn flight_path_to_geojson(
    path: &FlightPath,
    samples: usize,
    reference: Option<&GeoCoordinate>,
) -> Result<String> {
    trace!(samples, georeferenced = reference.is_some(), "flight path geojson");
    let coordinates = path
        .sample_path(samples.max(2))
        .iter()
        .map(|v| position_3d(v, reference))
        .collect();
    to_json(
        Geometry::LineString(coordinates),
        PathProperties {
            total_distance: path.total_distance(),
            total_duration: path.total_duration(),
            waypoint_count: path.waypoint_count(),
            is_looping: path.is_looping(),
        },
    )
}
