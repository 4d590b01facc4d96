//! Builds a small site model and a survey flight around it.
//!
//! Run with `RUST_LOG=geoform=trace` to see the exporter and fallback logs.

use geoform::export::{flight_path_to_geojson, to_obj_string};
use geoform::geo::distance::{haversine_distance, vincenty_distance};
use geoform::geometry::Geometry3D;
use geoform::{
    ExtrusionOptions, FlightPath, GeoCoordinate, GeoformError, Polygon2D, Pyramid, Vector3D,
};
use tracing::info;

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<(), GeoformError> {
    init_logging();

    let footprint = Polygon2D::from_xy(&[
        (0.0, 0.0),
        (40.0, 0.0),
        (40.0, 20.0),
        (20.0, 20.0),
        (20.0, 35.0),
        (0.0, 35.0),
    ])?;
    let validation = footprint.validate();
    info!(
        area = footprint.area(),
        convex = validation.is_convex,
        valid = validation.is_valid,
        "footprint"
    );

    let building = footprint.extrude(&ExtrusionOptions::with_height(12.0));
    info!(
        volume = building.volume(),
        surface_area = building.surface_area(),
        triangles = building.triangle_count(),
        "building"
    );

    let roof = Pyramid::create_square_pyramid(10.0, 4.0)?;
    info!(volume = roof.volume(), slant = roof.slant_height(), "roof");

    let obj = to_obj_string(&building, true)?;
    info!(lines = obj.lines().count(), "obj export");

    let orbit = FlightPath::create_orbit(Vector3D::new(20.0, 17.5, 0.0), 60.0, 40.0, 120.0, 16)?;
    for t in [0.0, 30.0, 60.0, 90.0, 150.0] {
        let p = orbit.get_position_at_time(t);
        info!(
            t,
            x = p.x,
            y = p.y,
            z = p.z,
            heading = orbit.get_heading_at_time(t),
            speed = orbit.get_speed_at_time(t),
            "orbit sample"
        );
    }

    let site = GeoCoordinate::new(47.3769, 8.5417, 408.0)?;
    let geojson = flight_path_to_geojson(&orbit, 64, Some(&site))?;
    println!("{geojson}");

    let airport = GeoCoordinate::new(47.4582, 8.5555, 432.0)?;
    info!(
        haversine = haversine_distance(&site, &airport),
        vincenty = vincenty_distance(&site, &airport),
        "site to airport"
    );
    Ok(())
}
