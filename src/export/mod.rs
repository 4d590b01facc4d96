//! Text exporters for meshes and flight paths.

pub mod geojson;
pub mod obj;
pub mod stl;

use std::io;

pub use geojson::{flight_path_to_geojson, polygon3d_to_geojson, pyramid_to_geojson};
pub use obj::{to_obj_string, write_obj};
pub use stl::{to_stl_string, write_stl};

use crate::error::{ExportError, Result};

/// Runs an exporter against an in-memory buffer and returns the text.
fn render(write: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> Result<String> {
    let mut buf = Vec::new();
    write(&mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| ExportError::Io(io::Error::new(io::ErrorKind::InvalidData, e)).into())
}
