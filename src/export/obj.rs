use std::io::{self, Write};

use tracing::trace;

use crate::error::{ExportError, Result};
use crate::geometry::{HasNormals, Triangulatable};

/// Writes `mesh` as Wavefront OBJ.
///
/// Emits one `v` line per vertex, then (when `include_normals` is set) one
/// `vn` line per face, then one `f` line per triangle with 1-based vertex
/// indices in mesh order. Coordinates use six decimals.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if writing to `out` fails.
pub fn write_obj<M, W>(mesh: &M, include_normals: bool, out: &mut W) -> Result<()>
where
    M: Triangulatable + HasNormals + ?Sized,
    W: Write,
{
    trace!(
        vertices = mesh.vertices().len(),
        triangles = mesh.triangles().len(),
        include_normals,
        "writing obj"
    );
    write_body(mesh, include_normals, out).map_err(ExportError::from)?;
    Ok(())
}

/// [`write_obj`] into a `String`.
///
/// # Errors
///
/// Only fails if the rendered text is not UTF-8, which cannot happen for
/// finite coordinates.
pub fn to_obj_string<M>(mesh: &M, include_normals: bool) -> Result<String>
where
    M: Triangulatable + HasNormals + ?Sized,
{
    super::render(|buf| write_obj(mesh, include_normals, buf))
}

fn write_body<M, W>(mesh: &M, include_normals: bool, out: &mut W) -> io::Result<()>
where
    M: Triangulatable + HasNormals + ?Sized,
    W: Write,
{
    for v in mesh.vertices() {
        writeln!(out, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
    }
    if include_normals {
        for n in mesh.face_normals() {
            writeln!(out, "vn {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
        }
    }
    for &[a, b, c] in mesh.triangles() {
        writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }
    Ok(())
}
