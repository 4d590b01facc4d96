use std::io::{self, Write};

use tracing::trace;

use crate::error::{ExportError, Result};
use crate::geometry::{HasNormals, Triangulatable};

/// Writes `mesh` as an ASCII STL solid called `name`.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if writing to `out` fails.
pub fn write_stl<M, W>(mesh: &M, name: &str, out: &mut W) -> Result<()>
where
    M: Triangulatable + HasNormals + ?Sized,
    W: Write,
{
    trace!(name, triangles = mesh.triangles().len(), "writing stl");
    write_body(mesh, name, out).map_err(ExportError::from)?;
    Ok(())
}

/// [`write_stl`] into a `String`.
///
/// # Errors
///
/// Only fails if the rendered text is not UTF-8.
pub fn to_stl_string<M>(mesh: &M, name: &str) -> Result<String>
where
    M: Triangulatable + HasNormals + ?Sized,
{
    super::render(|buf| write_stl(mesh, name, buf))
}

fn write_body<M, W>(mesh: &M, name: &str, out: &mut W) -> io::Result<()>
where
    M: Triangulatable + HasNormals + ?Sized,
    W: Write,
{
    let vertices = mesh.vertices();
    writeln!(out, "solid {name}")?;
    for (&[a, b, c], n) in mesh.triangles().iter().zip(mesh.face_normals()) {
        writeln!(out, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
        writeln!(out, "    outer loop")?;
        for v in [vertices[a], vertices[b], vertices[c]] {
            writeln!(out, "      vertex {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
        }
        writeln!(out, "    endloop")?;
        writeln!(out, "  endfacet")?;
    }
    writeln!(out, "endsolid {name}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Pyramid;

    #[test]
    fn pyramid_solid() {
        let pyramid = Pyramid::create_square_pyramid(2.0, 3.0).unwrap();
        let text = to_stl_string(&pyramid, "roof").unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "solid roof");
        assert_eq!(lines[lines.len() - 1], "endsolid roof");
        // 7 lines per facet
        assert_eq!(lines.len(), 2 + 6 * 7);
        assert_eq!(text.matches("facet normal").count(), 6);
        assert_eq!(text.matches("vertex ").count(), 18);
        assert_eq!(lines[2], "    outer loop");
        assert_eq!(lines[3], "      vertex -1.000000 -1.000000 0.000000");
    }

    #[test]
    fn writer_and_string_agree() {
        let pyramid = Pyramid::create_regular(5, 1.0, 2.0).unwrap();
        let mut out = Vec::new();
        write_stl(&pyramid, "p", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), to_stl_string(&pyramid, "p").unwrap());
    }
}
