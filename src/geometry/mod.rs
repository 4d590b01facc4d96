pub mod polygon_2d;
pub mod polygon_3d;
pub mod pyramid;
pub mod spatial_query;
pub mod validator;

pub use polygon_2d::{Polygon2D, PolygonBuilder};
pub use polygon_3d::{ExtrusionOptions, Polygon3D};
pub use pyramid::{Pyramid, PyramidBuilder};
pub use validator::{PolygonValidator, ValidationResult, WindingOrder};

use crate::math::{BoundingBox, Triangle, Vector3D};

/// Closed solids with measurable extent.
pub trait Geometry3D {
    /// Enclosed volume.
    fn volume(&self) -> f64;

    /// Sum of all face areas.
    fn surface_area(&self) -> f64;

    /// Arithmetic mean of the vertices.
    fn centroid(&self) -> Vector3D;

    fn bounds(&self) -> BoundingBox;
}

/// Shapes that expose an indexed triangle mesh.
pub trait Triangulatable {
    fn vertices(&self) -> &[Vector3D];

    /// Triangle vertex indices into [`Triangulatable::vertices`].
    fn triangles(&self) -> &[[usize; 3]];

    /// Resolves the index triples into triangles.
    fn triangle_list(&self) -> Vec<Triangle> {
        let vertices = self.vertices();
        self.triangles()
            .iter()
            .map(|&[a, b, c]| Triangle::new(vertices[a], vertices[b], vertices[c]))
            .collect()
    }
}

/// Shapes with one outward normal per triangle.
pub trait HasNormals {
    /// Unit normals, parallel to [`Triangulatable::triangles`] when both are implemented.
    fn face_normals(&self) -> &[Vector3D];
}

/// Shapes whose transforms return new instances of the same type.
pub trait Transformable: Sized {
    #[must_use]
    fn translate(&self, offset: &Vector3D) -> Self;

    /// Rotates by Euler angles (radians) about the shape's centroid,
    /// applying X, then Y, then Z.
    #[must_use]
    fn rotate(&self, angles: &Vector3D) -> Self;

    /// Scales per axis about the shape's centroid.
    #[must_use]
    fn scale(&self, factors: &Vector3D) -> Self;

    #[must_use]
    fn scale_uniform(&self, factor: f64) -> Self {
        self.scale(&Vector3D::new(factor, factor, factor))
    }
}

/// Unit normal of every triangle of a mesh.
pub(crate) fn compute_face_normals(vertices: &[Vector3D], triangles: &[[usize; 3]]) -> Vec<Vector3D> {
    triangles
        .iter()
        .map(|&[a, b, c]| Triangle::new(vertices[a], vertices[b], vertices[c]).normal())
        .collect()
}

/// Total area of a mesh's triangles.
pub(crate) fn mesh_surface_area(vertices: &[Vector3D], triangles: &[[usize; 3]]) -> f64 {
    triangles
        .iter()
        .map(|&[a, b, c]| Triangle::new(vertices[a], vertices[b], vertices[c]).area())
        .sum()
}
