use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::math::polygon_2d::vertex_mean;
use crate::math::{BoundingBox, Matrix3x3, Vector3D};

use super::polygon_2d::Polygon2D;
use super::{
    compute_face_normals, mesh_surface_area, Geometry3D, HasNormals, Transformable,
    Triangulatable,
};

/// Parameters for [`Polygon3D::extrude`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtrusionOptions {
    /// Extrusion distance along the (rotated) `+Z` axis.
    pub height: f64,
    /// Scale of the top ring relative to the base, about the base centroid.
    /// `1.0` gives a prism, values below `1.0` a frustum.
    pub top_scale: f64,
    /// Euler angles in radians, applied X then Y then Z about the base centroid.
    pub rotation: Vector3D,
    /// Offset added after rotation.
    pub position: Vector3D,
    pub cap_top: bool,
    pub cap_bottom: bool,
}

impl Default for ExtrusionOptions {
    fn default() -> Self {
        Self {
            height: 1.0,
            top_scale: 1.0,
            rotation: Vector3D::ZERO,
            position: Vector3D::ZERO,
            cap_top: true,
            cap_bottom: true,
        }
    }
}

impl ExtrusionOptions {
    #[must_use]
    pub fn with_height(height: f64) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn top_scale(mut self, top_scale: f64) -> Self {
        self.top_scale = top_scale;
        self
    }

    #[must_use]
    pub fn rotation(mut self, rotation: Vector3D) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn position(mut self, position: Vector3D) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn caps(mut self, top: bool, bottom: bool) -> Self {
        self.cap_top = top;
        self.cap_bottom = bottom;
        self
    }
}

/// A triangle mesh extruded from a [`Polygon2D`].
///
/// Vertices are the bottom ring followed by the top ring, both
/// counter-clockwise when seen from above. Triangles are two per side quad,
/// then the optional bottom and top caps, all wound outward.
#[derive(Debug, Clone)]
pub struct Polygon3D {
    vertices: Vec<Vector3D>,
    triangles: Vec<[usize; 3]>,
    normals: Vec<Vector3D>,
    ring_size: usize,
    volume: OnceLock<f64>,
    surface_area: OnceLock<f64>,
    centroid: OnceLock<Vector3D>,
}

impl Polygon3D {
    /// Extrudes `base` according to `options`.
    ///
    /// A clockwise base is reversed first so that faces always point outward.
    #[must_use]
    pub fn extrude(base: &Polygon2D, options: &ExtrusionOptions) -> Self {
        let base = base.ensure_counter_clockwise();
        let ring = base.vertices();
        let n = ring.len();
        let center = base.centroid();
        let rotation = Matrix3x3::from_euler(&options.rotation);
        let up = rotation * Vector3D::new(0.0, 0.0, options.height);

        let mut vertices = Vec::with_capacity(2 * n);
        vertices.extend(
            ring.iter()
                .map(|v| rotation * (*v - center) + center + options.position),
        );
        vertices.extend(
            ring.iter()
                .map(|v| rotation * ((*v - center) * options.top_scale) + center + up + options.position),
        );

        let caps = base.triangulate();
        let mut triangles = Vec::with_capacity(2 * n + 2 * caps.len());
        for i in 0..n {
            let j = (i + 1) % n;
            triangles.push([i, j, j + n]);
            triangles.push([i, j + n, i + n]);
        }
        if options.cap_bottom {
            triangles.extend(caps.iter().map(|&[a, b, c]| [c, b, a]));
        }
        if options.cap_top {
            triangles.extend(caps.iter().map(|&[a, b, c]| [a + n, b + n, c + n]));
        }

        Self::from_mesh(vertices, triangles, n)
    }

    pub(crate) fn from_mesh(vertices: Vec<Vector3D>, triangles: Vec<[usize; 3]>, ring_size: usize) -> Self {
        let normals = compute_face_normals(&vertices, &triangles);
        Self {
            vertices,
            triangles,
            normals,
            ring_size,
            volume: OnceLock::new(),
            surface_area: OnceLock::new(),
            centroid: OnceLock::new(),
        }
    }

    /// Number of vertices in each of the two rings.
    #[must_use]
    pub fn ring_size(&self) -> usize {
        self.ring_size
    }

    #[must_use]
    pub fn bottom_ring(&self) -> &[Vector3D] {
        &self.vertices[..self.ring_size]
    }

    #[must_use]
    pub fn top_ring(&self) -> &[Vector3D] {
        &self.vertices[self.ring_size..]
    }

    /// Vertical extent of the mesh. Equals the extrusion height for
    /// unrotated extrusions.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bounds().size().z
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    fn map_vertices(&self, f: impl Fn(&Vector3D) -> Vector3D, flip: bool) -> Self {
        let vertices = self.vertices.iter().map(f).collect();
        let triangles = if flip {
            self.triangles.iter().map(|&[a, b, c]| [a, c, b]).collect()
        } else {
            self.triangles.clone()
        };
        Self::from_mesh(vertices, triangles, self.ring_size)
    }
}

/// Signed-tetrahedron volume of a closed mesh, measured from `origin`.
pub(crate) fn mesh_volume(vertices: &[Vector3D], triangles: &[[usize; 3]], origin: &Vector3D) -> f64 {
    let sum: f64 = triangles
        .iter()
        .map(|&[a, b, c]| {
            let v0 = vertices[a] - *origin;
            let v1 = vertices[b] - *origin;
            let v2 = vertices[c] - *origin;
            v0.dot(&v1.cross(&v2))
        })
        .sum();
    (sum / 6.0).abs()
}

impl Geometry3D for Polygon3D {
    fn volume(&self) -> f64 {
        *self
            .volume
            .get_or_init(|| mesh_volume(&self.vertices, &self.triangles, &self.centroid()))
    }

    fn surface_area(&self) -> f64 {
        *self
            .surface_area
            .get_or_init(|| mesh_surface_area(&self.vertices, &self.triangles))
    }

    fn centroid(&self) -> Vector3D {
        *self.centroid.get_or_init(|| vertex_mean(&self.vertices))
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
            .unwrap_or_else(|| BoundingBox::new(Vector3D::ZERO, Vector3D::ZERO))
    }
}

impl Triangulatable for Polygon3D {
    fn vertices(&self) -> &[Vector3D] {
        &self.vertices
    }

    fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }
}

impl HasNormals for Polygon3D {
    fn face_normals(&self) -> &[Vector3D] {
        &self.normals
    }
}

impl Transformable for Polygon3D {
    fn translate(&self, offset: &Vector3D) -> Self {
        self.map_vertices(|v| *v + *offset, false)
    }

    fn rotate(&self, angles: &Vector3D) -> Self {
        let c = self.centroid();
        let m = Matrix3x3::from_euler(angles);
        self.map_vertices(|v| m * (*v - c) + c, false)
    }

    /// Negative factors mirror the mesh; an odd number of them reverses
    /// triangle winding so faces keep pointing outward.
    fn scale(&self, factors: &Vector3D) -> Self {
        let c = self.centroid();
        let flip = factors.x * factors.y * factors.z < 0.0;
        self.map_vertices(|v| (*v - c).scale_by(factors) + c, flip)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;

    use super::*;

    fn square_10() -> Polygon2D {
        Polygon2D::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]).unwrap()
    }

    fn l_shape() -> Polygon2D {
        Polygon2D::from_xy(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (2.0, 2.0),
            (2.0, 4.0),
            (0.0, 4.0),
        ])
        .unwrap()
    }

    /// Every face normal points away from the mesh centroid for convex solids.
    fn assert_outward(mesh: &Polygon3D) {
        let c = mesh.centroid();
        for (tri, n) in mesh.triangle_list().iter().zip(mesh.face_normals()) {
            assert!((tri.centroid() - c).dot(n) > 0.0, "inward face {tri:?}");
        }
    }

    #[test]
    fn prism_layout() {
        let prism = Polygon3D::extrude(&square_10(), &ExtrusionOptions::with_height(5.0));
        assert_eq!(prism.ring_size(), 4);
        assert_eq!(prism.vertex_count(), 8);
        // 2 per side + 2 per cap
        assert_eq!(prism.triangle_count(), 12);
        assert_eq!(prism.top_ring()[0], Vector3D::new(0.0, 0.0, 5.0));
        assert_eq!(prism.face_normals().len(), 12);
        assert_abs_diff_eq!(prism.height(), 5.0);
    }

    #[test]
    fn prism_volume_is_area_times_height() {
        let prism = Polygon3D::extrude(&square_10(), &ExtrusionOptions::with_height(5.0));
        assert_abs_diff_eq!(prism.volume(), 500.0, epsilon = 1e-9);
        assert_abs_diff_eq!(prism.surface_area(), 2.0 * 100.0 + 4.0 * 50.0, epsilon = 1e-9);

        let l = Polygon3D::extrude(&l_shape(), &ExtrusionOptions::with_height(3.0));
        assert_abs_diff_eq!(l.volume(), 36.0, epsilon = 1e-9);
    }

    #[test]
    fn faces_point_outward() {
        let prism = Polygon3D::extrude(&square_10(), &ExtrusionOptions::with_height(5.0));
        assert_outward(&prism);

        let from_cw = Polygon3D::extrude(&square_10().reverse_winding(), &ExtrusionOptions::default());
        assert_outward(&from_cw);
    }

    #[test]
    fn frustum_volume() {
        let base = Polygon2D::square(2.0).unwrap();
        let frustum = Polygon3D::extrude(&base, &ExtrusionOptions::with_height(3.0).top_scale(0.5));
        // h/3 * (A1 + A2 + sqrt(A1*A2)) with A1 = 4, A2 = 1
        assert_abs_diff_eq!(frustum.volume(), 7.0, epsilon = 1e-9);
        assert_outward(&frustum);
    }

    #[test]
    fn caps_are_optional() {
        let open = Polygon3D::extrude(&square_10(), &ExtrusionOptions::with_height(1.0).caps(false, false));
        assert_eq!(open.triangle_count(), 8);
        let top_only = Polygon3D::extrude(&square_10(), &ExtrusionOptions::with_height(1.0).caps(true, false));
        assert_eq!(top_only.triangle_count(), 10);
    }

    #[test]
    fn rotation_and_position() {
        let options = ExtrusionOptions::with_height(2.0)
            .rotation(Vector3D::new(FRAC_PI_2, 0.0, 0.0))
            .position(Vector3D::new(0.0, 0.0, 100.0));
        let mesh = Polygon3D::extrude(&square_10(), &options);
        // Rotating +Z by 90° about X points the extrusion along -Y.
        let shift = mesh.top_ring()[0] - mesh.bottom_ring()[0];
        assert!(shift.distance(&Vector3D::new(0.0, -2.0, 0.0)) < 1e-9);
        assert_abs_diff_eq!(mesh.volume(), 200.0, epsilon = 1e-9);
        assert!(mesh.centroid().z > 90.0);
    }

    #[test]
    fn transforms_are_non_mutating() {
        let prism = Polygon3D::extrude(&square_10(), &ExtrusionOptions::with_height(5.0));
        let moved = prism.translate(&Vector3D::new(1.0, 2.0, 3.0));
        assert_eq!(moved.centroid(), prism.centroid() + Vector3D::new(1.0, 2.0, 3.0));
        assert_eq!(prism.centroid(), Vector3D::new(5.0, 5.0, 2.5));

        let rotated = prism.rotate(&Vector3D::new(0.3, 0.2, 0.1));
        assert_abs_diff_eq!(rotated.volume(), 500.0, epsilon = 1e-9);
        assert_outward(&rotated);

        let scaled = prism.scale(&Vector3D::new(2.0, 1.0, 1.0));
        assert_abs_diff_eq!(scaled.volume(), 1000.0, epsilon = 1e-9);

        let mirrored = prism.scale(&Vector3D::new(-1.0, 1.0, 1.0));
        assert_abs_diff_eq!(mirrored.volume(), 500.0, epsilon = 1e-9);
        assert_outward(&mirrored);

        assert_abs_diff_eq!(prism.scale_uniform(2.0).volume(), 4000.0, epsilon = 1e-6);
    }

    #[test]
    fn bounds() {
        let prism = Polygon3D::extrude(&square_10(), &ExtrusionOptions::with_height(5.0));
        let b = prism.bounds();
        assert_eq!(b.min(), Vector3D::ZERO);
        assert_eq!(b.max(), Vector3D::new(10.0, 10.0, 5.0));
    }
}
