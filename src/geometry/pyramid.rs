use std::sync::OnceLock;

use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::vertex_mean;
use crate::math::{BoundingBox, Matrix3x3, Triangle, Vector3D, REGULARITY_TOLERANCE, TOLERANCE};

use super::polygon_2d::Polygon2D;
use super::polygon_3d::{ExtrusionOptions, Polygon3D};
use super::{
    compute_face_normals, mesh_surface_area, Geometry3D, HasNormals, Transformable,
    Triangulatable,
};

/// A pyramid over a polygonal base with a single apex.
///
/// The base lies in the local XY plane and the apex is given in the same
/// local frame. The local frame is scaled, rotated about the base centroid
/// and offset by `position` to produce world vertices: the base ring
/// followed by the apex.
#[derive(Debug, Clone)]
pub struct Pyramid {
    base: Polygon2D,
    apex: Vector3D,
    cap_base: bool,
    position: Vector3D,
    rotation: Matrix3x3,
    scale: Vector3D,
    vertices: Vec<Vector3D>,
    triangles: Vec<[usize; 3]>,
    normals: Vec<Vector3D>,
    surface_area: OnceLock<f64>,
}

impl Pyramid {
    /// Pyramid with its apex `height` above the base centroid.
    ///
    /// # Errors
    ///
    /// Returns an error if `height` is not a positive finite number.
    pub fn create(base: &Polygon2D, height: f64) -> Result<Self> {
        PyramidBuilder::new().base(base.clone()).height(height).build()
    }

    /// Pyramid over a regular `sides`-gon of circumradius `radius`.
    ///
    /// # Errors
    ///
    /// Returns an error for fewer than three sides or non-positive dimensions.
    pub fn create_regular(sides: usize, radius: f64, height: f64) -> Result<Self> {
        Self::create(&Polygon2D::regular(sides, radius)?, height)
    }

    /// Square pyramid with base side `side`, centered on the origin.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive dimensions.
    pub fn create_square_pyramid(side: f64, height: f64) -> Result<Self> {
        Self::create(&Polygon2D::square(side)?, height)
    }

    /// Pyramid with an arbitrary apex, possibly oblique.
    ///
    /// # Errors
    ///
    /// Returns an error if the apex lies in the base plane.
    pub fn create_with_apex(base: &Polygon2D, apex: Vector3D) -> Result<Self> {
        PyramidBuilder::new().base(base.clone()).apex(apex).build()
    }

    fn assemble(
        base: Polygon2D,
        apex: Vector3D,
        cap_base: bool,
        position: Vector3D,
        rotation: Matrix3x3,
        scale: Vector3D,
    ) -> Self {
        let base = base.ensure_counter_clockwise();
        let ring = base.vertices();
        let n = ring.len();
        let pivot = base.centroid();
        let place = |v: &Vector3D| rotation * (*v - pivot).scale_by(&scale) + pivot + position;

        let mut vertices: Vec<Vector3D> = ring.iter().map(place).collect();
        vertices.push(place(&apex));

        let mut triangles: Vec<[usize; 3]> = (0..n).map(|i| [i, (i + 1) % n, n]).collect();
        if cap_base {
            triangles.extend(base.triangulate().iter().map(|&[a, b, c]| [c, b, a]));
        }
        // A downward apex or an odd number of mirrored axes turns the mesh inside out.
        let mirrored = scale.x * scale.y * scale.z < 0.0;
        if mirrored != (apex.z < 0.0) {
            for tri in &mut triangles {
                tri.swap(1, 2);
            }
        }

        let normals = compute_face_normals(&vertices, &triangles);
        Self {
            base,
            apex,
            cap_base,
            position,
            rotation,
            scale,
            vertices,
            triangles,
            normals,
            surface_area: OnceLock::new(),
        }
    }

    fn rebuild(&self, position: Vector3D, rotation: Matrix3x3, scale: Vector3D) -> Self {
        Self::assemble(
            self.base.clone(),
            self.apex,
            self.cap_base,
            position,
            rotation,
            scale,
        )
    }

    /// The base polygon in the local frame, counter-clockwise.
    #[must_use]
    pub fn base(&self) -> &Polygon2D {
        &self.base
    }

    /// World-space apex.
    #[must_use]
    pub fn apex(&self) -> Vector3D {
        self.vertices[self.vertices.len() - 1]
    }

    #[must_use]
    pub fn base_area(&self) -> f64 {
        self.base.area() * (self.scale.x * self.scale.y).abs()
    }

    /// Perpendicular distance from the apex to the base plane.
    #[must_use]
    pub fn height(&self) -> f64 {
        (self.apex.z * self.scale.z).abs()
    }

    /// `true` when the apex sits over the base centroid.
    #[must_use]
    pub fn is_regular(&self) -> bool {
        let c = self.base.centroid();
        (self.apex.x - c.x).hypot(self.apex.y - c.y) <= REGULARITY_TOLERANCE
    }

    /// Distance from the apex to the midpoint of the first base edge.
    ///
    /// Only meaningful as "the" slant height for regular pyramids over
    /// regular bases.
    #[must_use]
    pub fn slant_height(&self) -> f64 {
        let mid = (self.vertices[0] + self.vertices[1]) * 0.5;
        self.apex().distance(&mid)
    }

    /// Total area of the triangular side faces.
    #[must_use]
    pub fn lateral_surface_area(&self) -> f64 {
        let n = self.base.vertex_count();
        let apex = self.apex();
        (0..n)
            .map(|i| Triangle::new(self.vertices[i], self.vertices[(i + 1) % n], apex).area())
            .sum()
    }

    /// Cuts the pyramid parallel to its base at `relative_height` of its
    /// height, returning the frustum between the base and the cut.
    ///
    /// The top ring is each base vertex moved `relative_height` of the way
    /// toward the apex, so oblique and downward apexes are followed.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] unless
    /// `0 < relative_height < 1`.
    pub fn truncate(&self, relative_height: f64) -> Result<Polygon3D> {
        if !(relative_height > 0.0 && relative_height < 1.0) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "relative_height",
                value: relative_height,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        // Ring topology only; the rings themselves come from this pyramid's
        // world vertices, so the cut follows the apex whichever side it is on.
        let topology = Polygon3D::extrude(
            &self.base,
            &ExtrusionOptions::with_height(1.0).caps(true, true),
        );
        let n = self.base.vertex_count();
        let apex = self.apex();
        let bottom = &self.vertices[..n];
        let mut vertices = bottom.to_vec();
        vertices.extend(bottom.iter().map(|v| v.lerp(&apex, relative_height)));

        let mut triangles = topology.triangles().to_vec();
        let mirrored = self.scale.x * self.scale.y * self.scale.z < 0.0;
        if mirrored != (self.apex.z < 0.0) {
            for tri in &mut triangles {
                tri.swap(1, 2);
            }
        }
        Ok(Polygon3D::from_mesh(vertices, triangles, n))
    }
}

impl Geometry3D for Pyramid {
    /// Closed form `base_area * height / 3`.
    fn volume(&self) -> f64 {
        self.base_area() * self.height() / 3.0
    }

    fn surface_area(&self) -> f64 {
        *self
            .surface_area
            .get_or_init(|| mesh_surface_area(&self.vertices, &self.triangles))
    }

    fn centroid(&self) -> Vector3D {
        vertex_mean(&self.vertices)
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
            .unwrap_or_else(|| BoundingBox::new(Vector3D::ZERO, Vector3D::ZERO))
    }
}

impl Triangulatable for Pyramid {
    fn vertices(&self) -> &[Vector3D] {
        &self.vertices
    }

    fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }
}

impl HasNormals for Pyramid {
    fn face_normals(&self) -> &[Vector3D] {
        &self.normals
    }
}

impl Transformable for Pyramid {
    fn translate(&self, offset: &Vector3D) -> Self {
        self.rebuild(self.position + *offset, self.rotation, self.scale)
    }

    fn rotate(&self, angles: &Vector3D) -> Self {
        let m = Matrix3x3::from_euler(angles);
        let pivot = self.base.centroid();
        let center = self.centroid();
        let position = m * (pivot + self.position - center) + center - pivot;
        self.rebuild(position, m * self.rotation, self.scale)
    }

    /// Scales along the pyramid's own (rotated) axes, keeping its centroid fixed.
    fn scale(&self, factors: &Vector3D) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let n = self.base.vertex_count() as f64;
        let local_center =
            (vertex_mean(self.base.vertices()) * n + self.apex) / (n + 1.0) - self.base.centroid();
        let scale = self.scale.scale_by(factors);
        let before = self.rotation * local_center.scale_by(&self.scale);
        let after = self.rotation * local_center.scale_by(&scale);
        self.rebuild(self.position + before - after, self.rotation, scale)
    }
}

/// Step-by-step construction of a [`Pyramid`].
#[derive(Debug, Clone)]
pub struct PyramidBuilder {
    base: Option<Polygon2D>,
    height: Option<f64>,
    apex: Option<Vector3D>,
    position: Vector3D,
    rotation: Vector3D,
    scale: Vector3D,
    cap_base: bool,
}

impl Default for PyramidBuilder {
    fn default() -> Self {
        Self {
            base: None,
            height: None,
            apex: None,
            position: Vector3D::ZERO,
            rotation: Vector3D::ZERO,
            scale: Vector3D::ONE,
            cap_base: true,
        }
    }
}

impl PyramidBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn base(mut self, base: Polygon2D) -> Self {
        self.base = Some(base);
        self
    }

    /// Places the apex `height` above the base centroid. Ignored if an
    /// explicit apex is set.
    #[must_use]
    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn apex(mut self, apex: Vector3D) -> Self {
        self.apex = Some(apex);
        self
    }

    #[must_use]
    pub fn position(mut self, position: Vector3D) -> Self {
        self.position = position;
        self
    }

    /// Euler angles in radians, applied X then Y then Z.
    #[must_use]
    pub fn rotation(mut self, rotation: Vector3D) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn scale(mut self, scale: Vector3D) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn cap_base(mut self, cap_base: bool) -> Self {
        self.cap_base = cap_base;
        self
    }

    /// Builds the pyramid.
    ///
    /// # Errors
    ///
    /// Returns an error if no base was given, neither apex nor height was
    /// given, the height is not a positive finite number, the apex lies in
    /// the base plane, or a scale factor is zero.
    pub fn build(self) -> Result<Pyramid> {
        let base = self
            .base
            .ok_or_else(|| GeometryError::InvalidInput("pyramid base is required".into()))?;
        let apex = match (self.apex, self.height) {
            (Some(apex), _) => apex,
            (None, Some(height)) => {
                if !(height > 0.0 && height.is_finite()) {
                    return Err(GeometryError::ParameterOutOfRange {
                        parameter: "height",
                        value: height,
                        min: 0.0,
                        max: f64::INFINITY,
                    }
                    .into());
                }
                base.centroid() + Vector3D::new(0.0, 0.0, height)
            }
            (None, None) => {
                return Err(
                    GeometryError::InvalidInput("pyramid needs an apex or a height".into()).into(),
                )
            }
        };
        if !apex.is_finite() || apex.z.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "apex {apex:?} does not rise above the base plane"
            ))
            .into());
        }
        if self.scale.x.abs() < TOLERANCE
            || self.scale.y.abs() < TOLERANCE
            || self.scale.z.abs() < TOLERANCE
        {
            return Err(GeometryError::InvalidInput("scale factors must be non-zero".into()).into());
        }
        Ok(Pyramid::assemble(
            base,
            apex,
            self.cap_base,
            self.position,
            Matrix3x3::from_euler(&self.rotation),
            self.scale,
        ))
    }
}
