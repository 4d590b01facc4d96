use std::f64::consts::TAU;
use std::sync::OnceLock;

use tracing::warn;

use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::{orient_2d, point_in_ring, ring_self_intersects};
use crate::math::polygon_2d::{dedup_ring, is_convex_2d, signed_area_2d, vertex_mean};
use crate::math::{BoundingBox, Vector3D};

use super::polygon_3d::{ExtrusionOptions, Polygon3D};
use super::validator::{PolygonValidator, ValidationResult, WindingOrder};
use super::Triangulatable;

/// A simple polygon in the XY plane.
///
/// Construction drops consecutive near-duplicate vertices and a closing
/// vertex equal to the first, then requires at least three vertices. All
/// vertices have `z = 0`.
///
/// Derived properties are computed on first access and memoized. They are
/// pure functions of the vertex list, so concurrent first accesses can only
/// ever store equal values.
#[derive(Debug, Clone)]
pub struct Polygon2D {
    vertices: Vec<Vector3D>,
    signed_area: OnceLock<f64>,
    centroid: OnceLock<Vector3D>,
    is_convex: OnceLock<bool>,
    bounds: OnceLock<BoundingBox>,
    triangulation: OnceLock<Vec<[usize; 3]>>,
}

impl Polygon2D {
    /// Creates a polygon from a vertex ring. The `z` component is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewVertices`] if fewer than three distinct
    /// vertices remain after de-duplication, or [`GeometryError::InvalidInput`]
    /// if any coordinate is not finite.
    pub fn new(vertices: Vec<Vector3D>) -> Result<Self> {
        if let Some(bad) = vertices.iter().find(|v| !v.is_finite()) {
            return Err(GeometryError::InvalidInput(format!("non-finite vertex {bad:?}")).into());
        }
        let flat: Vec<Vector3D> = vertices.iter().map(|v| Vector3D::xy(v.x, v.y)).collect();
        let ring = dedup_ring(&flat);
        if ring.len() < 3 {
            return Err(GeometryError::TooFewVertices { found: ring.len() }.into());
        }
        Ok(Self::from_ring(ring))
    }

    /// Creates a polygon from `(x, y)` pairs.
    ///
    /// # Errors
    ///
    /// See [`Polygon2D::new`].
    pub fn from_xy(points: &[(f64, f64)]) -> Result<Self> {
        Self::new(points.iter().map(|&(x, y)| Vector3D::xy(x, y)).collect())
    }

    /// Axis-aligned rectangle centered on the origin, counter-clockwise.
    ///
    /// # Errors
    ///
    /// Returns an error if either side is not positive.
    pub fn rectangle(width: f64, height: f64) -> Result<Self> {
        check_positive("width", width)?;
        check_positive("height", height)?;
        let (hw, hh) = (width / 2.0, height / 2.0);
        Self::from_xy(&[(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)])
    }

    /// Square centered on the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if `side` is not positive.
    pub fn square(side: f64) -> Result<Self> {
        Self::rectangle(side, side)
    }

    /// Regular polygon centered on the origin with its first vertex on `+X`.
    ///
    /// # Errors
    ///
    /// Returns an error if `sides < 3` or `radius` is not positive.
    pub fn regular(sides: usize, radius: f64) -> Result<Self> {
        if sides < 3 {
            return Err(GeometryError::TooFewVertices { found: sides }.into());
        }
        check_positive("radius", radius)?;
        #[allow(clippy::cast_precision_loss)]
        let step = TAU / sides as f64;
        let vertices = (0..sides)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let angle = step * i as f64;
                Vector3D::xy(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Self::new(vertices)
    }

    /// Circle approximated by a regular polygon with `segments` sides.
    ///
    /// # Errors
    ///
    /// See [`Polygon2D::regular`].
    pub fn circle(radius: f64, segments: usize) -> Result<Self> {
        Self::regular(segments, radius)
    }

    fn from_ring(vertices: Vec<Vector3D>) -> Self {
        Self {
            vertices,
            signed_area: OnceLock::new(),
            centroid: OnceLock::new(),
            is_convex: OnceLock::new(),
            bounds: OnceLock::new(),
            triangulation: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Shoelace area: positive for counter-clockwise rings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        *self.signed_area.get_or_init(|| signed_area_2d(&self.vertices))
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Arithmetic mean of the vertices.
    ///
    /// This is not the area centroid: unevenly spaced vertices pull it
    /// towards the denser side.
    #[must_use]
    pub fn centroid(&self) -> Vector3D {
        *self.centroid.get_or_init(|| vertex_mean(&self.vertices))
    }

    #[must_use]
    pub fn winding_order(&self) -> WindingOrder {
        WindingOrder::from_signed_area(self.signed_area())
    }

    #[must_use]
    pub fn is_convex(&self) -> bool {
        *self.is_convex.get_or_init(|| is_convex_2d(&self.vertices))
    }

    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        *self.bounds.get_or_init(|| {
            BoundingBox::from_points(&self.vertices)
                .unwrap_or_else(|| BoundingBox::new(Vector3D::ZERO, Vector3D::ZERO))
        })
    }

    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.edges().map(|(a, b)| a.distance(&b)).sum()
    }

    /// Edges as `(start, end)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Vector3D, Vector3D)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Ear-clipping triangulation, computed once.
    ///
    /// Triangles index into [`Triangulatable::vertices`] and are always
    /// counter-clockwise. Self-intersecting or degenerate rings may yield a
    /// partial set; run [`Polygon2D::validate`] first when that matters.
    #[must_use]
    pub fn triangulate(&self) -> &[[usize; 3]] {
        self.triangulation
            .get_or_init(|| ear_clip(&self.vertices, self.winding_order()))
    }

    /// Ray-casting parity test.
    #[must_use]
    pub fn contains_point(&self, point: &Vector3D) -> bool {
        point_in_ring(point, &self.vertices)
    }

    #[must_use]
    pub fn is_self_intersecting(&self) -> bool {
        ring_self_intersects(&self.vertices)
    }

    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        PolygonValidator::validate(&self.vertices)
    }

    /// Same ring traversed in the opposite direction.
    #[must_use]
    pub fn reverse_winding(&self) -> Self {
        Self::from_ring(self.vertices.iter().rev().copied().collect())
    }

    /// Returns `self` unchanged if already counter-clockwise, else the reversed ring.
    #[must_use]
    pub fn ensure_counter_clockwise(&self) -> Self {
        if self.winding_order() == WindingOrder::Clockwise {
            self.reverse_winding()
        } else {
            self.clone()
        }
    }

    #[must_use]
    pub fn ensure_clockwise(&self) -> Self {
        if self.winding_order() == WindingOrder::CounterClockwise {
            self.reverse_winding()
        } else {
            self.clone()
        }
    }

    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        let offset = Vector3D::xy(dx, dy);
        Self::from_ring(self.vertices.iter().map(|v| *v + offset).collect())
    }

    /// Rotates counter-clockwise by `angle` radians about the centroid.
    #[must_use]
    pub fn rotate(&self, angle: f64) -> Self {
        let c = self.centroid();
        Self::from_ring(
            self.vertices
                .iter()
                .map(|v| (*v - c).rotate_z(angle) + c)
                .collect(),
        )
    }

    /// Scales about the centroid.
    ///
    /// # Errors
    ///
    /// Returns an error if a zero factor collapses the ring below three
    /// distinct vertices.
    pub fn scale(&self, sx: f64, sy: f64) -> Result<Self> {
        let c = self.centroid();
        let factors = Vector3D::new(sx, sy, 1.0);
        Self::new(
            self.vertices
                .iter()
                .map(|v| (*v - c).scale_by(&factors) + c)
                .collect(),
        )
    }

    /// Extrudes this footprint into a prism or frustum.
    #[must_use]
    pub fn extrude(&self, options: &ExtrusionOptions) -> Polygon3D {
        Polygon3D::extrude(self, options)
    }
}

impl Triangulatable for Polygon2D {
    fn vertices(&self) -> &[Vector3D] {
        &self.vertices
    }

    fn triangles(&self) -> &[[usize; 3]] {
        self.triangulate()
    }
}

fn check_positive(parameter: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::ParameterOutOfRange {
            parameter,
            value,
            min: 0.0,
            max: f64::INFINITY,
        }
        .into())
    }
}

/// Ear-clipping over the index ring of `vertices`.
///
/// Gives up after `n²` candidate checks and returns the triangles found so far.
fn ear_clip(vertices: &[Vector3D], winding: WindingOrder) -> Vec<[usize; 3]> {
    let n = vertices.len();
    if n < 3 {
        return Vec::new();
    }

    let mut ring: Vec<usize> = (0..n).collect();
    if winding == WindingOrder::Clockwise {
        ring.reverse();
    }

    let mut triangles = Vec::with_capacity(n - 2);
    let max_iterations = n * n;
    let mut iterations = 0;
    let mut i = 0;

    while ring.len() > 3 {
        if iterations >= max_iterations {
            warn!(
                vertices = n,
                remaining = ring.len(),
                "ear clipping found no ear, returning partial triangulation"
            );
            return triangles;
        }
        iterations += 1;

        let m = ring.len();
        i %= m;
        let prev = ring[(i + m - 1) % m];
        let curr = ring[i];
        let next = ring[(i + 1) % m];

        if is_ear(vertices, &ring, prev, curr, next) {
            triangles.push([prev, curr, next]);
            ring.remove(i);
        } else {
            i += 1;
        }
    }

    triangles.push([ring[0], ring[1], ring[2]]);
    triangles
}

fn is_ear(vertices: &[Vector3D], ring: &[usize], prev: usize, curr: usize, next: usize) -> bool {
    let (a, b, c) = (&vertices[prev], &vertices[curr], &vertices[next]);
    if orient_2d(a, b, c) <= 0.0 {
        return false;
    }
    !ring
        .iter()
        .filter(|&&k| k != prev && k != curr && k != next)
        .map(|&k| &vertices[k])
        .filter(|p| *p != a && *p != b && *p != c)
        .any(|p| orient_2d(a, b, p) >= 0.0 && orient_2d(b, c, p) >= 0.0 && orient_2d(c, a, p) >= 0.0)
}

/// Incrementally assembles a [`Polygon2D`].
#[derive(Debug, Clone, Default)]
pub struct PolygonBuilder {
    vertices: Vec<Vector3D>,
    strict: bool,
}

impl PolygonBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn add_vertex(mut self, vertex: Vector3D) -> Self {
        self.vertices.push(vertex);
        self
    }

    #[must_use]
    pub fn add_xy(self, x: f64, y: f64) -> Self {
        self.add_vertex(Vector3D::xy(x, y))
    }

    #[must_use]
    pub fn add_vertices(mut self, vertices: impl IntoIterator<Item = Vector3D>) -> Self {
        self.vertices.extend(vertices);
        self
    }

    /// Makes [`PolygonBuilder::build`] reject rings that fail validation.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Builds the polygon.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertices do not form a polygon, or, in strict
    /// mode, if [`PolygonValidator::validate`] reports errors.
    pub fn build(self) -> Result<Polygon2D> {
        let polygon = Polygon2D::new(self.vertices)?;
        if self.strict {
            let report = polygon.validate();
            if !report.is_valid {
                return Err(GeometryError::InvalidInput(report.errors.join("; ")).into());
            }
        }
        Ok(polygon)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::GeoformError;

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

    fn triangulated_area(polygon: &Polygon2D) -> f64 {
        polygon.triangle_list().iter().map(crate::math::Triangle::area).sum()
    }

    // ── construction ──

    #[test]
    fn square_properties() {
        let sq = square_10();
        assert_abs_diff_eq!(sq.area(), 100.0);
        assert_eq!(sq.centroid(), Vector3D::new(5.0, 5.0, 0.0));
        assert_eq!(sq.winding_order(), WindingOrder::CounterClockwise);
        assert!(sq.is_convex());
        assert_abs_diff_eq!(sq.perimeter(), 40.0);
        assert_eq!(sq.bounds().max(), Vector3D::new(10.0, 10.0, 0.0));
    }

    #[test]
    fn too_few_vertices() {
        let err = Polygon2D::from_xy(&[(0.0, 0.0), (1.0, 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            GeoformError::Geometry(GeometryError::TooFewVertices { found: 2 })
        ));
    }

    #[test]
    fn duplicates_and_closing_vertex_removed() {
        let p = Polygon2D::from_xy(&[
            (0.0, 0.0),
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(p.vertex_count(), 3);
        assert!(Polygon2D::from_xy(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (0.0, 0.0)]).is_err());
    }

    #[test]
    fn non_finite_rejected() {
        assert!(Polygon2D::from_xy(&[(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0)]).is_err());
    }

    #[test]
    fn z_is_flattened() {
        let p = Polygon2D::new(vec![
            Vector3D::new(0.0, 0.0, 5.0),
            Vector3D::new(1.0, 0.0, 5.0),
            Vector3D::new(0.0, 1.0, 5.0),
        ])
        .unwrap();
        assert!(p.vertices().iter().all(|v| v.z == 0.0));
    }

    #[test]
    fn factories() {
        let r = Polygon2D::rectangle(4.0, 2.0).unwrap();
        assert_abs_diff_eq!(r.area(), 8.0);
        assert_eq!(r.centroid(), Vector3D::ZERO);
        assert!(Polygon2D::rectangle(0.0, 2.0).is_err());

        let hex = Polygon2D::regular(6, 1.0).unwrap();
        assert_eq!(hex.vertex_count(), 6);
        assert_abs_diff_eq!(hex.area(), 1.5 * 3f64.sqrt(), epsilon = 1e-12);
        assert!(Polygon2D::regular(2, 1.0).is_err());

        let circle = Polygon2D::circle(1.0, 256).unwrap();
        assert!((circle.area() - std::f64::consts::PI).abs() < 1e-3);
    }

    // ── winding ──

    #[test]
    fn reverse_winding_flips() {
        let sq = square_10();
        let rev = sq.reverse_winding();
        assert_eq!(rev.winding_order(), WindingOrder::Clockwise);
        assert_eq!(rev.reverse_winding().winding_order(), WindingOrder::CounterClockwise);
    }

    #[test]
    fn ensure_ccw_is_idempotent() {
        let cw = square_10().reverse_winding();
        let once = cw.ensure_counter_clockwise();
        let twice = once.ensure_counter_clockwise();
        assert_eq!(once.winding_order(), WindingOrder::CounterClockwise);
        assert_eq!(once.vertices(), twice.vertices());
        assert_eq!(cw.ensure_clockwise().vertices(), cw.vertices());
    }

    // ── triangulation ──

    #[test]
    fn convex_polygons_give_n_minus_2_triangles() {
        for sides in 3..=12 {
            let p = Polygon2D::regular(sides, 5.0).unwrap();
            assert_eq!(p.triangulate().len(), sides - 2);
            assert_abs_diff_eq!(triangulated_area(&p), p.area(), epsilon = 1e-6);
        }
    }

    #[test]
    fn clockwise_input_triangulates_ccw() {
        let cw = square_10().reverse_winding();
        let tris = cw.triangle_list();
        assert_eq!(tris.len(), 2);
        for t in tris {
            assert!(t.normal().z > 0.0);
        }
        assert_abs_diff_eq!(triangulated_area(&cw), 100.0, epsilon = 1e-6);
    }

    #[test]
    fn concave_polygon_triangulates() {
        let l = l_shape();
        assert_eq!(l.triangulate().len(), 4);
        assert_abs_diff_eq!(triangulated_area(&l), l.area(), epsilon = 1e-6);
        assert_abs_diff_eq!(l.area(), 12.0);
    }

    #[test]
    fn collinear_vertex_is_handled() {
        let p = Polygon2D::from_xy(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])
            .unwrap();
        assert_eq!(p.triangulate().len(), 3);
        assert_abs_diff_eq!(triangulated_area(&p), 100.0, epsilon = 1e-6);
    }

    #[test]
    fn triangulation_is_cached() {
        let p = l_shape();
        let first = p.triangulate().as_ptr();
        let second = p.triangulate().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn bowtie_terminates() {
        let bowtie = Polygon2D::from_xy(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]).unwrap();
        assert!(bowtie.is_self_intersecting());
        assert!(bowtie.triangulate().len() <= 2);
    }

    // ── queries ──

    #[test]
    fn contains_point() {
        let l = l_shape();
        assert!(l.contains_point(&Vector3D::xy(1.0, 1.0)));
        assert!(l.contains_point(&Vector3D::xy(1.0, 3.0)));
        assert!(!l.contains_point(&Vector3D::xy(3.0, 3.0)));
    }

    #[test]
    fn square_is_not_self_intersecting() {
        assert!(!square_10().is_self_intersecting());
        assert!(!l_shape().is_convex());
    }

    // ── transforms ──

    #[test]
    fn transforms_return_new_polygons() {
        let sq = square_10();
        let moved = sq.translate(5.0, -5.0);
        assert_eq!(moved.centroid(), Vector3D::xy(10.0, 0.0));
        assert_eq!(sq.centroid(), Vector3D::xy(5.0, 5.0));

        let rotated = sq.rotate(std::f64::consts::FRAC_PI_4);
        assert_abs_diff_eq!(rotated.area(), 100.0, epsilon = 1e-9);
        assert!(rotated.centroid().distance(&sq.centroid()) < 1e-9);

        let scaled = sq.scale(2.0, 0.5).unwrap();
        assert_abs_diff_eq!(scaled.area(), 100.0, epsilon = 1e-9);
        assert!(sq.scale(0.0, 0.0).is_err());
    }

    // ── builder ──

    #[test]
    fn builder() {
        let p = PolygonBuilder::new()
            .add_xy(0.0, 0.0)
            .add_xy(3.0, 0.0)
            .add_vertex(Vector3D::xy(0.0, 3.0))
            .build()
            .unwrap();
        assert_abs_diff_eq!(p.area(), 4.5);

        let bowtie = PolygonBuilder::new()
            .add_vertices([
                Vector3D::xy(0.0, 0.0),
                Vector3D::xy(10.0, 10.0),
                Vector3D::xy(10.0, 0.0),
                Vector3D::xy(0.0, 10.0),
            ])
            .strict();
        assert!(bowtie.build().is_err());
    }
}
