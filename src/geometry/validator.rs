use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::math::intersect_2d::ring_self_intersects;
use crate::math::polygon_2d::{is_convex_2d, signed_area_2d};
use crate::math::{Vector3D, SMALL_AREA_THRESHOLD, TOLERANCE};

/// Traversal direction of a polygon ring in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindingOrder {
    CounterClockwise,
    Clockwise,
    /// Zero (or near-zero) signed area.
    Degenerate,
}

impl WindingOrder {
    #[must_use]
    pub fn from_signed_area(signed_area: f64) -> Self {
        if signed_area.abs() < TOLERANCE {
            Self::Degenerate
        } else if signed_area > 0.0 {
            Self::CounterClockwise
        } else {
            Self::Clockwise
        }
    }
}

/// Outcome of [`PolygonValidator::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub winding_order: WindingOrder,
    pub is_convex: bool,
    pub is_self_intersecting: bool,
    /// Absolute area.
    pub area: f64,
}

impl ValidationResult {
    fn invalid(error: String) -> Self {
        Self {
            is_valid: false,
            errors: vec![error],
            warnings: Vec::new(),
            winding_order: WindingOrder::Degenerate,
            is_convex: false,
            is_self_intersecting: false,
            area: 0.0,
        }
    }
}

/// Checks vertex rings for the properties a [`Polygon2D`](super::Polygon2D)
/// needs to triangulate cleanly.
pub struct PolygonValidator;

impl PolygonValidator {
    /// Validates a ring of vertices in the XY plane.
    ///
    /// Fewer than three vertices produce a single error and no further
    /// checks. Self-intersection and zero area are errors; a nonzero area
    /// below [`SMALL_AREA_THRESHOLD`] is only a warning.
    #[must_use]
    pub fn validate(vertices: &[Vector3D]) -> ValidationResult {
        if vertices.len() < 3 {
            return ValidationResult::invalid(format!(
                "polygon requires at least 3 vertices, found {}",
                vertices.len()
            ));
        }

        let signed_area = signed_area_2d(vertices);
        let area = signed_area.abs();
        let winding_order = WindingOrder::from_signed_area(signed_area);
        let is_self_intersecting = ring_self_intersects(vertices);
        let is_convex = is_convex_2d(vertices);

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        if is_self_intersecting {
            errors.push("polygon edges intersect each other".to_string());
        }
        if winding_order == WindingOrder::Degenerate {
            errors.push("polygon has zero area".to_string());
        } else if area < SMALL_AREA_THRESHOLD {
            warnings.push(format!("polygon area {area:e} is very small"));
        }

        if !errors.is_empty() || !warnings.is_empty() {
            debug!(?errors, ?warnings, "polygon validation findings");
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            winding_order,
            is_convex,
            is_self_intersecting,
            area,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn ring(points: &[(f64, f64)]) -> Vec<Vector3D> {
        points.iter().map(|&(x, y)| Vector3D::xy(x, y)).collect()
    }

    #[test]
    fn valid_square() {
        let r = PolygonValidator::validate(&ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]));
        assert!(r.is_valid);
        assert!(r.errors.is_empty());
        assert!(r.warnings.is_empty());
        assert_eq!(r.winding_order, WindingOrder::CounterClockwise);
        assert!(r.is_convex);
        assert!(!r.is_self_intersecting);
        assert_abs_diff_eq!(r.area, 100.0);
    }

    #[test]
    fn too_few_vertices_is_single_error() {
        let r = PolygonValidator::validate(&ring(&[(0.0, 0.0), (1.0, 0.0)]));
        assert!(!r.is_valid);
        assert_eq!(r.errors.len(), 1);
    }

    #[test]
    fn bowtie_is_invalid() {
        let r = PolygonValidator::validate(&ring(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]));
        assert!(!r.is_valid);
        assert!(r.is_self_intersecting);
    }

    #[test]
    fn clockwise_detected() {
        let r = PolygonValidator::validate(&ring(&[(0.0, 0.0), (0.0, 5.0), (5.0, 5.0), (5.0, 0.0)]));
        assert!(r.is_valid);
        assert_eq!(r.winding_order, WindingOrder::Clockwise);
    }

    #[test]
    fn collinear_is_degenerate() {
        let r = PolygonValidator::validate(&ring(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]));
        assert!(!r.is_valid);
        assert_eq!(r.winding_order, WindingOrder::Degenerate);
    }

    #[test]
    fn tiny_area_warns() {
        let r = PolygonValidator::validate(&ring(&[(0.0, 0.0), (1e-3, 0.0), (0.0, 1e-4)]));
        assert!(r.is_valid);
        assert_eq!(r.warnings.len(), 1);
    }

    #[test]
    fn concave_is_valid_but_not_convex() {
        let r = PolygonValidator::validate(&ring(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (2.0, 1.0),
            (0.0, 4.0),
        ]));
        assert!(r.is_valid);
        assert!(!r.is_convex);
    }
}
