//! Point and polygon queries in the XY plane.

use crate::math::distance_2d::closest_point_on_segment;
use crate::math::intersect_2d::{point_in_ring, segments_properly_intersect};
use crate::math::Vector3D;

use super::polygon_2d::Polygon2D;
use super::Triangulatable;

/// Ray-casting parity test; agrees with [`Polygon2D::contains_point`].
#[must_use]
pub fn point_in_polygon(point: &Vector3D, polygon: &Polygon2D) -> bool {
    point_in_ring(point, polygon.vertices())
}

/// Closest point to `point` on any edge of `polygon`.
#[must_use]
pub fn closest_point_on_polygon_edge(point: &Vector3D, polygon: &Polygon2D) -> Vector3D {
    let mut best = polygon.vertices()[0];
    let mut best_dist = f64::INFINITY;
    for (a, b) in polygon.edges() {
        let c = closest_point_on_segment(point, &a, &b);
        let d = (point.x - c.x).hypot(point.y - c.y);
        if d < best_dist {
            best_dist = d;
            best = c;
        }
    }
    best
}

/// Minimum XY distance from `point` to the boundary of `polygon`.
///
/// Zero only on the boundary; interior points report their distance to
/// the nearest edge too.
#[must_use]
pub fn distance_to_polygon_edge(point: &Vector3D, polygon: &Polygon2D) -> f64 {
    let c = closest_point_on_polygon_edge(point, polygon);
    (point.x - c.x).hypot(point.y - c.y)
}

/// Returns `true` if `a0-a1` and `b0-b1` cross at a single interior point.
#[must_use]
pub fn segments_intersect(a0: &Vector3D, a1: &Vector3D, b0: &Vector3D, b1: &Vector3D) -> bool {
    segments_properly_intersect(a0, a1, b0, b1)
}

/// Returns `true` if a vertex of either polygon lies inside the other, or
/// an edge of `a` properly crosses an edge of `b`.
#[must_use]
pub fn polygons_intersect(a: &Polygon2D, b: &Polygon2D) -> bool {
    if a.vertices().iter().any(|v| point_in_polygon(v, b))
        || b.vertices().iter().any(|v| point_in_polygon(v, a))
    {
        return true;
    }
    a.edges()
        .any(|(a0, a1)| b.edges().any(|(b0, b1)| segments_intersect(&a0, &a1, &b0, &b1)))
}

/// Returns `true` if every vertex of `inner` lies inside `outer` and no
/// edges cross.
#[must_use]
pub fn polygon_contains_polygon(outer: &Polygon2D, inner: &Polygon2D) -> bool {
    inner.vertices().iter().all(|v| point_in_polygon(v, outer))
        && !outer
            .edges()
            .any(|(a0, a1)| inner.edges().any(|(b0, b1)| segments_intersect(&a0, &a1, &b0, &b1)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn square(x0: f64, y0: f64, side: f64) -> Polygon2D {
        Polygon2D::from_xy(&[(x0, y0), (x0 + side, y0), (x0 + side, y0 + side), (x0, y0 + side)])
            .unwrap()
    }

    fn v(x: f64, y: f64) -> Vector3D {
        Vector3D::xy(x, y)
    }

    // ── point queries ──

    #[test]
    fn point_in_polygon_agrees_with_polygon() {
        let l_shape = Polygon2D::from_xy(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 1.0),
            (1.0, 1.0),
            (1.0, 4.0),
            (0.0, 4.0),
        ])
        .unwrap();
        for x in 0..10 {
            for y in 0..10 {
                let p = v(f64::from(x) * 0.5 - 0.25, f64::from(y) * 0.5 - 0.25);
                assert_eq!(point_in_polygon(&p, &l_shape), l_shape.contains_point(&p));
            }
        }
        assert!(point_in_polygon(&v(0.5, 3.0), &l_shape));
        assert!(!point_in_polygon(&v(3.0, 3.0), &l_shape));
    }

    #[test]
    fn edge_distance() {
        let sq = square(0.0, 0.0, 10.0);
        assert_abs_diff_eq!(distance_to_polygon_edge(&v(5.0, 5.0), &sq), 5.0);
        assert_abs_diff_eq!(distance_to_polygon_edge(&v(5.0, 12.0), &sq), 2.0);
        assert_abs_diff_eq!(distance_to_polygon_edge(&v(10.0, 3.0), &sq), 0.0);
        // nearest feature is a corner
        assert_abs_diff_eq!(distance_to_polygon_edge(&v(13.0, 14.0), &sq), 5.0, epsilon = 1e-12);
        assert_eq!(closest_point_on_polygon_edge(&v(13.0, 14.0), &sq), v(10.0, 10.0));
        assert_eq!(closest_point_on_polygon_edge(&v(2.0, -3.0), &sq), v(2.0, 0.0));
    }

    // ── polygon pairs ──

    #[test]
    fn overlapping_squares_intersect() {
        assert!(polygons_intersect(&square(0.0, 0.0, 10.0), &square(5.0, 5.0, 10.0)));
    }

    #[test]
    fn disjoint_squares_do_not_intersect() {
        assert!(!polygons_intersect(&square(0.0, 0.0, 10.0), &square(20.0, 0.0, 5.0)));
    }

    #[test]
    fn crossing_without_contained_vertices() {
        // A plus sign: neither rectangle has a vertex inside the other.
        let wide = Polygon2D::from_xy(&[(0.0, 4.0), (10.0, 4.0), (10.0, 6.0), (0.0, 6.0)]).unwrap();
        let tall = Polygon2D::from_xy(&[(4.0, 0.0), (6.0, 0.0), (6.0, 10.0), (4.0, 10.0)]).unwrap();
        assert!(polygons_intersect(&wide, &tall));
        assert!(!polygon_contains_polygon(&wide, &tall));
    }

    #[test]
    fn containment() {
        let outer = square(0.0, 0.0, 10.0);
        let inner = square(2.0, 2.0, 3.0);
        assert!(polygon_contains_polygon(&outer, &inner));
        assert!(!polygon_contains_polygon(&inner, &outer));
        assert!(polygons_intersect(&outer, &inner));
        assert!(!polygon_contains_polygon(&outer, &square(8.0, 8.0, 5.0)));
    }

    #[test]
    fn public_segment_test() {
        assert!(segments_intersect(&v(0.0, 0.0), &v(2.0, 2.0), &v(0.0, 2.0), &v(2.0, 0.0)));
        assert!(!segments_intersect(&v(0.0, 0.0), &v(1.0, 0.0), &v(1.0, 0.0), &v(2.0, 0.0)));
    }
}
