// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D geometric predicates used to classify grid cells against triangles.
//!
//! All tests are boundary-inclusive: a point on a triangle edge is inside the
//! triangle, and a point on a rectangle edge is inside the rectangle.

use crate::bbox::Rect;
use nalgebra::Point2;

/// Twice the signed area of the triangle (a, b, c)
#[inline]
pub fn sign(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (a.x - c.x) * (b.y - c.y) - (b.x - c.x) * (a.y - c.y)
}

/// True if `p` is on the same side (or on the boundary) of all three edges
#[inline]
pub fn point_in_triangle(
    p: &Point2<f64>,
    a: &Point2<f64>,
    b: &Point2<f64>,
    c: &Point2<f64>,
) -> bool {
    let d1 = sign(p, a, b);
    let d2 = sign(p, b, c);
    let d3 = sign(p, c, a);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}

/// Intersection point of the segments `s1-t1` and `s2-t2`.
///
/// Returns `None` for parallel segments (zero determinant) or when the
/// intersection of the supporting lines is outside either segment.
#[inline]
pub fn segment_intersection(
    s1: &Point2<f64>,
    t1: &Point2<f64>,
    s2: &Point2<f64>,
    t2: &Point2<f64>,
) -> Option<Point2<f64>> {
    let dx = t1.x - s1.x;
    let dy = t1.y - s1.y;

    let determinant = dx * (t2.y - s2.y) - (t2.x - s2.x) * dy;
    if determinant == 0.0 {
        return None;
    }

    let lambda = ((t2.y - s2.y) * (t2.x - s1.x) + (s2.x - t2.x) * (t2.y - s1.y)) / determinant;
    let gamma = ((s1.y - t1.y) * (t2.x - s1.x) + dx * (t2.y - s1.y)) / determinant;

    if !(0.0..=1.0).contains(&lambda) || !(0.0..=1.0).contains(&gamma) {
        return None;
    }

    Some(Point2::new(s1.x + lambda * dx, s1.y + lambda * dy))
}

/// True if any triangle vertex lies in the rectangle, or any triangle edge
/// crosses any rectangle edge.
///
/// A rectangle lying strictly inside a triangle does not intersect it by this
/// definition; that case is detected by [`triangle_covers_rect`].
pub fn triangle_intersects_rect(
    rect: &Rect,
    a: &Point2<f64>,
    b: &Point2<f64>,
    c: &Point2<f64>,
) -> bool {
    if rect.contains(a) || rect.contains(b) || rect.contains(c) {
        return true;
    }

    let triangle_edges = [(a, b), (c, b), (c, a)];
    let rect_edges = rect.edges();

    triangle_edges.iter().any(|(ts, tt)| {
        rect_edges
            .iter()
            .any(|(rs, rt)| segment_intersection(rs, rt, ts, tt).is_some())
    })
}

/// True if all four rectangle corners lie in the triangle
pub fn triangle_covers_rect(
    rect: &Rect,
    a: &Point2<f64>,
    b: &Point2<f64>,
    c: &Point2<f64>,
) -> bool {
    rect.corners()
        .iter()
        .all(|corner| point_in_triangle(corner, a, b, c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn test_sign() {
        // Counter-clockwise triangle has positive doubled area
        assert_eq!(sign(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0)), 1.0);
        assert_eq!(sign(&p(0.0, 0.0), &p(0.0, 1.0), &p(1.0, 0.0)), -1.0);
        assert_eq!(sign(&p(0.0, 0.0), &p(1.0, 1.0), &p(2.0, 2.0)), 0.0);
    }

    #[test]
    fn test_point_in_triangle() {
        let (a, b, c) = (p(0.0, 0.0), p(10.0, 0.0), p(0.0, 10.0));
        assert!(point_in_triangle(&p(1.0, 1.0), &a, &b, &c));
        assert!(!point_in_triangle(&p(6.0, 6.0), &a, &b, &c));
        assert!(!point_in_triangle(&p(-0.1, 1.0), &a, &b, &c));
        // Winding of the triangle does not matter
        assert!(point_in_triangle(&p(1.0, 1.0), &a, &c, &b));
    }

    #[test]
    fn test_point_in_triangle_boundary_is_inside() {
        let (a, b, c) = (p(0.0, 0.0), p(10.0, 0.0), p(0.0, 10.0));
        assert!(point_in_triangle(&p(5.0, 5.0), &a, &b, &c));
        assert!(point_in_triangle(&p(0.0, 0.0), &a, &b, &c));
        assert!(point_in_triangle(&p(3.0, 0.0), &a, &b, &c));
    }

    #[test]
    fn test_segment_intersection_crossing() {
        let hit =
            segment_intersection(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, -1.0), &p(1.0, 3.0)).unwrap();
        assert_relative_eq!(hit.x, 1.0);
        assert_relative_eq!(hit.y, 0.0);
    }

    #[test]
    fn test_segment_intersection_misses() {
        // Lines cross but outside the second segment
        assert!(
            segment_intersection(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, 1.0), &p(1.0, 3.0)).is_none()
        );
        // Lines cross but outside the first segment
        assert!(
            segment_intersection(&p(0.0, 0.0), &p(2.0, 0.0), &p(3.0, -1.0), &p(3.0, 1.0)).is_none()
        );
        // Parallel
        assert!(
            segment_intersection(&p(0.0, 0.0), &p(2.0, 0.0), &p(0.0, 1.0), &p(2.0, 1.0)).is_none()
        );
        // Collinear overlap has a zero determinant too
        assert!(
            segment_intersection(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, 0.0), &p(3.0, 0.0)).is_none()
        );
    }

    #[test]
    fn test_segment_intersection_touching_endpoint() {
        let hit =
            segment_intersection(&p(0.0, 0.0), &p(2.0, 0.0), &p(2.0, 0.0), &p(2.0, 5.0)).unwrap();
        assert_relative_eq!(hit.x, 2.0);
        assert_relative_eq!(hit.y, 0.0);
    }

    #[test]
    fn test_triangle_intersects_rect_vertex_inside() {
        let rect = Rect::from_extents(0.0, 0.0, 1.0, 1.0);
        assert!(triangle_intersects_rect(&rect, &p(0.5, 0.5), &p(5.0, 0.0), &p(5.0, 5.0)));
    }

    #[test]
    fn test_triangle_intersects_rect_edges_only() {
        // Thin triangle passing through the rectangle with all vertices outside
        let rect = Rect::from_extents(0.0, 0.0, 1.0, 1.0);
        assert!(triangle_intersects_rect(&rect, &p(-1.0, 0.4), &p(2.0, 0.4), &p(2.0, 0.6)));
    }

    #[test]
    fn test_triangle_intersects_rect_disjoint() {
        let rect = Rect::from_extents(0.0, 0.0, 1.0, 1.0);
        assert!(!triangle_intersects_rect(&rect, &p(2.0, 2.0), &p(3.0, 2.0), &p(2.0, 3.0)));
    }

    #[test]
    fn test_rect_inside_triangle_is_cover_not_intersect() {
        let rect = Rect::from_extents(1.0, 1.0, 2.0, 2.0);
        let (a, b, c) = (p(0.0, 0.0), p(10.0, 0.0), p(0.0, 10.0));
        assert!(!triangle_intersects_rect(&rect, &a, &b, &c));
        assert!(triangle_covers_rect(&rect, &a, &b, &c));
    }

    #[test]
    fn test_triangle_covers_rect_partial() {
        let rect = Rect::from_extents(4.0, 4.0, 6.0, 6.0);
        let (a, b, c) = (p(0.0, 0.0), p(10.0, 0.0), p(0.0, 10.0));
        assert!(!triangle_covers_rect(&rect, &a, &b, &c));
        assert!(triangle_intersects_rect(&rect, &a, &b, &c));
    }
}
