// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Winding order helpers for closed 2D rings

use nalgebra::{Point2, Point3};

/// Rotational direction of a closed ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WindingOrder {
    Clockwise,
    CounterClockwise,
}

impl WindingOrder {
    /// The opposite rotational direction
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            WindingOrder::Clockwise => WindingOrder::CounterClockwise,
            WindingOrder::CounterClockwise => WindingOrder::Clockwise,
        }
    }
}

/// Signed area of a closed ring (shoelace formula).
/// Positive for counter-clockwise rings, negative for clockwise rings.
pub fn compute_signed_area(contour: &[Point2<f64>]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    let n = contour.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area += contour[i].x * contour[j].y;
        area -= contour[j].x * contour[i].y;
    }

    area * 0.5
}

/// Winding order of a closed ring.
///
/// Rings with zero area (collinear or fewer than three points) report
/// `Clockwise`, so callers normalizing to counter-clockwise reverse them.
#[inline]
pub fn compute_winding_order(contour: &[Point2<f64>]) -> WindingOrder {
    if compute_signed_area(contour) > 0.0 {
        WindingOrder::CounterClockwise
    } else {
        WindingOrder::Clockwise
    }
}

/// Reverse the ring in place if it does not already have the wanted winding.
/// Returns true if the ring was reversed.
pub fn normalize_winding(contour: &mut [Point2<f64>], wanted: WindingOrder) -> bool {
    if compute_winding_order(contour) == wanted {
        return false;
    }
    contour.reverse();
    true
}

/// Drop the z coordinate of every point
#[inline]
pub fn drop_z(points: &[Point3<f64>]) -> Vec<Point2<f64>> {
    points.iter().map(|p| Point2::new(p.x, p.y)).collect()
}

/// Pack points into an interleaved `x, y, x, y, ...` buffer
#[inline]
pub fn pack_points(points: &[Point2<f64>], out: &mut Vec<f64>) {
    out.reserve(points.len() * 2);
    for p in points {
        out.push(p.x);
        out.push(p.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn ccw_square() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_signed_area_ccw() {
        let area = compute_signed_area(&ccw_square());
        assert!((area - 1.0).abs() < EPSILON);
        assert_eq!(compute_winding_order(&ccw_square()), WindingOrder::CounterClockwise);
    }

    #[test]
    fn test_signed_area_cw() {
        let mut square = ccw_square();
        square.reverse();
        let area = compute_signed_area(&square);
        assert!((area + 1.0).abs() < EPSILON);
        assert_eq!(compute_winding_order(&square), WindingOrder::Clockwise);
    }

    #[test]
    fn test_degenerate_ring_is_clockwise() {
        let line = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(2.0, 2.0)];
        assert_eq!(compute_signed_area(&line), 0.0);
        assert_eq!(compute_winding_order(&line), WindingOrder::Clockwise);
        assert_eq!(compute_winding_order(&line[..2]), WindingOrder::Clockwise);
    }

    #[test]
    fn test_normalize_winding() {
        let mut square = ccw_square();
        assert!(!normalize_winding(&mut square, WindingOrder::CounterClockwise));
        assert!(normalize_winding(&mut square, WindingOrder::Clockwise));
        assert_eq!(compute_winding_order(&square), WindingOrder::Clockwise);
        assert_eq!(square[0], Point2::new(0.0, 1.0));
        assert!(normalize_winding(&mut square, WindingOrder::Clockwise.reversed()));
        assert_eq!(compute_winding_order(&square), WindingOrder::CounterClockwise);
    }

    #[test]
    fn test_reversed() {
        assert_eq!(WindingOrder::Clockwise.reversed(), WindingOrder::CounterClockwise);
        assert_eq!(WindingOrder::CounterClockwise.reversed(), WindingOrder::Clockwise);
    }

    #[test]
    fn test_pack_points() {
        let mut out = vec![9.0];
        pack_points(&ccw_square(), &mut out);
        assert_eq!(out, vec![9.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_drop_z() {
        let points = drop_z(&[Point3::new(1.0, 2.0, 3.0), Point3::new(-4.0, 5.0, -6.0)]);
        assert_eq!(points, vec![Point2::new(1.0, 2.0), Point2::new(-4.0, 5.0)]);
    }
}
