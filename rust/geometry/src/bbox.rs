// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned rectangles and 2D mesh bounding boxes

use crate::mesh::{AxisSelection, ClipMesh};
use crate::Result;
use nalgebra::Point2;

/// Axis-aligned rectangle stored as its four corners in clockwise order
/// (y grows upwards, so the top edge has the larger y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top_left: Point2<f64>,
    pub top_right: Point2<f64>,
    pub bottom_right: Point2<f64>,
    pub bottom_left: Point2<f64>,
}

impl Rect {
    /// Create a rectangle from its extents
    #[inline]
    pub fn from_extents(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            top_left: Point2::new(min_x, max_y),
            top_right: Point2::new(max_x, max_y),
            bottom_right: Point2::new(max_x, min_y),
            bottom_left: Point2::new(min_x, min_y),
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.top_left.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.top_right.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.top_left.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.bottom_right.y
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.top_right.x - self.top_left.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.top_right.y - self.bottom_right.y
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            (self.left() + self.right()) * 0.5,
            (self.top() + self.bottom()) * 0.5,
        )
    }

    /// Inclusive containment test: points on the boundary are inside
    #[inline]
    pub fn contains(&self, p: &Point2<f64>) -> bool {
        p.x <= self.top_right.x
            && p.x >= self.top_left.x
            && p.y <= self.top_left.y
            && p.y >= self.bottom_right.y
    }

    /// Corners in clockwise order: top-left, top-right, bottom-right, bottom-left
    #[inline]
    pub fn corners(&self) -> [Point2<f64>; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }

    /// Edges in the order top, bottom, left, right
    #[inline]
    pub fn edges(&self) -> [(Point2<f64>, Point2<f64>); 4] {
        [
            (self.top_left, self.top_right),
            (self.bottom_left, self.bottom_right),
            (self.top_left, self.bottom_left),
            (self.top_right, self.bottom_right),
        ]
    }
}

/// 2D bounding box of a triangle mesh along two selected axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox2D {
    rect: Rect,
    width: f64,
    height: f64,
}

impl BoundingBox2D {
    /// Bounding box of every vertex referenced by the mesh's triangles.
    ///
    /// Unreferenced vertices do not contribute. The mesh is validated first,
    /// so malformed or out-of-range indices are reported instead of read.
    pub fn from_mesh(mesh: &ClipMesh, axes: AxisSelection) -> Result<Self> {
        mesh.validate(axes)?;

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for &index in &mesh.indices {
            let p = mesh.point(index, axes);
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Ok(Self::from_rect(Rect::from_extents(min_x, min_y, max_x, max_y)))
    }

    /// Bounding box of a set of points, or `None` if there are no points
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2<f64>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min, mut max) = (*first, *first);

        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        Some(Self::from_rect(Rect::from_extents(min.x, min.y, max.x, max.y)))
    }

    #[inline]
    fn from_rect(rect: Rect) -> Self {
        Self {
            rect,
            width: rect.width(),
            height: rect.height(),
        }
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    #[inline]
    pub fn top_left(&self) -> Point2<f64> {
        self.rect.top_left
    }

    #[inline]
    pub fn top_right(&self) -> Point2<f64> {
        self.rect.top_right
    }

    #[inline]
    pub fn bottom_right(&self) -> Point2<f64> {
        self.rect.bottom_right
    }

    #[inline]
    pub fn bottom_left(&self) -> Point2<f64> {
        self.rect.bottom_left
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        self.rect.center()
    }

    /// True if the box has no area (or non-finite extents) and cannot be partitioned
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let finite = self.width.is_finite() && self.height.is_finite();
        !(finite && self.width > 0.0 && self.height > 0.0)
    }

    /// Corners in clockwise order: top-left, top-right, bottom-right, bottom-left
    #[inline]
    pub fn to_clockwise_points(&self) -> [Point2<f64>; 4] {
        self.rect.corners()
    }

    /// Corners as `[tl.x, tl.y, tr.x, tr.y, br.x, br.y, bl.x, bl.y]`
    pub fn to_clockwise_f32(&self) -> [f32; 8] {
        let mut out = [0.0f32; 8];
        for (i, corner) in self.rect.corners().iter().enumerate() {
            out[i * 2] = corner.x as f32;
            out[i * 2 + 1] = corner.y as f32;
        }
        out
    }
}
