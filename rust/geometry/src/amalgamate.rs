// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Merge polygon hierarchies into a single triangulatable polygon
//!
//! Every hierarchy's outer ring is concatenated into one combined outer ring
//! and every hole is collected into one hole list. Winding is then normalized
//! with two global decisions:
//!
//! 1. the combined outer ring is reversed if it is clockwise
//! 2. if the holes (by their summed signed area) wind the same way as the
//!    now counter-clockwise outer ring, all holes are reversed together
//!
//! Decisions are not made per hierarchy, so inputs whose hierarchies disagree
//! on winding keep their relative orientation.

use crate::mesh::ClipMesh;
use crate::triangulation::{triangulate_checked, Triangulator};
use crate::winding::{
    compute_signed_area, compute_winding_order, drop_z, normalize_winding, pack_points,
    WindingOrder,
};
use crate::{Error, Point2, Point3, Result};

/// A polygon boundary with associated holes
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolygonHierarchy {
    /// Outer boundary; z is ignored
    pub positions: Vec<Point3<f64>>,
    /// Hole boundaries; z is ignored
    #[cfg_attr(feature = "serde", serde(default))]
    pub holes: Vec<Vec<Point3<f64>>>,
}

impl PolygonHierarchy {
    pub fn new(positions: Vec<Point3<f64>>, holes: Vec<Vec<Point3<f64>>>) -> Self {
        Self { positions, holes }
    }

    /// Hierarchy from 2D rings (z = 0)
    pub fn from_2d(outer: &[Point2<f64>], holes: &[Vec<Point2<f64>>]) -> Self {
        let lift = |ring: &[Point2<f64>]| -> Vec<Point3<f64>> {
            ring.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect()
        };
        Self {
            positions: lift(outer),
            holes: holes.iter().map(|h| lift(h.as_slice())).collect(),
        }
    }
}

/// Flattened polygon ready for triangulation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmalgamatedPolygon {
    /// Interleaved `x, y` data: outer ring, then each hole
    pub positions: Vec<f64>,
    /// Point offset where each hole starts
    pub hole_indices: Vec<usize>,
}

impl AmalgamatedPolygon {
    /// Total number of points
    #[inline]
    pub fn point_count(&self) -> usize {
        self.positions.len() / 2
    }

    /// Points of ring `[start, end)`, clamped to the stored points
    fn ring(&self, start: usize, end: usize) -> Vec<Point2<f64>> {
        let end = end.min(self.point_count());
        let start = start.min(end);
        self.positions[start * 2..end * 2]
            .chunks_exact(2)
            .map(|xy| Point2::new(xy[0], xy[1]))
            .collect()
    }

    /// The combined outer ring
    pub fn outer(&self) -> Vec<Point2<f64>> {
        let end = self.hole_indices.first().copied().unwrap_or(self.point_count());
        self.ring(0, end)
    }

    /// Each hole ring, in order
    pub fn holes(&self) -> Vec<Vec<Point2<f64>>> {
        self.hole_indices
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = self
                    .hole_indices
                    .get(i + 1)
                    .copied()
                    .unwrap_or(self.point_count());
                self.ring(start, end)
            })
            .collect()
    }

    /// Triangulate into a 2-component clipping mesh
    pub fn triangulate(&self, triangulator: &dyn Triangulator) -> Result<ClipMesh> {
        let indices = triangulate_checked(triangulator, &self.positions, &self.hole_indices)?;
        if indices.is_empty() {
            return Err(Error::Triangulation("polygon produced no triangles".to_string()));
        }
        Ok(ClipMesh::new(self.positions.clone(), 2, indices))
    }
}

/// Merge hierarchies into one flattened polygon with normalized winding.
///
/// Holes with fewer than 3 points are dropped.
///
/// # Errors
/// `InvalidPolygon` if there is no hierarchy, the combined outer ring has
/// fewer than 3 points, or any coordinate is not finite.
pub fn amalgamate(hierarchies: &[PolygonHierarchy]) -> Result<AmalgamatedPolygon> {
    if hierarchies.is_empty() {
        return Err(Error::InvalidPolygon("no polygon hierarchies".to_string()));
    }

    let mut outer: Vec<Point2<f64>> = Vec::new();
    let mut holes: Vec<Vec<Point2<f64>>> = Vec::new();

    for hierarchy in hierarchies {
        outer.extend(drop_z(&hierarchy.positions));
        holes.extend(
            hierarchy
                .holes
                .iter()
                .filter(|hole| hole.len() >= 3)
                .map(|hole| drop_z(hole)),
        );
    }

    if outer.len() < 3 {
        return Err(Error::InvalidPolygon(format!(
            "outer boundary has {} points, need at least 3",
            outer.len()
        )));
    }

    let all_finite = outer
        .iter()
        .chain(holes.iter().flatten())
        .all(|p| p.x.is_finite() && p.y.is_finite());
    if !all_finite {
        return Err(Error::InvalidPolygon("non-finite coordinate".to_string()));
    }

    normalize_winding(&mut outer, WindingOrder::CounterClockwise);

    // One decision for all holes, from their summed signed area
    let holes_area: f64 = holes.iter().map(|hole| compute_signed_area(hole)).sum();
    let holes_winding = if holes_area > 0.0 {
        WindingOrder::CounterClockwise
    } else {
        WindingOrder::Clockwise
    };
    if !holes.is_empty() && holes_winding != compute_winding_order(&outer).reversed() {
        for hole in &mut holes {
            hole.reverse();
        }
    }

    let total_points = outer.len() + holes.iter().map(|h| h.len()).sum::<usize>();
    let mut positions = Vec::with_capacity(total_points * 2);
    pack_points(&outer, &mut positions);

    let mut hole_indices = Vec::with_capacity(holes.len());
    for hole in &holes {
        hole_indices.push(positions.len() / 2);
        pack_points(hole, &mut positions);
    }

    Ok(AmalgamatedPolygon {
        positions,
        hole_indices,
    })
}
