// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clipping mesh data structures

use crate::predicates::point_in_triangle;
use crate::{Error, Result};
use nalgebra::Point2;

/// Which two components of a vertex are treated as (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisSelection {
    pub x: usize,
    pub y: usize,
}

impl AxisSelection {
    /// First two components, e.g. XY of XYZ data
    pub const XY: AxisSelection = AxisSelection { x: 0, y: 1 };
    /// Ground plane of Y-up XYZ data
    pub const XZ: AxisSelection = AxisSelection { x: 0, y: 2 };

    #[inline]
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Check that both axes are distinct and exist in a vertex of `components` values
    pub fn validate(&self, components: usize) -> Result<()> {
        if self.x == self.y || self.x >= components || self.y >= components {
            return Err(Error::InvalidAxes {
                x: self.x,
                y: self.y,
                components,
            });
        }
        Ok(())
    }
}

impl Default for AxisSelection {
    fn default() -> Self {
        Self::XY
    }
}

/// Triangle mesh used as clipping input.
///
/// Positions are stored flat with `components` values per vertex, so meshes
/// carrying extra (unused) components can be consumed without copying.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClipMesh {
    /// Vertex positions, `components` values per vertex
    pub positions: Vec<f64>,
    /// Number of values per vertex
    pub components: usize,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

/// A mesh triangle resolved to 2D positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle2D {
    /// Vertex indices into the mesh
    pub indices: [u32; 3],
    pub a: Point2<f64>,
    pub b: Point2<f64>,
    pub c: Point2<f64>,
}

impl Triangle2D {
    /// Boundary-inclusive containment test
    #[inline]
    pub fn contains(&self, p: &Point2<f64>) -> bool {
        point_in_triangle(p, &self.a, &self.b, &self.c)
    }
}

impl ClipMesh {
    /// Create a mesh from flat positions and triangle indices
    pub fn new(positions: Vec<f64>, components: usize, indices: Vec<u32>) -> Self {
        Self {
            positions,
            components,
            indices,
        }
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        if self.components == 0 {
            0
        } else {
            self.positions.len() / self.components
        }
    }

    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Check the mesh is usable along `axes`: whole vertices, whole triangles,
    /// at least one triangle, and every index in range.
    pub fn validate(&self, axes: AxisSelection) -> Result<()> {
        if self.components == 0 || self.positions.len() % self.components != 0 {
            return Err(Error::MalformedPositions(format!(
                "{} values is not a whole number of {}-component vertices",
                self.positions.len(),
                self.components
            )));
        }

        axes.validate(self.components)?;

        if self.indices.len() % 3 != 0 {
            return Err(Error::MalformedIndices(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }

        if self.indices.is_empty() {
            return Err(Error::EmptyMesh("mesh has no triangles".to_string()));
        }

        let vertex_count = self.vertex_count();
        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&index| index as usize >= vertex_count)
        {
            return Err(Error::IndexOutOfRange {
                index,
                vertex_count,
            });
        }

        Ok(())
    }

    /// Position of a vertex along `axes`.
    ///
    /// Panics if `index` is out of range; call [`ClipMesh::validate`] first or
    /// use [`ClipMesh::try_point`].
    #[inline]
    pub fn point(&self, index: u32, axes: AxisSelection) -> Point2<f64> {
        let base = index as usize * self.components;
        Point2::new(self.positions[base + axes.x], self.positions[base + axes.y])
    }

    /// Position of a vertex along `axes`, or `None` if it does not exist
    #[inline]
    pub fn try_point(&self, index: u32, axes: AxisSelection) -> Option<Point2<f64>> {
        if (index as usize) < self.vertex_count() {
            let base = index as usize * self.components;
            Some(Point2::new(
                *self.positions.get(base + axes.x)?,
                *self.positions.get(base + axes.y)?,
            ))
        } else {
            None
        }
    }

    /// Resolve a triangle from three vertex indices
    pub fn try_triangle(&self, indices: [u32; 3], axes: AxisSelection) -> Result<Triangle2D> {
        let vertex_count = self.vertex_count();
        let resolve = |index: u32| {
            self.try_point(index, axes).ok_or(Error::IndexOutOfRange {
                index,
                vertex_count,
            })
        };
        Ok(Triangle2D {
            indices,
            a: resolve(indices[0])?,
            b: resolve(indices[1])?,
            c: resolve(indices[2])?,
        })
    }

    /// Resolve every triangle to 2D, in index order.
    /// Assumes a validated mesh.
    pub fn triangles_2d(&self, axes: AxisSelection) -> Vec<Triangle2D> {
        self.indices
            .chunks_exact(3)
            .map(|tri| Triangle2D {
                indices: [tri[0], tri[1], tri[2]],
                a: self.point(tri[0], axes),
                b: self.point(tri[1], axes),
                c: self.point(tri[2], axes),
            })
            .collect()
    }

    /// Positions converted to f32 for flat-array consumers
    pub fn positions_f32(&self) -> Vec<f32> {
        self.positions.iter().map(|&v| v as f32).collect()
    }
}
