// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point queries against a built grid

use super::{AccelerationGrid, Cell, CellOcclusion};
use crate::mesh::ClipMesh;
use crate::Result;
use nalgebra::Point2;
use std::ops::Range;

/// The cell a point falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLookup {
    pub row: usize,
    pub col: usize,
    pub cell: Cell,
}

impl CellLookup {
    #[inline]
    pub fn occlusion(&self) -> CellOcclusion {
        self.cell.occlusion()
    }

    /// Range into the overlap index list, for partial cells only
    #[inline]
    pub fn overlap_range(&self) -> Option<Range<usize>> {
        self.cell.overlap_range()
    }
}

impl AccelerationGrid {
    /// Find the cell containing `point`.
    ///
    /// Returns `None` for points outside the bounding box; the box bounds are
    /// inclusive. Points on the right or bottom edge of the box belong to the
    /// last column or row.
    pub fn locate(&self, point: &Point2<f64>) -> Option<CellLookup> {
        let rect = self.bounding_box.rect();
        if !rect.contains(point) {
            return None;
        }

        let local_x = point.x - rect.left();
        // y is flipped: row 0 is the top band
        let local_y = rect.top() - point.y;

        let col = ((local_x / self.cell_width).floor() as usize).min(self.num_cols - 1);
        let row = ((local_y / self.cell_height).floor() as usize).min(self.num_rows - 1);

        Some(CellLookup {
            row,
            col,
            cell: self.cells[row * self.num_cols + col],
        })
    }

    /// Exact point-in-polygon test accelerated by the grid.
    ///
    /// `mesh` must be the mesh the grid was built from. Only the candidate
    /// triangles of a partial cell are tested; `None` and `Total` cells answer
    /// directly. Points outside the bounding box are outside the polygon.
    ///
    /// # Errors
    /// `IndexOutOfRange` if a candidate triangle does not exist in `mesh`.
    pub fn contains(&self, mesh: &ClipMesh, point: &Point2<f64>) -> Result<bool> {
        let Some(lookup) = self.locate(point) else {
            return Ok(false);
        };

        match lookup.cell {
            Cell::None => Ok(false),
            Cell::Total => Ok(true),
            Cell::Partial { .. } => {
                for tri in self.cell_overlap_indices(&lookup.cell).chunks_exact(3) {
                    let triangle = mesh.try_triangle([tri[0], tri[1], tri[2]], self.axes)?;
                    // Bail as soon as one candidate contains the point
                    if triangle.contains(point) {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}
