// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat float encoding of a grid for texture-like storage
//!
//! Layout:
//! - `grid`: `CELL_NUM_ELEMENTS` floats per cell in row-major order:
//!   status code (`None=1, Partial=2, Total=3`), start index, end index.
//!   Start/end are zero unless the cell is partial.
//! - `overlap_indices`: the overlap index list, one float per index
//! - `mesh_positions`: mesh positions, `mesh_components` floats per vertex
//! - scalar metadata: clockwise bounding box corners, cell size, row/column counts

use super::{AccelerationGrid, Cell, CELL_NUM_ELEMENTS};
use crate::mesh::ClipMesh;
use crate::{Error, Result};

/// Largest integer every value up to which is exactly representable as f32
const MAX_EXACT_F32_INTEGER: usize = 1 << 24;

/// Packed, float-only representation of a grid and its mesh
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackedGrid {
    /// Cells, `CELL_NUM_ELEMENTS` floats each
    pub grid: Vec<f32>,
    /// Overlap index list as floats
    pub overlap_indices: Vec<f32>,
    /// Mesh positions as floats
    pub mesh_positions: Vec<f32>,
    /// Values per vertex in `mesh_positions`
    pub mesh_components: usize,
    /// `[tl.x, tl.y, tr.x, tr.y, br.x, br.y, bl.x, bl.y]`
    pub bounding_box: [f32; 8],
    /// `[cell_width, cell_height]`
    pub cell_dimensions: [f32; 2],
    /// `[num_rows, num_cols]`
    pub num_rows_and_cols: [u32; 2],
}

impl PackedGrid {
    /// Number of cells (one RGB pixel each)
    #[inline]
    pub fn grid_num_pixels(&self) -> usize {
        self.grid.len() / CELL_NUM_ELEMENTS
    }

    /// Number of triangles in the overlap list (one RGB pixel each)
    #[inline]
    pub fn overlap_indices_num_pixels(&self) -> usize {
        self.overlap_indices.len() / 3
    }

    /// Number of mesh vertices
    #[inline]
    pub fn mesh_positions_num_pixels(&self) -> usize {
        if self.mesh_components == 0 {
            0
        } else {
            self.mesh_positions.len() / self.mesh_components
        }
    }

    /// Decode the cells back from their float encoding
    pub fn decode_cells(&self) -> Result<Vec<Cell>> {
        let [num_rows, num_cols] = self.num_rows_and_cols;
        let expected = num_rows as usize * num_cols as usize * CELL_NUM_ELEMENTS;
        if self.grid.len() != expected {
            return Err(Error::InvalidPacking(format!(
                "grid has {} values, expected {} for {}x{} cells",
                self.grid.len(),
                expected,
                num_rows,
                num_cols
            )));
        }

        self.grid
            .chunks_exact(CELL_NUM_ELEMENTS)
            .map(|encoded| Cell::decode(encoded, self.overlap_indices.len()))
            .collect()
    }
}

impl AccelerationGrid {
    /// Pack the grid and its mesh into flat float arrays.
    ///
    /// # Errors
    /// `InvalidPacking` if an index or range bound is too large to be stored
    /// exactly in an f32.
    pub fn pack(&self, mesh: &ClipMesh) -> Result<PackedGrid> {
        let largest = self.overlap_indices.len().max(mesh.vertex_count());
        if largest > MAX_EXACT_F32_INTEGER {
            return Err(Error::InvalidPacking(format!(
                "{} exceeds the largest exact f32 integer {}",
                largest, MAX_EXACT_F32_INTEGER
            )));
        }

        let mut grid = Vec::with_capacity(self.cells.len() * CELL_NUM_ELEMENTS);
        for cell in &self.cells {
            grid.extend_from_slice(&cell.encode());
        }

        Ok(PackedGrid {
            grid,
            overlap_indices: self.overlap_indices.iter().map(|&i| i as f32).collect(),
            mesh_positions: mesh.positions_f32(),
            mesh_components: mesh.components,
            bounding_box: self.bounding_box.to_clockwise_f32(),
            cell_dimensions: [self.cell_width as f32, self.cell_height as f32],
            num_rows_and_cols: [self.num_rows as u32, self.num_cols as u32],
        })
    }
}
