// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

/// Statistics gathered while building a clipping polygon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Number of input polygon hierarchies.
    pub hierarchy_count: usize,
    /// Number of points after amalgamation.
    pub vertex_count: usize,
    /// Number of triangles in the clipping mesh.
    pub triangle_count: usize,
    /// Grid rows.
    pub num_rows: usize,
    /// Grid columns.
    pub num_cols: usize,
    /// Cells no triangle touches.
    pub none_cells: usize,
    /// Cells crossed by triangles.
    pub partial_cells: usize,
    /// Cells covered by a single triangle.
    pub total_cells: usize,
    /// Length of the overlap index list.
    pub overlap_index_count: usize,
    /// Time spent amalgamating and triangulating (ms).
    pub triangulate_time_ms: u64,
    /// Time spent building the grid (ms).
    pub grid_time_ms: u64,
    /// Total build time (ms).
    pub total_time_ms: u64,
}

impl BuildStats {
    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.num_rows * self.num_cols
    }

    /// Average number of candidate triangles per partial cell
    pub fn mean_candidates_per_partial_cell(&self) -> f64 {
        if self.partial_cells == 0 {
            0.0
        } else {
            (self.overlap_index_count / 3) as f64 / self.partial_cells as f64
        }
    }
}
