// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon Clipping Acceleration Grid
//!
//! Partitions the 2D bounding box of a triangulated clipping polygon into
//! `(splits + 1)^2` uniform cells and classifies every cell as:
//!
//! - `None`: no triangle touches the cell, every point in it is outside
//! - `Total`: one triangle covers the whole cell, every point in it is inside
//! - `Partial`: the polygon boundary crosses the cell; the cell references the
//!   triangles that touch it through a range of the shared overlap index list
//!
//! A point query therefore costs one cell lookup, plus a point-in-triangle
//! test over a handful of candidate triangles for partial cells.
//!
//! Rows are numbered from the top of the bounding box (row 0 has the largest
//! y), columns from the left.

mod builder;
mod cell;
mod packed;
mod query;


pub use cell::{Cell, CellOcclusion, CELL_NUM_ELEMENTS};
pub use packed::PackedGrid;
pub use query::CellLookup;

use crate::bbox::{BoundingBox2D, Rect};
use crate::mesh::AxisSelection;
use crate::{Error, Result};

/// Default number of splits per axis
pub const DEFAULT_SPLITS: u32 = 32;

/// Largest accepted number of splits; keeps each axis within 4096 cells
pub const MAX_SPLITS: u32 = 4095;

/// Cell-triangle pair count above which [`BuildStrategy::Auto`] builds in parallel
pub const PARALLEL_WORK_THRESHOLD: usize = 1 << 16;

/// Grid resolution: the grid has `splits + 1` rows and columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "i64"))]
pub struct Splits(u32);

impl Splits {
    /// Validated resolution
    pub fn new(splits: u32) -> Result<Self> {
        if splits > MAX_SPLITS {
            return Err(Error::InvalidSplits {
                splits: splits as i64,
                max: MAX_SPLITS,
            });
        }
        Ok(Self(splits))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Number of rows (and columns)
    #[inline]
    pub fn cells_per_axis(self) -> usize {
        self.0 as usize + 1
    }
}

impl Default for Splits {
    fn default() -> Self {
        Self(DEFAULT_SPLITS)
    }
}

impl TryFrom<i64> for Splits {
    type Error = Error;

    fn try_from(splits: i64) -> Result<Self> {
        u32::try_from(splits)
            .map_err(|_| Error::InvalidSplits {
                splits,
                max: MAX_SPLITS,
            })
            .and_then(Splits::new)
    }
}

impl From<Splits> for i64 {
    fn from(splits: Splits) -> Self {
        splits.0 as i64
    }
}

/// How cells are classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BuildStrategy {
    /// One pass over the cells in row-major order
    Sequential,
    /// Classify cells on the rayon pool, then assign ranges in one sequential pass
    Parallel,
    /// Parallel for large grids/meshes, sequential otherwise
    #[default]
    Auto,
}

/// Options controlling grid construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridOptions {
    pub splits: Splits,
    pub axes: AxisSelection,
    pub strategy: BuildStrategy,
}

impl GridOptions {
    pub fn new(splits: Splits) -> Self {
        Self {
            splits,
            ..Self::default()
        }
    }

    pub fn with_axes(mut self, axes: AxisSelection) -> Self {
        self.axes = axes;
        self
    }

    pub fn with_strategy(mut self, strategy: BuildStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Per-status cell counts of a built grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridStats {
    pub none_cells: usize,
    pub partial_cells: usize,
    pub total_cells: usize,
    pub overlap_index_count: usize,
}

/// Immutable acceleration grid over a clipping mesh
#[derive(Debug, Clone, PartialEq)]
pub struct AccelerationGrid {
    bounding_box: BoundingBox2D,
    axes: AxisSelection,
    num_rows: usize,
    num_cols: usize,
    cell_width: f64,
    cell_height: f64,
    /// Row-major cells
    cells: Vec<Cell>,
    /// Triangle vertex indices referenced by partial cells
    overlap_indices: Vec<u32>,
}

impl AccelerationGrid {
    #[inline]
    pub fn bounding_box(&self) -> &BoundingBox2D {
        &self.bounding_box
    }

    /// Axes of the mesh the grid was built along
    #[inline]
    pub fn axes(&self) -> AxisSelection {
        self.axes
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[inline]
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    #[inline]
    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    /// Row-major cells
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.num_rows && col < self.num_cols {
            self.cells.get(row * self.num_cols + col)
        } else {
            None
        }
    }

    /// The shared overlap index list
    #[inline]
    pub fn overlap_indices(&self) -> &[u32] {
        &self.overlap_indices
    }

    /// Triangle vertex indices referenced by a cell (empty unless partial)
    #[inline]
    pub fn cell_overlap_indices(&self, cell: &Cell) -> &[u32] {
        cell.overlap_range()
            .and_then(|range| self.overlap_indices.get(range))
            .unwrap_or(&[])
    }

    /// Rectangle covered by the cell at (row, col)
    #[inline]
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        cell_rect(&self.bounding_box, self.cell_width, self.cell_height, row, col)
    }

    pub fn stats(&self) -> GridStats {
        let mut stats = GridStats {
            overlap_index_count: self.overlap_indices.len(),
            ..GridStats::default()
        };
        for cell in &self.cells {
            match cell {
                Cell::None => stats.none_cells += 1,
                Cell::Partial { .. } => stats.partial_cells += 1,
                Cell::Total => stats.total_cells += 1,
            }
        }
        stats
    }
}

/// Rectangle of cell (row, col): row 0 is the topmost band, col 0 the leftmost
#[inline]
pub(crate) fn cell_rect(
    bbox: &BoundingBox2D,
    cell_width: f64,
    cell_height: f64,
    row: usize,
    col: usize,
) -> Rect {
    let left = bbox.top_left().x + col as f64 * cell_width;
    let right = bbox.top_left().x + (col + 1) as f64 * cell_width;
    let top = bbox.top_right().y - cell_height * row as f64;
    let bottom = bbox.top_right().y - cell_height * (row + 1) as f64;
    Rect::from_extents(left, bottom, right, top)
}
