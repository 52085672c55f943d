// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grid construction

use super::{
    cell_rect, AccelerationGrid, BuildStrategy, Cell, GridOptions, PARALLEL_WORK_THRESHOLD,
};
use crate::bbox::{BoundingBox2D, Rect};
use crate::mesh::{ClipMesh, Triangle2D};
use crate::predicates::{triangle_covers_rect, triangle_intersects_rect};
use crate::{Error, Result};
use rayon::prelude::*;
use smallvec::SmallVec;

/// Candidate indices of a partial cell; most cells see only a few triangles
type OverlapList = SmallVec<[u32; 24]>;

/// Classification of one cell before ranges are assigned
enum CellClass {
    None,
    Partial(OverlapList),
    Total,
}

/// Classify a cell against every triangle, in index order.
///
/// Intersecting triangles accumulate as candidates; the first triangle
/// covering the whole cell makes it `Total`, drops the candidates and stops.
fn classify_cell(rect: &Rect, triangles: &[Triangle2D]) -> CellClass {
    let mut overlapping = OverlapList::new();

    for tri in triangles {
        if triangle_intersects_rect(rect, &tri.a, &tri.b, &tri.c) {
            overlapping.extend_from_slice(&tri.indices);
        }

        if triangle_covers_rect(rect, &tri.a, &tri.b, &tri.c) {
            return CellClass::Total;
        }
    }

    if overlapping.is_empty() {
        CellClass::None
    } else {
        CellClass::Partial(overlapping)
    }
}

/// Append a classified cell, assigning its range in the shared overlap list
#[inline]
fn push_cell(class: CellClass, cells: &mut Vec<Cell>, overlap_indices: &mut Vec<u32>) {
    let cell = match class {
        CellClass::None => Cell::None,
        CellClass::Total => Cell::Total,
        CellClass::Partial(overlapping) => {
            let start = overlap_indices.len();
            overlap_indices.extend_from_slice(&overlapping);
            let end = overlap_indices.len();
            debug_assert!(start % 3 == 0 && end % 3 == 0);
            Cell::Partial { start, end }
        }
    };
    cells.push(cell);
}

impl AccelerationGrid {
    /// Build a grid over `mesh` with the given options.
    ///
    /// # Errors
    /// - `EmptyMesh`, `MalformedPositions`, `MalformedIndices`,
    ///   `IndexOutOfRange`, `InvalidAxes` if the mesh is not usable
    /// - `DegenerateBounds` if the triangles span zero width or height
    ///
    /// Sequential and parallel builds produce identical grids.
    pub fn build(mesh: &ClipMesh, options: &GridOptions) -> Result<Self> {
        let bounding_box = BoundingBox2D::from_mesh(mesh, options.axes)?;
        if bounding_box.is_degenerate() {
            return Err(Error::DegenerateBounds {
                width: bounding_box.width(),
                height: bounding_box.height(),
            });
        }

        let num_cols = options.splits.cells_per_axis();
        let num_rows = num_cols;
        let num_cells = num_rows * num_cols;
        let cell_width = bounding_box.width() / num_cols as f64;
        let cell_height = bounding_box.height() / num_rows as f64;

        let triangles = mesh.triangles_2d(options.axes);

        let parallel = match options.strategy {
            BuildStrategy::Sequential => false,
            BuildStrategy::Parallel => true,
            BuildStrategy::Auto => {
                num_cells.saturating_mul(triangles.len()) >= PARALLEL_WORK_THRESHOLD
            }
        };

        let rect_of = |index: usize| {
            cell_rect(&bounding_box, cell_width, cell_height, index / num_cols, index % num_cols)
        };

        let mut cells = Vec::with_capacity(num_cells);
        let mut overlap_indices = Vec::new();

        if parallel {
            // Fan out per cell, then fan in sequentially so ranges follow row-major order
            let classes: Vec<CellClass> = (0..num_cells)
                .into_par_iter()
                .map(|index| classify_cell(&rect_of(index), &triangles))
                .collect();

            let overlap_len = classes
                .iter()
                .map(|class| match class {
                    CellClass::Partial(overlapping) => overlapping.len(),
                    _ => 0,
                })
                .sum();
            overlap_indices.reserve_exact(overlap_len);

            for class in classes {
                push_cell(class, &mut cells, &mut overlap_indices);
            }
        } else {
            for index in 0..num_cells {
                let class = classify_cell(&rect_of(index), &triangles);
                push_cell(class, &mut cells, &mut overlap_indices);
            }
        }

        Ok(Self {
            bounding_box,
            axes: options.axes,
            num_rows,
            num_cols,
            cell_width,
            cell_height,
            cells,
            overlap_indices,
        })
    }
}
