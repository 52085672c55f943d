// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation
//!
//! Triangulation is a collaborator behind the [`Triangulator`] trait; the
//! default implementation wraps earcutr.

use crate::{Error, Result};

/// Triangulates a flattened polygon with holes.
///
/// `vertices` is interleaved `x, y` data; `hole_indices` are the point (not
/// component) offsets where each hole starts. The outer ring is expected to be
/// counter-clockwise and holes to wind the other way. Returns triangle vertex
/// indices into `vertices`.
pub trait Triangulator: Send + Sync {
    fn triangulate(&self, vertices: &[f64], hole_indices: &[usize]) -> Result<Vec<usize>>;
}

/// Ear-clipping triangulation via earcutr
#[derive(Debug, Clone, Copy, Default)]
pub struct EarcutTriangulator;

impl Triangulator for EarcutTriangulator {
    fn triangulate(&self, vertices: &[f64], hole_indices: &[usize]) -> Result<Vec<usize>> {
        earcutr::earcut(vertices, hole_indices, 2)
            .map_err(|e| Error::Triangulation(format!("{:?}", e)))
    }
}

/// Run a triangulator and check its output: whole triangles, every index
/// referencing a point of `vertices`.
pub fn triangulate_checked(
    triangulator: &dyn Triangulator,
    vertices: &[f64],
    hole_indices: &[usize],
) -> Result<Vec<u32>> {
    let indices = triangulator.triangulate(vertices, hole_indices)?;

    if indices.len() % 3 != 0 {
        return Err(Error::Triangulation(format!(
            "triangulator returned {} indices, not a multiple of 3",
            indices.len()
        )));
    }

    let point_count = vertices.len() / 2;
    indices
        .into_iter()
        .map(|index| {
            if index < point_count {
                u32::try_from(index).map_err(|_| {
                    Error::Triangulation(format!("index {} does not fit in u32", index))
                })
            } else {
                Err(Error::Triangulation(format!(
                    "triangulator returned index {} for {} points",
                    index, point_count
                )))
            }
        })
        .collect()
}
