// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clipping polygon service. Everything here is CPU bound and runs on the
//! blocking pool.

use crate::error::ApiError;
use polyclip_geometry::{PackedGrid, Point2, PolygonHierarchy};
use polyclip_processing::{BuildStats, ClippingPolygon, ClippingPolygonOptions, PointClassification};

/// Build a clipping polygon and pack its grid.
pub fn build_grid(
    hierarchies: &[PolygonHierarchy],
    options: &ClippingPolygonOptions,
) -> Result<(PackedGrid, BuildStats), ApiError> {
    let clipping = ClippingPolygon::new(hierarchies, options)?;
    let packed = clipping.packed()?;
    tracing::debug!(
        grid_values = packed.grid.len(),
        overlap_values = packed.overlap_indices.len(),
        mesh_values = packed.mesh_positions.len(),
        "Packed grid"
    );
    Ok((packed, clipping.stats().clone()))
}

/// Build a clipping polygon and classify `points` against it.
pub fn classify_points(
    hierarchies: &[PolygonHierarchy],
    options: &ClippingPolygonOptions,
    points: &[[f64; 2]],
) -> Result<(Vec<PointClassification>, BuildStats), ApiError> {
    let clipping = ClippingPolygon::new(hierarchies, options)?;
    let points: Vec<Point2<f64>> = points.iter().map(|&[x, y]| Point2::new(x, y)).collect();
    let classified = clipping.classify_points(&points)?;
    tracing::debug!(
        points = classified.len(),
        clipped = classified.iter().filter(|c| c.clipped).count(),
        "Classified points"
    );
    Ok((classified, clipping.stats().clone()))
}
