// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clipping polygon: triangulated mesh plus its acceleration grid

use crate::{BuildStats, ClipMode, ClippingPolygonOptions};
use polyclip_geometry::{
    amalgamate, AccelerationGrid, AxisSelection, CellLookup, CellOcclusion, ClipMesh,
    EarcutTriangulator, GridOptions, PackedGrid, Point2, PolygonHierarchy, Result, Triangulator,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Outcome of classifying one point against a clipping polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointClassification {
    /// The classified point.
    pub point: [f64; 2],
    /// `[row, col]` of the containing cell, `None` outside the bounding box.
    pub cell: Option<[usize; 2]>,
    /// Occlusion status of that cell.
    pub occlusion: Option<CellOcclusion>,
    /// Whether the point lies inside the polygon.
    pub inside: bool,
    /// Whether the point is clipped under the polygon's clip mode.
    pub clipped: bool,
}

/// A clipping polygon ready for point queries.
///
/// Immutable once built; share it freely across threads.
#[derive(Debug, Clone)]
pub struct ClippingPolygon {
    mesh: ClipMesh,
    grid: AccelerationGrid,
    clip_mode: ClipMode,
    stats: BuildStats,
}

impl ClippingPolygon {
    /// Build from polygon hierarchies using earcut triangulation.
    ///
    /// Hierarchies are projected onto XY; `options.axes` only applies to
    /// [`ClippingPolygon::from_mesh`].
    pub fn new(
        hierarchies: &[PolygonHierarchy],
        options: &ClippingPolygonOptions,
    ) -> Result<Self> {
        Self::with_triangulator(hierarchies, options, &EarcutTriangulator)
    }

    /// Build from polygon hierarchies with a custom triangulator.
    pub fn with_triangulator(
        hierarchies: &[PolygonHierarchy],
        options: &ClippingPolygonOptions,
        triangulator: &dyn Triangulator,
    ) -> Result<Self> {
        let total_start = Instant::now();
        // Validate before touching any geometry
        let grid_options = options
            .grid_options()
            .inspect_err(|e| tracing::warn!(error = %e, "Rejected clipping polygon options"))?
            .with_axes(AxisSelection::XY);

        let triangulate_start = Instant::now();
        let polygon = amalgamate(hierarchies)
            .inspect_err(|e| tracing::warn!(error = %e, "Rejected clipping polygon"))?;
        tracing::debug!(
            hierarchies = hierarchies.len(),
            points = polygon.point_count(),
            holes = polygon.hole_indices.len(),
            "Amalgamated polygon hierarchies"
        );
        let mesh = polygon.triangulate(triangulator)?;
        let triangulate_time = triangulate_start.elapsed();
        tracing::debug!(
            triangles = mesh.triangle_count(),
            time_ms = triangulate_time.as_millis() as u64,
            "Triangulated clipping polygon"
        );

        let mut clipping = Self::build(mesh, options.clip_mode, grid_options)?;
        clipping.stats.hierarchy_count = hierarchies.len();
        clipping.stats.triangulate_time_ms = triangulate_time.as_millis() as u64;
        clipping.stats.total_time_ms = total_start.elapsed().as_millis() as u64;

        log_built(&clipping.stats, options);
        Ok(clipping)
    }

    /// Build from an already triangulated mesh, reading 2D points through
    /// `options.axes`.
    pub fn from_mesh(mesh: ClipMesh, options: &ClippingPolygonOptions) -> Result<Self> {
        let total_start = Instant::now();
        let grid_options = options
            .grid_options()
            .inspect_err(|e| tracing::warn!(error = %e, "Rejected clipping polygon options"))?;

        let mut clipping = Self::build(mesh, options.clip_mode, grid_options)?;
        clipping.stats.total_time_ms = total_start.elapsed().as_millis() as u64;

        log_built(&clipping.stats, options);
        Ok(clipping)
    }

    fn build(
        mesh: ClipMesh,
        clip_mode: ClipMode,
        grid_options: GridOptions,
    ) -> Result<Self> {
        let grid_start = Instant::now();
        let grid = AccelerationGrid::build(&mesh, &grid_options)?;
        let grid_time = grid_start.elapsed();

        let grid_stats = grid.stats();
        let stats = BuildStats {
            hierarchy_count: 0,
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            num_rows: grid.num_rows(),
            num_cols: grid.num_cols(),
            none_cells: grid_stats.none_cells,
            partial_cells: grid_stats.partial_cells,
            total_cells: grid_stats.total_cells,
            overlap_index_count: grid_stats.overlap_index_count,
            triangulate_time_ms: 0,
            grid_time_ms: grid_time.as_millis() as u64,
            total_time_ms: 0,
        };

        Ok(Self {
            mesh,
            grid,
            clip_mode,
            stats,
        })
    }

    #[inline]
    pub fn mesh(&self) -> &ClipMesh {
        &self.mesh
    }

    #[inline]
    pub fn grid(&self) -> &AccelerationGrid {
        &self.grid
    }

    #[inline]
    pub fn clip_mode(&self) -> ClipMode {
        self.clip_mode
    }

    #[inline]
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Cell containing `point`, if inside the bounding box
    #[inline]
    pub fn locate(&self, point: &Point2<f64>) -> Option<CellLookup> {
        self.grid.locate(point)
    }

    /// Whether `point` lies inside the polygon
    pub fn contains(&self, point: &Point2<f64>) -> Result<bool> {
        self.grid.contains(&self.mesh, point)
    }

    /// Whether `point` is clipped under this polygon's clip mode
    pub fn is_clipped(&self, point: &Point2<f64>) -> Result<bool> {
        Ok(self.clip_mode.clips(self.contains(point)?))
    }

    /// Full classification of one point
    pub fn classify(&self, point: &Point2<f64>) -> Result<PointClassification> {
        let lookup = self.locate(point);
        let inside = self.contains(point)?;
        Ok(PointClassification {
            point: [point.x, point.y],
            cell: lookup.map(|l| [l.row, l.col]),
            occlusion: lookup.map(|l| l.occlusion()),
            inside,
            clipped: self.clip_mode.clips(inside),
        })
    }

    /// Classify many points in parallel, preserving input order
    pub fn classify_points(&self, points: &[Point2<f64>]) -> Result<Vec<PointClassification>> {
        points.par_iter().map(|p| self.classify(p)).collect()
    }

    /// Grid and mesh as flat float arrays
    pub fn packed(&self) -> Result<PackedGrid> {
        self.grid.pack(&self.mesh)
    }
}

fn log_built(stats: &BuildStats, options: &ClippingPolygonOptions) {
    tracing::info!(
        splits = options.splits,
        clip_mode = ?options.clip_mode,
        vertices = stats.vertex_count,
        triangles = stats.triangle_count,
        none_cells = stats.none_cells,
        partial_cells = stats.partial_cells,
        total_cells = stats.total_cells,
        overlap_indices = stats.overlap_index_count,
        grid_time_ms = stats.grid_time_ms,
        total_time_ms = stats.total_time_ms,
        "Built clipping polygon"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyclip_geometry::{CellOcclusion, Error};

    fn square(size: f64) -> PolygonHierarchy {
        PolygonHierarchy::from_2d(
            &[
                Point2::new(0.0, 0.0),
                Point2::new(size, 0.0),
                Point2::new(size, size),
                Point2::new(0.0, size),
            ],
            &[],
        )
    }

    #[test]
    fn test_build_square() {
        let options = ClippingPolygonOptions::default().with_splits(3);
        let clipping = ClippingPolygon::new(&[square(4.0)], &options).unwrap();

        let stats = clipping.stats();
        assert_eq!(stats.hierarchy_count, 1);
        assert_eq!(stats.vertex_count, 4);
        assert_eq!(stats.triangle_count, 2);
        assert_eq!(stats.cell_count(), 16);
        assert_eq!(stats.none_cells, 0);
        assert_eq!(
            stats.none_cells + stats.partial_cells + stats.total_cells,
            16
        );
    }

    #[test]
    fn test_is_clipped_follows_clip_mode() {
        let inside = ClippingPolygon::new(
            &[square(4.0)],
            &ClippingPolygonOptions::default().with_splits(3),
        )
        .unwrap();
        let outside = ClippingPolygon::new(
            &[square(4.0)],
            &ClippingPolygonOptions::default()
                .with_splits(3)
                .with_clip_mode(ClipMode::Outside),
        )
        .unwrap();

        let p_in = Point2::new(1.3, 2.7);
        let p_out = Point2::new(5.0, 2.0);
        assert!(inside.is_clipped(&p_in).unwrap());
        assert!(!inside.is_clipped(&p_out).unwrap());
        assert!(!outside.is_clipped(&p_in).unwrap());
        assert!(outside.is_clipped(&p_out).unwrap());
    }

    #[test]
    fn test_classify_points_keeps_order() {
        let clipping = ClippingPolygon::new(
            &[square(4.0)],
            &ClippingPolygonOptions::default().with_splits(1),
        )
        .unwrap();
        let points = [
            Point2::new(1.0, 1.0),
            Point2::new(-1.0, 1.0),
            Point2::new(3.0, 3.0),
        ];
        let result = clipping.classify_points(&points).unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].point, [1.0, 1.0]);
        assert_eq!(result[0].cell, Some([1, 0]));
        assert!(result[0].inside);
        assert_eq!(result[1].cell, None);
        assert_eq!(result[1].occlusion, None);
        assert!(!result[1].inside);
        assert_eq!(result[2].cell, Some([0, 1]));
        assert!(result[2].clipped);
    }

    #[test]
    fn test_invalid_options_fail_before_geometry() {
        // An empty hierarchy list would also fail; the options error wins
        let err = ClippingPolygon::new(&[], &ClippingPolygonOptions::default().with_splits(-5))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSplits { splits: -5, .. }));
    }

    #[test]
    fn test_from_mesh_with_xz_axes() {
        // Triangle in the XZ plane, y = 7
        let mesh = ClipMesh::new(
            vec![0.0, 7.0, 0.0, 4.0, 7.0, 0.0, 0.0, 7.0, 4.0],
            3,
            vec![0, 1, 2],
        );
        let mut options = ClippingPolygonOptions::default().with_splits(0);
        options.axes = AxisSelection::XZ;
        let clipping = ClippingPolygon::from_mesh(mesh, &options).unwrap();

        assert_eq!(clipping.stats().hierarchy_count, 0);
        assert_eq!(
            clipping.locate(&Point2::new(1.0, 1.0)).unwrap().occlusion(),
            CellOcclusion::Partial
        );
        assert!(clipping.contains(&Point2::new(1.0, 1.0)).unwrap());
        assert!(!clipping.contains(&Point2::new(3.5, 3.5)).unwrap());
    }

    #[test]
    fn test_packed() {
        let clipping = ClippingPolygon::new(
            &[square(4.0)],
            &ClippingPolygonOptions::default().with_splits(1),
        )
        .unwrap();
        let packed = clipping.packed().unwrap();
        assert_eq!(packed.grid_num_pixels(), 4);
        assert_eq!(packed.mesh_positions_num_pixels(), 4);
        assert_eq!(packed.mesh_components, 2);
        assert_eq!(packed.bounding_box, [0.0, 4.0, 4.0, 4.0, 4.0, 0.0, 0.0, 0.0]);
    }
}
