// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use polyclip_geometry::predicates::point_in_triangle;
use polyclip_geometry::winding::compute_winding_order;
use polyclip_geometry::{
    amalgamate, AccelerationGrid, AxisSelection, BuildStrategy, Cell, CellOcclusion, ClipMesh,
    EarcutTriangulator, Error, GridOptions, Point2, Point3, PolygonHierarchy, Splits,
    WindingOrder,
};

fn ring(points: &[(f64, f64)]) -> Vec<Point2<f64>> {
    points.iter().map(|&(x, y)| Point2::new(x, y)).collect()
}

fn options(splits: u32) -> GridOptions {
    GridOptions::new(Splits::new(splits).unwrap())
}

/// L-shaped footprint, clockwise, lifted to z = 4 like a floor plan outline
fn l_shape() -> PolygonHierarchy {
    let outline = [
        (0.0, 0.0),
        (0.0, 20.0),
        (8.0, 20.0),
        (8.0, 8.0),
        (20.0, 8.0),
        (20.0, 0.0),
    ];
    PolygonHierarchy::new(
        outline.iter().map(|&(x, y)| Point3::new(x, y, 4.0)).collect(),
        vec![vec![
            Point3::new(2.0, 2.0, 4.0),
            Point3::new(5.0, 2.0, 4.0),
            Point3::new(5.0, 5.0, 4.0),
            Point3::new(2.0, 5.0, 4.0),
        ]],
    )
}

fn brute_force(mesh: &ClipMesh, p: &Point2<f64>) -> bool {
    mesh.triangles_2d(AxisSelection::XY)
        .iter()
        .any(|t| point_in_triangle(p, &t.a, &t.b, &t.c))
}

#[test]
fn test_pipeline_l_shape_with_hole() {
    let polygon = amalgamate(&[l_shape()]).unwrap();
    assert_eq!(compute_winding_order(&polygon.outer()), WindingOrder::CounterClockwise);
    assert_eq!(compute_winding_order(&polygon.holes()[0]), WindingOrder::Clockwise);

    let mesh = polygon.triangulate(&EarcutTriangulator).unwrap();
    // 10 points, one hole
    assert_eq!(mesh.triangle_count(), 10);

    let grid = AccelerationGrid::build(&mesh, &options(24)).unwrap();
    assert_eq!(grid.num_rows(), 25);
    assert_eq!(grid.cells().len(), 625);

    let stats = grid.stats();
    assert_eq!(stats.none_cells + stats.partial_cells + stats.total_cells, 625);
    assert!(stats.none_cells > 0, "the notch of the L is empty");
    assert!(stats.total_cells > 0);

    // Far corner of the notch
    assert_eq!(
        grid.locate(&Point2::new(19.0, 19.0)).unwrap().occlusion(),
        CellOcclusion::None
    );
    assert!(!grid.contains(&mesh, &Point2::new(3.5, 3.5)).unwrap(), "inside the hole");
    assert!(grid.contains(&mesh, &Point2::new(4.0, 15.0)).unwrap());
    assert!(grid.contains(&mesh, &Point2::new(15.0, 4.0)).unwrap());
    assert!(!grid.contains(&mesh, &Point2::new(21.0, 4.0)).unwrap());
}

#[test]
fn test_contains_agrees_with_brute_force() {
    let mesh = amalgamate(&[l_shape()])
        .unwrap()
        .triangulate(&EarcutTriangulator)
        .unwrap();

    for splits in [0, 3, 9, 63] {
        let grid = AccelerationGrid::build(&mesh, &options(splits)).unwrap();
        for i in 0..80 {
            for j in 0..80 {
                let p = Point2::new(i as f64 * 0.25 + 0.0071, j as f64 * 0.25 + 0.0093);
                assert_eq!(
                    grid.contains(&mesh, &p).unwrap(),
                    brute_force(&mesh, &p),
                    "splits={} point={:?}",
                    splits,
                    p
                );
            }
        }
    }
}

#[test]
fn test_partial_ranges_reference_valid_triangles() {
    let mesh = amalgamate(&[l_shape()])
        .unwrap()
        .triangulate(&EarcutTriangulator)
        .unwrap();
    let grid = AccelerationGrid::build(
        &mesh,
        &options(40).with_strategy(BuildStrategy::Parallel),
    )
    .unwrap();

    let mut covered = 0;
    for cell in grid.cells() {
        if let Cell::Partial { start, end } = *cell {
            assert!(end > start);
            assert_eq!((end - start) % 3, 0);
            let indices = grid.cell_overlap_indices(cell);
            assert_eq!(indices.len(), end - start);
            for tri in indices.chunks_exact(3) {
                // Every referenced triple is one of the mesh's triangles
                assert!(mesh.indices.chunks_exact(3).any(|t| t == tri));
            }
            covered += end - start;
        }
    }
    assert_eq!(covered, grid.overlap_indices().len());
}

#[test]
fn test_multiple_hierarchies() {
    let left = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
    let right = ring(&[(4.0, 0.0), (8.0, 0.0), (8.0, 4.0), (4.0, 4.0)]);
    let a = PolygonHierarchy::from_2d(&left, &[]);
    let b = PolygonHierarchy::from_2d(&right, &[]);
    let polygon = amalgamate(&[a, b]).unwrap();
    assert_eq!(polygon.point_count(), 8);
    assert!(polygon.hole_indices.is_empty());
}

#[test]
fn test_pack_round_trip_public_api() {
    let mesh = amalgamate(&[l_shape()])
        .unwrap()
        .triangulate(&EarcutTriangulator)
        .unwrap();
    let grid = AccelerationGrid::build(&mesh, &options(15)).unwrap();
    let packed = grid.pack(&mesh).unwrap();

    assert_eq!(packed.grid_num_pixels(), 256);
    assert_eq!(packed.mesh_positions_num_pixels(), mesh.vertex_count());
    assert_eq!(packed.num_rows_and_cols, [16, 16]);
    assert_eq!(packed.bounding_box, [0.0, 20.0, 20.0, 20.0, 20.0, 0.0, 0.0, 0.0]);
    assert_eq!(packed.cell_dimensions, [1.25, 1.25]);
    assert_eq!(packed.decode_cells().unwrap(), grid.cells());

    for (cell, encoded) in grid.cells().iter().zip(packed.grid.chunks_exact(3)) {
        assert_eq!(encoded[0], cell.occlusion().code() as f32);
    }
}

#[test]
fn test_negative_splits_rejected_before_building() {
    assert!(matches!(Splits::try_from(-3i64), Err(Error::InvalidSplits { splits: -3, .. })));
}
