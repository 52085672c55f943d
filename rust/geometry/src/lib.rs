// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polyclip Geometry
//!
//! Precomputes polygon clipping acceleration grids: a uniform grid over a
//! triangulated polygon's bounding box whose cells are classified as fully
//! outside, fully inside or crossing the boundary, so point-in-polygon
//! queries are answered with one cell lookup and at most a few triangle tests.
//!
//! Pipeline: [`amalgamate`] polygon hierarchies, triangulate with a
//! [`Triangulator`] (earcutr by default), build an [`AccelerationGrid`], then
//! query it with [`AccelerationGrid::locate`] / [`AccelerationGrid::contains`]
//! or [`AccelerationGrid::pack`] it into flat float arrays.

pub mod amalgamate;
pub mod bbox;
pub mod error;
pub mod grid;
pub mod mesh;
pub mod predicates;
pub mod triangulation;
pub mod winding;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3};

pub use amalgamate::{amalgamate, AmalgamatedPolygon, PolygonHierarchy};
pub use bbox::{BoundingBox2D, Rect};
pub use error::{Error, Result};
pub use grid::{
    AccelerationGrid, BuildStrategy, Cell, CellLookup, CellOcclusion, GridOptions, GridStats,
    PackedGrid, Splits, DEFAULT_SPLITS, MAX_SPLITS,
};
pub use mesh::{AxisSelection, ClipMesh, Triangle2D};
pub use triangulation::{EarcutTriangulator, Triangulator};
pub use winding::WindingOrder;
