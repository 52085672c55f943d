// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while amalgamating, triangulating or building grids
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid splits {splits}: must be in the range [0, {max}]")]
    InvalidSplits { splits: i64, max: u32 },

    #[error("Invalid axis selection (x={x}, y={y}) for {components} components per vertex")]
    InvalidAxes { x: usize, y: usize, components: usize },

    #[error("Degenerate bounding box: width={width}, height={height}")]
    DegenerateBounds { width: f64, height: f64 },

    #[error("Empty mesh: {0}")]
    EmptyMesh(String),

    #[error("Malformed positions: {0}")]
    MalformedPositions(String),

    #[error("Malformed indices: {0}")]
    MalformedIndices(String),

    #[error("Triangle index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),

    #[error("Triangulation failed: {0}")]
    Triangulation(String),

    #[error("Invalid packed grid: {0}")]
    InvalidPacking(String),
}
