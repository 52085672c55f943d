// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use polyclip_geometry::PackedGrid;
use polyclip_processing::{BuildStats, ClipMode, PointClassification};
use serde::{Deserialize, Serialize};

/// Packed grid ready for upload to a renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridResponse {
    /// Cache key for this result.
    pub cache_key: String,
    /// Which side of the polygon is clipped.
    pub clip_mode: ClipMode,
    /// Grid, overlap list and mesh as flat float arrays.
    pub grid: PackedGrid,
    /// Build statistics.
    pub stats: BuildStats,
    /// Whether result was from cache.
    #[serde(default)]
    pub from_cache: bool,
}

/// Per-point classification results, in request order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub points: Vec<PointClassification>,
    pub stats: BuildStats,
}
