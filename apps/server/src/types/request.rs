// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use polyclip_geometry::{BuildStrategy, Point3, PolygonHierarchy};
use polyclip_processing::{ClipMode, ClippingPolygonOptions};
use serde::{Deserialize, Serialize};

/// A polygon vertex, `[x, y]` or `[x, y, z]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Xy([f64; 2]),
    Xyz([f64; 3]),
}

impl Coordinate {
    fn to_point(self) -> Point3<f64> {
        match self {
            Coordinate::Xy([x, y]) => Point3::new(x, y, 0.0),
            Coordinate::Xyz([x, y, z]) => Point3::new(x, y, z),
        }
    }
}

/// One outer ring with its holes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonInput {
    pub positions: Vec<Coordinate>,
    #[serde(default)]
    pub holes: Vec<Vec<Coordinate>>,
}

impl PolygonInput {
    pub fn to_hierarchy(&self) -> PolygonHierarchy {
        let ring = |coords: &[Coordinate]| -> Vec<Point3<f64>> {
            coords.iter().map(|c| c.to_point()).collect()
        };
        PolygonHierarchy::new(
            ring(&self.positions),
            self.holes.iter().map(|hole| ring(hole)).collect(),
        )
    }
}

/// Grid options as sent by clients; a missing `splits` takes the server default.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RequestOptions {
    #[serde(default)]
    pub splits: Option<i64>,
    #[serde(default)]
    pub clip_mode: ClipMode,
    #[serde(default)]
    pub strategy: BuildStrategy,
}

impl RequestOptions {
    pub fn resolve(&self, default_splits: i64) -> ClippingPolygonOptions {
        ClippingPolygonOptions::default()
            .with_splits(self.splits.unwrap_or(default_splits))
            .with_clip_mode(self.clip_mode)
            .with_strategy(self.strategy)
    }
}

/// POST /api/v1/grid body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridRequest {
    pub polygons: Vec<PolygonInput>,
    #[serde(default)]
    pub options: RequestOptions,
    /// Skip cache lookup if true.
    #[serde(default)]
    pub skip_cache: bool,
}

impl GridRequest {
    pub fn hierarchies(&self) -> Vec<PolygonHierarchy> {
        self.polygons.iter().map(PolygonInput::to_hierarchy).collect()
    }
}

/// POST /api/v1/grid/classify body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub polygons: Vec<PolygonInput>,
    #[serde(default)]
    pub options: RequestOptions,
    pub points: Vec<[f64; 2]>,
}

impl ClassifyRequest {
    pub fn hierarchies(&self) -> Vec<PolygonHierarchy> {
        self.polygons.iter().map(PolygonInput::to_hierarchy).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_coordinates() {
        let request: GridRequest = serde_json::from_str(
            r#"{
                "polygons": [{
                    "positions": [[0, 0], [4, 0, 1.5], [4, 4], [0, 4]],
                    "holes": [[[1, 1], [2, 1], [2, 2]]]
                }]
            }"#,
        )
        .unwrap();

        let hierarchies = request.hierarchies();
        assert_eq!(hierarchies.len(), 1);
        assert_eq!(hierarchies[0].positions[1], Point3::new(4.0, 0.0, 1.5));
        assert_eq!(hierarchies[0].positions[2], Point3::new(4.0, 4.0, 0.0));
        assert_eq!(hierarchies[0].holes[0].len(), 3);
        assert!(!request.skip_cache);
    }

    #[test]
    fn test_options_resolve_default_splits() {
        let options: RequestOptions = serde_json::from_str(r#"{"clip_mode": "outside"}"#).unwrap();
        let resolved = options.resolve(31);
        assert_eq!(resolved.splits, 31);
        assert_eq!(resolved.clip_mode, ClipMode::Outside);

        let options: RequestOptions = serde_json::from_str(r#"{"splits": -2}"#).unwrap();
        assert_eq!(options.resolve(31).splits, -2);
    }

    #[test]
    fn test_bad_coordinate_rejected() {
        let result: Result<GridRequest, _> =
            serde_json::from_str(r#"{"polygons": [{"positions": [[0]]}]}"#);
        assert!(result.is_err());
    }
}
