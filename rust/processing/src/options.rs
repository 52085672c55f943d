// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clipping polygon options

use polyclip_geometry::{AxisSelection, BuildStrategy, GridOptions, Result, Splits};
use serde::{Deserialize, Serialize};

/// Grid resolution used by the pipeline when none is given
pub const DEFAULT_PIPELINE_SPLITS: i64 = 127;

/// Which side of the polygon is clipped away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipMode {
    /// Geometry inside the polygon is removed
    #[default]
    Inside,
    /// Only geometry inside the polygon is kept
    Outside,
}

impl ClipMode {
    /// Whether a point with the given containment is clipped
    #[inline]
    pub fn clips(self, inside: bool) -> bool {
        match self {
            ClipMode::Inside => inside,
            ClipMode::Outside => !inside,
        }
    }
}

/// Options for building a [`crate::ClippingPolygon`].
///
/// `splits` stays a signed integer so that any JSON number deserializes; the
/// range is checked by [`ClippingPolygonOptions::grid_options`] before any
/// geometry is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClippingPolygonOptions {
    pub splits: i64,
    pub clip_mode: ClipMode,
    pub strategy: BuildStrategy,
    pub axes: AxisSelection,
}

impl Default for ClippingPolygonOptions {
    fn default() -> Self {
        Self {
            splits: DEFAULT_PIPELINE_SPLITS,
            clip_mode: ClipMode::default(),
            strategy: BuildStrategy::default(),
            axes: AxisSelection::default(),
        }
    }
}

impl ClippingPolygonOptions {
    pub fn with_splits(mut self, splits: i64) -> Self {
        self.splits = splits;
        self
    }

    pub fn with_clip_mode(mut self, clip_mode: ClipMode) -> Self {
        self.clip_mode = clip_mode;
        self
    }

    pub fn with_strategy(mut self, strategy: BuildStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Validated grid options
    pub fn grid_options(&self) -> Result<GridOptions> {
        let splits = Splits::try_from(self.splits)?;
        Ok(GridOptions::new(splits)
            .with_axes(self.axes)
            .with_strategy(self.strategy))
    }
}
