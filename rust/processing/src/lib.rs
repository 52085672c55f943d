// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clipping polygon pipeline shared by the server.
//!
//! A [`ClippingPolygon`] takes polygon hierarchies, amalgamates and
//! triangulates them, builds the acceleration grid and keeps everything
//! needed to answer "is this point clipped?" queries or to hand the grid to
//! a renderer in packed form.

mod clipping_polygon;
mod options;
mod stats;

pub use clipping_polygon::{ClippingPolygon, PointClassification};
pub use options::{ClipMode, ClippingPolygonOptions, DEFAULT_PIPELINE_SPLITS};
pub use stats::BuildStats;

pub use polyclip_geometry::{Error, Result};
