// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cell classification and its fixed numeric encoding

use crate::{Error, Result};
use std::ops::Range;

/// Number of floats used to encode one cell (status, start index, end index)
pub const CELL_NUM_ELEMENTS: usize = 3;

/// Occlusion status of a cell with respect to the clipping mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CellOcclusion {
    /// No triangle touches the cell
    None,
    /// Some triangles cross the cell; point tests must consult them
    Partial,
    /// At least one triangle covers the whole cell
    Total,
}

impl CellOcclusion {
    /// Fixed numeric code used in packed grids
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            CellOcclusion::None => 1,
            CellOcclusion::Partial => 2,
            CellOcclusion::Total => 3,
        }
    }

    /// Inverse of [`CellOcclusion::code`]
    #[inline]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(CellOcclusion::None),
            2 => Some(CellOcclusion::Partial),
            3 => Some(CellOcclusion::Total),
            _ => None,
        }
    }
}

/// One grid cell.
///
/// Partial cells reference their candidate triangles as a half-open range
/// into the grid's shared overlap index list; `end - start` is always a
/// multiple of 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    None,
    Partial { start: usize, end: usize },
    Total,
}

impl Cell {
    #[inline]
    pub fn occlusion(&self) -> CellOcclusion {
        match self {
            Cell::None => CellOcclusion::None,
            Cell::Partial { .. } => CellOcclusion::Partial,
            Cell::Total => CellOcclusion::Total,
        }
    }

    /// Range into the overlap index list, for partial cells only
    #[inline]
    pub fn overlap_range(&self) -> Option<Range<usize>> {
        match *self {
            Cell::Partial { start, end } => Some(start..end),
            _ => None,
        }
    }

    /// Number of candidate triangles referenced by the cell
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.overlap_range().map_or(0, |r| r.len() / 3)
    }

    /// Encode as `[status, start, end]`; non-partial cells carry zero bounds
    #[inline]
    pub fn encode(&self) -> [f32; CELL_NUM_ELEMENTS] {
        let code = self.occlusion().code() as f32;
        match *self {
            Cell::Partial { start, end } => [code, start as f32, end as f32],
            _ => [code, 0.0, 0.0],
        }
    }

    /// Decode `[status, start, end]`, checking the status code and, for
    /// partial cells, that the range is whole triangles within `overlap_len`.
    pub fn decode(encoded: &[f32], overlap_len: usize) -> Result<Self> {
        let &[status, start, end] = encoded else {
            return Err(Error::InvalidPacking(format!(
                "cell has {} elements, expected {}",
                encoded.len(),
                CELL_NUM_ELEMENTS
            )));
        };

        let occlusion = whole_number(status)
            .and_then(|code| u8::try_from(code).ok())
            .and_then(CellOcclusion::from_code)
            .ok_or_else(|| Error::InvalidPacking(format!("unknown cell status {}", status)))?;

        match occlusion {
            CellOcclusion::None => Ok(Cell::None),
            CellOcclusion::Total => Ok(Cell::Total),
            CellOcclusion::Partial => {
                let (start, end) = match (whole_number(start), whole_number(end)) {
                    (Some(start), Some(end)) => (start as usize, end as usize),
                    _ => {
                        return Err(Error::InvalidPacking(format!(
                            "partial cell range [{}, {}) is not integral",
                            start, end
                        )))
                    }
                };
                if start > end || start % 3 != 0 || end % 3 != 0 || end > overlap_len {
                    return Err(Error::InvalidPacking(format!(
                        "partial cell range [{}, {}) is invalid for {} overlap indices",
                        start, end, overlap_len
                    )));
                }
                Ok(Cell::Partial { start, end })
            }
        }
    }
}

/// Non-negative integral value of a float, if it has one
#[inline]
fn whole_number(value: f32) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f32 {
        Some(value as u32)
    } else {
        None
    }
}
