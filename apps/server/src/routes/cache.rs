// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lookup of previously built grids by content key.

use crate::error::ApiError;
use crate::types::GridResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

/// Length of a hex-encoded SHA-256 digest
const KEY_LEN: usize = 64;

fn is_grid_key(key: &str) -> bool {
    key.len() == KEY_LEN && key.bytes().all(|b| b.is_ascii_hexdigit())
}

/// GET /api/v1/cache/:key
///
/// Keys are the `cache_key` returned by `POST /api/v1/grid`. Anything that
/// is not a SHA-256 hex digest is rejected before touching the store.
pub async fn get_cached(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GridResponse>, ApiError> {
    if !is_grid_key(&key) {
        return Err(ApiError::InvalidRequest(format!(
            "grid key must be {} hex characters",
            KEY_LEN
        )));
    }

    let Some(mut grid) = state.cache.get::<GridResponse>(&key).await? else {
        tracing::debug!(key = %key, "grid not cached");
        return Err(ApiError::NotFound(format!("no cached grid for {}", key)));
    };
    grid.from_cache = true;
    tracing::debug!(key = %key, "serving cached grid");
    Ok(Json(grid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_key_format() {
        assert!(is_grid_key(&"ab".repeat(32)));
        assert!(is_grid_key(&"0F".repeat(32)));
        assert!(!is_grid_key("does-not-exist"));
        assert!(!is_grid_key(&"a".repeat(63)));
        assert!(!is_grid_key(&"g".repeat(64)));
        assert!(!is_grid_key("../../etc/passwd"));
    }
}
