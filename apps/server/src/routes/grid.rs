// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grid endpoints.

use crate::error::ApiError;
use crate::services::{build_grid, classify_points, DiskCache};
use crate::types::{ClassifyRequest, ClassifyResponse, GridRequest, GridResponse};
use crate::AppState;
use axum::{body::Bytes, extract::State, Json};
use serde::de::DeserializeOwned;

/// Parse a JSON body, reporting failures as `INVALID_REQUEST`.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

/// POST /api/v1/grid - Build and pack a clipping grid.
pub async fn build(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GridResponse>, ApiError> {
    let request: GridRequest = parse_body(&body)?;
    let options = request.options.resolve(state.config.default_splits);
    // Reject bad options before hashing or touching the cache
    options.grid_options()?;

    // The resolved splits join the key so a changed server default never
    // serves a stale grid
    let cache_key = DiskCache::generate_key(&[&body[..], &options.splits.to_le_bytes()[..]]);

    if !request.skip_cache {
        if let Some(mut cached) = state.cache.get::<GridResponse>(&cache_key).await? {
            tracing::info!(cache_key = %cache_key, "Cache HIT");
            cached.from_cache = true;
            return Ok(Json(cached));
        }
    }

    tracing::info!(
        cache_key = %cache_key,
        polygons = request.polygons.len(),
        splits = options.splits,
        "Cache MISS - building grid"
    );

    let hierarchies = request.hierarchies();
    let (grid, stats) =
        tokio::task::spawn_blocking(move || build_grid(&hierarchies, &options)).await??;

    let response = GridResponse {
        cache_key: cache_key.clone(),
        clip_mode: options.clip_mode,
        grid,
        stats,
        from_cache: false,
    };

    // Cache result (background)
    let cache = state.cache.clone();
    let response_clone = response.clone();
    tokio::spawn(async move {
        if let Err(e) = cache.set(&cache_key, &response_clone).await {
            tracing::error!(error = %e, "Failed to cache result");
        }
    });

    Ok(Json(response))
}

/// POST /api/v1/grid/classify - Classify points against a clipping polygon.
pub async fn classify(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let request: ClassifyRequest = parse_body(&body)?;
    let options = request.options.resolve(state.config.default_splits);
    options.grid_options()?;

    tracing::info!(
        polygons = request.polygons.len(),
        points = request.points.len(),
        splits = options.splits,
        "Classifying points"
    );

    let hierarchies = request.hierarchies();
    let points = request.points;
    let (points, stats) = tokio::task::spawn_blocking(move || {
        classify_points(&hierarchies, &options, &points)
    })
    .await??;

    Ok(Json(ClassifyResponse { points, stats }))
}
