// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Liveness and capability endpoints.

use crate::AppState;
use axum::{extract::State, Json};
use polyclip_geometry::{CellOcclusion, MAX_SPLITS};
use polyclip_processing::ClipMode;
use serde::Serialize;

const SERVICE: &str = "polyclip-server";

/// Liveness payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
}

/// Grid capabilities advertised by the service.
#[derive(Debug, Serialize)]
pub struct CapabilitiesResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub grid: GridCapabilities,
    pub routes: Vec<RouteInfo>,
}

/// Limits and defaults applied when building a grid.
#[derive(Debug, Serialize)]
pub struct GridCapabilities {
    /// Splits used when a request omits them
    pub default_splits: i64,
    pub max_splits: u32,
    pub default_clip_mode: ClipMode,
    /// Packed cell status codes by occlusion class
    pub status_codes: StatusCodes,
}

#[derive(Debug, Serialize)]
pub struct StatusCodes {
    pub none: u8,
    pub partial: u8,
    pub total: u8,
}

#[derive(Debug, Serialize)]
pub struct RouteInfo {
    pub method: &'static str,
    pub path: &'static str,
}

const ROUTES: [(&str, &str); 4] = [
    ("GET", "/api/v1/health"),
    ("POST", "/api/v1/grid"),
    ("POST", "/api/v1/grid/classify"),
    ("GET", "/api/v1/cache/:key"),
];

/// GET /api/v1/health
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service: SERVICE,
    })
}

/// GET / - Grid limits, defaults and packed status codes.
pub async fn info(State(state): State<AppState>) -> Json<CapabilitiesResponse> {
    Json(CapabilitiesResponse {
        service: SERVICE,
        version: env!("CARGO_PKG_VERSION"),
        grid: GridCapabilities {
            default_splits: state.config.default_splits,
            max_splits: MAX_SPLITS,
            default_clip_mode: ClipMode::default(),
            status_codes: StatusCodes {
                none: CellOcclusion::None.code(),
                partial: CellOcclusion::Partial.code(),
                total: CellOcclusion::Total.code(),
            },
        },
        routes: ROUTES
            .iter()
            .map(|&(method, path)| RouteInfo { method, path })
            .collect(),
    })
}
