// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polyclip Server - polygon clipping acceleration grids over HTTP.
//!
//! Clients send polygon hierarchies (outer rings with holes) and receive a
//! packed acceleration grid ready to be uploaded as float textures, or ask
//! the server to classify points against the polygon directly.
//!
//! # Endpoints
//!
//! - `GET /` - Grid limits, defaults and packed status codes
//! - `GET /api/v1/health` - Health check
//! - `POST /api/v1/grid` - Build a packed grid (cached by request content)
//! - `POST /api/v1/grid/classify` - Classify points against a polygon
//! - `GET /api/v1/cache/:key` - Retrieve a cached grid by its SHA-256 hex key

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod config;
mod error;
mod routes;
mod services;
mod types;

use config::Config;
use services::DiskCache;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<DiskCache>,
    pub config: Arc<Config>,
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allows_any() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the router with all routes and middleware.
fn app(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        // Grid capabilities
        .route("/", get(routes::health::info))
        // Health check
        .route("/api/v1/health", get(routes::health::check))
        // Grid endpoints
        .route("/api/v1/grid", post(routes::grid::build))
        .route("/api/v1/grid/classify", post(routes::grid::classify))
        // Cache endpoints
        .route("/api/v1/cache/:key", get(routes::cache::get_cached))
        // Middleware
        .layer(DefaultBodyLimit::max(config.max_body_mb * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tower_http=debug,polyclip_server=debug".into()),
        )
        .pretty()
        .init();

    let config = Config::from_env();

    tracing::info!(
        port = config.port,
        cache_dir = %config.cache_dir,
        max_body_mb = config.max_body_mb,
        worker_threads = config.worker_threads,
        default_splits = config.default_splits,
        "Starting Polyclip Server"
    );

    // Grid building fans out on the global rayon pool
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()
        .context("Failed to initialize rayon thread pool")?;

    let cache = Arc::new(DiskCache::new(&config.cache_dir).await);

    let state = AppState {
        cache,
        config: Arc::new(config.clone()),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app(state))
        .await
        .context("Server terminated")?;

    Ok(())
}
