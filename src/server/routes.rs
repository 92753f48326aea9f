//! Router configuration.
//!
//! # Route Structure
//!
//! ```text
//! /health                        - Health check
//! /dzi                           - Deep Zoom descriptor
//! /info                          - Flat pyramid summary
//! /tile/{level}/{col}_{row}.jpeg - Tile endpoint
//! /debug/{level}/{col}_{row}     - Geometry derivation
//! ```
//!
//! # Example
//!
//! ```ignore
//! use slide_tiler::server::{create_router, RouterConfig};
//! use slide_tiler::source::SyntheticSource;
//! use slide_tiler::tile::TileService;
//!
//! let service = TileService::open(SyntheticSource::new(10000, 8000), 512, 0).await?;
//! let router = create_router(service, RouterConfig::default());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{routing::get, Router};
use http::header::{ACCEPT, CONTENT_TYPE};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    debug_handler, dzi_handler, health_handler, info_handler, tile_handler, AppState,
};
use crate::source::SlideSource;
use crate::tile::TileService;

/// Default Cache-Control max-age for tile responses (1 hour).
pub const DEFAULT_CACHE_MAX_AGE: u32 = 3600;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin).
    pub cors_origins: Option<Vec<String>>,

    /// Cache-Control max-age in seconds for tile responses.
    pub cache_max_age: u32,

    /// Whether to enable request tracing.
    pub enable_tracing: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cors_origins: None,
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
            enable_tracing: true,
        }
    }
}

impl RouterConfig {
    /// Set specific allowed CORS origins.
    ///
    /// Pass None (or don't call this method) to allow any origin.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Set the Cache-Control max-age in seconds.
    pub fn with_cache_max_age(mut self, seconds: u32) -> Self {
        self.cache_max_age = seconds;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the application router for one opened pyramid.
pub fn create_router<S>(tile_service: TileService<S>, config: RouterConfig) -> Router
where
    S: SlideSource + 'static,
{
    let app_state = AppState::new(tile_service, config.cache_max_age);
    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/dzi", get(dzi_handler::<S>))
        .route("/info", get(info_handler::<S>))
        .route("/tile/{level}/{filename}", get(tile_handler::<S>))
        .route("/debug/{level}/{filename}", get(debug_handler::<S>))
        .with_state(app_state)
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
