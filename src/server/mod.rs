//! HTTP server layer.
//!
//! The thin routing shell around the tile pipeline.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        HTTP Layer                           │
//! │   GET /dzi   GET /tile/{level}/{col}_{row}.jpeg             │
//! │   GET /info  GET /debug/{level}/{col}_{row}  GET /health    │
//! │                                                             │
//! │  ┌──────────────┐            ┌──────────────────────────┐   │
//! │  │   handlers   │            │          routes          │   │
//! │  │ (requests)   │            │   (router config, CORS)  │   │
//! │  └──────────────┘            └──────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    debug_handler, dzi_handler, health_handler, info_handler, parse_tile_coords, tile_handler,
    AppState, ErrorResponse, HealthResponse, TilePathParams,
};
pub use routes::{create_router, RouterConfig, DEFAULT_CACHE_MAX_AGE};
