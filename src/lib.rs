//! # slide-tiler
//!
//! A Deep Zoom tile server for gigapixel microscopy slides.
//!
//! This library serves JPEG tiles cut on demand from a resolution pyramid
//! derived from a slide's native dimensions. The full image is never
//! materialized: each request maps a Deep Zoom tile address to a region of
//! interest in native coordinates, reads exactly that region at the required
//! zoom, and encodes the result.
//!
//! ## Features
//!
//! - **Pure-arithmetic pyramid**: level count, per-level dimensions, and tile
//!   footprints derived with integer math from the slide bounds
//! - **Guaranteed tile responses**: out-of-range and degenerate tiles produce
//!   a black placeholder, never an error
//! - **Bounded concurrency**: decode sessions are scoped per read and gated
//!   by a semaphore
//! - **Deep Zoom protocol**: DZI descriptor plus a debug endpoint exposing
//!   the full geometric derivation for any tile address
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`source`] - Slide source abstraction and the synthetic demo backend
//! - [`pyramid`] - Geometry, tile resolution, bounds clamping, descriptors
//! - [`tile`] - Tile service and JPEG encoding
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use slide_tiler::{
//!     server::{create_router, RouterConfig},
//!     source::SyntheticSource,
//!     tile::TileService,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = SyntheticSource::new(10000, 8000);
//!     let service = TileService::open(source, 512, 0).await.unwrap();
//!     let router = create_router(service, RouterConfig::default());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod pyramid;
pub mod server;
pub mod source;
pub mod tile;

// Re-export commonly used types
pub use config::Config;
pub use error::{SourceError, TileError};
pub use pyramid::{
    ceil_log2, clamp, derive_tile, dzi_xml, effective_zoom, level_footprint, map_to_full_res,
    resolve, ClampedRoi, InfoResponse, LevelFootprint, LevelGeometry, NominalRoi, PyramidInfo,
    TileDerivation, TileLevelRect,
};
pub use server::{
    create_router, debug_handler, dzi_handler, health_handler, info_handler, tile_handler,
    AppState, ErrorResponse, HealthResponse, RouterConfig, TilePathParams, DEFAULT_CACHE_MAX_AGE,
};
pub use source::{
    resolve_scene_bounds, ChannelSelector, PixelBuffer, PixelFormat, Rect, SlideSession,
    SlideSource, SyntheticSource,
};
pub use tile::{
    TileEncoder, TileImage, TileService, DEFAULT_MAX_CONCURRENT_READS, PLACEHOLDER_JPEG_QUALITY,
    TILE_JPEG_QUALITY,
};
