//! Tile production layer.
//!
//! Sits between the HTTP handlers and the slide source:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │              TileService                │
//! │  resolve -> clamp -> read -> encode     │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │         SlideSource (per-read           │
//! │          scoped sessions)               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`TileService`]: the per-request pipeline, with a semaphore bounding
//!   concurrent decode sessions
//! - [`TileEncoder`]: BGR pixel buffers to JPEG, with the placeholder path
//!   for degenerate tiles
//! - [`TileImage`]: encoded bytes plus pixel dimensions

mod encoder;
mod service;

pub use encoder::{TileEncoder, TileImage, PLACEHOLDER_JPEG_QUALITY, TILE_JPEG_QUALITY};
pub use service::{TileService, DEFAULT_MAX_CONCURRENT_READS};
