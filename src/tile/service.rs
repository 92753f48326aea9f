//! Tile service orchestrating the per-request pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                         TileService                            │
//! │  ┌──────────────────────────────────────────────────────────┐  │
//! │  │                      get_tile()                          │  │
//! │  │  1. Validate level      3. Open scoped session + read    │  │
//! │  │  2. Derive geometry     4. Encode (or placeholder)       │  │
//! │  └──────────────────────────────────────────────────────────┘  │
//! │        │                     │                    │            │
//! │        ▼                     ▼                    ▼            │
//! │  ┌───────────┐      ┌───────────────┐    ┌──────────────┐      │
//! │  │  pyramid  │      │  SlideSource  │    │  TileEncoder │      │
//! │  │ (pure)    │      │  (semaphore-  │    │              │      │
//! │  │           │      │   bounded)    │    │              │      │
//! │  └───────────┘      └───────────────┘    └──────────────┘      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each request is a stateless resolve -> clamp -> read -> encode pass; the
//! only shared state is the immutable [`PyramidInfo`]. Reads open their own
//! decode session, and a semaphore bounds how many sessions are open at once
//! so a burst of tile requests cannot exhaust native resources. Requests past
//! the bound queue on the semaphore rather than fail.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::error::{SourceError, TileError};
use crate::pyramid::{derive_tile, PyramidInfo, TileDerivation};
use crate::source::{
    resolve_scene_bounds, ChannelSelector, PixelFormat, SlideSession, SlideSource,
};
use crate::tile::encoder::{TileEncoder, TileImage};

/// Default bound on concurrently open decode sessions.
pub const DEFAULT_MAX_CONCURRENT_READS: usize = 8;

/// Service producing encoded tiles for one opened pyramid.
///
/// # Type Parameters
///
/// * `S` - The slide source backend.
pub struct TileService<S: SlideSource> {
    source: Arc<S>,
    info: PyramidInfo,
    encoder: TileEncoder,
    read_permits: Arc<Semaphore>,
}

impl<S: SlideSource> TileService<S> {
    /// Open a pyramid over `source` with the default read bound.
    ///
    /// Resolves the scene bounds once (scene rect, falling back to total
    /// bounds) and computes the immutable [`PyramidInfo`]. Fails immediately
    /// if the source cannot report usable bounds; there is no degraded mode.
    pub async fn open(source: S, tile_size: u32, scene: u32) -> Result<Self, SourceError> {
        Self::open_with_read_bound(source, tile_size, scene, DEFAULT_MAX_CONCURRENT_READS).await
    }

    /// Open a pyramid with an explicit bound on concurrent decode sessions.
    pub async fn open_with_read_bound(
        source: S,
        tile_size: u32,
        scene: u32,
        max_concurrent_reads: usize,
    ) -> Result<Self, SourceError> {
        let bounds = {
            let session = source.open().await?;
            resolve_scene_bounds(&session, scene)?
        };
        let info = PyramidInfo::from_bounds(bounds, tile_size, scene)?;

        debug!(
            width = info.width,
            height = info.height,
            tile_size = info.tile_size,
            max_level = info.max_level,
            scene = info.scene,
            origin_x = info.origin_x,
            origin_y = info.origin_y,
            "opened pyramid"
        );

        Ok(Self {
            source: Arc::new(source),
            info,
            encoder: TileEncoder::new(),
            read_permits: Arc::new(Semaphore::new(max_concurrent_reads.max(1))),
        })
    }

    /// The immutable pyramid metadata.
    pub fn info(&self) -> &PyramidInfo {
        &self.info
    }

    /// The geometric derivation for one tile address, as used by
    /// [`get_tile`](Self::get_tile) for the same address.
    pub fn derivation(&self, level: u32, col: u32, row: u32) -> Result<TileDerivation, TileError> {
        self.validate_level(level)?;
        Ok(derive_tile(&self.info, level, col, row))
    }

    /// Produce the encoded tile for one address.
    ///
    /// Degenerate addresses (outside the grid, or clamped to zero area) and
    /// empty reader results yield the full-size placeholder tile. Only
    /// backend read failures and encode failures are errors.
    pub async fn get_tile(&self, level: u32, col: u32, row: u32) -> Result<TileImage, TileError> {
        self.validate_level(level)?;

        let derivation = derive_tile(&self.info, level, col, row);
        let Some(clamped) = derivation.clamped() else {
            debug!(level, col, row, "degenerate tile, serving placeholder");
            return self.encoder.placeholder(self.info.tile_size);
        };

        debug!(
            level,
            col,
            row,
            roi = ?clamped.roi,
            zoom = clamped.zoom,
            "reading tile"
        );

        let buffer = {
            // Queue here when the session bound is reached.
            let _permit = self.read_permits.acquire().await.map_err(|_| {
                TileError::OpenFailed {
                    source: SourceError::Backend {
                        message: "read limiter closed".to_string(),
                    },
                }
            })?;

            // Scoped session: opened for this read, dropped on every exit
            // path before the permit is released.
            let session = self
                .source
                .open()
                .await
                .map_err(|source| TileError::OpenFailed { source })?;

            session
                .read(
                    clamped.roi,
                    self.info.scene,
                    ChannelSelector::default(),
                    PixelFormat::Bgr8,
                    clamped.zoom,
                )
                .await
                .map_err(|source| TileError::ReadFailed {
                    level,
                    col,
                    row,
                    roi: clamped.roi,
                    scene: self.info.scene,
                    source,
                })?
        };

        if buffer.is_empty() {
            debug!(level, col, row, "reader returned no data, serving placeholder");
            return self.encoder.placeholder(self.info.tile_size);
        }

        self.encoder.encode(&buffer, self.info.tile_size)
    }

    fn validate_level(&self, level: u32) -> Result<(), TileError> {
        if level > self.info.max_level {
            return Err(TileError::InvalidLevel {
                level,
                max_level: self.info.max_level,
            });
        }
        Ok(())
    }
}
