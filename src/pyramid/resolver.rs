//! Tile address resolution.
//!
//! Maps a `(level, col, row)` tile address to its nominal region of interest
//! in full-resolution source coordinates. The tile's footprint is computed in
//! level space, clipped to the level's dimensions, then scaled up and shifted
//! by the scene origin. A footprint with zero area means the address falls
//! past the image's true edge or outside the grid entirely; that is the
//! normal empty outcome, never an error.

use crate::pyramid::geometry::{LevelGeometry, PyramidInfo};
use crate::source::Rect;

/// A tile's clipped footprint in level-space coordinates.
///
/// `[u0, u1) x [v0, v1)`, already clipped to `[0, level_w) x [0, level_h)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelFootprint {
    pub u0: u32,
    pub v0: u32,
    pub u1: u32,
    pub v1: u32,
}

impl LevelFootprint {
    pub fn width(&self) -> u32 {
        self.u1.saturating_sub(self.u0)
    }

    pub fn height(&self) -> u32 {
        self.v1.saturating_sub(self.v0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// The nominal, unclamped ROI for one tile, in full-resolution coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NominalRoi {
    pub roi: Rect,
    /// Reciprocal of the level scale.
    pub zoom: f64,
}

/// Compute a tile's clipped level-space footprint.
pub fn level_footprint(
    info: &PyramidInfo,
    dims: &LevelGeometry,
    col: u32,
    row: u32,
) -> LevelFootprint {
    let t = info.tile_size as u64;
    let u0 = (col as u64 * t).min(dims.width as u64);
    let v0 = (row as u64 * t).min(dims.height as u64);
    let u1 = (col as u64 * t + t).min(dims.width as u64);
    let v1 = (row as u64 * t + t).min(dims.height as u64);

    LevelFootprint {
        u0: u0 as u32,
        v0: v0 as u32,
        u1: u1 as u32,
        v1: v1 as u32,
    }
}

/// Resolve a tile address to its nominal full-resolution ROI.
///
/// Returns `None` for degenerate addresses (zero-area footprint). The caller
/// must already have validated `level <= info.max_level`.
pub fn resolve(info: &PyramidInfo, level: u32, col: u32, row: u32) -> Option<NominalRoi> {
    let dims = info.level_dims(level);
    let footprint = level_footprint(info, &dims, col, row);
    map_to_full_res(info, &dims, &footprint)
}

/// Map a level-space footprint into full-resolution coordinates.
pub fn map_to_full_res(
    info: &PyramidInfo,
    dims: &LevelGeometry,
    footprint: &LevelFootprint,
) -> Option<NominalRoi> {
    if footprint.is_empty() {
        return None;
    }

    let scale = dims.scale as i64;
    Some(NominalRoi {
        roi: Rect::new(
            info.origin_x + footprint.u0 as i64 * scale,
            info.origin_y + footprint.v0 as i64 * scale,
            footprint.width() as i64 * scale,
            footprint.height() as i64 * scale,
        ),
        zoom: 1.0 / dims.scale as f64,
    })
}
