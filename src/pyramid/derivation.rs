//! Per-tile geometric derivation.
//!
//! [`TileDerivation`] records every intermediate of the geometry pipeline for
//! one tile address: level dimensions and scale, the clipped level-space
//! footprint, the nominal full-resolution ROI, and the clamped ROI with its
//! effective zoom. The tile service reads its ROI and zoom from here, and the
//! debug endpoint serializes the same struct, so the debug output is exactly
//! the values used to cut the tile.

use serde::Serialize;

use crate::pyramid::clamp::{clamp, ClampedRoi};
use crate::pyramid::geometry::{LevelGeometry, PyramidInfo};
use crate::pyramid::resolver::{level_footprint, map_to_full_res};
use crate::source::Rect;

/// Level-space tile rectangle in serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileLevelRect {
    pub u0: u32,
    pub v0: u32,
    pub u1: u32,
    pub v1: u32,
}

/// The complete geometric trace for one tile address.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileDerivation {
    pub level: u32,
    pub col: u32,
    pub row: u32,

    /// Scale and pixel dimensions of the requested level.
    pub level_dims: LevelGeometry,

    /// The tile's footprint in level space, clipped to the level dimensions.
    pub tile_level_rect: TileLevelRect,

    /// Nominal ROI in full-resolution coordinates, before clamping against
    /// scene bounds. Zero-area when the address is outside the grid.
    pub nominal_roi: Rect,

    /// Reciprocal of the level scale.
    pub zoom: f64,

    /// ROI after clamping against scene bounds. Zero-area for degenerate
    /// tiles.
    pub clamped_roi: Rect,

    /// Zoom actually passed to the reader; raised above `zoom` when the
    /// clamped ROI would otherwise produce a sub-pixel output.
    pub effective_zoom: f64,

    /// True when this address resolves to no pixels (placeholder tile).
    pub empty: bool,

    /// Nominal tile edge length.
    pub tile_size: u32,

    /// Scene origin in native coordinates.
    pub origin: [i64; 2],

    /// Full-resolution image dimensions.
    pub image_size: [u32; 2],
}

impl TileDerivation {
    /// The clamped ROI and effective zoom, or `None` for degenerate tiles.
    pub fn clamped(&self) -> Option<ClampedRoi> {
        if self.empty {
            return None;
        }
        Some(ClampedRoi {
            roi: self.clamped_roi,
            zoom: self.effective_zoom,
        })
    }
}

/// Run the full geometry pipeline for one tile address.
///
/// The caller must already have validated `level <= info.max_level`.
pub fn derive_tile(info: &PyramidInfo, level: u32, col: u32, row: u32) -> TileDerivation {
    let dims = info.level_dims(level);
    let footprint = level_footprint(info, &dims, col, row);

    let nominal = map_to_full_res(info, &dims, &footprint);
    let clamped = nominal
        .as_ref()
        .and_then(|n| clamp(n, &info.scene_bounds()));

    let (nominal_roi, zoom) = match &nominal {
        Some(n) => (n.roi, n.zoom),
        None => (Rect::empty(), 1.0),
    };
    let (clamped_roi, effective_zoom, empty) = match &clamped {
        Some(c) => (c.roi, c.zoom, false),
        None => (Rect::empty(), zoom, true),
    };

    TileDerivation {
        level,
        col,
        row,
        level_dims: dims,
        tile_level_rect: TileLevelRect {
            u0: footprint.u0,
            v0: footprint.v0,
            u1: footprint.u1,
            v1: footprint.v1,
        },
        nominal_roi,
        zoom,
        clamped_roi,
        effective_zoom,
        empty,
        tile_size: info.tile_size,
        origin: [info.origin_x, info.origin_y],
        image_size: [info.width, info.height],
    }
}
