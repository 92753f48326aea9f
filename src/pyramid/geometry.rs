//! Pyramid geometry primitives.
//!
//! Pure functions deriving, from the full image dimensions and tile size, the
//! level count and per-level scale and dimensions. Level indexing follows the
//! Deep Zoom convention: level 0 is the coarsest tier, level `max_level` is
//! native resolution.
//!
//! # Numeric policy
//!
//! The level count is `ceil(log2(max(width, height)))`. Computing that with
//! floating-point `log2` can round up at exact powers of two (`log2(1024)`
//! evaluating to `10.000000000000002`), yielding an off-by-one level count.
//! All level math here uses integer bit-length arithmetic instead.

use serde::Serialize;

use crate::error::SourceError;
use crate::source::Rect;

/// Immutable pyramid metadata, computed once when a slide is opened and
/// shared read-only across all requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PyramidInfo {
    /// Full-resolution image width in pixels.
    pub width: u32,
    /// Full-resolution image height in pixels.
    pub height: u32,
    /// Nominal tile edge length in pixels.
    pub tile_size: u32,
    /// Highest level index; level `max_level` is native resolution.
    pub max_level: u32,
    /// The scene fixed for this pyramid instance.
    pub scene: u32,
    /// X offset of the scene within the source's native coordinate space.
    pub origin_x: i64,
    /// Y offset of the scene within the source's native coordinate space.
    pub origin_y: i64,
}

impl PyramidInfo {
    /// Build pyramid metadata from resolved scene bounds.
    ///
    /// Fails if the bounds have no area; a pyramid over an empty scene is an
    /// initialization error, not something to limp along with.
    pub fn from_bounds(bounds: Rect, tile_size: u32, scene: u32) -> Result<Self, SourceError> {
        if bounds.is_empty() || bounds.w > u32::MAX as i64 || bounds.h > u32::MAX as i64 {
            return Err(SourceError::MissingBounds { scene });
        }

        let width = bounds.w as u32;
        let height = bounds.h as u32;

        Ok(Self {
            width,
            height,
            tile_size,
            max_level: ceil_log2(width.max(height)),
            scene,
            origin_x: bounds.x,
            origin_y: bounds.y,
        })
    }

    /// The usable scene bounds in native coordinates: origin plus full size.
    pub fn scene_bounds(&self) -> Rect {
        Rect::new(
            self.origin_x,
            self.origin_y,
            self.width as i64,
            self.height as i64,
        )
    }

    /// Downsample scale at a level: `2^(max_level - level)`.
    ///
    /// Levels outside `0..=max_level` are a caller precondition violation.
    pub fn scale_at(&self, level: u32) -> u64 {
        debug_assert!(level <= self.max_level, "level {level} out of range");
        1u64 << (self.max_level - level)
    }

    /// Scale and pixel dimensions of one level.
    pub fn level_dims(&self, level: u32) -> LevelGeometry {
        let scale = self.scale_at(level);
        LevelGeometry {
            scale,
            width: div_ceil_u64(self.width as u64, scale) as u32,
            height: div_ceil_u64(self.height as u64, scale) as u32,
        }
    }
}

/// Geometry of one pyramid level, derived per call and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelGeometry {
    /// Downsample factor relative to native resolution (power of two, >= 1).
    pub scale: u64,
    /// Level width in pixels: `ceil(full_width / scale)`.
    pub width: u32,
    /// Level height in pixels: `ceil(full_height / scale)`.
    pub height: u32,
}

/// `ceil(log2(n))` via integer bit-length; exact at powers of two.
pub fn ceil_log2(n: u32) -> u32 {
    if n <= 1 {
        0
    } else {
        (n - 1).ilog2() + 1
    }
}

fn div_ceil_u64(n: u64, d: u64) -> u64 {
    n.div_ceil(d)
}
