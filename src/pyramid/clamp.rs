//! Bounds clamping.
//!
//! Intersects a tile's nominal ROI with the usable scene bounds and, where
//! necessary, raises the zoom so the downstream read always yields at least
//! one output pixel per axis. Some native decoders fault when asked for a
//! sub-pixel output region (a single-row edge tile at a deep downsample), so
//! the effective zoom is never allowed below `1 / clamped_extent` on either
//! axis. It is only ever raised, never lowered beneath the geometrically
//! correct value.

use crate::pyramid::resolver::NominalRoi;
use crate::source::Rect;

/// A clamped ROI plus the effective zoom to read it at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampedRoi {
    pub roi: Rect,
    pub zoom: f64,
}

/// Clamp a nominal ROI to the scene bounds.
///
/// Returns `None` when the intersection has no area; like an out-of-grid
/// address, this is a degenerate tile, not an error.
pub fn clamp(nominal: &NominalRoi, scene_bounds: &Rect) -> Option<ClampedRoi> {
    let roi = nominal.roi.intersect(scene_bounds);
    if roi.is_empty() {
        return None;
    }

    Some(ClampedRoi {
        roi,
        zoom: effective_zoom(nominal.zoom, &roi),
    })
}

/// Raise the zoom so `roi.w * zoom >= 1` and `roi.h * zoom >= 1`.
pub fn effective_zoom(zoom: f64, roi: &Rect) -> f64 {
    let min_w = 1.0 / roi.w.max(1) as f64;
    let min_h = 1.0 / roi.h.max(1) as f64;
    zoom.max(min_w).max(min_h)
}
