//! Synthetic slide source.
//!
//! A deterministic, in-process implementation of the [`SlideSource`] contract.
//! It synthesizes a gradient-with-gridlines pattern as a pure function of
//! full-resolution coordinates, so the same ROI and zoom always produce the
//! same pixels regardless of tiling. This is the backend for the binary's
//! demo mode and for the test suite; native decoders plug in through the same
//! trait.

use async_trait::async_trait;

use crate::error::SourceError;
use super::{ChannelSelector, PixelBuffer, PixelFormat, Rect, SlideSession, SlideSource};

/// Spacing of the dark gridlines in full-resolution pixels.
const GRID_SPACING: i64 = 512;

/// A synthetic gigapixel slide with a single scene.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    bounds: Rect,
    scene: u32,
}

impl SyntheticSource {
    /// Create a source whose scene bounds start at the native origin.
    pub fn new(width: i64, height: i64) -> Self {
        Self::with_origin(0, 0, width, height)
    }

    /// Create a source with an offset scene origin, mimicking formats whose
    /// scenes live away from (0, 0) in native coordinates.
    pub fn with_origin(origin_x: i64, origin_y: i64, width: i64, height: i64) -> Self {
        Self {
            bounds: Rect::new(origin_x, origin_y, width, height),
            scene: 0,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[async_trait]
impl SlideSource for SyntheticSource {
    type Session = SyntheticSession;

    async fn open(&self) -> Result<Self::Session, SourceError> {
        Ok(SyntheticSession {
            bounds: self.bounds,
            scene: self.scene,
        })
    }
}

/// One scoped session on a [`SyntheticSource`]. Stateless; exists to exercise
/// the open-per-read discipline the contract mandates.
#[derive(Debug)]
pub struct SyntheticSession {
    bounds: Rect,
    scene: u32,
}

#[async_trait]
impl SlideSession for SyntheticSession {
    fn scene_bounds(&self, scene: u32) -> Option<Rect> {
        (scene == self.scene).then_some(self.bounds)
    }

    fn total_bounds(&self) -> Option<Rect> {
        Some(self.bounds)
    }

    async fn read(
        &self,
        roi: Rect,
        _scene: u32,
        _channel: ChannelSelector,
        format: PixelFormat,
        zoom: f64,
    ) -> Result<PixelBuffer, SourceError> {
        if roi.is_empty() || !self.bounds.contains(&roi) {
            // Out-of-bounds reads are "no data", not an error.
            return Ok(PixelBuffer::empty());
        }
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(SourceError::Read {
                message: format!("invalid zoom factor: {zoom}"),
            });
        }

        // Output dimensions the way a native downsampling decoder sizes them.
        let out_w = ((roi.w as f64 * zoom).round() as u32).max(1);
        let out_h = ((roi.h as f64 * zoom).round() as u32).max(1);

        let channels = format.channels();
        let mut data = Vec::with_capacity(out_w as usize * out_h as usize * channels);

        for oy in 0..out_h {
            // Nearest-neighbor sample in full-res space.
            let sy = roi.y + (oy as f64 / zoom) as i64;
            for ox in 0..out_w {
                let sx = roi.x + (ox as f64 / zoom) as i64;
                let (b, g, r) = sample_bgr(sx, sy);
                data.push(b);
                data.push(g);
                data.push(r);
            }
        }

        Ok(PixelBuffer::new(out_w, out_h, channels as u8, data))
    }
}

/// Pattern value at one full-resolution coordinate, in BGR order.
fn sample_bgr(x: i64, y: i64) -> (u8, u8, u8) {
    if x.rem_euclid(GRID_SPACING) == 0 || y.rem_euclid(GRID_SPACING) == 0 {
        return (16, 16, 16);
    }
    let b = (x.rem_euclid(256)) as u8;
    let g = (y.rem_euclid(256)) as u8;
    let r = ((x / 256 + y / 256).rem_euclid(256)) as u8;
    (b, g, r)
}
