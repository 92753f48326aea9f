//! JPEG tile encoder.
//!
//! Converts decoded pixel buffers into compressed tile images.
//!
//! # Design Decisions
//!
//! - **No padding or upscaling**: a clipped edge tile is encoded at its
//!   clipped dimensions, which may be smaller than the nominal tile size.
//!
//! - **Placeholder path**: empty input (degenerate ROI, zero-area clamp, or an
//!   empty reader result) produces a solid black tile at exactly
//!   `tile_size x tile_size`, encoded at a lower quality. Clients can tell a
//!   full-size black placeholder apart from a smaller partially-filled edge
//!   tile.
//!
//! - **Channel order**: sources decode in blue-green-red order; output is
//!   red-green-blue.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

use crate::error::TileError;
use crate::source::PixelBuffer;

/// JPEG quality for tiles carrying real pixels.
pub const TILE_JPEG_QUALITY: u8 = 90;

/// JPEG quality for placeholder tiles.
pub const PLACEHOLDER_JPEG_QUALITY: u8 = 80;

/// An encoded tile: compressed bytes plus pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileImage {
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
}

/// Encoder turning pixel buffers into JPEG tiles.
#[derive(Debug, Clone, Default)]
pub struct TileEncoder {
    // Stateless; struct allows future extension (encoder settings, pools)
}

impl TileEncoder {
    pub fn new() -> Self {
        Self {}
    }

    /// Encode a pixel buffer as a JPEG tile.
    ///
    /// Empty buffers take the placeholder path. Output dimensions equal the
    /// buffer dimensions for real pixels, or `tile_size x tile_size` for the
    /// placeholder.
    pub fn encode(&self, buffer: &PixelBuffer, tile_size: u32) -> Result<TileImage, TileError> {
        if buffer.is_empty() {
            return self.placeholder(tile_size);
        }

        if buffer.channels != 3 {
            return Err(TileError::Encode {
                message: format!("expected 3-channel BGR buffer, got {}", buffer.channels),
            });
        }
        let expected = buffer.width as usize * buffer.height as usize * 3;
        if buffer.data.len() != expected {
            return Err(TileError::Encode {
                message: format!(
                    "buffer length {} does not match {}x{}x3",
                    buffer.data.len(),
                    buffer.width,
                    buffer.height
                ),
            });
        }

        // BGR -> RGB reorder.
        let mut rgb = Vec::with_capacity(expected);
        for px in buffer.data.chunks_exact(3) {
            rgb.push(px[2]);
            rgb.push(px[1]);
            rgb.push(px[0]);
        }

        let img = RgbImage::from_raw(buffer.width, buffer.height, rgb).ok_or_else(|| {
            TileError::Encode {
                message: "pixel buffer dimensions overflow".to_string(),
            }
        })?;

        let data = encode_jpeg(&img, TILE_JPEG_QUALITY)?;
        Ok(TileImage {
            data,
            width: buffer.width,
            height: buffer.height,
        })
    }

    /// Synthesize the solid black placeholder tile at full nominal size.
    pub fn placeholder(&self, tile_size: u32) -> Result<TileImage, TileError> {
        let img = RgbImage::new(tile_size, tile_size);
        let data = encode_jpeg(&img, PLACEHOLDER_JPEG_QUALITY)?;
        Ok(TileImage {
            data,
            width: tile_size,
            height: tile_size,
        })
    }
}

fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Bytes, TileError> {
    let mut output = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut output, quality);

    encoder
        .encode_image(img)
        .map_err(|e| TileError::Encode {
            message: e.to_string(),
        })?;

    Ok(Bytes::from(output))
}
