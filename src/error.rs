use thiserror::Error;

use crate::source::Rect;

/// Errors raised by a slide source (the native decode collaborator).
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The source cannot report usable bounds for the requested scene.
    ///
    /// This is fatal at open time: a pyramid cannot be built without bounds.
    #[error("no usable bounds for scene {scene}")]
    MissingBounds { scene: u32 },

    /// The backend cannot open this source at all (should map to HTTP 415).
    #[error("unsupported source: {reason}")]
    Unsupported { reason: String },

    /// The backend failed while decoding a region.
    #[error("read failed: {message}")]
    Read { message: String },

    /// Backend fault unrelated to a specific read (session open, native init).
    #[error("backend error: {message}")]
    Backend { message: String },
}

/// Errors that can occur while producing a tile.
///
/// Geometry degeneracies (out-of-grid addresses, zero-area clamps) are not
/// errors; they resolve to the encoder's placeholder path. Only backend-facing
/// failures and encode failures surface here.
#[derive(Debug, Clone, Error)]
pub enum TileError {
    /// The source reader failed for this tile.
    ///
    /// Carries the full tile context so the failure can be reproduced via the
    /// debug endpoint for the same address.
    #[error("read failed for tile L={level} ({col},{row}) roi={roi:?} scene={scene}: {source}")]
    ReadFailed {
        level: u32,
        col: u32,
        row: u32,
        roi: Rect,
        scene: u32,
        source: SourceError,
    },

    /// Opening a decode session failed.
    #[error("session open failed: {source}")]
    OpenFailed { source: SourceError },

    /// Requested level is outside the pyramid's range.
    ///
    /// Surfaced by the HTTP layer as a client error; the geometry core treats
    /// out-of-range levels as a precondition violation and never sees them.
    #[error("invalid level {level} (pyramid has levels 0..={max_level})")]
    InvalidLevel { level: u32, max_level: u32 },

    /// Pixel buffer could not be encoded as JPEG.
    #[error("encode failed: {message}")]
    Encode { message: String },
}

impl TileError {
    /// The underlying source error, if this failure originated in the source.
    pub fn source_error(&self) -> Option<&SourceError> {
        match self {
            TileError::ReadFailed { source, .. } | TileError::OpenFailed { source } => Some(source),
            TileError::Encode { .. } | TileError::InvalidLevel { .. } => None,
        }
    }
}
