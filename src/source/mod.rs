//! Slide source abstraction.
//!
//! This module defines the contract between the geometry/tile core and the
//! native decode backend. The core never touches pixel decoding itself: it
//! asks a [`SlideSource`] for a scoped [`SlideSession`], reads a region at a
//! zoom factor, and gets back a dense BGR pixel buffer (or an empty buffer,
//! which is a valid "no data here" answer, not an error).
//!
//! # Session scoping
//!
//! Some native decode backends are not proven safe for concurrent use on a
//! single handle. Each read therefore opens its own session immediately
//! before the read and drops it on every exit path. Sessions are never shared
//! across concurrent requests.
//!
//! # Canonical bounds
//!
//! Backends report bounds in whatever shape their metadata uses. Adapters
//! translate that shape into [`Rect`] once, at this boundary; the geometry
//! core only ever sees `Rect`.

mod synthetic;

pub use synthetic::SyntheticSource;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::SourceError;

// =============================================================================
// Canonical Geometry Types
// =============================================================================

/// An axis-aligned rectangle in full-resolution source coordinates.
///
/// The origin may be negative: some slide formats place scene bounds in a
/// native coordinate space that does not start at (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl Rect {
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }

    /// A zero-area rectangle at the origin.
    pub fn empty() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// True if this rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Exclusive right edge.
    pub fn x1(&self) -> i64 {
        self.x + self.w
    }

    /// Exclusive bottom edge.
    pub fn y1(&self) -> i64 {
        self.y + self.h
    }

    /// Intersection with another rectangle; empty if they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.x1().min(other.x1());
        let y1 = self.y1().min(other.y1());

        if x1 <= x0 || y1 <= y0 {
            return Rect::empty();
        }
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// True if `other` lies entirely within this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x && other.y >= self.y && other.x1() <= self.x1() && other.y1() <= self.y1()
    }
}

// =============================================================================
// Pixel Types
// =============================================================================

/// Pixel layout a session is asked to decode into.
///
/// Only BGR-8 is used by the tile pipeline; the enum exists so the contract
/// names the format explicitly rather than implying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8 bits per channel, blue-green-red sample order.
    Bgr8,
}

impl PixelFormat {
    /// Number of samples per pixel.
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Bgr8 => 3,
        }
    }
}

/// Which image plane to decode. Microscopy sources expose multiple channels;
/// the tile pipeline reads channel 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelSelector {
    pub channel: u32,
}

/// A dense decoded pixel region: `height * width * channels` samples in the
/// order declared by the [`PixelFormat`] of the read.
///
/// An empty buffer (zero-area dimensions, no data) is a valid response
/// meaning the source has no pixels at the requested region. Callers must
/// treat it identically to a zero-area clamped ROI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * channels as usize
        );
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// The "no data" response.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            channels: 0,
            data: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty() || self.width == 0 || self.height == 0
    }
}

// =============================================================================
// Source Traits
// =============================================================================

/// A factory for decode sessions on one slide.
///
/// Implementations wrap a native backend (or, for tests and demos, a
/// synthetic generator). The source itself holds no decode state; all decode
/// work happens inside short-lived sessions.
#[async_trait]
pub trait SlideSource: Send + Sync {
    type Session: SlideSession;

    /// Open a decode session. Called once at pyramid-open time to resolve
    /// bounds, then once per tile read.
    async fn open(&self) -> Result<Self::Session, SourceError>;
}

/// One scoped decode session. Dropped after each use.
#[async_trait]
pub trait SlideSession: Send + Sync {
    /// Bounds of one scene in native coordinates, if the source knows them.
    fn scene_bounds(&self, scene: u32) -> Option<Rect>;

    /// Bounds of the whole source, used as a fallback when the requested
    /// scene has no dedicated rectangle.
    fn total_bounds(&self) -> Option<Rect>;

    /// Decode a region at a zoom factor.
    ///
    /// `zoom` is the reciprocal of the downsample scale; the returned buffer
    /// has roughly `roi.w * zoom` by `roi.h * zoom` pixels. An empty buffer
    /// is a valid non-error response.
    async fn read(
        &self,
        roi: Rect,
        scene: u32,
        channel: ChannelSelector,
        format: PixelFormat,
        zoom: f64,
    ) -> Result<PixelBuffer, SourceError>;
}

/// Resolve the usable bounds for a scene, trying the scene's own rectangle
/// first and falling back to the source's total bounds.
///
/// Failing both is an initialization error: the pyramid cannot be built.
pub fn resolve_scene_bounds<S: SlideSession>(
    session: &S,
    scene: u32,
) -> Result<Rect, SourceError> {
    if let Some(rect) = session.scene_bounds(scene) {
        if !rect.is_empty() {
            return Ok(rect);
        }
    }
    if let Some(rect) = session.total_bounds() {
        if !rect.is_empty() {
            return Ok(rect);
        }
    }
    Err(SourceError::MissingBounds { scene })
}
