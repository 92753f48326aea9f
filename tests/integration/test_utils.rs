//! Test utilities for integration tests.
//!
//! This module provides router builders over the synthetic slide plus mock
//! sources for failure-path tests, and small helpers for inspecting JPEG
//! response bodies.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use image::ImageReader;
use std::io::Cursor;
use tower::ServiceExt;

use slide_tiler::error::SourceError;
use slide_tiler::server::{create_router, RouterConfig};
use slide_tiler::source::{
    ChannelSelector, PixelBuffer, PixelFormat, Rect, SlideSession, SlideSource, SyntheticSource,
};
use slide_tiler::tile::TileService;

// =============================================================================
// Router Builders
// =============================================================================

/// A router over the 10000x8000 synthetic slide with 512px tiles.
///
/// This is the worked-example pyramid: max level 14, scale 16384 at level 0.
pub async fn test_router() -> Router {
    let source = SyntheticSource::new(10000, 8000);
    let service = TileService::open(source, 512, 0)
        .await
        .expect("synthetic slide must open");
    create_router(service, RouterConfig::default())
}

/// A router over a source whose every read fails.
pub async fn failing_router() -> Router {
    let service = TileService::open(FailingSource::new(SourceError::Read {
        message: "corrupt block".to_string(),
    }), 512, 0)
    .await
    .expect("failing source still has bounds");
    create_router(service, RouterConfig::default())
}

/// A router over a source that rejects reads as an unsupported format.
pub async fn unsupported_router() -> Router {
    let service = TileService::open(FailingSource::new(SourceError::Unsupported {
        reason: "JPEG XR compression".to_string(),
    }), 512, 0)
    .await
    .expect("unsupported source still has bounds");
    create_router(service, RouterConfig::default())
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Send a GET request through the router.
pub async fn get(router: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds");
    router.oneshot(request).await.expect("router is infallible")
}

/// Collect the response body into bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes()
        .to_vec()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body is valid JSON")
}

// =============================================================================
// JPEG Helpers
// =============================================================================

/// Check if the given bytes start with a JPEG SOI marker.
pub fn is_valid_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8
}

/// Decode a JPEG body and return its pixel dimensions.
pub fn jpeg_dims(data: &[u8]) -> (u32, u32) {
    ImageReader::with_format(Cursor::new(data), image::ImageFormat::Jpeg)
        .into_dimensions()
        .expect("body is a decodable JPEG")
}

// =============================================================================
// Mock Sources
// =============================================================================

/// A source with valid bounds whose reads always fail with a fixed error.
pub struct FailingSource {
    error: SourceError,
}

impl FailingSource {
    pub fn new(error: SourceError) -> Self {
        Self { error }
    }
}

pub struct FailingSession {
    error: SourceError,
}

#[async_trait]
impl SlideSource for FailingSource {
    type Session = FailingSession;

    async fn open(&self) -> Result<Self::Session, SourceError> {
        Ok(FailingSession {
            error: self.error.clone(),
        })
    }
}

#[async_trait]
impl SlideSession for FailingSession {
    fn scene_bounds(&self, _scene: u32) -> Option<Rect> {
        Some(Rect::new(0, 0, 4096, 4096))
    }

    fn total_bounds(&self) -> Option<Rect> {
        None
    }

    async fn read(
        &self,
        _roi: Rect,
        _scene: u32,
        _channel: ChannelSelector,
        _format: PixelFormat,
        _zoom: f64,
    ) -> Result<PixelBuffer, SourceError> {
        Err(self.error.clone())
    }
}
