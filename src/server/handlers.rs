//! HTTP request handlers for the tile API.
//!
//! # Endpoints
//!
//! - `GET /dzi` - Deep Zoom XML descriptor
//! - `GET /tile/{level}/{col}_{row}.jpeg` - One tile
//! - `GET /info` - Flat pyramid summary
//! - `GET /debug/{level}/{col}_{row}` - Geometric derivation for one address
//! - `GET /health` - Health check

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::{SourceError, TileError};
use crate::pyramid::{dzi_xml, InfoResponse, TileDerivation};
use crate::source::SlideSource;
use crate::tile::TileService;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state, passed to all handlers via Axum's State
/// extractor.
pub struct AppState<S: SlideSource> {
    /// The tile service for the one opened pyramid.
    pub tile_service: Arc<TileService<S>>,

    /// Cache-Control max-age in seconds for tile responses.
    pub cache_max_age: u32,
}

impl<S: SlideSource> AppState<S> {
    pub fn new(tile_service: TileService<S>, cache_max_age: u32) -> Self {
        Self {
            tile_service: Arc::new(tile_service),
            cache_max_age,
        }
    }
}

impl<S: SlideSource> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            tile_service: Arc::clone(&self.tile_service),
            cache_max_age: self.cache_max_age,
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Path parameters for tile and debug requests.
///
/// Extracted from `/tile/{level}/{filename}` where filename is
/// `{col}_{row}.jpeg` (debug requests carry no extension).
#[derive(Debug, Deserialize)]
pub struct TilePathParams {
    /// Pyramid level (0 = coarsest).
    pub level: u32,

    /// Tile coordinates as `{col}_{row}` with optional image extension.
    pub filename: String,
}

/// Parse tile coordinates from a filename like `3_5.jpeg`, `3_5.jpg` or `3_5`.
pub fn parse_tile_coords(filename: &str) -> Option<(u32, u32)> {
    let name = filename
        .strip_suffix(".jpeg")
        .or_else(|| filename.strip_suffix(".jpg"))
        .unwrap_or(filename);

    let (col, row) = name.split_once('_')?;
    if row.contains('_') {
        return None;
    }

    Some((col.parse().ok()?, row.parse().ok()?))
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "read_error", "unsupported_source").
    pub error: String,

    /// Human-readable error message.
    pub message: String,

    /// HTTP status code (included for convenience).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert TileError to an HTTP response.
///
/// Client-addressable failures (unsupported source, bad level) map to 4xx,
/// backend faults to 5xx. Geometry degeneracies never reach this point; they
/// were already resolved to placeholder tiles.
impl IntoResponse for TileError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            TileError::InvalidLevel { level, max_level } => (
                StatusCode::BAD_REQUEST,
                "invalid_level",
                format!("Invalid level: {level} (valid range: 0-{max_level})"),
            ),

            TileError::OpenFailed { source } | TileError::ReadFailed { source, .. } => {
                match source {
                    SourceError::Unsupported { reason } => (
                        StatusCode::UNSUPPORTED_MEDIA_TYPE,
                        "unsupported_source",
                        format!("Unsupported source: {reason}"),
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "read_error",
                        self.to_string(),
                    ),
                }
            }

            TileError::Encode { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "encode_error",
                format!("Failed to encode tile: {message}"),
            ),
        };

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
                message
            );
        } else {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);
        (status, Json(error_response)).into_response()
    }
}

fn bad_tile_path(filename: &str) -> Response {
    let response = ErrorResponse::with_status(
        "invalid_tile_path",
        format!("Expected '{{col}}_{{row}}.jpeg', got '{filename}'"),
        StatusCode::BAD_REQUEST,
    );
    (StatusCode::BAD_REQUEST, Json(response)).into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle DZI descriptor requests.
///
/// # Endpoint
///
/// `GET /dzi`
///
/// Returns the fixed-schema Deep Zoom XML with `Content-Type:
/// application/xml`. Consumed once by viewers to bootstrap tiling.
pub async fn dzi_handler<S: SlideSource>(State(state): State<AppState<S>>) -> Response {
    let xml = dzi_xml(state.tile_service.info(), "jpeg");

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml")],
        xml,
    )
        .into_response()
}

/// Handle tile requests.
///
/// # Endpoint
///
/// `GET /tile/{level}/{col}_{row}.jpeg`
///
/// # Response
///
/// - `200 OK`: JPEG tile with `Content-Type: image/jpeg`. Out-of-grid
///   addresses return the full-size black placeholder tile, not an error.
/// - `400 Bad Request`: malformed coordinates or level out of range
/// - `415 Unsupported Media Type`: the backend cannot open this source
/// - `500 Internal Server Error`: read or encode failure
pub async fn tile_handler<S: SlideSource>(
    State(state): State<AppState<S>>,
    Path(params): Path<TilePathParams>,
) -> Response {
    let Some((col, row)) = parse_tile_coords(&params.filename) else {
        return bad_tile_path(&params.filename);
    };

    let tile = match state.tile_service.get_tile(params.level, col, row).await {
        Ok(tile) => tile,
        Err(err) => return err.into_response(),
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/jpeg".to_string()),
            (
                header::CACHE_CONTROL,
                format!("public, max-age={}", state.cache_max_age),
            ),
        ],
        axum::body::Body::from(tile.data),
    )
        .into_response()
}

/// Handle pyramid info requests.
///
/// # Endpoint
///
/// `GET /info`
///
/// Returns `{"width", "height", "tileSize", "maxLevel", "scene"}`.
pub async fn info_handler<S: SlideSource>(State(state): State<AppState<S>>) -> Json<InfoResponse> {
    Json(InfoResponse::from(state.tile_service.info()))
}

/// Handle debug requests for one tile address.
///
/// # Endpoint
///
/// `GET /debug/{level}/{col}_{row}`
///
/// Returns the full geometric derivation for the address: level dimensions
/// and scale, the level-space tile rectangle, the ROI before and after
/// clamping, and the effective zoom. The values are exactly the ones the
/// tile endpoint uses for the same address.
pub async fn debug_handler<S: SlideSource>(
    State(state): State<AppState<S>>,
    Path(params): Path<TilePathParams>,
) -> Response {
    let Some((col, row)) = parse_tile_coords(&params.filename) else {
        return bad_tile_path(&params.filename);
    };

    match state.tile_service.derivation(params.level, col, row) {
        Ok(derivation) => Json::<TileDerivation>(derivation).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
