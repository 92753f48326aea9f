//! API integration tests for the HTTP endpoints.
//!
//! Tests verify:
//! - DZI descriptor content and content type
//! - Pyramid metadata via /info
//! - Tile retrieval, placeholder behavior, and cache headers
//! - Error cases (invalid level, malformed paths, failing sources)

use axum::http::StatusCode;

use super::test_utils::{
    body_bytes, body_json, failing_router, get, is_valid_jpeg, jpeg_dims, test_router,
    unsupported_router,
};

// =============================================================================
// Descriptor and Metadata
// =============================================================================

#[tokio::test]
async fn test_dzi_descriptor() {
    let response = get(test_router().await, "/dzi").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/xml"
    );

    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(body.contains("xmlns=\"http://schemas.microsoft.com/deepzoom/2008\""));
    assert!(body.contains("Format=\"jpeg\""));
    assert!(body.contains("Overlap=\"0\""));
    assert!(body.contains("TileSize=\"512\""));
    assert!(body.contains("<Size Width=\"10000\" Height=\"8000\"/>"));
    // Single-line document, no pretty printing.
    assert!(!body.contains('\n'));
}

#[tokio::test]
async fn test_info_endpoint() {
    let response = get(test_router().await, "/info").await;

    assert_eq!(response.status(), StatusCode::OK);
    let info = body_json(response).await;

    assert_eq!(info["width"], 10000);
    assert_eq!(info["height"], 8000);
    assert_eq!(info["tileSize"], 512);
    assert_eq!(info["maxLevel"], 14);
    assert_eq!(info["scene"], 0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = get(test_router().await, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let health = body_json(response).await;
    assert_eq!(health["status"], "healthy");
}

// =============================================================================
// Tile Retrieval
// =============================================================================

#[tokio::test]
async fn test_tile_retrieval_success() {
    let response = get(test_router().await, "/tile/14/1_2.jpeg").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/jpeg"
    );
    assert!(response.headers().contains_key("cache-control"));

    let body = body_bytes(response).await;
    assert!(is_valid_jpeg(&body), "Response should be a valid JPEG");
    assert_eq!(jpeg_dims(&body), (512, 512));
}

#[tokio::test]
async fn test_tile_jpg_extension_accepted() {
    let response = get(test_router().await, "/tile/14/1_2.jpg").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_edge_tile_has_partial_dimensions() {
    // Worked example: the bottom-right tile of a 10000x8000 slide at the
    // finest level covers 272x320 pixels.
    let response = get(test_router().await, "/tile/14/19_15.jpeg").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_bytes(response).await;
    assert_eq!(jpeg_dims(&body), (272, 320));
}

#[tokio::test]
async fn test_out_of_grid_tile_yields_placeholder() {
    let response = get(test_router().await, "/tile/14/1000_0.jpeg").await;

    // Out-of-range addresses are not errors; viewers probe past the edge.
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_bytes(response).await;
    assert_eq!(jpeg_dims(&body), (512, 512));
}

#[tokio::test]
async fn test_tile_is_deterministic() {
    let router = test_router().await;
    let a = body_bytes(get(router.clone(), "/tile/13/2_3.jpeg").await).await;
    let b = body_bytes(get(router, "/tile/13/2_3.jpeg").await).await;
    assert_eq!(a, b);
}

// =============================================================================
// Error Handling
// =============================================================================

#[tokio::test]
async fn test_invalid_level_rejected() {
    let response = get(test_router().await, "/tile/15/0_0.jpeg").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"], "invalid_level");
    assert_eq!(error["status"], 400);
}

#[tokio::test]
async fn test_malformed_tile_filename_rejected() {
    let router = test_router().await;

    for uri in ["/tile/14/12.jpeg", "/tile/14/1_2_3.jpeg", "/tile/14/a_b.jpeg"] {
        let response = get(router.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
        let error = body_json(response).await;
        assert_eq!(error["error"], "invalid_tile_path");
    }
}

#[tokio::test]
async fn test_read_failure_is_server_error() {
    let response = get(failing_router().await, "/tile/12/0_0.jpeg").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error = body_json(response).await;
    assert_eq!(error["error"], "read_error");
}

#[tokio::test]
async fn test_unsupported_format_is_distinct_client_error() {
    let response = get(unsupported_router().await, "/tile/12/0_0.jpeg").await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let error = body_json(response).await;
    assert_eq!(error["error"], "unsupported_source");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = get(test_router().await, "/tiles/14/1_2.jpeg").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
