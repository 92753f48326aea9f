//! Geometry integration tests over the /debug endpoint.
//!
//! Tests verify:
//! - The full derivation trace for interior, edge, and coarse-level tiles
//! - Degenerate addresses reported as empty, matching the placeholder path
//! - Agreement between the debug trace and the tiles actually served

use axum::http::StatusCode;

use super::test_utils::{body_bytes, body_json, get, jpeg_dims, test_router};

#[tokio::test]
async fn test_debug_interior_tile() {
    let response = get(test_router().await, "/debug/14/1_2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let d = body_json(response).await;

    assert_eq!(d["level"], 14);
    assert_eq!(d["col"], 1);
    assert_eq!(d["row"], 2);
    assert_eq!(d["level_dims"]["scale"], 1);
    assert_eq!(d["level_dims"]["width"], 10000);
    assert_eq!(d["level_dims"]["height"], 8000);
    assert_eq!(d["nominal_roi"]["x"], 512);
    assert_eq!(d["nominal_roi"]["y"], 1024);
    assert_eq!(d["nominal_roi"]["w"], 512);
    assert_eq!(d["nominal_roi"]["h"], 512);
    assert_eq!(d["zoom"], 1.0);
    assert_eq!(d["empty"], false);
    assert_eq!(d["tile_size"], 512);
    assert_eq!(d["image_size"][0], 10000);
    assert_eq!(d["image_size"][1], 8000);
}

#[tokio::test]
async fn test_debug_edge_tile_worked_example() {
    // (level=14, col=19, row=15) on 10000x8000: the footprint is clipped to
    // the image edge, so the ROI is 272x320 starting at (9728, 7680).
    let response = get(test_router().await, "/debug/14/19_15").await;

    assert_eq!(response.status(), StatusCode::OK);
    let d = body_json(response).await;

    assert_eq!(d["tile_level_rect"]["u0"], 9728);
    assert_eq!(d["tile_level_rect"]["v0"], 7680);
    assert_eq!(d["tile_level_rect"]["u1"], 10000);
    assert_eq!(d["tile_level_rect"]["v1"], 8000);
    assert_eq!(d["nominal_roi"]["x"], 9728);
    assert_eq!(d["nominal_roi"]["y"], 7680);
    assert_eq!(d["nominal_roi"]["w"], 272);
    assert_eq!(d["nominal_roi"]["h"], 320);
    assert_eq!(d["clamped_roi"], d["nominal_roi"]);
    assert_eq!(d["empty"], false);
}

#[tokio::test]
async fn test_debug_coarsest_level() {
    // Level 0 is a single level-space pixel at scale 16384; the nominal ROI
    // covers a full 16384x16384 block, clamped back to the scene bounds, and
    // the effective zoom is raised so the output is at least one pixel.
    let response = get(test_router().await, "/debug/0/0_0").await;

    assert_eq!(response.status(), StatusCode::OK);
    let d = body_json(response).await;

    assert_eq!(d["level_dims"]["scale"], 16384);
    assert_eq!(d["level_dims"]["width"], 1);
    assert_eq!(d["level_dims"]["height"], 1);
    assert_eq!(d["nominal_roi"]["w"], 16384);
    assert_eq!(d["nominal_roi"]["h"], 16384);
    assert_eq!(d["clamped_roi"]["w"], 10000);
    assert_eq!(d["clamped_roi"]["h"], 8000);

    let zoom = d["zoom"].as_f64().unwrap();
    let effective = d["effective_zoom"].as_f64().unwrap();
    assert!((zoom - 1.0 / 16384.0).abs() < 1e-12);
    assert!((effective - 1.0 / 8000.0).abs() < 1e-12);
}

#[tokio::test]
async fn test_debug_out_of_grid_is_empty() {
    let response = get(test_router().await, "/debug/14/1000_0").await;

    assert_eq!(response.status(), StatusCode::OK);
    let d = body_json(response).await;

    assert_eq!(d["empty"], true);
    assert_eq!(d["clamped_roi"]["w"], 0);
    assert_eq!(d["clamped_roi"]["h"], 0);
}

#[tokio::test]
async fn test_debug_invalid_level_rejected() {
    let response = get(test_router().await, "/debug/15/0_0").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"], "invalid_level");
}

#[tokio::test]
async fn test_debug_trace_matches_served_tile() {
    // The debug endpoint serializes the same derivation the tile pipeline
    // uses, so the clamped ROI scaled by the effective zoom must match the
    // dimensions of the served JPEG.
    let router = test_router().await;

    for (level, col, row) in [(14u32, 1u32, 2u32), (14, 19, 15), (13, 9, 7)] {
        let d = body_json(get(router.clone(), &format!("/debug/{level}/{col}_{row}")).await).await;
        let tile = body_bytes(
            get(router.clone(), &format!("/tile/{level}/{col}_{row}.jpeg")).await,
        )
        .await;

        let zoom = d["effective_zoom"].as_f64().unwrap();
        let expected_w = (d["clamped_roi"]["w"].as_f64().unwrap() * zoom).round() as u32;
        let expected_h = (d["clamped_roi"]["h"].as_f64().unwrap() * zoom).round() as u32;

        let (w, h) = jpeg_dims(&tile);
        assert_eq!((w, h), (expected_w, expected_h), "level {level} col {col} row {row}");
    }
}

#[tokio::test]
async fn test_level_dimension_halving() {
    // Level dimensions follow ceil(native / 2^(max_level - level)).
    let router = test_router().await;

    let cases = [
        (14u32, 10000u64, 8000u64),
        (13, 5000, 4000),
        (12, 2500, 2000),
        (11, 1250, 1000),
        (10, 625, 500),
        (9, 313, 250),
        (8, 157, 125),
    ];

    for (level, width, height) in cases {
        let d = body_json(get(router.clone(), &format!("/debug/{level}/0_0")).await).await;
        assert_eq!(d["level_dims"]["width"], width, "level {level}");
        assert_eq!(d["level_dims"]["height"], height, "level {level}");
    }
}
