//! HTTP routing tests driving the router in-process.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{gradient_tile, TilePyramid};
use http_body_util::BodyExt;
use image::RgbaImage;
use slo3d::codec::PngEncoder;
use slo3d::compositor::Compositor;
use slo3d::config::ServerConfig;
use slo3d::coord::TileCoord;
use slo3d::level::LevelResolution;
use slo3d::server::{router, AppState};
use slo3d::tile::{TileLoadError, TileLoader};
use slo3d::HeightMapService;
use tower::ServiceExt;

const WRONG_TYPE: &str = "Bad request - form data is of wrong type.\n";

fn app(pyramid: &TilePyramid) -> Router {
    let config = ServerConfig::default().with_root(pyramid.root());
    router(AppState::from_config(&config), pyramid.root())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, body.to_vec())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn test_heightmap_get_returns_png() {
    let pyramid = TilePyramid::new();
    let stored = gradient_tile(8, 5);
    pyramid.put(3, 374, 31, &stored);

    let (status, content_type, body) = get(
        app(&pyramid),
        "/heightmaps?x=374000&y=31000&dim=1000&levelId=7",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    assert_eq!(slo3d::codec::decode_png(&body).unwrap(), stored);
}

#[tokio::test]
async fn test_heightmap_post_form() {
    let pyramid = TilePyramid::new();

    let request = Request::post("/heightmaps")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("x=374500&y=31500&dim=1500&levelId=2"))
        .unwrap();
    let (status, _, body) = send(app(&pyramid), request).await;

    assert_eq!(status, StatusCode::OK);
    let image = slo3d::codec::decode_png(&body).unwrap();
    assert_eq!(image.dimensions(), (6, 6));
}

#[tokio::test]
async fn test_heightmap_post_with_query_parameters() {
    let pyramid = TilePyramid::new();

    let request = Request::post("/heightmaps?x=374000&y=31000&dim=1000&levelId=7")
        .body(Body::empty())
        .unwrap();
    let (status, content_type, body) = send(app(&pyramid), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    let image = slo3d::codec::decode_png(&body).unwrap();
    assert_eq!(image.dimensions(), (8, 8));
}

#[tokio::test]
async fn test_heightmap_post_merges_body_and_query() {
    let pyramid = TilePyramid::new();

    let request = Request::post("/heightmaps?dim=1500&levelId=2&x=1")
        .header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded; charset=utf-8",
        )
        .body(Body::from("x=374500&y=31500"))
        .unwrap();
    let (status, _, body) = send(app(&pyramid), request).await;

    assert_eq!(status, StatusCode::OK);
    let image = slo3d::codec::decode_png(&body).unwrap();
    assert_eq!(image.dimensions(), (6, 6));
}

#[tokio::test]
async fn test_heightmap_post_other_content_type_uses_query() {
    let pyramid = TilePyramid::new();

    let request = Request::post("/heightmaps?x=374000&y=31000&dim=1000&levelId=7")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("x=east"))
        .unwrap();
    let (status, _, _) = send(app(&pyramid), request).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_heightmap_post_other_content_type_without_query() {
    let pyramid = TilePyramid::new();

    let request = Request::post("/heightmaps")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"x":374000}"#))
        .unwrap();
    let (status, _, body) = send(app(&pyramid), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(body).unwrap(), WRONG_TYPE);
}

#[tokio::test]
async fn test_heightmap_repeated_key_first_wins() {
    let pyramid = TilePyramid::new();

    let (status, _, body) = get(
        app(&pyramid),
        "/heightmaps?x=374000&x=1&y=31000&dim=1000&levelId=7",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let image = slo3d::codec::decode_png(&body).unwrap();
    assert_eq!(image.dimensions(), (8, 8));
}

#[tokio::test]
async fn test_heightmap_sub_pixel_region_is_bad_request() {
    let pyramid = TilePyramid::new();

    let (status, _, body) = get(
        app(&pyramid),
        "/heightmaps?x=374000&y=31000&dim=1&levelId=2",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = String::from_utf8(body).unwrap();
    assert!(message.starts_with("Bad request - "), "got {:?}", message);
    assert!(message.contains("smaller than one pixel"), "got {:?}", message);
}

/// Loader that blocks before reporting every tile missing.
struct SlowTileLoader {
    delay: Duration,
}

impl TileLoader for SlowTileLoader {
    fn load(
        &self,
        _level: &LevelResolution,
        tile: TileCoord,
    ) -> Result<RgbaImage, TileLoadError> {
        std::thread::sleep(self.delay);
        Err(TileLoadError::NotFound {
            path: format!("{}_{}.png", tile.grid_x, tile.grid_y).into(),
        })
    }
}

#[tokio::test]
async fn test_heightmap_deadline_exceeded() {
    let pyramid = TilePyramid::new();
    let loader = Arc::new(SlowTileLoader {
        delay: Duration::from_millis(300),
    });
    let service = HeightMapService::new(Compositor::new(loader), Arc::new(PngEncoder::default()));
    let state = AppState::new(Arc::new(service), Some(Duration::from_millis(20)));
    let app = router(state, pyramid.root());

    let (status, _, body) = get(app, "/heightmaps?x=374000&y=31000&dim=1000&levelId=7").await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    let message = String::from_utf8(body).unwrap();
    assert!(
        message.starts_with("Internal server error - Request timed out after 20ms"),
        "got {:?}",
        message
    );
}

#[tokio::test]
async fn test_heightmap_within_deadline() {
    let pyramid = TilePyramid::new();
    let loader = Arc::new(SlowTileLoader {
        delay: Duration::from_millis(1),
    });
    let service = HeightMapService::new(Compositor::new(loader), Arc::new(PngEncoder::default()));
    let state = AppState::new(Arc::new(service), Some(Duration::from_secs(10)));
    let app = router(state, pyramid.root());

    let (status, _, _) = get(app, "/heightmaps?x=374000&y=31000&dim=1000&levelId=7").await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_heightmap_missing_parameter() {
    let pyramid = TilePyramid::new();

    let (status, _, body) = get(app(&pyramid), "/heightmaps?x=374000&y=31000&dim=1000").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(body).unwrap(), WRONG_TYPE);
}

#[tokio::test]
async fn test_heightmap_malformed_parameter() {
    let pyramid = TilePyramid::new();

    let (status, _, _) = get(
        app(&pyramid),
        "/heightmaps?x=east&y=31000&dim=1000&levelId=7",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_heightmap_out_of_range() {
    let pyramid = TilePyramid::new();

    let (status, _, body) = get(
        app(&pyramid),
        "/heightmaps?x=373999&y=31000&dim=1000&levelId=7",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = String::from_utf8(body).unwrap();
    assert!(message.contains("out of range"), "got {:?}", message);
}

#[tokio::test]
async fn test_heightmap_unknown_level() {
    let pyramid = TilePyramid::new();

    let (status, _, body) = get(
        app(&pyramid),
        "/heightmaps?x=374000&y=31000&dim=1000&levelId=99",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8(body).unwrap().contains("Unknown detail level: 99"));
}

#[tokio::test]
async fn test_static_files_served_from_root() {
    let pyramid = TilePyramid::new();
    let path = pyramid.put(3, 374, 31, &gradient_tile(8, 9));
    let on_disk = std::fs::read(path).unwrap();

    let (status, _, body) = get(app(&pyramid), "/data/tiles/3/374_31.png").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, on_disk);
}

#[tokio::test]
async fn test_static_file_not_found() {
    let pyramid = TilePyramid::new();

    let (status, _, _) = get(app(&pyramid), "/nope.txt").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
