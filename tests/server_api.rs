use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    routing::get,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;
use tunescout::server::{self, config::ServerConfig, routes::AppState, upstream::CatalogClient};

/// Router wired to an upstream that refuses connections, for tests that
/// must not (or do) reach it.
fn app_with_upstream(upstream_url: &str) -> Router {
    let config = ServerConfig {
        upstream_url: upstream_url.to_string(),
        ..ServerConfig::default()
    };
    let catalog = Arc::new(CatalogClient::new(config.upstream_url.clone()));
    server::router(AppState { catalog }, &config)
}

fn unreachable_app() -> Router {
    // Port 9 (discard) is not listening; any contact fails immediately.
    app_with_upstream("http://127.0.0.1:9")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_query_is_rejected_without_upstream_contact() {
    let response = unreachable_app()
        .oneshot(Request::get("/api/search").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Search query is required");
}

#[tokio::test]
async fn empty_query_is_rejected() {
    let response = unreachable_app()
        .oneshot(Request::get("/api/search?q=").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn whitespace_query_is_rejected() {
    let response = unreachable_app()
        .oneshot(
            Request::get("/api/search?q=%20%20%20")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Search query is required");
}

#[tokio::test]
async fn health_reports_ok_with_timestamp() {
    let response = unreachable_app()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["service"], "Music Search API");

    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn unknown_route_returns_json_not_found() {
    let response = unreachable_app()
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Endpoint not found");
}

#[tokio::test]
async fn upstream_failure_returns_error_body_with_detail() {
    let response = unreachable_app()
        .oneshot(
            Request::get("/api/search?q=test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to search for songs");
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
}

const CANNED_CATALOG: &str = r#"{
    "resultCount": 3,
    "results": [
        {
            "trackName": "First",
            "artistName": "Artist A",
            "collectionName": "Album A",
            "previewUrl": "https://audio.example.com/first.m4a",
            "artworkUrl100": "https://img.example.com/100.jpg",
            "trackTimeMillis": 215000,
            "primaryGenreName": "Pop"
        },
        {
            "trackName": "No Preview",
            "artistName": "Artist B"
        },
        {
            "trackName": "Third",
            "artistName": "Artist C",
            "previewUrl": "https://audio.example.com/third.m4a"
        }
    ]
}"#;

/// Serves a canned catalog payload on an ephemeral port and returns its
/// base URL.
async fn spawn_stub_catalog() -> String {
    let stub = Router::new().route(
        "/search",
        get(|| async {
            (
                [("content-type", "application/json")],
                CANNED_CATALOG.to_string(),
            )
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn search_reshapes_catalog_results() {
    let upstream = spawn_stub_catalog().await;
    let response = app_with_upstream(&upstream)
        .oneshot(
            Request::get("/api/search?q=test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    // The entry without a preview URL is dropped and the count reflects it.
    assert_eq!(body["resultCount"], 2);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    for result in results {
        assert!(result["previewUrl"].as_str().is_some_and(|u| !u.is_empty()));
    }
    assert_eq!(results[0]["trackName"], "First");
    assert_eq!(results[0]["genre"], "Pop");
    assert_eq!(results[1]["trackName"], "Third");
}
