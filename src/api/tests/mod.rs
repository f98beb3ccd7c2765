use super::*;
use crate::gateway::test_helpers::{RecordingNotifier, TestPaths, create_test_gateway};
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use std::time::Duration;
use tower::ServiceExt;


/// Helper to create a router over a test gateway
fn create_test_app(notifier: Arc<RecordingNotifier>) -> (Router, TestPaths, tempfile::TempDir) {
    let (gateway, paths, temp_dir) = create_test_gateway(notifier);
    let config = Arc::new(Config::default());
    (create_router(gateway, config), paths, temp_dir)
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_string(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

#[tokio::test]
async fn test_api_server_spawns_and_stops() {
    let (gateway, _paths, _temp_dir) = create_test_gateway(RecordingNotifier::succeeding());

    let mut config = Config::default();
    config.server.bind_address = "127.0.0.1:0".parse().unwrap(); // Port 0 = OS assigns a free port
    let config = Arc::new(config);

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let api_handle = tokio::spawn(start_api_server(gateway, config, async move {
        stop_rx.await.ok();
    }));

    tokio::time::sleep(Duration::from_millis(100)).await;
    stop_tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), api_handle)
        .await
        .expect("server should stop after shutdown signal")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cors_enabled() {
    let (gateway, _paths, _temp_dir) = create_test_gateway(RecordingNotifier::succeeding());
    let mut config = Config::default();
    config.server.cors_enabled = true;
    config.server.cors_origins = vec!["*".to_string()];
    let app = create_router(gateway, Arc::new(config));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let (gateway, _paths, _temp_dir) = create_test_gateway(RecordingNotifier::succeeding());
    let mut config = Config::default();
    config.server.cors_enabled = false;
    let app = create_router(gateway, Arc::new(config));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[tokio::test]
async fn test_cors_specific_origin() {
    let (gateway, _paths, _temp_dir) = create_test_gateway(RecordingNotifier::succeeding());
    let mut config = Config::default();
    config.server.cors_origins = vec!["https://sprint-ai.be".to_string()];
    let app = create_router(gateway, Arc::new(config));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "https://sprint-ai.be")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "https://sprint-ai.be"
    );
}

#[tokio::test]
async fn test_cors_preflight_for_download() {
    let (app, _paths, _temp_dir) = create_test_app(RecordingNotifier::succeeding());

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/download")
        .header("Origin", "https://sprint-ai.be")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    let methods = headers
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"), "allowed methods: {methods}");
    let allowed_headers = headers
        .get("access-control-allow-headers")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(allowed_headers.contains("content-type"));
}

#[tokio::test]
async fn test_cors_skips_invalid_origin_entries() {
    let (gateway, _paths, _temp_dir) = create_test_gateway(RecordingNotifier::succeeding());
    let mut config = Config::default();
    config.server.cors_origins = vec![
        "bad\norigin".to_string(),
        "https://sprint-ai.be".to_string(),
    ];
    let app = create_router(gateway, Arc::new(config));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "https://sprint-ai.be")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "https://sprint-ai.be"
    );
}

#[tokio::test]
async fn test_swagger_ui_enabled() {
    let (gateway, _paths, _temp_dir) = create_test_gateway(RecordingNotifier::succeeding());
    let mut config = Config::default();
    config.server.swagger_ui = true;
    let app = create_router(gateway, Arc::new(config));

    let response = app.oneshot(get_request("/api-docs/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (app, _paths, _temp_dir) = create_test_app(RecordingNotifier::succeeding());

    let response = app.oneshot(get_request("/api/unknown")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
