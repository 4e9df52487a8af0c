mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use std::sync::Arc;
use url_dispatch::api::handlers::health_handler;

#[tokio::test]
async fn test_health_endpoint_success() {
    let ctx = common::create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(ctx.state.clone());

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["metrics_store"]["status"], "ok");
    assert_eq!(json["checks"]["access_queue"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_degraded_when_metrics_store_down() {
    let ctx = common::create_test_state_with_metrics(Arc::new(common::FailingMetricsRepository));
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(ctx.state.clone());

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["metrics_store"]["status"], "error");
}

#[tokio::test]
async fn test_health_degraded_when_access_queue_closed() {
    let common::TestContext {
        state, access_rx, ..
    } = common::create_test_state();
    drop(access_rx);

    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json::<serde_json::Value>()["checks"]["access_queue"]["status"],
        "error"
    );
}
