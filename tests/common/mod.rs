use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use aegis::api::router::create_router;
use aegis::config::AppConfig;
use aegis::AppState;

/// Fresh in-process app with jitter off, so reads return stored values.
#[allow(dead_code)]
pub fn build_test_app() -> (Router, AppState) {
    let state = AppState::new(AppConfig::for_tests(), aegis::metrics::init_metrics());
    (create_router(state.clone()), state)
}

/// Same as [`build_test_app`] but with display jitter switched on.
#[allow(dead_code)]
pub fn build_jittered_app() -> (Router, AppState) {
    let config = AppConfig {
        jitter_enabled: true,
        ..AppConfig::for_tests()
    };
    let state = AppState::new(config, aegis::metrics::init_metrics());
    (create_router(state.clone()), state)
}

#[allow(dead_code)]
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(resp).await
}

#[allow(dead_code)]
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    post_raw(app, uri, serde_json::to_string(&body).unwrap()).await
}

#[allow(dead_code)]
pub async fn post_raw(app: &Router, uri: &str, body: String) -> (StatusCode, serde_json::Value) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(resp).await
}

#[allow(dead_code)]
async fn read_json(resp: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[allow(dead_code)]
pub fn is_tx_hash(value: &serde_json::Value) -> bool {
    value
        .as_str()
        .map(aegis::simulation::tx::is_tx_hash)
        .unwrap_or(false)
}
