use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let strategy = state.strategy.snapshot().await;

    Json(json!({
        "status": "healthy",
        "protocols": state.catalog.len(),
        "current_protocol": strategy.current_protocol,
        "jitter": state.jitter.is_enabled(),
    }))
}
