use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    let ops = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    let api = Router::new()
        .route(
            "/api/protocols",
            get(handlers::protocols::list).post(handlers::protocols::action),
        )
        .route(
            "/api/strategy",
            get(handlers::strategy::get_strategy).post(handlers::strategy::action),
        )
        .route("/ws", get(handlers::ws::handler));

    // The dashboard may be served from anywhere; nothing here is authenticated.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    ops.merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
