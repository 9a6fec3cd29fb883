use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use metrics::counter;

use crate::api::ws_types::{StrategyActionEvent, WsMessage};
use crate::errors::AppError;
use crate::metrics::record_strategy;
use crate::models::{ApiResponse, StrategyActionReceipt, StrategySnapshot};
use crate::simulation::{ActionError, StrategyActionRequest, StrategyCommand};
use crate::AppState;

/// GET /api/strategy: current record plus display jitter
pub async fn get_strategy(
    State(state): State<AppState>,
) -> Json<ApiResponse<StrategySnapshot>> {
    let strategy = state.strategy.snapshot().await;
    let snapshot = state
        .jitter
        .strategy(&strategy, Utc::now(), &mut rand::rng());

    Json(ApiResponse::ok(snapshot))
}

/// POST /api/strategy: rebalance / harvest / deposit / withdraw
pub async fn action(
    State(state): State<AppState>,
    body: Result<Json<StrategyActionRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<StrategyActionReceipt>>, AppError> {
    let Json(req) = body?;

    let command = StrategyCommand::try_from(req).map_err(reject)?;
    let action = command.name();

    let (receipt, strategy) = state
        .strategy
        .execute(command, &state.catalog)
        .await
        .map_err(reject)?;

    counter!("strategy_actions_total", "action" => action).increment(1);
    record_strategy(&strategy);
    tracing::info!(
        action,
        tvl = %strategy.tvl,
        protocol = %strategy.current_protocol,
        total_yield = %strategy.total_yield_generated,
        "Strategy action applied: {receipt}"
    );

    let _ = state.ws_tx.send(WsMessage::StrategyAction(StrategyActionEvent {
        action: action.to_string(),
        receipt: receipt.clone(),
        tvl: strategy.tvl,
        current_protocol: strategy.current_protocol,
    }));

    Ok(Json(ApiResponse::ok(receipt)))
}

fn reject(e: ActionError) -> AppError {
    counter!("action_rejections_total", "reason" => e.reason()).increment(1);
    match &e {
        ActionError::InsufficientBalance { requested, available } => tracing::warn!(
            requested = %requested,
            available = %available,
            "Strategy withdraw exceeds balance"
        ),
        other => tracing::warn!(error = %other, "Strategy action rejected"),
    }
    e.into()
}
