use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use metrics::counter;

use crate::api::ws_types::{ProtocolActionEvent, WsMessage};
use crate::errors::AppError;
use crate::models::{ApiResponse, ProtocolActionReceipt, ProtocolSnapshot};
use crate::simulation::protocol_actions::simulate_protocol_action;
use crate::simulation::ProtocolActionRequest;
use crate::AppState;

/// GET /api/protocols: catalog with live-looking APYs
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProtocolSnapshot>>>, AppError> {
    if state.catalog.is_empty() {
        return Err(anyhow::anyhow!("protocol catalog is empty").into());
    }

    let now = Utc::now();
    let mut rng = rand::rng();
    let protocols: Vec<ProtocolSnapshot> = state
        .catalog
        .all()
        .iter()
        .map(|p| state.jitter.protocol(p, now, &mut rng))
        .collect();

    Ok(Json(ApiResponse::ok(protocols)))
}

/// POST /api/protocols: simulate deploy / withdraw / harvest on one protocol
pub async fn action(
    State(state): State<AppState>,
    body: Result<Json<ProtocolActionRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ProtocolActionReceipt>>, AppError> {
    let Json(req) = body?;

    let outcome = {
        let mut rng = rand::rng();
        simulate_protocol_action(&state.catalog, &req, &mut rng)
    };

    let (kind, receipt) = match outcome {
        Ok(done) => done,
        Err(e) => {
            counter!("action_rejections_total", "reason" => e.reason()).increment(1);
            tracing::warn!(
                protocol = ?req.protocol_name,
                action = ?req.action,
                error = %e,
                "Protocol action rejected"
            );
            return Err(e.into());
        }
    };

    counter!("protocol_actions_total", "action" => kind.as_str()).increment(1);
    tracing::info!(
        action = %kind,
        tx = %receipt.transaction_hash(),
        "Protocol action simulated"
    );

    // No subscribers is fine.
    let _ = state.ws_tx.send(WsMessage::ProtocolAction(ProtocolActionEvent {
        action: kind.to_string(),
        receipt: receipt.clone(),
    }));

    Ok(Json(ApiResponse::ok(receipt)))
}
