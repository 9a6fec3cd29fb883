use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use chrono::Utc;
use tokio::sync::broadcast::error::RecvError;

use crate::api::ws_types::WsMessage;
use crate::AppState;

/// GET /ws: live feed of action receipts, opened with a strategy snapshot
pub async fn handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    // Subscribe before taking the snapshot so no action slips between them.
    let mut rx = state.ws_tx.subscribe();

    let strategy = state.strategy.snapshot().await;
    let hello = WsMessage::StrategySnapshot(
        state.jitter.strategy(&strategy, Utc::now(), &mut rand::rng()),
    );
    if !forward(&mut socket, &hello).await {
        return;
    }
    tracing::info!("Action feed client connected");

    loop {
        tokio::select! {
            msg = rx.recv() => match msg {
                Ok(ws_msg) => {
                    if !forward(&mut socket, &ws_msg).await {
                        break;
                    }
                }
                Err(RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Action feed client lagged");
                }
                Err(RecvError::Closed) => break,
            },
            client_msg = socket.recv() => match client_msg {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(Message::Ping(data))) => {
                    if socket.send(Message::Pong(data)).await.is_err() {
                        break;
                    }
                }
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::info!("Action feed client disconnected");
}

/// Send one message as JSON text. Returns false once the socket is gone.
async fn forward(socket: &mut WebSocket, msg: &WsMessage) -> bool {
    match serde_json::to_string(msg) {
        Ok(json) => socket.send(Message::Text(json)).await.is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize WsMessage");
            true
        }
    }
}
