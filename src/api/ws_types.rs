use serde::{Deserialize, Serialize};

use crate::models::{ProtocolActionReceipt, StrategyActionReceipt, StrategySnapshot};

/// Messages broadcast to all connected WebSocket clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WsMessage {
    #[serde(rename = "protocol_action")]
    ProtocolAction(ProtocolActionEvent),

    #[serde(rename = "strategy_action")]
    StrategyAction(StrategyActionEvent),

    /// First message on every new connection.
    #[serde(rename = "strategy_snapshot")]
    StrategySnapshot(StrategySnapshot),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolActionEvent {
    pub action: String,
    pub receipt: ProtocolActionReceipt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyActionEvent {
    pub action: String,
    pub receipt: StrategyActionReceipt,
    pub tvl: f64,
    pub current_protocol: String,
}
