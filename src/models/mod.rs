pub mod protocol;
pub mod receipt;
pub mod strategy;

pub use protocol::{Protocol, ProtocolMetrics, ProtocolSnapshot};
pub use receipt::{ProtocolActionReceipt, StrategyActionReceipt, TxStatus};
pub use strategy::{Strategy, StrategyPosition, StrategySnapshot};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ApiResponse: envelope shared by every JSON endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}
