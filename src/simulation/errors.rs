use thiserror::Error;

/// Rejections produced while validating or applying an action.
///
/// The `Display` text is what clients see in the `error` field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Action is required")]
    MissingAction,

    #[error("Protocol not found")]
    ProtocolNotFound,

    #[error("Invalid action")]
    InvalidAction,

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Insufficient balance")]
    InsufficientBalance { requested: f64, available: f64 },
}

impl ActionError {
    /// Short label used for the rejection counter.
    pub fn reason(&self) -> &'static str {
        match self {
            ActionError::MissingFields | ActionError::MissingAction => "missing_fields",
            ActionError::ProtocolNotFound => "protocol_not_found",
            ActionError::InvalidAction => "invalid_action",
            ActionError::InvalidAmount => "invalid_amount",
            ActionError::InsufficientBalance { .. } => "insufficient_balance",
        }
    }
}
