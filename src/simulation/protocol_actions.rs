use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{ProtocolActionReceipt, TxStatus};

use super::amount::{resolve_amount, AmountInput};
use super::catalog::ProtocolCatalog;
use super::errors::ActionError;
use super::round_cents;
use super::tx::fabricate_tx_hash;

/// Upper bound (exclusive) of the yield a protocol harvest reports.
const MAX_PROTOCOL_HARVEST: f64 = 50.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolActionRequest {
    #[serde(default)]
    pub protocol_name: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<AmountInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolActionKind {
    Deploy,
    Withdraw,
    Harvest,
}

impl ProtocolActionKind {
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s {
            "deploy" => Some(ProtocolActionKind::Deploy),
            "withdraw" => Some(ProtocolActionKind::Withdraw),
            "harvest" => Some(ProtocolActionKind::Harvest),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolActionKind::Deploy => "deploy",
            ProtocolActionKind::Withdraw => "withdraw",
            ProtocolActionKind::Harvest => "harvest",
        }
    }
}

impl fmt::Display for ProtocolActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a protocol action and fabricate its receipt. Pure: nothing in
/// the catalog or elsewhere is modified.
///
/// Checks run in order: required fields, protocol existence, action name,
/// amount.
pub fn simulate_protocol_action<R: Rng + ?Sized>(
    catalog: &ProtocolCatalog,
    request: &ProtocolActionRequest,
    rng: &mut R,
) -> Result<(ProtocolActionKind, ProtocolActionReceipt), ActionError> {
    let (name, action) = match (non_blank(&request.protocol_name), non_blank(&request.action)) {
        (Some(name), Some(action)) => (name, action),
        _ => return Err(ActionError::MissingFields),
    };

    let protocol = catalog.find(name).ok_or(ActionError::ProtocolNotFound)?;
    let kind = ProtocolActionKind::from_api_str(action).ok_or(ActionError::InvalidAction)?;

    let receipt = match kind {
        ProtocolActionKind::Deploy | ProtocolActionKind::Withdraw => {
            let amount = resolve_amount(request.amount.as_ref())?;
            ProtocolActionReceipt::Transfer {
                transaction_hash: fabricate_tx_hash(rng),
                amount,
                protocol: protocol.name.clone(),
                status: TxStatus::Success,
            }
        }
        ProtocolActionKind::Harvest => ProtocolActionReceipt::Harvest {
            transaction_hash: fabricate_tx_hash(rng),
            yield_amount: round_cents(rng.random_range(0.0..MAX_PROTOCOL_HARVEST)),
            protocol: protocol.name.clone(),
            status: TxStatus::Success,
        },
    };

    Ok((kind, receipt))
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
