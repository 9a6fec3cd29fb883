use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public-good attributes shown as badges next to a protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolMetrics {
    pub is_open_source: bool,
    pub has_grants_program: bool,
    #[serde(rename = "isGovernedByDAO")]
    pub is_governed_by_dao: bool,
    pub public_goods_treasury_percentage: u8,
}

/// A lending protocol the strategy can allocate to.
///
/// `weighted_apy` is a fixed per-protocol figure; it is not recomputed from
/// `apy` and `pgs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Protocol {
    pub name: String,
    pub chain: String,
    pub chain_id: u64,
    pub apy: f64,
    pub pgs: f64,
    pub weighted_apy: f64,
    pub is_active: bool,
    pub protocol_address: String,
    pub metrics: ProtocolMetrics,
}

/// A protocol as served to clients, stamped with the time it was read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolSnapshot {
    #[serde(flatten)]
    pub protocol: Protocol,
    pub last_updated: DateTime<Utc>,
}
