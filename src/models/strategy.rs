use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const STRATEGY_NAME: &str = "Aegis Multi-Chain Strategy";
pub const STRATEGY_DESCRIPTION: &str = "Optimización de rendimiento con impacto en bienes públicos";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyPosition {
    pub protocol: String,
    pub amount: f64,
    pub deposited_at: DateTime<Utc>,
    pub last_harvest: DateTime<Utc>,
}

/// The single strategy record the service manages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub name: String,
    pub description: String,
    pub tvl: f64,
    pub current_protocol: String,
    pub current_chain: String,
    pub last_rebalance: DateTime<Utc>,
    pub total_yield_generated: f64,
    pub apr: f64,
    pub public_good_score: f64,
    pub is_active: bool,
    pub position: StrategyPosition,
}

impl Strategy {
    /// Initial record: 1.25M deployed on Spark (Arbitrum), rebalanced and
    /// harvested two hours before `now`, deposited a day before.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let two_hours_ago = now - Duration::hours(2);

        Self {
            name: STRATEGY_NAME.into(),
            description: STRATEGY_DESCRIPTION.into(),
            tvl: 1_250_000.0,
            current_protocol: "Spark".into(),
            current_chain: "Arbitrum".into(),
            last_rebalance: two_hours_ago,
            total_yield_generated: 45_678.90,
            apr: 7.2,
            public_good_score: 1.5,
            is_active: true,
            position: StrategyPosition {
                protocol: "Spark".into(),
                amount: 1_250_000.0,
                deposited_at: now - Duration::hours(24),
                last_harvest: two_hours_ago,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySnapshot {
    #[serde(flatten)]
    pub strategy: Strategy,
    pub last_updated: DateTime<Utc>,
}
