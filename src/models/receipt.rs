use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
}

// ---------------------------------------------------------------------------
// Protocol action receipts (POST /api/protocols)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProtocolActionReceipt {
    #[serde(rename_all = "camelCase")]
    Harvest {
        transaction_hash: String,
        #[serde(rename = "yield")]
        yield_amount: f64,
        protocol: String,
        status: TxStatus,
    },
    /// Deploy and withdraw share a shape.
    #[serde(rename_all = "camelCase")]
    Transfer {
        transaction_hash: String,
        amount: f64,
        protocol: String,
        status: TxStatus,
    },
}

impl ProtocolActionReceipt {
    pub fn transaction_hash(&self) -> &str {
        match self {
            Self::Harvest { transaction_hash, .. } | Self::Transfer { transaction_hash, .. } => {
                transaction_hash
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Strategy action receipts (POST /api/strategy)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StrategyActionReceipt {
    #[serde(rename_all = "camelCase")]
    Rebalance {
        transaction_hash: String,
        old_protocol: String,
        new_protocol: String,
        amount: f64,
        timestamp: DateTime<Utc>,
        status: TxStatus,
    },
    #[serde(rename_all = "camelCase")]
    Harvest {
        transaction_hash: String,
        #[serde(rename = "yield")]
        yield_amount: f64,
        protocol: String,
        timestamp: DateTime<Utc>,
        status: TxStatus,
    },
    /// Deposit and withdraw share a shape.
    #[serde(rename_all = "camelCase")]
    Transfer {
        transaction_hash: String,
        amount: f64,
        protocol: String,
        timestamp: DateTime<Utc>,
        status: TxStatus,
    },
}

impl StrategyActionReceipt {
    pub fn transaction_hash(&self) -> &str {
        match self {
            Self::Rebalance { transaction_hash, .. }
            | Self::Harvest { transaction_hash, .. }
            | Self::Transfer { transaction_hash, .. } => transaction_hash,
        }
    }
}

/// First ten characters of a hash, cut on a char boundary.
fn short_hash(hash: &str) -> &str {
    match hash.char_indices().nth(10) {
        Some((idx, _)) => &hash[..idx],
        None => hash,
    }
}

impl fmt::Display for StrategyActionReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rebalance { old_protocol, new_protocol, transaction_hash, .. } => write!(
                f,
                "rebalanced {old_protocol} -> {new_protocol} (tx {})",
                short_hash(transaction_hash),
            ),
            Self::Harvest { yield_amount, protocol, transaction_hash, .. } => write!(
                f,
                "harvested {yield_amount:.2} from {protocol} (tx {})",
                short_hash(transaction_hash),
            ),
            Self::Transfer { amount, protocol, transaction_hash, .. } => write!(
                f,
                "moved {amount:.2} on {protocol} (tx {})",
                short_hash(transaction_hash),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(hash: &str) -> StrategyActionReceipt {
        StrategyActionReceipt::Transfer {
            transaction_hash: hash.to_string(),
            amount: 1000.0,
            protocol: "Morpho".into(),
            timestamp: Utc::now(),
            status: TxStatus::Success,
        }
    }

    #[test]
    fn test_display_shortens_hash() {
        let receipt = transfer("0xabcdef0123456789");
        assert_eq!(receipt.to_string(), "moved 1000.00 on Morpho (tx 0xabcdef01)");

        assert_eq!(transfer("0xab").to_string(), "moved 1000.00 on Morpho (tx 0xab)");
    }

    #[test]
    fn test_display_handles_multibyte_hash() {
        // 'é' spans bytes 9..11, so a byte slice at 10 would split it.
        let receipt = transfer("0xabcdefgéxyz");
        assert_eq!(receipt.to_string(), "moved 1000.00 on Morpho (tx 0xabcdefgé)");
    }
}
