use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::{Strategy, StrategyActionReceipt, TxStatus};

use super::amount::{resolve_amount, AmountInput};
use super::catalog::ProtocolCatalog;
use super::errors::ActionError;
use super::round_cents;
use super::tx::fabricate_tx_hash;

/// Strategy harvests report a yield in `[MIN, MAX)`, so every harvest adds
/// something.
const MIN_STRATEGY_HARVEST: f64 = 0.01;
const MAX_STRATEGY_HARVEST: f64 = 1_000.0;

// ---------------------------------------------------------------------------
// Request and command
// ---------------------------------------------------------------------------

/// Body of `POST /api/strategy`, deserialized exactly once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyActionRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<AmountInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdraw_amount: Option<AmountInput>,
    /// Rebalance target; a random catalog entry when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

impl StrategyActionRequest {
    pub fn new(action: &str) -> Self {
        Self {
            action: Some(action.into()),
            ..Default::default()
        }
    }
}

/// A validated strategy action carrying only the fields it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyCommand {
    Rebalance { target: Option<String> },
    Harvest,
    Deposit { amount: f64 },
    Withdraw { amount: f64 },
}

impl StrategyCommand {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyCommand::Rebalance { .. } => "rebalance",
            StrategyCommand::Harvest => "harvest",
            StrategyCommand::Deposit { .. } => "deposit",
            StrategyCommand::Withdraw { .. } => "withdraw",
        }
    }
}

impl TryFrom<StrategyActionRequest> for StrategyCommand {
    type Error = ActionError;

    fn try_from(req: StrategyActionRequest) -> Result<Self, Self::Error> {
        let action = req
            .action
            .as_deref()
            .filter(|a| !a.is_empty())
            .ok_or(ActionError::MissingAction)?;

        match action {
            "rebalance" => Ok(StrategyCommand::Rebalance {
                target: req.protocol.filter(|p| !p.is_empty()),
            }),
            "harvest" => Ok(StrategyCommand::Harvest),
            "deposit" => Ok(StrategyCommand::Deposit {
                amount: resolve_amount(req.amount.as_ref())?,
            }),
            "withdraw" => Ok(StrategyCommand::Withdraw {
                amount: resolve_amount(req.withdraw_amount.as_ref())?,
            }),
            _ => Err(ActionError::InvalidAction),
        }
    }
}

// ---------------------------------------------------------------------------
// State transition
// ---------------------------------------------------------------------------

/// Apply one command to the strategy record. On error the record is left
/// untouched.
pub fn apply_command<R: Rng + ?Sized>(
    strategy: &mut Strategy,
    command: StrategyCommand,
    catalog: &ProtocolCatalog,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<StrategyActionReceipt, ActionError> {
    match command {
        StrategyCommand::Rebalance { target } => {
            let target = match target {
                Some(name) => catalog.find(&name),
                None => catalog.pick(rng),
            }
            .ok_or(ActionError::ProtocolNotFound)?;

            let old_protocol =
                std::mem::replace(&mut strategy.current_protocol, target.name.clone());
            strategy.current_chain = target.chain.clone();
            strategy.position.protocol = target.name.clone();
            strategy.last_rebalance = now;

            Ok(StrategyActionReceipt::Rebalance {
                transaction_hash: fabricate_tx_hash(rng),
                old_protocol,
                new_protocol: target.name.clone(),
                amount: strategy.tvl,
                timestamp: now,
                status: TxStatus::Success,
            })
        }
        StrategyCommand::Harvest => {
            let yield_amount =
                round_cents(rng.random_range(MIN_STRATEGY_HARVEST..MAX_STRATEGY_HARVEST));
            strategy.total_yield_generated += yield_amount;
            strategy.position.last_harvest = strategy.position.last_harvest.max(now);

            Ok(StrategyActionReceipt::Harvest {
                transaction_hash: fabricate_tx_hash(rng),
                yield_amount,
                protocol: strategy.current_protocol.clone(),
                timestamp: now,
                status: TxStatus::Success,
            })
        }
        StrategyCommand::Deposit { amount } => {
            if !(strategy.tvl + amount).is_finite() {
                return Err(ActionError::InvalidAmount);
            }
            strategy.tvl += amount;
            strategy.position.amount += amount;

            Ok(transfer_receipt(strategy, amount, rng, now))
        }
        StrategyCommand::Withdraw { amount } => {
            if amount > strategy.tvl {
                return Err(ActionError::InsufficientBalance {
                    requested: amount,
                    available: strategy.tvl,
                });
            }
            strategy.tvl -= amount;
            strategy.position.amount -= amount;

            Ok(transfer_receipt(strategy, amount, rng, now))
        }
    }
}

fn transfer_receipt<R: Rng + ?Sized>(
    strategy: &Strategy,
    amount: f64,
    rng: &mut R,
    now: DateTime<Utc>,
) -> StrategyActionReceipt {
    StrategyActionReceipt::Transfer {
        transaction_hash: fabricate_tx_hash(rng),
        amount,
        protocol: strategy.current_protocol.clone(),
        timestamp: now,
        status: TxStatus::Success,
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Owner of the process-wide strategy record.
///
/// Every command runs its whole read-modify-write under one lock, so
/// concurrent actions serialize instead of overwriting each other.
#[derive(Clone)]
pub struct StrategyStore {
    inner: Arc<Mutex<Strategy>>,
}

impl StrategyStore {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            inner: Arc::new(Mutex::new(strategy)),
        }
    }

    /// Store seeded with the initial record relative to the current time.
    pub fn seeded() -> Self {
        Self::new(Strategy::seeded(Utc::now()))
    }

    pub async fn snapshot(&self) -> Strategy {
        self.inner.lock().await.clone()
    }

    /// Apply `command` and return the receipt together with the record as
    /// it stood right after the command.
    pub async fn execute(
        &self,
        command: StrategyCommand,
        catalog: &ProtocolCatalog,
    ) -> Result<(StrategyActionReceipt, Strategy), ActionError> {
        let mut strategy = self.inner.lock().await;
        let mut rng = rand::rng();

        let receipt = apply_command(&mut strategy, command, catalog, &mut rng, Utc::now())?;
        Ok((receipt, strategy.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::tx::is_tx_hash;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (Strategy, ProtocolCatalog, StdRng) {
        (
            Strategy::seeded(Utc::now()),
            ProtocolCatalog::default(),
            StdRng::seed_from_u64(2024),
        )
    }

    #[test]
    fn test_request_parsing() {
        let parse = |json: &str| {
            let req: StrategyActionRequest = serde_json::from_str(json).unwrap();
            StrategyCommand::try_from(req)
        };

        assert_eq!(parse(r#"{}"#), Err(ActionError::MissingAction));
        assert_eq!(parse(r#"{"action":""}"#), Err(ActionError::MissingAction));
        assert_eq!(parse(r#"{"action":"stake"}"#), Err(ActionError::InvalidAction));
        assert_eq!(parse(r#"{"action":"harvest"}"#), Ok(StrategyCommand::Harvest));
        assert_eq!(
            parse(r#"{"action":"deposit","amount":500}"#),
            Ok(StrategyCommand::Deposit { amount: 500.0 })
        );
        assert_eq!(
            parse(r#"{"action":"withdraw","withdrawAmount":"2000000"}"#),
            Ok(StrategyCommand::Withdraw { amount: 2_000_000.0 })
        );
        // deposit ignores withdrawAmount and vice versa
        assert_eq!(
            parse(r#"{"action":"withdraw","amount":5}"#),
            Ok(StrategyCommand::Withdraw { amount: 1000.0 })
        );
        assert_eq!(
            parse(r#"{"action":"rebalance","protocol":"Morpho"}"#),
            Ok(StrategyCommand::Rebalance { target: Some("Morpho".into()) })
        );
        assert_eq!(
            parse(r#"{"action":"deposit","amount":-3}"#),
            Err(ActionError::InvalidAmount)
        );
    }

    #[test]
    fn test_deposit_adds_to_tvl_and_position() {
        let (mut strategy, catalog, mut rng) = setup();
        let before = strategy.clone();

        let receipt = apply_command(
            &mut strategy,
            StrategyCommand::Deposit { amount: 500.0 },
            &catalog,
            &mut rng,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(strategy.tvl, before.tvl + 500.0);
        assert_eq!(strategy.position.amount, before.position.amount + 500.0);
        assert!(is_tx_hash(receipt.transaction_hash()));
    }

    #[test]
    fn test_deposit_overflowing_tvl_is_rejected() {
        let (mut strategy, catalog, mut rng) = setup();

        apply_command(
            &mut strategy,
            StrategyCommand::Deposit { amount: 1e308 },
            &catalog,
            &mut rng,
            Utc::now(),
        )
        .unwrap();
        let before = strategy.clone();

        let err = apply_command(
            &mut strategy,
            StrategyCommand::Deposit { amount: 1e308 },
            &catalog,
            &mut rng,
            Utc::now(),
        )
        .unwrap_err();

        assert_eq!(err, ActionError::InvalidAmount);
        assert_eq!(strategy, before);
        assert!(strategy.tvl.is_finite());
    }

    #[test]
    fn test_withdraw_over_balance_is_rejected() {
        let (mut strategy, catalog, mut rng) = setup();
        let before = strategy.clone();

        let err = apply_command(
            &mut strategy,
            StrategyCommand::Withdraw { amount: 2_000_000.0 },
            &catalog,
            &mut rng,
            Utc::now(),
        )
        .unwrap_err();

        assert!(matches!(err, ActionError::InsufficientBalance { .. }));
        assert_eq!(strategy, before);
    }

    #[test]
    fn test_withdraw_entire_balance() {
        let (mut strategy, catalog, mut rng) = setup();
        let tvl = strategy.tvl;

        apply_command(
            &mut strategy,
            StrategyCommand::Withdraw { amount: tvl },
            &catalog,
            &mut rng,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(strategy.tvl, 0.0);
        assert_eq!(strategy.position.amount, 0.0);
    }

    #[test]
    fn test_harvest_grows_yield_monotonically() {
        let (mut strategy, catalog, mut rng) = setup();

        for _ in 0..50 {
            let before = strategy.clone();
            let receipt = apply_command(
                &mut strategy,
                StrategyCommand::Harvest,
                &catalog,
                &mut rng,
                Utc::now(),
            )
            .unwrap();

            assert!(strategy.total_yield_generated > before.total_yield_generated);
            assert!(strategy.position.last_harvest >= before.position.last_harvest);
            let StrategyActionReceipt::Harvest { yield_amount, protocol, .. } = receipt else {
                panic!("expected harvest receipt");
            };
            assert!(yield_amount >= MIN_STRATEGY_HARVEST && yield_amount <= MAX_STRATEGY_HARVEST);
            assert_eq!(protocol, strategy.current_protocol);
        }
    }

    #[test]
    fn test_harvest_never_moves_last_harvest_back() {
        let (mut strategy, catalog, mut rng) = setup();
        let future = Utc::now() + chrono::Duration::hours(1);
        strategy.position.last_harvest = future;

        apply_command(&mut strategy, StrategyCommand::Harvest, &catalog, &mut rng, Utc::now())
            .unwrap();

        assert_eq!(strategy.position.last_harvest, future);
    }

    #[test]
    fn test_rebalance_targets_catalog_entries() {
        let (mut strategy, catalog, mut rng) = setup();

        for _ in 0..50 {
            let previous = strategy.current_protocol.clone();
            let receipt = apply_command(
                &mut strategy,
                StrategyCommand::Rebalance { target: None },
                &catalog,
                &mut rng,
                Utc::now(),
            )
            .unwrap();

            let target = catalog.find(&strategy.current_protocol).unwrap();
            assert_eq!(strategy.current_chain, target.chain);
            assert_eq!(strategy.position.protocol, target.name);
            let StrategyActionReceipt::Rebalance { old_protocol, new_protocol, amount, .. } = receipt
            else {
                panic!("expected rebalance receipt");
            };
            assert_eq!(old_protocol, previous);
            assert_eq!(new_protocol, strategy.current_protocol);
            assert_eq!(amount, strategy.tvl);
        }
    }

    #[test]
    fn test_rebalance_to_named_protocol() {
        let (mut strategy, catalog, mut rng) = setup();
        let now = Utc::now();

        apply_command(
            &mut strategy,
            StrategyCommand::Rebalance { target: Some("Aave V3".into()) },
            &catalog,
            &mut rng,
            now,
        )
        .unwrap();

        assert_eq!(strategy.current_protocol, "Aave V3");
        assert_eq!(strategy.current_chain, "Ethereum");
        assert_eq!(strategy.last_rebalance, now);
    }

    #[test]
    fn test_rebalance_to_unknown_protocol_is_rejected() {
        let (mut strategy, catalog, mut rng) = setup();
        let before = strategy.clone();

        let err = apply_command(
            &mut strategy,
            StrategyCommand::Rebalance { target: Some("Uniswap".into()) },
            &catalog,
            &mut rng,
            Utc::now(),
        )
        .unwrap_err();

        assert_eq!(err, ActionError::ProtocolNotFound);
        assert_eq!(strategy, before);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_deposits_are_not_lost() {
        let store = StrategyStore::seeded();
        let catalog = Arc::new(ProtocolCatalog::default());
        let initial = store.snapshot().await.tvl;

        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            let catalog = Arc::clone(&catalog);
            handles.push(tokio::spawn(async move {
                store
                    .execute(StrategyCommand::Deposit { amount: 10.0 }, &catalog)
                    .await
                    .unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        let after = store.snapshot().await;
        assert_eq!(after.tvl, initial + 500.0);
        assert_eq!(after.position.amount, initial + 500.0);
    }
}
