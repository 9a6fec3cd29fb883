//! In-memory simulation of the protocol catalog, the strategy record and the
//! fabricated transactions that actions produce.

pub mod amount;
pub mod catalog;
pub mod errors;
pub mod jitter;
pub mod protocol_actions;
pub mod strategy_store;
pub mod tx;

pub use amount::AmountInput;
pub use catalog::ProtocolCatalog;
pub use errors::ActionError;
pub use jitter::Jitter;
pub use protocol_actions::{ProtocolActionKind, ProtocolActionRequest};
pub use strategy_store::{StrategyActionRequest, StrategyCommand, StrategyStore};

/// Round a currency figure to whole cents.
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
