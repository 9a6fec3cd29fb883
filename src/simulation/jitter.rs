use chrono::{DateTime, Utc};
use rand::Rng;

use crate::models::{Protocol, ProtocolSnapshot, Strategy, StrategySnapshot};

const APY_SPREAD: f64 = 0.1;
const WEIGHTED_APY_SPREAD: f64 = 0.15;
const TVL_SPREAD: f64 = 5_000.0;
const YIELD_DRIFT: f64 = 100.0;
const APR_SPREAD: f64 = 0.05;

/// Display-only noise applied to snapshots on read. Never written back.
#[derive(Debug, Clone, Copy)]
pub struct Jitter {
    enabled: bool,
}

impl Jitter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn protocol<R: Rng + ?Sized>(
        &self,
        protocol: &Protocol,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> ProtocolSnapshot {
        let mut protocol = protocol.clone();
        if self.enabled {
            protocol.apy += symmetric(rng, APY_SPREAD);
            protocol.weighted_apy += symmetric(rng, WEIGHTED_APY_SPREAD);
        }
        ProtocolSnapshot {
            protocol,
            last_updated: now,
        }
    }

    pub fn strategy<R: Rng + ?Sized>(
        &self,
        strategy: &Strategy,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> StrategySnapshot {
        let mut strategy = strategy.clone();
        if self.enabled {
            strategy.tvl += symmetric(rng, TVL_SPREAD);
            strategy.total_yield_generated += rng.random_range(0.0..YIELD_DRIFT);
            strategy.apr += symmetric(rng, APR_SPREAD);
        }
        StrategySnapshot {
            strategy,
            last_updated: now,
        }
    }
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, spread: f64) -> f64 {
    rng.random_range(-spread..spread)
}
