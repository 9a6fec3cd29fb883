use std::sync::OnceLock;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::models::Strategy;

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
///
/// Only one recorder can exist per process; later calls return the handle
/// installed by the first.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder");

            // Pre-register so they appear before the first action.
            for action in ["deploy", "withdraw", "harvest"] {
                counter!("protocol_actions_total", "action" => action).absolute(0);
            }
            for action in ["rebalance", "harvest", "deposit", "withdraw"] {
                counter!("strategy_actions_total", "action" => action).absolute(0);
            }
            gauge!("strategy_tvl").set(0.0);
            gauge!("strategy_total_yield").set(0.0);

            handle
        })
        .clone()
}

/// Mirror the stored (un-jittered) strategy figures into gauges.
pub fn record_strategy(strategy: &Strategy) {
    gauge!("strategy_tvl").set(strategy.tvl);
    gauge!("strategy_total_yield").set(strategy.total_yield_generated);
}
