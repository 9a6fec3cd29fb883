pub mod api;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod simulation;

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::api::ws_types::WsMessage;
use crate::config::AppConfig;
use crate::simulation::{Jitter, ProtocolCatalog, StrategyStore};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<ProtocolCatalog>,
    pub strategy: StrategyStore,
    pub jitter: Jitter,
    pub ws_tx: broadcast::Sender<WsMessage>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}

impl AppState {
    /// Fresh state: default catalog and a newly seeded strategy record.
    pub fn new(config: AppConfig, metrics_handle: metrics_exporter_prometheus::PrometheusHandle) -> Self {
        let (ws_tx, _) = broadcast::channel(config.ws_channel_capacity);

        Self {
            jitter: Jitter::new(config.jitter_enabled),
            catalog: Arc::new(ProtocolCatalog::default()),
            strategy: StrategyStore::seeded(),
            ws_tx,
            metrics_handle,
            config,
        }
    }
}
