use aegis::api::router::create_router;
use aegis::config::AppConfig;
use aegis::metrics::{init_metrics, record_strategy};
use aegis::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = config.bind_addr();

    let metrics_handle = init_metrics();
    let state = AppState::new(config, metrics_handle);

    let strategy = state.strategy.snapshot().await;
    record_strategy(&strategy);
    tracing::info!(
        protocols = state.catalog.len(),
        strategy = %strategy.name,
        current_protocol = %strategy.current_protocol,
        tvl = %strategy.tvl,
        jitter = state.jitter.is_enabled(),
        "Mock strategy state seeded"
    );

    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let json = std::env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false);
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
