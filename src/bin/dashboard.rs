use aegis::config::DashboardConfig;
use aegis::dashboard::run_dashboard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = DashboardConfig::from_env()?;
    tracing::info!(
        api_url = %config.api_url,
        poll_secs = config.poll_interval.as_secs(),
        "Starting dashboard"
    );

    run_dashboard(config).await
}

// Logs go to stderr so they never tear the frames drawn on stdout.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
