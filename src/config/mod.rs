use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Display noise on GET responses
    pub jitter_enabled: bool,

    // Dashboard WebSocket fan-out
    pub ws_channel_capacity: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            jitter_enabled: env::var("JITTER_ENABLED")
                .unwrap_or_else(|_| "true".into())
                .parse()
                .unwrap_or(true),
            ws_channel_capacity: env::var("WS_CHANNEL_CAPACITY")
                .unwrap_or_else(|_| "256".into())
                .parse::<usize>()
                .unwrap_or(256)
                .max(1),
        })
    }

    /// Deterministic settings for in-process tests: loopback, no jitter.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            jitter_enabled: false,
            ws_channel_capacity: 16,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for the `aegis-dashboard` terminal client.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub api_url: String,
    pub poll_interval: Duration,
}

impl DashboardConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let poll_secs: u64 = env::var("DASHBOARD_POLL_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .map_err(|_| anyhow::anyhow!("DASHBOARD_POLL_SECS must be a whole number of seconds"))?;
        if poll_secs == 0 {
            anyhow::bail!("DASHBOARD_POLL_SECS must be greater than zero");
        }

        Ok(Self {
            api_url: env::var("AEGIS_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.into())
                .trim_end_matches('/')
                .to_string(),
            poll_interval: Duration::from_secs(poll_secs),
        })
    }
}
