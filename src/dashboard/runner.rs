use chrono::Utc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::time::interval;

use crate::config::DashboardConfig;
use crate::models::{ProtocolSnapshot, StrategySnapshot};
use crate::simulation::{AmountInput, StrategyActionRequest};

use super::client::{AegisClient, ClientError};
use super::render::{render, DashboardView};

pub const LOAD_ERROR: &str = "Failed to load data. Please try again.";

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Rebalance(Option<String>),
    Harvest,
    Deposit(Option<f64>),
    Withdraw(Option<f64>),
    Retry,
    Quit,
}

impl Command {
    /// Parse one line of user input, e.g. `deposit 500` or `rebalance Aave V3`.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let rest = (!rest.is_empty()).then_some(rest);

        match word.to_lowercase().as_str() {
            "rebalance" => Ok(Command::Rebalance(rest.map(str::to_string))),
            "harvest" => Ok(Command::Harvest),
            "deposit" => Ok(Command::Deposit(parse_amount(rest)?)),
            "withdraw" => Ok(Command::Withdraw(parse_amount(rest)?)),
            "retry" | "r" => Ok(Command::Retry),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            "" => Err("type a command".into()),
            other => Err(format!("unknown command `{other}`")),
        }
    }

    /// The strategy action this command triggers, if any.
    pub fn to_request(&self) -> Option<StrategyActionRequest> {
        let req = match self {
            Command::Rebalance(target) => StrategyActionRequest {
                protocol: target.clone(),
                ..StrategyActionRequest::new("rebalance")
            },
            Command::Harvest => StrategyActionRequest::new("harvest"),
            Command::Deposit(amount) => StrategyActionRequest {
                amount: amount.map(AmountInput::from),
                ..StrategyActionRequest::new("deposit")
            },
            Command::Withdraw(amount) => StrategyActionRequest {
                withdraw_amount: amount.map(AmountInput::from),
                ..StrategyActionRequest::new("withdraw")
            },
            Command::Retry | Command::Quit => return None,
        };
        Some(req)
    }
}

fn parse_amount(arg: Option<&str>) -> Result<Option<f64>, String> {
    arg.map(|a| match a.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(n),
        _ => Err(format!("`{a}` is not an amount")),
    })
    .transpose()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

pub struct Dashboard {
    client: AegisClient,
    loading: bool,
    strategy: Option<StrategySnapshot>,
    protocols: Vec<ProtocolSnapshot>,
    error: Option<String>,
    notice: Option<String>,
}

impl Dashboard {
    pub fn new(client: AegisClient) -> Self {
        Self {
            client,
            loading: true,
            strategy: None,
            protocols: Vec::new(),
            error: None,
            notice: None,
        }
    }

    pub fn strategy(&self) -> Option<&StrategySnapshot> {
        self.strategy.as_ref()
    }

    pub fn protocols(&self) -> &[ProtocolSnapshot] {
        &self.protocols
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Fetch both resources together. On failure the previous data stays on
    /// screen under the error banner.
    pub async fn refresh(&mut self) {
        let (protocols, strategy) =
            tokio::join!(self.client.get_protocols(), self.client.get_strategy());

        match (protocols, strategy) {
            (Ok(protocols), Ok(strategy)) => {
                self.protocols = protocols;
                self.strategy = Some(strategy);
                self.error = None;
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, url = %self.client.base_url(), "Dashboard refresh failed");
                self.error = Some(LOAD_ERROR.into());
            }
        }
        self.loading = false;
    }

    /// Run one user command. Returns false when the user asked to quit.
    pub async fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => return false,
            Command::Retry => {
                self.notice = None;
                self.refresh().await;
            }
            action => {
                if let Some(req) = action.to_request() {
                    self.perform(req).await;
                }
            }
        }
        true
    }

    async fn perform(&mut self, req: StrategyActionRequest) {
        let action = req.action.clone().unwrap_or_default();

        match self.client.strategy_action(&req).await {
            Ok(receipt) => {
                tracing::info!(%action, tx = %receipt.transaction_hash(), "Strategy action submitted");
                self.notice = Some(capitalize(&receipt.to_string()));
                self.refresh().await;
            }
            Err(e) => {
                tracing::warn!(%action, error = %e, "Strategy action failed");
                let reason = match &e {
                    ClientError::Api { message, .. } => message.clone(),
                    ClientError::Http(_) => "server unreachable".into(),
                };
                self.notice = Some(format!("{} failed: {reason}", capitalize(&action)));
            }
        }
    }

    pub fn frame(&self) -> String {
        let view = DashboardView {
            loading: self.loading,
            strategy: self.strategy.as_ref(),
            protocols: &self.protocols,
            error: self.error.as_deref(),
            notice: self.notice.as_deref(),
        };
        render(&view, Utc::now())
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Poll on `config.poll_interval`, read commands from stdin, redraw after
/// every event. Ends on `quit` or end of input.
pub async fn run_dashboard(config: DashboardConfig) -> anyhow::Result<()> {
    let client = AegisClient::new(reqwest::Client::new(), config.api_url.clone());
    let mut dashboard = Dashboard::new(client);

    let mut ticker = interval(config.poll_interval);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout.write_all(dashboard.frame().as_bytes()).await?;
    stdout.flush().await?;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                dashboard.refresh().await;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Ok(command) => {
                        if !dashboard.handle(command).await {
                            break;
                        }
                    }
                    Err(msg) => dashboard.notice = Some(msg),
                }
            }
        }

        stdout.write_all(dashboard.frame().as_bytes()).await?;
        stdout.flush().await?;
    }

    tracing::info!("Dashboard closed");
    Ok(())
}
