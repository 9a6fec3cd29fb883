use chrono::{DateTime, Utc};

use crate::models::{ProtocolSnapshot, StrategySnapshot};

use super::format::{format_apy, format_currency, format_time_ago, progress_bar};

const BAR_WIDTH: usize = 20;

/// Everything one frame of the dashboard shows.
#[derive(Debug, Default)]
pub struct DashboardView<'a> {
    pub loading: bool,
    pub strategy: Option<&'a StrategySnapshot>,
    pub protocols: &'a [ProtocolSnapshot],
    /// Load failure; paired with the retry hint.
    pub error: Option<&'a str>,
    /// Outcome of the last command.
    pub notice: Option<&'a str>,
}

pub fn render(view: &DashboardView<'_>, now: DateTime<Utc>) -> String {
    if view.loading {
        return "Loading Aegis Dashboard...\n".into();
    }

    let mut lines: Vec<String> = vec!["=== Aegis Live Dashboard ===".into()];

    if let Some(error) = view.error {
        lines.push(format!("! {error}"));
        lines.push("  type `retry` to reload".into());
    }

    if let Some(snapshot) = view.strategy {
        lines.extend(strategy_card(snapshot, now));
        lines.push(String::new());
        lines.push("--- Multi-Chain Protocol Scoring ---".into());
        for p in view.protocols {
            lines.extend(protocol_row(p, &snapshot.strategy.current_protocol));
        }
    }

    if let Some(notice) = view.notice {
        lines.push(String::new());
        lines.push(format!("> {notice}"));
    }

    lines.push(String::new());
    lines.push(
        "commands: rebalance [protocol] | harvest | deposit [amount] | withdraw [amount] | retry | quit"
            .into(),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn strategy_card(snapshot: &StrategySnapshot, now: DateTime<Utc>) -> Vec<String> {
    let s = &snapshot.strategy;
    vec![
        s.name.clone(),
        format!("  {}", s.description),
        format!("  Total Value Locked     {}", format_currency(s.tvl)),
        format!("  Current Strategy       {} ({})", s.current_protocol, s.current_chain),
        format!("  Current APR            {}", format_apy(s.apr)),
        format!("  Total Yield Generated  {}", format_currency(s.total_yield_generated)),
        format!("  Last Rebalance         {}", format_time_ago(s.last_rebalance, now)),
        format!("  Last Harvest           {}", format_time_ago(s.position.last_harvest, now)),
        format!("  Updated                {}", snapshot.last_updated.format("%H:%M:%S UTC")),
    ]
}

fn protocol_row(snapshot: &ProtocolSnapshot, current: &str) -> Vec<String> {
    let p = &snapshot.protocol;
    let active = if p.name == current { "  [Active]" } else { "" };

    let mut badges = Vec::new();
    if p.metrics.is_open_source {
        badges.push("Open Source".to_string());
    }
    if p.metrics.has_grants_program {
        badges.push("Has Grants".to_string());
    }
    if p.metrics.is_governed_by_dao {
        badges.push("DAO Governed".to_string());
    }
    badges.push(format!("{}% to Public Goods", p.metrics.public_goods_treasury_percentage));

    vec![
        format!("{} ({}){active}  weighted APY {}", p.name, p.chain, format_apy(p.weighted_apy)),
        format!("  Base APY     {} {}", progress_bar(p.apy * 10.0, BAR_WIDTH), format_apy(p.apy)),
        format!("  Public Good  {} {:.1}", progress_bar(p.pgs * 50.0, BAR_WIDTH), p.pgs),
        format!(
            "  Final Score  {} {}",
            progress_bar(p.weighted_apy * 10.0, BAR_WIDTH),
            format_apy(p.weighted_apy)
        ),
        format!("  {}", badges.join(" | ")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Strategy;
    use crate::simulation::ProtocolCatalog;

    fn fixtures(now: DateTime<Utc>) -> (StrategySnapshot, Vec<ProtocolSnapshot>) {
        let strategy = StrategySnapshot {
            strategy: Strategy::seeded(now),
            last_updated: now,
        };
        let protocols = ProtocolCatalog::default()
            .all()
            .iter()
            .cloned()
            .map(|protocol| ProtocolSnapshot {
                protocol,
                last_updated: now,
            })
            .collect();
        (strategy, protocols)
    }

    #[test]
    fn test_loading_frame() {
        let view = DashboardView {
            loading: true,
            ..Default::default()
        };
        assert_eq!(render(&view, Utc::now()), "Loading Aegis Dashboard...\n");
    }

    #[test]
    fn test_strategy_card_and_active_marker() {
        let now = Utc::now();
        let (strategy, protocols) = fixtures(now);
        let view = DashboardView {
            strategy: Some(&strategy),
            protocols: &protocols,
            ..Default::default()
        };

        let frame = render(&view, now);
        assert!(frame.contains("Total Value Locked     $1,250,000"));
        assert!(frame.contains("Current Strategy       Spark (Arbitrum)"));
        assert!(frame.contains("Current APR            7.20%"));
        assert!(frame.contains("Last Rebalance         2 hours ago"));
        assert!(frame.contains("Spark (Arbitrum)  [Active]  weighted APY 7.20%"));
        assert!(!frame.contains("Morpho (Optimism)  [Active]"));
        assert!(frame.contains("Open Source | DAO Governed | 10% to Public Goods"));
        assert!(frame.contains("Open Source | Has Grants | 5% to Public Goods"));
    }

    #[test]
    fn test_error_shows_retry_hint() {
        let view = DashboardView {
            error: Some("Failed to load data. Please try again."),
            ..Default::default()
        };

        let frame = render(&view, Utc::now());
        assert!(frame.contains("! Failed to load data. Please try again."));
        assert!(frame.contains("type `retry` to reload"));
    }
}
