use chrono::{DateTime, Utc};

/// Whole-dollar USD with thousands separators, e.g. `$1,250,500`.
pub fn format_currency(amount: f64) -> String {
    let dollars = amount.abs().round() as u64;
    let digits = dollars.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0.0 && dollars > 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Two-decimal percentage, e.g. `7.20%`.
pub fn format_apy(value: f64) -> String {
    format!("{value:.2}%")
}

/// Coarse relative time: minutes under an hour, hours under a day, then days.
pub fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_minutes().max(0);

    if minutes < 60 {
        format!("{minutes} minutes ago")
    } else if minutes < 1440 {
        format!("{} hours ago", minutes / 60)
    } else {
        format!("{} days ago", minutes / 1440)
    }
}

/// Fixed-width bar for a 0 to 100 value; out-of-range input is clamped.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1_250_500.0), "$1,250,500");
        assert_eq!(format_currency(45_678.90), "$45,679");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(-1500.0), "-$1,500");
    }

    #[test]
    fn test_format_apy() {
        assert_eq!(format_apy(7.2), "7.20%");
        assert_eq!(format_apy(6.24), "6.24%");
    }

    #[test]
    fn test_format_time_ago() {
        let now = Utc::now();
        assert_eq!(format_time_ago(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(format_time_ago(now - Duration::hours(2), now), "2 hours ago");
        assert_eq!(format_time_ago(now - Duration::days(3), now), "3 days ago");
        assert_eq!(format_time_ago(now + Duration::minutes(5), now), "0 minutes ago");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(50.0, 10), "[#####-----]");
        assert_eq!(progress_bar(250.0, 4), "[####]");
        assert_eq!(progress_bar(-3.0, 4), "[----]");
    }
}
