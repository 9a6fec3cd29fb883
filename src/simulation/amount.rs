use serde::{Deserialize, Serialize};

use super::errors::ActionError;

/// Amount used when a request omits one.
pub const DEFAULT_AMOUNT: f64 = 1000.0;

/// An amount as clients send it: either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

/// Resolve an optional amount to a usable value.
///
/// Absent, zero and blank amounts fall back to [`DEFAULT_AMOUNT`]. Negative,
/// non-finite and unparseable amounts are rejected.
pub fn resolve_amount(input: Option<&AmountInput>) -> Result<f64, ActionError> {
    let value = match input {
        None => return Ok(DEFAULT_AMOUNT),
        Some(AmountInput::Number(n)) => *n,
        Some(AmountInput::Text(s)) if s.trim().is_empty() => return Ok(DEFAULT_AMOUNT),
        Some(AmountInput::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ActionError::InvalidAmount)?,
    };

    if !value.is_finite() || value < 0.0 {
        return Err(ActionError::InvalidAmount);
    }
    if value == 0.0 {
        return Ok(DEFAULT_AMOUNT);
    }
    Ok(value)
}
