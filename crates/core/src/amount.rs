use serde_json::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AmountError {
    #[error("amount is required")]
    Missing,
    #[error("amount '{0}' is not a number")]
    NotNumeric(String),
    #[error("amount '{0}' is out of range")]
    OutOfRange(String),
}

/// Converts a major-unit amount (`19.99`) into minor units (`1999`).
///
/// Accepts JSON numbers and numeric strings. The result is rounded to the
/// nearest minor unit.
pub fn major_to_minor(amount: &Value) -> Result<i64, AmountError> {
    let major = match amount {
        Value::Null => return Err(AmountError::Missing),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| AmountError::NotNumeric(n.to_string()))?,
        Value::String(s) if s.trim().is_empty() => return Err(AmountError::Missing),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| AmountError::NotNumeric(s.clone()))?,
        other => return Err(AmountError::NotNumeric(other.to_string())),
    };

    let minor = (major * 100.0).round();
    if !minor.is_finite() || minor.abs() >= i64::MAX as f64 {
        return Err(AmountError::OutOfRange(amount.to_string()));
    }
    Ok(minor as i64)
}
