//! Positional list parameters for Square's list calls.
//!
//! Clients send list filters as a JSON object with camelCase keys. Square's
//! list calls take them positionally, so the builder lays the values out in
//! the order given by a fixed name list, leaving gaps as `None`.

use serde_json::Value;

/// `GET /payments` filters, in the order Square's list payments call takes them.
pub const PAYMENT_LIST_PARAMETERS: [&str; 12] = [
    "beginTime",
    "endTime",
    "sortOrder",
    "cursor",
    "locationId",
    "total",
    "last4",
    "cardBrand",
    "limit",
    "isOfflinePayment",
    "offlineBeginTime",
    "offlineEndTime",
];

pub const CUSTOMER_LIST_PARAMETERS: [&str; 5] =
    ["cursor", "limit", "sortField", "sortOrder", "count"];

pub const CARD_LIST_PARAMETERS: [&str; 5] = [
    "cursor",
    "customerId",
    "includeDisabledCard",
    "referenceId",
    "sortOrder",
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaginationError {
    #[error("List parameters must be a JSON object, got {0}")]
    InvalidArgument(&'static str),
}

/// Picks `names` out of `source` in order.
///
/// A position is `None` when the key is absent, `null`, or an empty string.
/// Keys not listed in `names` are ignored.
pub fn prepare_pagination_parameters<const N: usize>(
    names: &[&str; N],
    source: &Value,
) -> Result<[Option<Value>; N], PaginationError> {
    let source = source
        .as_object()
        .ok_or_else(|| PaginationError::InvalidArgument(kind(source)))?;

    Ok((*names).map(|name| match source.get(name) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(value.clone()),
    }))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
