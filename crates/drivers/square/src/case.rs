//! Key-case marshaling between the gateway's camelCase JSON and Square's
//! snake_case wire format.
//!
//! Keys of `metadata` objects belong to the caller and are never rewritten.

use convert_case::{Case, Casing};
use serde_json::Value;

const VERBATIM_KEYS: &[&str] = &["metadata"];

#[derive(Clone, Copy)]
enum KeyCase {
    Snake,
    Camel,
}

/// Rewrites every object key to snake_case, recursively.
pub fn to_provider_keys(value: Value) -> Value {
    convert_keys(value, KeyCase::Snake)
}

/// Rewrites every object key to camelCase, recursively.
pub fn from_provider_keys(value: Value) -> Value {
    convert_keys(value, KeyCase::Camel)
}

fn convert_keys(value: Value, case: KeyCase) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| {
                    let value = if VERBATIM_KEYS.contains(&key.as_str()) {
                        value
                    } else {
                        convert_keys(value, case)
                    };
                    let key = match case {
                        KeyCase::Snake => key.to_case(Case::Snake),
                        KeyCase::Camel => key.to_case(Case::Camel),
                    };
                    (key, value)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| convert_keys(item, case))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_provider_keys_nested() {
        let wire = json!({
            "payment": {
                "amount_money": {"amount": 500, "currency": "CAD"},
                "card_details": {"card": {"exp_month": 9, "last_4": "5858"}},
                "processing_fee": [{"amount_money": {"amount": 45}}]
            }
        });
        let converted = from_provider_keys(wire);
        assert_eq!(converted["payment"]["amountMoney"]["amount"], 500);
        assert_eq!(converted["payment"]["cardDetails"]["card"]["expMonth"], 9);
        assert_eq!(converted["payment"]["cardDetails"]["card"]["last4"], "5858");
        assert_eq!(
            converted["payment"]["processingFee"][0]["amountMoney"]["amount"],
            45
        );
    }

    #[test]
    fn test_to_provider_keys_leaves_values_alone() {
        let body = json!({"sourceId": "cnon:card-nonce-ok", "card": {"customerId": "X1"}});
        assert_eq!(
            to_provider_keys(body),
            json!({"source_id": "cnon:card-nonce-ok", "card": {"customer_id": "X1"}})
        );
    }

    #[test]
    fn test_snake_case_keys_pass_through_unchanged() {
        let body = json!({"idempotency_key": "k", "amount_money": {"amount": 1}});
        assert_eq!(to_provider_keys(body.clone()), body);
    }

    #[test]
    fn test_metadata_keys_are_verbatim() {
        let wire = json!({"reference_id": "r", "metadata": {"order_ref": "A-1", "shipTo": "x"}});
        let converted = from_provider_keys(wire);
        assert_eq!(converted["referenceId"], "r");
        assert_eq!(converted["metadata"], json!({"order_ref": "A-1", "shipTo": "x"}));
    }
}
