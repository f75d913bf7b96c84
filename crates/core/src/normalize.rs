//! Conversion of Square results into the shapes the gateway hands out.
//!
//! Square reports money in minor units (cents) and some counters as wide
//! integers or numeric strings. Each [`NormalizeRequest`] variant rewrites a
//! fixed set of fields:
//!
//! | variant | fields |
//! |---|---|
//! | `Card` | `expMonth`, `expYear`, `version` to plain numbers |
//! | `Payment` | `amountMoney`, `totalMoney`, `approvedMoney` (required), `refundedMoney`, `processingFee[].amountMoney` to major units; `cardDetails.card.expMonth`/`expYear` to plain numbers |
//! | `Customer` | `version`, `cards[].expMonth`/`expYear` to plain numbers |
//! | `Refund` | `amountMoney` to major units |
//! | `RefundDetail` | `amountMoney`, `processingFee[].amountMoney` to major units |
//!
//! Every other field passes through untouched. The transform is not
//! idempotent: a payload must be normalized exactly once.

use serde_json::{Map, Value};

type Record = Map<String, Value>;

/// A Square result paired with the shape it should be normalized as.
///
/// Each variant holds either a single record or an array of records.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeRequest {
    Card(Value),
    Payment(Value),
    Customer(Value),
    Refund(Value),
    RefundDetail(Value),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("Missing required field '{field}'")]
    MissingField { field: String },
    #[error("Field '{field}' should be {expected}")]
    UnexpectedShape {
        field: String,
        expected: &'static str,
    },
    #[error("Field '{field}' is not numeric: {value}")]
    NotNumeric { field: String, value: String },
}

/// Normalizes `request`, returning the converted payload.
pub fn normalize(request: NormalizeRequest) -> Result<Value, NormalizeError> {
    match request {
        NormalizeRequest::Card(data) => apply(data, true, normalize_card),
        NormalizeRequest::Payment(data) => apply(data, false, normalize_payment),
        NormalizeRequest::Customer(data) => apply(data, false, normalize_customer),
        NormalizeRequest::Refund(data) => apply(data, true, normalize_refund),
        NormalizeRequest::RefundDetail(data) => apply(data, true, normalize_refund_detail),
    }
}

fn apply(
    mut data: Value,
    null_ok: bool,
    transform: fn(&mut Record) -> Result<(), NormalizeError>,
) -> Result<Value, NormalizeError> {
    match &mut data {
        Value::Array(records) => {
            for (index, record) in records.iter_mut().enumerate() {
                transform(as_record(record, &format!("[{index}]"))?)?;
            }
        }
        Value::Null if null_ok => {}
        record => transform(as_record(record, "<root>")?)?,
    }
    Ok(data)
}

fn normalize_card(card: &mut Record) -> Result<(), NormalizeError> {
    to_plain_number(card, "expMonth", "expMonth")?;
    to_plain_number(card, "expYear", "expYear")?;
    to_plain_number(card, "version", "version")
}

fn normalize_payment(payment: &mut Record) -> Result<(), NormalizeError> {
    // Square always reports these three; a payment without them is rejected
    // rather than passed on half-converted.
    money_to_major(payment, "amountMoney", Presence::Required)?;
    money_to_major(payment, "totalMoney", Presence::Required)?;
    money_to_major(payment, "approvedMoney", Presence::Required)?;
    money_to_major(payment, "refundedMoney", Presence::Optional)?;

    if let Some(card) = optional_record(payment, "cardDetails", "cardDetails")?
        .map(|details| optional_record(details, "card", "cardDetails.card"))
        .transpose()?
        .flatten()
    {
        to_plain_number(card, "expMonth", "cardDetails.card.expMonth")?;
        to_plain_number(card, "expYear", "cardDetails.card.expYear")?;
    }

    processing_fees_to_major(payment)
}

fn normalize_customer(customer: &mut Record) -> Result<(), NormalizeError> {
    to_plain_number(customer, "version", "version")?;
    for_each_nested(customer, "cards", |card, path| {
        to_plain_number(card, "expMonth", &format!("{path}.expMonth"))?;
        to_plain_number(card, "expYear", &format!("{path}.expYear"))
    })
}

fn normalize_refund(refund: &mut Record) -> Result<(), NormalizeError> {
    money_to_major(refund, "amountMoney", Presence::Optional)
}

fn normalize_refund_detail(refund: &mut Record) -> Result<(), NormalizeError> {
    money_to_major(refund, "amountMoney", Presence::Optional)?;
    processing_fees_to_major(refund)
}

fn processing_fees_to_major(record: &mut Record) -> Result<(), NormalizeError> {
    for_each_nested(record, "processingFee", |fee, path| {
        money_to_major_at(fee, "amountMoney", &format!("{path}.amountMoney"), Presence::Optional)
    })
}

#[derive(Clone, Copy, PartialEq)]
enum Presence {
    Required,
    Optional,
}

fn money_to_major(record: &mut Record, key: &str, presence: Presence) -> Result<(), NormalizeError> {
    money_to_major_at(record, key, key, presence)
}

fn money_to_major_at(
    record: &mut Record,
    key: &str,
    path: &str,
    presence: Presence,
) -> Result<(), NormalizeError> {
    let money = match (record.get_mut(key), presence) {
        (None | Some(Value::Null), Presence::Optional) => return Ok(()),
        (None | Some(Value::Null), Presence::Required) => {
            return Err(NormalizeError::MissingField {
                field: path.to_string(),
            });
        }
        (Some(value), _) => as_record(value, path)?,
    };

    let amount_path = format!("{path}.amount");
    match (money.get_mut("amount"), presence) {
        (None | Some(Value::Null), Presence::Optional) => Ok(()),
        (None | Some(Value::Null), Presence::Required) => {
            Err(NormalizeError::MissingField { field: amount_path })
        }
        (Some(amount), _) => {
            *amount = minor_to_major(amount, &amount_path)?;
            Ok(())
        }
    }
}

fn to_plain_number(record: &mut Record, key: &str, path: &str) -> Result<(), NormalizeError> {
    match record.get_mut(key) {
        None | Some(Value::Null) => Ok(()),
        Some(value) => {
            *value = match parse_numeric(value, path)? {
                Numeric::Integer(n) => Value::from(n),
                Numeric::Float(f) => Value::from(f),
            };
            Ok(())
        }
    }
}

fn for_each_nested(
    record: &mut Record,
    key: &str,
    mut transform: impl FnMut(&mut Record, &str) -> Result<(), NormalizeError>,
) -> Result<(), NormalizeError> {
    match record.get_mut(key) {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Array(items)) => {
            for (index, item) in items.iter_mut().enumerate() {
                let path = format!("{key}[{index}]");
                transform(as_record(item, &path)?, &path)?;
            }
            Ok(())
        }
        Some(_) => Err(NormalizeError::UnexpectedShape {
            field: key.to_string(),
            expected: "an array",
        }),
    }
}

fn optional_record<'a>(
    record: &'a mut Record,
    key: &str,
    path: &str,
) -> Result<Option<&'a mut Record>, NormalizeError> {
    match record.get_mut(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => as_record(value, path).map(Some),
    }
}

fn as_record<'a>(value: &'a mut Value, path: &str) -> Result<&'a mut Record, NormalizeError> {
    match value {
        Value::Object(record) => Ok(record),
        _ => Err(NormalizeError::UnexpectedShape {
            field: path.to_string(),
            expected: "an object",
        }),
    }
}

enum Numeric {
    Integer(i64),
    Float(f64),
}

fn parse_numeric(value: &Value, path: &str) -> Result<Numeric, NormalizeError> {
    let not_numeric = || NormalizeError::NotNumeric {
        field: path.to_string(),
        value: value.to_string(),
    };
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(Numeric::Integer)
            .or_else(|| n.as_f64().map(Numeric::Float))
            .ok_or_else(not_numeric),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<i64>() {
                Ok(Numeric::Integer(n))
            } else {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(Numeric::Float)
                    .ok_or_else(not_numeric)
            }
        }
        _ => Err(not_numeric()),
    }
}

/// Divides a minor-unit amount by 100. Whole major amounts stay integers
/// (`500` becomes `5`), the rest become floats (`1999` becomes `19.99`).
fn minor_to_major(value: &Value, path: &str) -> Result<Value, NormalizeError> {
    Ok(match parse_numeric(value, path)? {
        Numeric::Integer(cents) if cents % 100 == 0 => Value::from(cents / 100),
        Numeric::Integer(cents) => Value::from(cents as f64 / 100.0),
        Numeric::Float(cents) => {
            let major = cents / 100.0;
            if cents.fract() == 0.0 && major.fract() == 0.0 && major.abs() < i64::MAX as f64 {
                Value::from(major as i64)
            } else {
                Value::from(major)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payment() -> Value {
        json!({
            "id": "lKMIIggw54LBdnec2Lvvc9HtqceZY",
            "status": "APPROVED",
            "amountMoney": {"amount": 500, "currency": "CAD"},
            "totalMoney": {"amount": 500, "currency": "CAD"},
            "approvedMoney": {"amount": 500, "currency": "CAD"},
            "cardDetails": {
                "status": "AUTHORIZED",
                "card": {"cardBrand": "VISA", "last4": "5858", "expMonth": "9", "expYear": "2026"}
            }
        })
    }

    #[test]
    fn test_payment_amounts_to_major_units() {
        let normalized = normalize(NormalizeRequest::Payment(payment())).unwrap();
        assert_eq!(normalized["amountMoney"], json!({"amount": 5, "currency": "CAD"}));
        assert_eq!(normalized["totalMoney"]["amount"], 5);
        assert_eq!(normalized["approvedMoney"]["amount"], 5);
        assert_eq!(normalized["approvedMoney"]["currency"], "CAD");
        assert_eq!(normalized["cardDetails"]["card"]["expMonth"], 9);
        assert_eq!(normalized["cardDetails"]["card"]["expYear"], 2026);
        assert_eq!(normalized["cardDetails"]["card"]["last4"], "5858");
        assert_eq!(normalized["status"], "APPROVED");
    }

    #[test]
    fn test_payment_fractional_amounts() {
        let mut data = payment();
        data["amountMoney"]["amount"] = json!(1999);
        data["totalMoney"]["amount"] = json!("2049");
        let normalized = normalize(NormalizeRequest::Payment(data)).unwrap();
        assert_eq!(normalized["amountMoney"]["amount"].as_f64(), Some(19.99));
        assert_eq!(normalized["totalMoney"]["amount"].as_f64(), Some(20.49));
    }

    #[test]
    fn test_payment_optional_money_and_fees() {
        let mut data = payment();
        data["refundedMoney"] = json!({"amount": 250, "currency": "CAD"});
        data["processingFee"] = json!([
            {"type": "INITIAL", "amountMoney": {"amount": 45, "currency": "CAD"}},
            {"type": "ADJUSTMENT", "amountMoney": {"amount": -100, "currency": "CAD"}}
        ]);
        let normalized = normalize(NormalizeRequest::Payment(data)).unwrap();
        assert_eq!(normalized["refundedMoney"]["amount"].as_f64(), Some(2.5));
        assert_eq!(
            normalized["processingFee"][0]["amountMoney"]["amount"].as_f64(),
            Some(0.45)
        );
        assert_eq!(normalized["processingFee"][1]["amountMoney"]["amount"], -1);
        assert_eq!(normalized["processingFee"][0]["type"], "INITIAL");
    }

    #[test]
    fn test_payment_list_normalizes_each_record() {
        let normalized =
            normalize(NormalizeRequest::Payment(json!([payment(), payment()]))).unwrap();
        assert_eq!(normalized[0]["amountMoney"]["amount"], 5);
        assert_eq!(normalized[1]["totalMoney"]["amount"], 5);
    }

    #[test]
    fn test_payment_missing_approved_money_is_rejected() {
        let mut data = payment();
        data.as_object_mut().unwrap().remove("approvedMoney");
        assert_eq!(
            normalize(NormalizeRequest::Payment(data)),
            Err(NormalizeError::MissingField {
                field: "approvedMoney".to_string()
            })
        );
    }

    #[test]
    fn test_payment_missing_required_amount_is_rejected() {
        let mut data = payment();
        data["totalMoney"] = json!({"currency": "CAD"});
        assert_eq!(
            normalize(NormalizeRequest::Payment(data)),
            Err(NormalizeError::MissingField {
                field: "totalMoney.amount".to_string()
            })
        );
    }

    #[test]
    fn test_payment_in_a_list_missing_money_is_rejected() {
        let mut broken = payment();
        broken.as_object_mut().unwrap().remove("amountMoney");
        assert!(matches!(
            normalize(NormalizeRequest::Payment(json!([payment(), broken]))),
            Err(NormalizeError::MissingField { .. })
        ));
    }

    #[test]
    fn test_card_fields_become_plain_numbers() {
        let card = json!({
            "id": "ccof:uIbfJXhXETSP197M3GB",
            "expMonth": "9",
            "expYear": 2026,
            "version": "3",
            "enabled": true
        });
        let normalized = normalize(NormalizeRequest::Card(card)).unwrap();
        assert_eq!(normalized["expMonth"], 9);
        assert_eq!(normalized["expYear"], 2026);
        assert_eq!(normalized["version"], 3);
        assert_eq!(normalized["enabled"], true);
    }

    #[test]
    fn test_card_list_and_missing_fields() {
        let cards = json!([{"expMonth": "1"}, {"id": "no-dates"}]);
        let normalized = normalize(NormalizeRequest::Card(cards)).unwrap();
        assert_eq!(normalized, json!([{"expMonth": 1}, {"id": "no-dates"}]));
    }

    #[test]
    fn test_customer_version_and_nested_cards() {
        let customer = json!({
            "id": "X56P964BH3B73SKKYECMNBGE20",
            "version": "7",
            "cards": [{"id": "ccof:1", "expMonth": "12", "expYear": "2030", "version": "2"}]
        });
        let normalized = normalize(NormalizeRequest::Customer(customer)).unwrap();
        assert_eq!(normalized["version"], 7);
        assert_eq!(normalized["cards"][0]["expMonth"], 12);
        assert_eq!(normalized["cards"][0]["expYear"], 2030);
        // Nested cards keep their version untouched.
        assert_eq!(normalized["cards"][0]["version"], "2");
    }

    #[test]
    fn test_customer_without_version() {
        let normalized =
            normalize(NormalizeRequest::Customer(json!({"id": "C1", "givenName": "Amelia"})))
                .unwrap();
        assert_eq!(normalized, json!({"id": "C1", "givenName": "Amelia"}));
    }

    #[test]
    fn test_refund_and_refund_detail() {
        let refund = json!({
            "id": "R1",
            "amountMoney": {"amount": 300, "currency": "CAD"},
            "processingFee": [{"amountMoney": {"amount": -9, "currency": "CAD"}}]
        });
        let plain = normalize(NormalizeRequest::Refund(refund.clone())).unwrap();
        assert_eq!(plain["amountMoney"]["amount"], 3);
        // The plain refund shape leaves fees alone.
        assert_eq!(plain["processingFee"][0]["amountMoney"]["amount"], -9);

        let detail = normalize(NormalizeRequest::RefundDetail(refund)).unwrap();
        assert_eq!(detail["amountMoney"]["amount"], 3);
        assert_eq!(
            detail["processingFee"][0]["amountMoney"]["amount"].as_f64(),
            Some(-0.09)
        );
    }

    #[test]
    fn test_refund_without_amount_passes_through() {
        let refund = json!({"id": "R2", "status": "PENDING"});
        assert_eq!(normalize(NormalizeRequest::Refund(refund.clone())).unwrap(), refund);
        assert_eq!(normalize(NormalizeRequest::Refund(Value::Null)).unwrap(), Value::Null);
    }

    #[test]
    fn test_unexpected_shapes_are_errors() {
        assert_eq!(
            normalize(NormalizeRequest::Payment(json!("not a payment"))),
            Err(NormalizeError::UnexpectedShape {
                field: "<root>".to_string(),
                expected: "an object"
            })
        );

        let mut data = payment();
        data["amountMoney"] = json!("500");
        assert!(matches!(
            normalize(NormalizeRequest::Payment(data)),
            Err(NormalizeError::UnexpectedShape { .. })
        ));

        assert!(matches!(
            normalize(NormalizeRequest::Card(json!({"expMonth": "September"}))),
            Err(NormalizeError::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_whole_float_amounts_become_integers() {
        let mut data = payment();
        data["amountMoney"]["amount"] = json!(500.0);
        data["totalMoney"]["amount"] = json!("500.0");
        data["approvedMoney"]["amount"] = json!("1e3");
        data["refundedMoney"] = json!({"amount": 250.0, "currency": "CAD"});
        let normalized = normalize(NormalizeRequest::Payment(data)).unwrap();
        assert_eq!(normalized["amountMoney"]["amount"], json!(5));
        assert_eq!(normalized["totalMoney"]["amount"], json!(5));
        assert_eq!(normalized["approvedMoney"]["amount"], json!(10));
        assert_eq!(normalized["refundedMoney"]["amount"], json!(2.5));
    }

    #[test]
    fn test_normalizing_twice_divides_twice() {
        let once = normalize(NormalizeRequest::Payment(payment())).unwrap();
        assert_eq!(once["amountMoney"]["amount"], 5);

        let twice = normalize(NormalizeRequest::Payment(once)).unwrap();
        assert_eq!(twice["amountMoney"]["amount"].as_f64(), Some(0.05));
    }
}
