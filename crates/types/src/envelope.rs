use serde::Serialize;
use serde_json::Value;

use crate::SquareError;

/// Uniform JSON body returned by every gateway route.
///
/// Successful calls carry `data` (and `cursor` for list calls that have a
/// next page); failed calls carry the provider's `error` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Vec<SquareError>>,
}

impl Envelope {
    /// 200 envelope without a payload.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: 200,
            data: None,
            cursor: None,
            error: None,
        }
    }

    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::ok(message)
        }
    }

    pub fn with_cursor(mut self, cursor: Option<String>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn failure(message: impl Into<String>, status: u16, errors: Vec<SquareError>) -> Self {
        Self {
            message: message.into(),
            status,
            data: None,
            cursor: None,
            error: Some(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = Envelope::success("Successfully fetched card details.", json!({"id": "ccof:1"}));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "message": "Successfully fetched card details.",
                "status": 200,
                "data": {"id": "ccof:1"}
            })
        );
    }

    #[test]
    fn test_failure_envelope_shape() {
        let envelope = Envelope::failure(
            "Error while fetching card details.",
            404,
            vec![SquareError::new("INVALID_REQUEST_ERROR", "NOT_FOUND", "Card not found")],
        );
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], 404);
        assert_eq!(value["error"][0]["code"], "NOT_FOUND");
        assert!(value.get("data").is_none());
        assert!(value.get("cursor").is_none());
    }

    #[test]
    fn test_cursor_only_serialized_when_present() {
        let envelope = Envelope::success("ok", json!([])).with_cursor(Some("next".to_string()));
        assert_eq!(serde_json::to_value(&envelope).unwrap()["cursor"], "next");
    }
}
