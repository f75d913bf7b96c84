//! Gateway operations: one Square call each, with argument preparation before
//! the call and normalization after it.
//!
//! Route handlers in [`crate::api`] only extract inputs and wrap the results
//! returned here into envelopes.

pub mod cards;
pub mod customers;
pub mod locations;
pub mod payments;

use std::sync::Arc;

use serde_json::Value;
use squaregate_driver_square::{SquareClient, SquareClientError, SquareConfig};
use squaregate_types::{
    Money, SquareError,
    square::{category, code},
};
use tracing::debug;

use crate::{
    amount::{AmountError, major_to_minor},
    normalize::NormalizeError,
    pagination::PaginationError,
};

pub const DEFAULT_CURRENCY: &str = "CAD";

/// Shared by every handler. Immutable after startup.
#[derive(Debug, Clone)]
pub struct GatewayState {
    client: Arc<SquareClient>,
    currency: String,
}

impl GatewayState {
    pub fn new(client: SquareClient, currency: impl Into<String>) -> Self {
        Self {
            client: Arc::new(client),
            currency: currency.into(),
        }
    }

    pub fn from_config(
        config: &SquareConfig,
        currency: impl Into<String>,
    ) -> Result<Self, SquareClientError> {
        Ok(Self::new(SquareClient::new(config)?, currency))
    }

    pub fn client(&self) -> &SquareClient {
        &self.client
    }

    /// Currency attached to every amount sent to Square.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Builds outbound money from a major-unit amount found at `field`.
    pub(crate) fn money(&self, amount: &Value, field: &str) -> Result<Money, GatewayError> {
        let minor = major_to_minor(amount).map_err(|e| GatewayError::invalid_amount(field, e))?;
        Ok(Money::new(minor, self.currency()))
    }
}

/// A normalized list and the cursor of the next page, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub data: Value,
    pub cursor: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Provider(#[from] SquareClientError),
    #[error("Failed to normalize Square result: {0}")]
    Normalize(#[from] NormalizeError),
    #[error(transparent)]
    Pagination(#[from] PaginationError),
    #[error("Invalid request: {detail}")]
    InvalidRequest {
        field: Option<String>,
        detail: String,
    },
}

impl GatewayError {
    pub fn invalid_request(field: Option<&str>, detail: impl Into<String>) -> Self {
        GatewayError::InvalidRequest {
            field: field.map(str::to_string),
            detail: detail.into(),
        }
    }

    fn invalid_amount(field: &str, error: AmountError) -> Self {
        Self::invalid_request(Some(field), error.to_string())
    }

    /// HTTP status reported in the envelope and on the response.
    pub fn status(&self) -> u16 {
        match self {
            GatewayError::Provider(SquareClientError::Api { status, .. }) => *status,
            GatewayError::Provider(e) if e.is_timeout() => 504,
            GatewayError::Provider(
                SquareClientError::Http(_)
                | SquareClientError::Decode { .. }
                | SquareClientError::MissingResult(_),
            ) => 502,
            GatewayError::Provider(
                SquareClientError::Encode(_) | SquareClientError::InvalidConfig(_),
            ) => 500,
            GatewayError::Normalize(_) => 500,
            GatewayError::Pagination(_) | GatewayError::InvalidRequest { .. } => 400,
        }
    }

    /// Error list in Square's error object shape. Provider errors are
    /// forwarded verbatim; the rest are synthesized.
    pub fn errors(&self) -> Vec<SquareError> {
        match self {
            GatewayError::Provider(SquareClientError::Api { errors, .. }) => errors.clone(),
            GatewayError::Provider(e) if e.is_timeout() => vec![SquareError::new(
                category::API_ERROR,
                code::GATEWAY_TIMEOUT,
                e.to_string(),
            )],
            GatewayError::Provider(
                e @ (SquareClientError::Http(_)
                | SquareClientError::Decode { .. }
                | SquareClientError::MissingResult(_)),
            ) => vec![SquareError::new(
                category::API_ERROR,
                code::BAD_GATEWAY,
                e.to_string(),
            )],
            GatewayError::Provider(e) => vec![SquareError::new(
                category::API_ERROR,
                code::INTERNAL_SERVER_ERROR,
                e.to_string(),
            )],
            GatewayError::Normalize(e) => vec![SquareError::new(
                category::API_ERROR,
                code::INTERNAL_SERVER_ERROR,
                e.to_string(),
            )],
            GatewayError::Pagination(e) => vec![SquareError::new(
                category::INVALID_REQUEST_ERROR,
                code::BAD_REQUEST,
                e.to_string(),
            )],
            GatewayError::InvalidRequest { field, detail } => {
                let error =
                    SquareError::new(category::INVALID_REQUEST_ERROR, code::BAD_REQUEST, detail);
                match field {
                    Some(field) => vec![error.with_field(field)],
                    None => vec![error],
                }
            }
        }
    }
}

/// Fresh key for a single create, update or refund call. Never reused.
pub(crate) fn idempotency_key() -> String {
    let key = uuid::Uuid::new_v4().to_string();
    debug!(idempotency_key = %key, "Generated idempotency key");
    key
}

/// Inserts a fresh idempotency key unless the caller already supplied one.
pub(crate) fn with_idempotency_key(mut body: Value) -> Result<Value, GatewayError> {
    let record = body
        .as_object_mut()
        .ok_or_else(|| GatewayError::invalid_request(None, "request body must be a JSON object"))?;
    if !record.contains_key("idempotencyKey") {
        record.insert("idempotencyKey".to_string(), Value::String(idempotency_key()));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_status_and_errors_for_provider_failures() {
        let provider = GatewayError::from(SquareClientError::Api {
            status: 404,
            errors: vec![SquareError::new(
                "INVALID_REQUEST_ERROR",
                "NOT_FOUND",
                "Card not found",
            )],
        });
        assert_eq!(provider.status(), 404);
        assert_eq!(provider.errors()[0].code, "NOT_FOUND");

        let missing = GatewayError::from(SquareClientError::MissingResult("payment"));
        assert_eq!(missing.status(), 502);
        assert_eq!(missing.errors()[0].code, code::BAD_GATEWAY);
    }

    #[test]
    fn test_status_and_errors_for_local_failures() {
        let normalize = GatewayError::from(NormalizeError::MissingField {
            field: "approvedMoney".to_string(),
        });
        assert_eq!(normalize.status(), 500);
        assert_eq!(normalize.errors()[0].code, code::INTERNAL_SERVER_ERROR);

        let pagination = GatewayError::from(PaginationError::InvalidArgument("a string"));
        assert_eq!(pagination.status(), 400);
        assert_eq!(pagination.errors()[0].category, category::INVALID_REQUEST_ERROR);

        let invalid = GatewayError::invalid_request(Some("amount"), "amount is required");
        assert_eq!(invalid.status(), 400);
        assert_eq!(invalid.errors()[0].field.as_deref(), Some("amount"));
    }

    #[test]
    fn test_with_idempotency_key_keeps_caller_key() {
        let body = with_idempotency_key(json!({"idempotencyKey": "mine", "sourceId": "x"})).unwrap();
        assert_eq!(body["idempotencyKey"], "mine");

        let body = with_idempotency_key(json!({"sourceId": "x"})).unwrap();
        let key = body["idempotencyKey"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(key).is_ok());

        assert!(with_idempotency_key(json!([])).is_err());
    }

    #[test]
    fn test_money_uses_gateway_currency() {
        let config = SquareConfig::new("token", squaregate_types::Environment::Sandbox);
        let state = GatewayState::from_config(&config, "USD").unwrap();
        assert_eq!(state.currency(), "USD");
        assert_eq!(state.money(&json!("19.99"), "amount").unwrap(), Money::new(1999, "USD"));

        let error = state.money(&json!(null), "amount").unwrap_err();
        assert_eq!(error.status(), 400);
    }

    #[test]
    fn test_idempotency_keys_are_fresh() {
        assert_ne!(idempotency_key(), idempotency_key());
    }
}
