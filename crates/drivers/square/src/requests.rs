use serde::Serialize;
use squaregate_types::Money;

/// Body of `POST /v2/payments`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CreatePaymentRequest {
    /// Left out when the caller sent none so Square reports the missing value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    pub idempotency_key: String,
    pub amount_money: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub autocomplete: bool,
}

/// Body of `PUT /v2/payments/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdatePaymentRequest {
    pub idempotency_key: String,
    pub payment: PaymentAmountUpdate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PaymentAmountUpdate {
    pub amount_money: Money,
}

/// Body of `POST /v2/payments/cancel`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CancelPaymentByIdempotencyKeyRequest {
    pub idempotency_key: String,
}
