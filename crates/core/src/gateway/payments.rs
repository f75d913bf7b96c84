use serde::Deserialize;
use serde_json::{Map, Value};
use squaregate_driver_square::{
    CancelPaymentByIdempotencyKeyRequest, CreatePaymentRequest, PaymentAmountUpdate,
    UpdatePaymentRequest,
};

use super::{GatewayError, GatewayState, Listing, idempotency_key, with_idempotency_key};
use crate::{
    normalize::{NormalizeRequest, normalize},
    pagination::{PAYMENT_LIST_PARAMETERS, prepare_pagination_parameters},
};

/// Body accepted by the create payment route. `amount` is in major units.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePaymentBody {
    #[serde(default)]
    source_id: Option<String>,
    #[serde(default)]
    amount: Value,
    #[serde(default)]
    customer_id: Option<String>,
    #[serde(default)]
    autocomplete: Option<bool>,
}

pub async fn list_payments(state: &GatewayState, filter: &Value) -> Result<Listing, GatewayError> {
    let params = prepare_pagination_parameters(&PAYMENT_LIST_PARAMETERS, filter)?;
    let page = state.client().list_payments(params).await?;
    Ok(Listing {
        data: normalize(NormalizeRequest::Payment(page.items))?,
        cursor: page.cursor,
    })
}

/// Charges `amount` against `sourceId`. Payments are left open unless the
/// caller asks for `autocomplete`.
pub async fn create_payment(state: &GatewayState, body: Value) -> Result<Value, GatewayError> {
    let body: CreatePaymentBody = serde_json::from_value(body)
        .map_err(|e| GatewayError::invalid_request(None, e.to_string()))?;

    let request = CreatePaymentRequest {
        source_id: body.source_id,
        idempotency_key: idempotency_key(),
        amount_money: state.money(&body.amount, "amount")?,
        customer_id: body.customer_id,
        autocomplete: body.autocomplete.unwrap_or(false),
    };
    let payment = state.client().create_payment(&request).await?;
    Ok(normalize(NormalizeRequest::Payment(payment))?)
}

pub async fn get_payment(state: &GatewayState, payment_id: &str) -> Result<Value, GatewayError> {
    let payment = state.client().get_payment(payment_id).await?;
    Ok(normalize(NormalizeRequest::Payment(payment))?)
}

/// Replaces the amount of a payment that has not been completed yet.
pub async fn update_payment(
    state: &GatewayState,
    payment_id: &str,
    body: &Value,
) -> Result<Value, GatewayError> {
    let amount = body
        .pointer("/payment/amountMoney/amount")
        .unwrap_or(&Value::Null);
    let request = UpdatePaymentRequest {
        idempotency_key: idempotency_key(),
        payment: PaymentAmountUpdate {
            amount_money: state.money(amount, "payment.amountMoney.amount")?,
        },
    };
    let payment = state.client().update_payment(payment_id, &request).await?;
    Ok(normalize(NormalizeRequest::Payment(payment))?)
}

pub async fn cancel_payment_by_idempotency_key(
    state: &GatewayState,
    key: &str,
) -> Result<(), GatewayError> {
    let request = CancelPaymentByIdempotencyKeyRequest {
        idempotency_key: key.to_string(),
    };
    state
        .client()
        .cancel_payment_by_idempotency_key(&request)
        .await?;
    Ok(())
}

/// Forwards `body` verbatim; Square expects the payment `versionToken` here.
pub async fn complete_payment(
    state: &GatewayState,
    payment_id: &str,
    body: Value,
) -> Result<Value, GatewayError> {
    let payment = state.client().complete_payment(payment_id, body).await?;
    Ok(normalize(NormalizeRequest::Payment(payment))?)
}

/// Refunds a completed payment. `amountMoney.amount` is given in major units;
/// a missing `amountMoney.currency` gets the gateway currency.
pub async fn refund_payment(state: &GatewayState, body: Value) -> Result<Value, GatewayError> {
    let mut body = with_idempotency_key(body)?;

    let amount_money = body.get("amountMoney").unwrap_or(&Value::Null);
    let amount = amount_money.get("amount").unwrap_or(&Value::Null);
    let money = state.money(amount, "amountMoney.amount")?;

    let mut converted = match amount_money {
        Value::Object(record) => record.clone(),
        _ => Map::new(),
    };
    converted.insert("amount".to_string(), Value::from(money.amount));
    converted
        .entry("currency")
        .or_insert_with(|| Value::String(money.currency));
    body["amountMoney"] = Value::Object(converted);

    let refund = state.client().refund_payment(body).await?;
    Ok(normalize(NormalizeRequest::Refund(refund))?)
}

pub async fn get_payment_refund(
    state: &GatewayState,
    refund_id: &str,
) -> Result<Value, GatewayError> {
    let refund = state.client().get_payment_refund(refund_id).await?;
    Ok(normalize(NormalizeRequest::RefundDetail(refund))?)
}
