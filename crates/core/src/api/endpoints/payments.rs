use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::{
    api::response::{JsonBody, respond},
    gateway::{GatewayState, payments},
};

/// POST /payments - List payments, the body carries the list filter
pub async fn list_payments(
    State(state): State<GatewayState>,
    JsonBody(filter): JsonBody,
) -> Response {
    respond(
        payments::list_payments(&state, &filter).await,
        "Successfully fetched payment list",
        "Error while fetching payment list",
    )
}

/// POST /payments/create
pub async fn create_payment(
    State(state): State<GatewayState>,
    JsonBody(body): JsonBody,
) -> Response {
    respond(
        payments::create_payment(&state, body).await,
        "Successfully created payment.",
        "Error while create payment.",
    )
}

/// GET /payments/{id}
pub async fn get_payment(
    State(state): State<GatewayState>,
    Path(payment_id): Path<String>,
) -> Response {
    respond(
        payments::get_payment(&state, &payment_id).await,
        "Successfully get payment details.",
        "Error while fetching payment details.",
    )
}

/// PUT /payments/idempotencyKey/{id}
pub async fn cancel_payment_by_idempotency_key(
    State(state): State<GatewayState>,
    Path(key): Path<String>,
) -> Response {
    respond(
        payments::cancel_payment_by_idempotency_key(&state, &key).await,
        "Successfully cancelled payment.",
        "Error while cancelling payment by idempotency key.",
    )
}

/// PUT /payments/{id} - Update the amount of an open payment
pub async fn update_payment(
    State(state): State<GatewayState>,
    Path(payment_id): Path<String>,
    JsonBody(body): JsonBody,
) -> Response {
    respond(
        payments::update_payment(&state, &payment_id, &body).await,
        "Successfully payment Updated.",
        "Error while updating payment details by paymentId.",
    )
}

/// POST /payments/refund
pub async fn refund_payment(
    State(state): State<GatewayState>,
    JsonBody(body): JsonBody,
) -> Response {
    respond(
        payments::refund_payment(&state, body).await,
        "Successfully payment refunded.",
        "Error while refund payment.",
    )
}

/// GET /payments/refund/{refund_id}
pub async fn get_payment_refund(
    State(state): State<GatewayState>,
    Path(refund_id): Path<String>,
) -> Response {
    respond(
        payments::get_payment_refund(&state, &refund_id).await,
        "Successfully fetched refunded payment details.",
        "Error while refund fetching refund payment details.",
    )
}

/// PUT /payments/complete/{id}
pub async fn complete_payment(
    State(state): State<GatewayState>,
    Path(payment_id): Path<String>,
    JsonBody(body): JsonBody,
) -> Response {
    respond(
        payments::complete_payment(&state, &payment_id, body).await,
        "Successfully payment marked completed.",
        "Error while update payment to complete.",
    )
}
