use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::{
    api::response::{JsonBody, respond},
    gateway::{GatewayState, customers},
};

/// POST /customers - List customers, the body carries the list filter
pub async fn list_customers(
    State(state): State<GatewayState>,
    JsonBody(filter): JsonBody,
) -> Response {
    respond(
        customers::list_customers(&state, &filter).await,
        "Successfully retrieved customer list.",
        "Error while retrieving customer list.",
    )
}

/// POST /customers/create
pub async fn create_customer(
    State(state): State<GatewayState>,
    JsonBody(mut body): JsonBody,
) -> Response {
    let customer = body.get_mut("customer").map(serde_json::Value::take);
    let failure = format!(
        "Error while create customer with details : {}",
        customer.as_ref().map_or_else(|| "undefined".to_string(), ToString::to_string)
    );
    respond(
        customers::create_customer(&state, customer).await,
        "Success customer created.",
        failure,
    )
}

/// GET /customers/{id}
pub async fn get_customer(
    State(state): State<GatewayState>,
    Path(customer_id): Path<String>,
) -> Response {
    respond(
        customers::get_customer(&state, &customer_id).await,
        "Successfully retrieved customer details.",
        "Error while get customer details",
    )
}

/// PUT /customers/{id}
pub async fn update_customer(
    State(state): State<GatewayState>,
    Path(customer_id): Path<String>,
    JsonBody(changes): JsonBody,
) -> Response {
    respond(
        customers::update_customer(&state, &customer_id, changes).await,
        "Successfully updated customer details.",
        "Error while update customer details",
    )
}

/// DELETE /customers/{id}/{version}
pub async fn delete_customer(
    State(state): State<GatewayState>,
    Path((customer_id, version)): Path<(String, String)>,
) -> Response {
    respond(
        customers::delete_customer(&state, &customer_id, &version).await,
        "Successfully deleted customer details.",
        "Error while delete customer details",
    )
}
