use serde_json::{Map, Value};

use super::{GatewayError, GatewayState, Listing, with_idempotency_key};
use crate::{
    normalize::{NormalizeRequest, normalize},
    pagination::{CUSTOMER_LIST_PARAMETERS, prepare_pagination_parameters},
};

pub async fn list_customers(state: &GatewayState, filter: &Value) -> Result<Listing, GatewayError> {
    let params = prepare_pagination_parameters(&CUSTOMER_LIST_PARAMETERS, filter)?;
    let page = state.client().list_customers(params).await?;
    Ok(Listing {
        data: normalize(NormalizeRequest::Customer(page.items))?,
        cursor: page.cursor,
    })
}

/// Creates a customer from the `customer` member of the request body.
///
/// The result is returned without its `version` and is not otherwise
/// normalized.
pub async fn create_customer(
    state: &GatewayState,
    customer: Option<Value>,
) -> Result<Value, GatewayError> {
    let details = match customer {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(details) => details,
    };
    let created = state
        .client()
        .create_customer(with_idempotency_key(details)?)
        .await?;
    Ok(without_version(created))
}

pub async fn get_customer(state: &GatewayState, customer_id: &str) -> Result<Value, GatewayError> {
    let customer = state.client().retrieve_customer(customer_id).await?;
    Ok(normalize(NormalizeRequest::Customer(customer))?)
}

/// Forwards `changes` verbatim. The updated customer comes back without its
/// `version`.
pub async fn update_customer(
    state: &GatewayState,
    customer_id: &str,
    changes: Value,
) -> Result<Value, GatewayError> {
    let customer = state.client().update_customer(customer_id, changes).await?;
    Ok(normalize(NormalizeRequest::Customer(without_version(customer)))?)
}

/// `version` is the optimistic-concurrency counter the caller last saw.
pub async fn delete_customer(
    state: &GatewayState,
    customer_id: &str,
    version: &str,
) -> Result<(), GatewayError> {
    state.client().delete_customer(customer_id, version).await?;
    Ok(())
}

fn without_version(mut customer: Value) -> Value {
    if let Some(record) = customer.as_object_mut() {
        record.remove("version");
    }
    customer
}
