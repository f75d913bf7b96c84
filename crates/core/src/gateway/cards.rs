use serde_json::Value;

use super::{GatewayError, GatewayState, Listing, with_idempotency_key};
use crate::{
    normalize::{NormalizeRequest, normalize},
    pagination::{CARD_LIST_PARAMETERS, prepare_pagination_parameters},
};

/// Cards on file matching `filter`. An empty result is `[]`, never absent.
pub async fn list_cards(state: &GatewayState, filter: &Value) -> Result<Listing, GatewayError> {
    let params = prepare_pagination_parameters(&CARD_LIST_PARAMETERS, filter)?;
    let page = state.client().list_cards(params).await?;
    Ok(Listing {
        data: normalize(NormalizeRequest::Card(page.items))?,
        cursor: page.cursor,
    })
}

/// Attaches a card; a caller-supplied `idempotencyKey` takes precedence.
pub async fn create_card(state: &GatewayState, body: Value) -> Result<Value, GatewayError> {
    let card = state
        .client()
        .create_card(with_idempotency_key(body)?)
        .await?;
    Ok(normalize(NormalizeRequest::Card(card))?)
}

pub async fn get_card(state: &GatewayState, card_id: &str) -> Result<Value, GatewayError> {
    let card = state.client().retrieve_card(card_id).await?;
    Ok(normalize(NormalizeRequest::Card(card))?)
}

pub async fn disable_card(state: &GatewayState, card_id: &str) -> Result<Value, GatewayError> {
    let card = state.client().disable_card(card_id).await?;
    Ok(normalize(NormalizeRequest::Card(card))?)
}
