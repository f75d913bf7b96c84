use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::{
    api::response::{JsonBody, respond},
    gateway::{GatewayState, cards},
};

/// POST /cards - List cards, the body carries the list filter
pub async fn list_cards(State(state): State<GatewayState>, JsonBody(filter): JsonBody) -> Response {
    respond(
        cards::list_cards(&state, &filter).await,
        "Successfully fetched card list for customer.",
        "Error while fetching card list for customer.",
    )
}

/// POST /cards/create
pub async fn create_card(State(state): State<GatewayState>, JsonBody(body): JsonBody) -> Response {
    respond(
        cards::create_card(&state, body).await,
        "Successfully card added.",
        "Error while add card.",
    )
}

/// GET /cards/{id}
pub async fn get_card(State(state): State<GatewayState>, Path(card_id): Path<String>) -> Response {
    respond(
        cards::get_card(&state, &card_id).await,
        "Successfully fetched card details.",
        "Error while fetching card details.",
    )
}

/// PUT /cards/{id} - Disable a card
pub async fn disable_card(
    State(state): State<GatewayState>,
    Path(card_id): Path<String>,
) -> Response {
    respond(
        cards::disable_card(&state, &card_id).await,
        "Successfully card disabled.",
        "Error while disabling card.",
    )
}
