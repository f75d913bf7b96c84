use axum::{extract::State, response::Response};

use crate::{
    api::response::respond,
    gateway::{GatewayState, locations},
};

/// GET /get-locations
pub async fn list_locations(State(state): State<GatewayState>) -> Response {
    respond(
        locations::list_locations(&state).await,
        "success",
        "Error while fetching locations.",
    )
}
