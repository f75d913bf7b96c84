use serde_json::Value;

use super::{GatewayError, GatewayState};

/// Locations of the authenticated Square account, passed through as-is.
pub async fn list_locations(state: &GatewayState) -> Result<Value, GatewayError> {
    Ok(state.client().list_locations().await?)
}
