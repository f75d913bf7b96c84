use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use squaregate_types::{
    Envelope, SquareError,
    square::{category, code},
};
use tracing::{debug, error};

use crate::gateway::{GatewayError, Listing};

/// JSON request body. An empty body reads as `{}`, and the content type is
/// not checked.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(Value::Object(Map::new())));
        }

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            envelope_response(Envelope::failure(
                "Request body is not valid JSON.",
                400,
                vec![SquareError::new(
                    category::INVALID_REQUEST_ERROR,
                    code::BAD_REQUEST,
                    e.to_string(),
                )],
            ))
        })
    }
}

/// Turns an operation result into the success envelope.
pub(crate) trait IntoEnvelope {
    fn into_envelope(self, message: &str) -> Envelope;
}

impl IntoEnvelope for Value {
    fn into_envelope(self, message: &str) -> Envelope {
        Envelope::success(message, self)
    }
}

impl IntoEnvelope for Listing {
    fn into_envelope(self, message: &str) -> Envelope {
        Envelope::success(message, self.data).with_cursor(self.cursor)
    }
}

impl IntoEnvelope for () {
    fn into_envelope(self, message: &str) -> Envelope {
        Envelope::ok(message)
    }
}

/// Wraps `result` into an envelope. The HTTP status always matches the
/// envelope's `status`.
pub(crate) fn respond<T: IntoEnvelope>(
    result: Result<T, GatewayError>,
    success: &str,
    failure: impl Into<String>,
) -> Response {
    match result {
        Ok(value) => envelope_response(value.into_envelope(success)),
        Err(e) => {
            match &e {
                GatewayError::Normalize(_) => error!(error = %e, "Normalization failed"),
                _ => debug!(error = %e, status = e.status(), "Request failed"),
            }
            envelope_response(Envelope::failure(failure, e.status(), e.errors()))
        }
    }
}

fn envelope_response(mut envelope: Envelope) -> Response {
    let status = match StatusCode::from_u16(envelope.status) {
        Ok(status) => status,
        Err(_) => {
            envelope.status = StatusCode::BAD_GATEWAY.as_u16();
            StatusCode::BAD_GATEWAY
        }
    };
    (status, Json(envelope)).into_response()
}
