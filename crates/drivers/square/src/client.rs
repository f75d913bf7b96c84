use reqwest::{
    Method,
    header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;
use serde_json::{Map, Value};
use squaregate_types::SquareError;
use tracing::{debug, warn};
use url::Url;

use crate::{
    CARD_LIST_QUERY, CUSTOMER_LIST_QUERY, CancelPaymentByIdempotencyKeyRequest,
    CreatePaymentRequest, PAYMENT_LIST_QUERY, SquareClientError, SquareConfig,
    UpdatePaymentRequest, case,
};

/// One page of a Square list call.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    /// Always a JSON array; Square omits the list entirely when it is empty.
    pub items: Value,
    pub cursor: Option<String>,
}

/// Square REST client. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SquareClient {
    http: reqwest::Client,
    api_root: Url,
}

impl SquareClient {
    pub fn new(config: &SquareConfig) -> Result<Self, SquareClientError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.access_token))
            .map_err(|_| {
                SquareClientError::InvalidConfig(
                    "access token contains characters not allowed in a header".to_string(),
                )
            })?;
        headers.insert(AUTHORIZATION, bearer);
        let version = HeaderValue::from_str(&config.square_version).map_err(|_| {
            SquareClientError::InvalidConfig(format!(
                "invalid Square-Version '{}'",
                config.square_version
            ))
        })?;
        headers.insert(HeaderName::from_static("square-version"), version);

        // No retry policy: every call is attempted exactly once.
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            api_root: config.api_root()?,
        })
    }

    // Locations

    pub async fn list_locations(&self) -> Result<Value, SquareClientError> {
        let result = self
            .send(Method::GET, &["locations"], Vec::new(), None::<()>)
            .await?;
        Ok(into_page(result, "locations").items)
    }

    // Customers

    pub async fn list_customers(
        &self,
        params: [Option<Value>; 5],
    ) -> Result<ListPage, SquareClientError> {
        let query = bind_query(&CUSTOMER_LIST_QUERY, params);
        let result = self
            .send(Method::GET, &["customers"], query, None::<()>)
            .await?;
        Ok(into_page(result, "customers"))
    }

    pub async fn create_customer(&self, body: Value) -> Result<Value, SquareClientError> {
        let result = self
            .send(Method::POST, &["customers"], Vec::new(), Some(body))
            .await?;
        take(result, "customer")
    }

    pub async fn retrieve_customer(&self, customer_id: &str) -> Result<Value, SquareClientError> {
        let result = self
            .send(Method::GET, &["customers", customer_id], Vec::new(), None::<()>)
            .await?;
        take(result, "customer")
    }

    pub async fn update_customer(
        &self,
        customer_id: &str,
        body: Value,
    ) -> Result<Value, SquareClientError> {
        let result = self
            .send(Method::PUT, &["customers", customer_id], Vec::new(), Some(body))
            .await?;
        take(result, "customer")
    }

    pub async fn delete_customer(
        &self,
        customer_id: &str,
        version: &str,
    ) -> Result<(), SquareClientError> {
        let query = vec![("version", version.to_string())];
        self.send(Method::DELETE, &["customers", customer_id], query, None::<()>)
            .await?;
        Ok(())
    }

    // Cards

    pub async fn list_cards(
        &self,
        params: [Option<Value>; 5],
    ) -> Result<ListPage, SquareClientError> {
        let query = bind_query(&CARD_LIST_QUERY, params);
        let result = self
            .send(Method::GET, &["cards"], query, None::<()>)
            .await?;
        Ok(into_page(result, "cards"))
    }

    pub async fn create_card(&self, body: Value) -> Result<Value, SquareClientError> {
        let result = self
            .send(Method::POST, &["cards"], Vec::new(), Some(body))
            .await?;
        take(result, "card")
    }

    pub async fn retrieve_card(&self, card_id: &str) -> Result<Value, SquareClientError> {
        let result = self
            .send(Method::GET, &["cards", card_id], Vec::new(), None::<()>)
            .await?;
        take(result, "card")
    }

    pub async fn disable_card(&self, card_id: &str) -> Result<Value, SquareClientError> {
        let result = self
            .send(
                Method::POST,
                &["cards", card_id, "disable"],
                Vec::new(),
                None::<()>,
            )
            .await?;
        take(result, "card")
    }

    // Payments

    pub async fn list_payments(
        &self,
        params: [Option<Value>; 12],
    ) -> Result<ListPage, SquareClientError> {
        let query = bind_query(&PAYMENT_LIST_QUERY, params);
        let result = self
            .send(Method::GET, &["payments"], query, None::<()>)
            .await?;
        Ok(into_page(result, "payments"))
    }

    pub async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<Value, SquareClientError> {
        let result = self
            .send(Method::POST, &["payments"], Vec::new(), Some(request))
            .await?;
        take(result, "payment")
    }

    pub async fn get_payment(&self, payment_id: &str) -> Result<Value, SquareClientError> {
        let result = self
            .send(Method::GET, &["payments", payment_id], Vec::new(), None::<()>)
            .await?;
        take(result, "payment")
    }

    pub async fn update_payment(
        &self,
        payment_id: &str,
        request: &UpdatePaymentRequest,
    ) -> Result<Value, SquareClientError> {
        let result = self
            .send(Method::PUT, &["payments", payment_id], Vec::new(), Some(request))
            .await?;
        take(result, "payment")
    }

    pub async fn cancel_payment_by_idempotency_key(
        &self,
        request: &CancelPaymentByIdempotencyKeyRequest,
    ) -> Result<(), SquareClientError> {
        self.send(Method::POST, &["payments", "cancel"], Vec::new(), Some(request))
            .await?;
        Ok(())
    }

    pub async fn complete_payment(
        &self,
        payment_id: &str,
        body: Value,
    ) -> Result<Value, SquareClientError> {
        let result = self
            .send(
                Method::POST,
                &["payments", payment_id, "complete"],
                Vec::new(),
                Some(body),
            )
            .await?;
        take(result, "payment")
    }

    // Refunds

    pub async fn refund_payment(&self, body: Value) -> Result<Value, SquareClientError> {
        let result = self
            .send(Method::POST, &["refunds"], Vec::new(), Some(body))
            .await?;
        take(result, "refund")
    }

    pub async fn get_payment_refund(&self, refund_id: &str) -> Result<Value, SquareClientError> {
        let result = self
            .send(Method::GET, &["refunds", refund_id], Vec::new(), None::<()>)
            .await?;
        take(result, "refund")
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, SquareClientError> {
        let mut url = self.api_root.clone();
        url.path_segments_mut()
            .map_err(|_| SquareClientError::InvalidConfig("api root cannot be a base".to_string()))?
            .extend(segments);
        Ok(url)
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        segments: &[&str],
        query: Vec<(&'static str, String)>,
        body: Option<B>,
    ) -> Result<Value, SquareClientError> {
        let url = self.endpoint(segments)?;
        debug!(%method, path = url.path(), "Calling Square");

        let mut request = self.http.request(method, url);
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(body) = body {
            let body = serde_json::to_value(body).map_err(SquareClientError::Encode)?;
            request = request.json(&case::to_provider_keys(body));
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let payload = if bytes.is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(&bytes).map_err(|source| SquareClientError::Decode {
                status: status.as_u16(),
                source,
            })?
        };
        let payload = case::from_provider_keys(payload);

        if !status.is_success() {
            let errors = extract_errors(&payload);
            warn!(
                status = status.as_u16(),
                codes = ?errors.iter().map(|e| e.code.as_str()).collect::<Vec<_>>(),
                "Square returned an error"
            );
            return Err(SquareClientError::Api {
                status: status.as_u16(),
                errors,
            });
        }

        Ok(payload)
    }
}

/// Binds positional list parameters to Square's query keys, dropping absent
/// positions so Square applies its defaults.
fn bind_query<const N: usize>(
    keys: &[&'static str; N],
    values: [Option<Value>; N],
) -> Vec<(&'static str, String)> {
    keys.iter()
        .zip(values)
        .filter_map(|(key, value)| value.map(|v| (*key, query_value(&v))))
        .collect()
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn extract_errors(payload: &Value) -> Vec<SquareError> {
    payload
        .get("errors")
        .and_then(|errors| serde_json::from_value(errors.clone()).ok())
        .unwrap_or_default()
}

fn take(mut result: Value, key: &'static str) -> Result<Value, SquareClientError> {
    match result.get_mut(key).map(Value::take) {
        Some(Value::Null) | None => Err(SquareClientError::MissingResult(key)),
        Some(value) => Ok(value),
    }
}

fn into_page(mut result: Value, key: &str) -> ListPage {
    let items = match result.get_mut(key).map(Value::take) {
        Some(items @ Value::Array(_)) => items,
        _ => Value::Array(Vec::new()),
    };
    let cursor = result
        .get("cursor")
        .and_then(Value::as_str)
        .map(str::to_string);
    ListPage { items, cursor }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use squaregate_types::Environment;

    use super::*;

    #[test]
    fn test_bind_query_skips_absent_positions() {
        let params = [
            Some(json!("tok")),
            Some(json!(25)),
            None,
            Some(json!("DESC")),
            Some(json!(true)),
        ];
        assert_eq!(
            bind_query(&CUSTOMER_LIST_QUERY, params),
            vec![
                ("cursor", "tok".to_string()),
                ("limit", "25".to_string()),
                ("sort_order", "DESC".to_string()),
                ("count", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_endpoint_escapes_path_segments() {
        let client = SquareClient::new(&SquareConfig::new("token", Environment::Sandbox)).unwrap();
        let url = client.endpoint(&["cards", "ccof:abc/def"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://connect.squareupsandbox.com/v2/cards/ccof:abc%2Fdef"
        );
    }

    #[test]
    fn test_into_page_defaults_missing_list() {
        let page = into_page(json!({}), "cards");
        assert_eq!(page.items, json!([]));
        assert_eq!(page.cursor, None);

        let page = into_page(json!({"payments": [{"id": "p1"}], "cursor": "next"}), "payments");
        assert_eq!(page.items, json!([{"id": "p1"}]));
        assert_eq!(page.cursor.as_deref(), Some("next"));
    }

    #[test]
    fn test_take_requires_result_key() {
        assert!(matches!(
            take(json!({"errors": []}), "payment"),
            Err(SquareClientError::MissingResult("payment"))
        ));
        assert_eq!(take(json!({"card": {"id": "c"}}), "card").unwrap(), json!({"id": "c"}));
    }

    #[test]
    fn test_extract_errors_tolerates_missing_list() {
        assert!(extract_errors(&json!({})).is_empty());
        let errors = extract_errors(&json!({
            "errors": [{"category": "AUTHENTICATION_ERROR", "code": "UNAUTHORIZED", "detail": "bad token"}]
        }));
        assert_eq!(errors[0].code, "UNAUTHORIZED");
    }
}
