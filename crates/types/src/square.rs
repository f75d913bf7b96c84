use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub const SANDBOX_BASE_URL: &str = "https://connect.squareupsandbox.com";
pub const PRODUCTION_BASE_URL: &str = "https://connect.squareup.com";

/// Error categories the gateway synthesizes for failures that never reached
/// the provider (or came back unreadable).
pub mod category {
    pub const API_ERROR: &str = "API_ERROR";
    pub const INVALID_REQUEST_ERROR: &str = "INVALID_REQUEST_ERROR";
}

/// Error codes paired with [`category`].
pub mod code {
    pub const BAD_GATEWAY: &str = "BAD_GATEWAY";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const GATEWAY_TIMEOUT: &str = "GATEWAY_TIMEOUT";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

/// Square deployment the gateway talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown Square environment '{0}', expected 'sandbox' or 'production'")]
pub struct UnknownEnvironment(pub String);

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            other => Err(UnknownEnvironment(other.to_string())),
        }
    }
}

/// An amount in minor units (cents) as Square expects it on requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: i64,
    pub currency: String,
}

impl Money {
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

/// Square error object, forwarded verbatim to gateway clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquareError {
    pub category: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl SquareError {
    pub fn new(category: &str, code: &str, detail: impl Into<String>) -> Self {
        Self {
            category: category.to_string(),
            code: code.to_string(),
            detail: Some(detail.into()),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}
