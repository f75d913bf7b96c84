use std::time::Duration;

use squaregate_types::Environment;
use url::Url;

use crate::SquareClientError;

pub const DEFAULT_SQUARE_VERSION: &str = "2023-09-15";
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(100);

/// Settings for talking to Square. Built once at startup.
#[derive(Debug, Clone)]
pub struct SquareConfig {
    pub access_token: String,
    pub environment: Environment,
    /// Value of the `Square-Version` header.
    pub square_version: String,
    /// Overrides the environment host, e.g. to point at a local mock.
    pub base_url: Option<Url>,
    pub timeout: Duration,
}

impl SquareConfig {
    pub fn new(access_token: impl Into<String>, environment: Environment) -> Self {
        Self {
            access_token: access_token.into(),
            environment,
            square_version: DEFAULT_SQUARE_VERSION.to_string(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Root of the versioned API, always ending in `/v2`.
    pub(crate) fn api_root(&self) -> Result<Url, SquareClientError> {
        let mut root = match &self.base_url {
            Some(url) => url.clone(),
            None => Url::parse(self.environment.base_url())
                .map_err(|e| SquareClientError::InvalidConfig(e.to_string()))?,
        };
        let display = root.to_string();
        root.path_segments_mut()
            .map_err(|_| SquareClientError::InvalidConfig(format!("{display} cannot be a base url")))?
            .pop_if_empty()
            .push("v2");
        Ok(root)
    }
}
