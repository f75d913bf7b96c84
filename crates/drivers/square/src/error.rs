use squaregate_types::SquareError;

#[derive(Debug, thiserror::Error)]
pub enum SquareClientError {
    /// Square answered with a non-2xx status.
    #[error("Square API error ({status}): {}", summarize(.errors))]
    Api {
        status: u16,
        errors: Vec<SquareError>,
    },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to encode Square request: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Failed to decode Square response ({status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
    #[error("Square response is missing '{0}'")]
    MissingResult(&'static str),
    #[error("Invalid Square client configuration: {0}")]
    InvalidConfig(String),
}

impl SquareClientError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, SquareClientError::Http(e) if e.is_timeout())
    }
}

fn summarize(errors: &[SquareError]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors
        .iter()
        .map(|e| e.code.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_lists_codes() {
        let error = SquareClientError::Api {
            status: 400,
            errors: vec![
                SquareError::new("INVALID_REQUEST_ERROR", "INVALID_VALUE", "bad"),
                SquareError::new("INVALID_REQUEST_ERROR", "MISSING_REQUIRED_PARAMETER", "missing"),
            ],
        };
        assert_eq!(
            error.to_string(),
            "Square API error (400): INVALID_VALUE, MISSING_REQUIRED_PARAMETER"
        );
    }
}
