//! Conversion error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while fetching rates or converting an amount.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The rate provider answered with a non-200 status.
    #[error("HTTP error: {status} for base currency: {base}")]
    HttpStatus { base: String, status: StatusCode },

    /// The request never produced a usable response (DNS, connect, timeout, body read).
    #[error("Request error for base currency {base}: {source}")]
    Transport {
        base: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not valid JSON or does not match the rate schema.
    #[error("Failed to parse rate response for {base}: {source}")]
    Parse {
        base: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body parsed but the provider reported `"result": "error"`.
    #[error("Failed to obtain exchange rates for {base}{}", detail(.error_type))]
    ApiResult {
        base: String,
        error_type: Option<String>,
    },

    /// The target currency is absent from the rate table.
    #[error("Currency not found in rate table: {0}")]
    UnknownCurrency(String),

    /// User supplied amount is not a finite, non-negative number.
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    /// The in-flight request was interrupted.
    #[error("Request was cancelled")]
    Cancelled,
}

fn detail(error_type: &Option<String>) -> String {
    error_type
        .as_deref()
        .map(|t| format!(" ({t})"))
        .unwrap_or_default()
}

impl ConvertError {
    /// True for failures that point at connectivity or a misbehaving endpoint.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ConvertError::HttpStatus { .. }
                | ConvertError::Transport { .. }
                | ConvertError::Parse { .. }
        )
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConvertError::HttpStatus {
            base: "USD".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(
            err.to_string(),
            "HTTP error: 404 Not Found for base currency: USD"
        );
        assert!(err.is_transport());

        let err = ConvertError::ApiResult {
            base: "XYZ".to_string(),
            error_type: Some("unsupported-code".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Failed to obtain exchange rates for XYZ (unsupported-code)"
        );
        assert!(!err.is_transport());

        let err = ConvertError::ApiResult {
            base: "USD".to_string(),
            error_type: None,
        };
        assert_eq!(err.to_string(), "Failed to obtain exchange rates for USD");

        let err = ConvertError::UnknownCurrency("XXX".to_string());
        assert_eq!(err.to_string(), "Currency not found in rate table: XXX");
    }

    #[test]
    fn test_parse_error_counts_as_transport() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = ConvertError::Parse {
            base: "USD".to_string(),
            source,
        };
        assert!(err.is_transport());
        assert!(
            err.to_string()
                .starts_with("Failed to parse rate response for USD")
        );
    }
}
