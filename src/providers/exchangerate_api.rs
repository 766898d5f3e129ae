use crate::core::config::ProviderConfig;
use crate::core::{ConvertError, ConvertResult, ExchangeRateResponse, RateProvider};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for the ExchangeRate-API v6 `latest` endpoint.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fxconv/1.0")
            .timeout(timeout)
            .build()?;
        Ok(ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        Self::new(
            &config.base_url,
            config.require_api_key()?,
            config.timeout()?,
        )
    }

    fn latest_url(&self, base: &str) -> String {
        format!("{}/{}/latest/{}", self.base_url, self.api_key, base)
    }

    fn redacted_url(&self, base: &str) -> String {
        format!("{}/***/latest/{}", self.base_url, base)
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(base = %base))]
    async fn fetch(&self, base: &str) -> ConvertResult<ExchangeRateResponse> {
        debug!("Requesting rate table from {}", self.redacted_url(base));

        let response = self
            .client
            .get(self.latest_url(base))
            .send()
            .await
            .map_err(|e| ConvertError::Transport {
                base: base.to_string(),
                source: e.without_url(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(%status, "Rate provider returned non-OK status");
            return Err(ConvertError::HttpStatus {
                base: base.to_string(),
                status,
            });
        }

        let text = response.text().await.map_err(|e| ConvertError::Transport {
            base: base.to_string(),
            source: e.without_url(),
        })?;

        let data: ExchangeRateResponse =
            serde_json::from_str(&text).map_err(|e| ConvertError::Parse {
                base: base.to_string(),
                source: e,
            })?;

        debug!(
            result = ?data.result,
            rates = data.conversion_rates.len(),
            last_updated = ?data.last_updated(),
            next_update = ?data.next_update(),
            "Received rate table"
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ApiResult;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const API_KEY: &str = "test-key";

    const MOCK_JSON: &str = r#"{
        "result": "success",
        "documentation": "https://www.exchangerate-api.com/docs",
        "terms_of_use": "https://www.exchangerate-api.com/terms",
        "time_last_update_unix": 1585267200,
        "time_last_update_utc": "Fri, 27 Mar 2020 00:00:00 +0000",
        "time_next_update_unix": 1585353700,
        "time_next_update_utc": "Sat, 28 Mar 2020 00:00:00 +0000",
        "base_code": "USD",
        "conversion_rates": {
            "USD": 1,
            "BRL": 5.65,
            "ARS": 350.25
        }
    }"#;

    async fn create_mock_server(base: &str, response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        let request_path = format!("/{API_KEY}/latest/{base}");

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(response)
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(uri: &str) -> ExchangeRateApiProvider {
        ExchangeRateApiProvider::new(uri, API_KEY, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_successful_fetch() {
        let mock_server = create_mock_server(
            "USD",
            ResponseTemplate::new(200).set_body_string(MOCK_JSON),
        )
        .await;

        let data = provider(&mock_server.uri()).fetch("USD").await.unwrap();
        assert_eq!(data.result, ApiResult::Success);
        assert_eq!(data.base_code, "USD");
        assert_eq!(data.rate("BRL"), Some(5.65));
        assert_eq!(data.rate("ARS"), Some(350.25));
        assert_eq!(data.documentation, "https://www.exchangerate-api.com/docs");
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mock_server = create_mock_server(
            "USD",
            ResponseTemplate::new(200).set_body_string(MOCK_JSON),
        )
        .await;

        let uri = format!("{}/", mock_server.uri());
        let data = provider(&uri).fetch("USD").await.unwrap();
        assert!(data.is_success());
    }

    #[tokio::test]
    async fn test_error_result_body_is_returned() {
        let body = r#"{"result": "error", "error-type": "unsupported-code"}"#;
        let mock_server =
            create_mock_server("XYZ", ResponseTemplate::new(200).set_body_string(body)).await;

        let data = provider(&mock_server.uri()).fetch("XYZ").await.unwrap();
        assert!(!data.is_success());
        assert_eq!(data.error_type.as_deref(), Some("unsupported-code"));
    }

    #[tokio::test]
    async fn test_non_ok_status() {
        for code in [404u16, 500] {
            let mock_server = create_mock_server("USD", ResponseTemplate::new(code)).await;

            let result = provider(&mock_server.uri()).fetch("USD").await;
            match result {
                Err(ConvertError::HttpStatus { status, base }) => {
                    assert_eq!(status.as_u16(), code);
                    assert_eq!(base, "USD");
                }
                other => panic!("Expected HTTP status error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server = create_mock_server(
            "USD",
            ResponseTemplate::new(200).set_body_string("<html>oops</html>"),
        )
        .await;

        let result = provider(&mock_server.uri()).fetch("USD").await;
        let err = result.unwrap_err();
        assert!(matches!(err, ConvertError::Parse { .. }));
        assert!(
            err.to_string()
                .contains("Failed to parse rate response for USD")
        );
    }

    #[test]
    fn test_from_config_rejects_zero_timeout() {
        let config = ProviderConfig {
            api_key: Some(API_KEY.to_string()),
            timeout_secs: 0,
            ..ProviderConfig::default()
        };

        let result = ExchangeRateApiProvider::from_config(&config);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let result = provider("http://127.0.0.1:1").fetch("USD").await;
        let err = result.unwrap_err();
        assert!(matches!(err, ConvertError::Transport { .. }));
        assert!(!err.to_string().contains(API_KEY));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(MOCK_JSON)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let provider =
            ExchangeRateApiProvider::new(&mock_server.uri(), API_KEY, Duration::from_millis(200))
                .unwrap();
        let result = provider.fetch("USD").await;
        match result {
            Err(ConvertError::Transport { source, .. }) => assert!(source.is_timeout()),
            other => panic!("Expected transport error, got {other:?}"),
        }
    }
}
