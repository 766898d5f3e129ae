use super::currency::RateProvider;
use super::error::{ConvertError, ConvertResult};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Converts amounts using a freshly fetched rate table on every call.
#[derive(Clone)]
pub struct ConversionService {
    provider: Arc<dyn RateProvider>,
}

impl ConversionService {
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self { provider }
    }

    /// Returns `amount * rate(from -> to)`, unrounded.
    #[instrument(name = "Convert", skip(self))]
    pub async fn convert(&self, from: &str, to: &str, amount: f64) -> ConvertResult<f64> {
        let rate = self.lookup_rate(from, to).await?;
        let converted = amount * rate;
        debug!(rate, converted, "Converted amount");
        Ok(converted)
    }

    /// Units of `to` per one unit of `from`. Issues its own fetch.
    #[instrument(name = "RateOf", skip(self))]
    pub async fn rate_of(&self, from: &str, to: &str) -> ConvertResult<f64> {
        self.lookup_rate(from, to).await
    }

    async fn lookup_rate(&self, from: &str, to: &str) -> ConvertResult<f64> {
        let response = self.provider.fetch(from).await?;

        if !response.is_success() {
            return Err(ConvertError::ApiResult {
                base: from.to_string(),
                error_type: response.error_type,
            });
        }

        response
            .rate(to)
            .ok_or_else(|| ConvertError::UnknownCurrency(to.to_string()))
    }
}
