//! Currency rate abstractions

use super::error::ConvertResult;
use super::rates::ExchangeRateResponse;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the latest rate table anchored on `base`.
    async fn fetch(&self, base: &str) -> ConvertResult<ExchangeRateResponse>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub from: String,
    pub to: String,
}

impl CurrencyPair {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) => {} ({})",
            currency_name(&self.from),
            self.from,
            currency_name(&self.to),
            self.to
        )
    }
}

const USD_PAIRED: [&str; 5] = ["BRL", "ARS", "BOB", "CLP", "COP"];

/// Menu pairs used when the configuration does not list any.
pub fn default_pairs() -> Vec<CurrencyPair> {
    USD_PAIRED
        .iter()
        .flat_map(|code| [CurrencyPair::new("USD", code), CurrencyPair::new(code, "USD")])
        .collect()
}

/// Human readable name for the codes the default menu offers.
pub fn currency_name(code: &str) -> &str {
    match code {
        "USD" => "US Dollar",
        "BRL" => "Brazilian Real",
        "ARS" => "Argentine Peso",
        "BOB" => "Bolivian Boliviano",
        "CLP" => "Chilean Peso",
        "COP" => "Colombian Peso",
        "EUR" => "Euro",
        _ => code,
    }
}
