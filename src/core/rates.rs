//! Rate table returned by the exchange-rate provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiResult {
    Success,
    Error,
}

/// Latest rates for one base currency.
///
/// `result` is the only required field. Every other field falls back to its
/// type default when absent, and unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateResponse {
    pub result: ApiResult,
    #[serde(default)]
    pub base_code: String,
    /// Units of target currency per one unit of `base_code`.
    #[serde(default)]
    pub conversion_rates: HashMap<String, f64>,
    #[serde(default)]
    pub time_last_update_unix: i64,
    #[serde(default)]
    pub time_last_update_utc: String,
    #[serde(default)]
    pub time_next_update_unix: i64,
    #[serde(default)]
    pub time_next_update_utc: String,
    #[serde(default)]
    pub documentation: String,
    #[serde(default)]
    pub terms_of_use: String,
    /// Only present on error bodies, e.g. `unsupported-code` or `invalid-key`.
    #[serde(default, rename = "error-type")]
    pub error_type: Option<String>,
}

impl ExchangeRateResponse {
    pub fn is_success(&self) -> bool {
        self.result == ApiResult::Success
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.conversion_rates.get(code).copied()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        from_unix(self.time_last_update_unix)
    }

    pub fn next_update(&self) -> Option<DateTime<Utc>> {
        from_unix(self.time_next_update_unix)
    }
}

fn from_unix(ts: i64) -> Option<DateTime<Utc>> {
    if ts <= 0 {
        return None;
    }
    DateTime::from_timestamp(ts, 0)
}
