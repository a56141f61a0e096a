//! Minimal `OuraApi` trait and reqwest-based client for the Oura v2 API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;
pub mod date_range;
pub mod http_client;

pub use date_range::DateRange;

#[derive(Debug, Error)]
pub enum OuraError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("authentication failed ({status}): {body}")]
    Auth { status: u16, body: String },
    #[error("api error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("configuration error: {0}")]
    Config(String),
}

/// Metric categories exposed by the Oura v2 `usercollection` API.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Sleep,
    DailyActivity,
    DailyReadiness,
    HeartRate,
    PersonalInfo,
}

impl MetricCategory {
    /// Endpoint path segment under `/v2/usercollection/`.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::DailyActivity => "daily_activity",
            Self::DailyReadiness => "daily_readiness",
            Self::HeartRate => "heartrate",
            Self::PersonalInfo => "personal_info",
        }
    }

    /// Human-readable label used in rendered summaries.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::DailyActivity => "activity",
            Self::DailyReadiness => "readiness",
            Self::HeartRate => "heart rate",
            Self::PersonalInfo => "personal info",
        }
    }
}

/// One day's payload for a metric category. The API's document shape is
/// passed through as received; only the `day` field is inspected locally.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MetricRecord(pub serde_json::Value);

impl MetricRecord {
    pub fn day(&self) -> Option<&str> {
        self.0.get("day").and_then(serde_json::Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.0.get(field)
    }
}

#[async_trait]
pub trait OuraApi: Send + Sync + 'static {
    /// Fetch all records of `category` within `range`. An empty `data`
    /// array from the API is an empty result, not an error.
    async fn fetch(
        &self,
        category: MetricCategory,
        range: &DateRange,
    ) -> Result<Vec<MetricRecord>, OuraError>;

    /// Single authenticated GET of `personal_info`; collapses every failure
    /// kind into `false` since callers only want a health signal.
    async fn test_connection(&self) -> bool;
}
