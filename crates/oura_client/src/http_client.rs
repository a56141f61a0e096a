//! HTTP client implementation for the Oura v2 API.
//!
//! This module provides a reqwest-based implementation of the
//! [`OuraApi`](crate::OuraApi) trait.

use crate::{DateRange, MetricCategory, MetricRecord, OuraApi, OuraError};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Client for the Oura v2 API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestOuraClient {
    base_url: String,
    api_token: SecretString,
    client: reqwest::Client,
}

/// Standard `usercollection` response envelope. `data` defaults to empty so
/// a range with no records deserializes cleanly.
#[derive(Deserialize)]
struct DataEnvelope {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

impl ReqwestOuraClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - API host (e.g., "https://api.ouraring.com")
    /// * `api_token` - Personal access token sent as a bearer credential
    pub fn new(base_url: &str, api_token: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            client,
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(&config.base_url, config.api_token.clone())
    }

    fn endpoint_url(&self, category: MetricCategory) -> String {
        format!("{}/v2/usercollection/{}", self.base_url, category.endpoint())
    }

    /// Build an authenticated GET request.
    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(self.api_token.expose_secret())
    }

    /// Extract error information from a failed response. Only status and a
    /// body snippet are kept; the credential never flows through here.
    async fn error_from_response(&self, resp: reqwest::Response) -> OuraError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();

        match status {
            401 | 403 => OuraError::Auth {
                status,
                body: body_snippet,
            },
            _ => OuraError::Api {
                status,
                body: body_snippet,
            },
        }
    }
}

#[async_trait]
impl OuraApi for ReqwestOuraClient {
    async fn fetch(
        &self,
        category: MetricCategory,
        range: &DateRange,
    ) -> Result<Vec<MetricRecord>, OuraError> {
        let url = self.endpoint_url(category);
        let qp = [
            ("start_date", range.start().to_string()),
            ("end_date", range.end().to_string()),
        ];
        let resp = self.get_request(&url).query(&qp).send().await?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }

        // Collection endpoints return a `data` envelope; `personal_info`
        // returns a bare document. Accept both.
        let body: serde_json::Value = resp.json().await?;
        if body.get("data").is_some() {
            let envelope: DataEnvelope = serde_json::from_value(body).map_err(|e| {
                OuraError::Api {
                    status: 200,
                    body: format!("unexpected {} response shape: {e}", category.endpoint()),
                }
            })?;
            Ok(envelope.data.into_iter().map(MetricRecord).collect())
        } else {
            Ok(vec![MetricRecord(body)])
        }
    }

    async fn test_connection(&self) -> bool {
        let url = self.endpoint_url(MetricCategory::PersonalInfo);
        match self.get_request(&url).send().await {
            Ok(resp) => {
                let ok = resp.status().is_success();
                if !ok {
                    tracing::debug!(status = resp.status().as_u16(), "connection check failed");
                }
                ok
            }
            Err(e) => {
                tracing::debug!(error = %e, "connection check transport failure");
                false
            }
        }
    }
}
