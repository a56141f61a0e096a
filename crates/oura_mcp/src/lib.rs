//! MCP tool adapter over the Oura API client.
//!
//! Exposes a fixed catalog of tools to the assistant host. Every tool
//! returns a text block; validation failures and client errors are rendered
//! as descriptive text at this boundary instead of escaping to the
//! protocol layer.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use oura_client::{DateRange, MetricCategory, OuraApi};

pub mod format;

pub const CONNECTION_OK_MESSAGE: &str =
    "Oura connection successful. Your API token is configured correctly.";
pub const CONNECTION_FAILED_MESSAGE: &str =
    "Could not connect to Oura. Check your API token and network connection.";

#[derive(Clone)]
pub struct OuraMcpHandler {
    client: Arc<dyn OuraApi>,
    tool_router: rmcp::handler::server::tool::ToolRouter<OuraMcpHandler>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct DateRangeParams {
    /// Start date in YYYY-MM-DD format. Defaults to seven days before the end date.
    pub start_date: Option<String>,
    /// End date in YYYY-MM-DD format. Defaults to today.
    pub end_date: Option<String>,
}

#[tool_router]
impl OuraMcpHandler {
    pub fn new(client: Arc<dyn OuraApi>) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    pub fn tool_count(&self) -> usize {
        self.tool_router.list_all().len()
    }

    /// Resolve the date range, fetch one category and render the outcome.
    /// Validation runs before any network I/O.
    async fn fetch_and_render(&self, category: MetricCategory, params: DateRangeParams) -> String {
        let range = match DateRange::from_optional(
            params.start_date.as_deref(),
            params.end_date.as_deref(),
        ) {
            Ok(range) => range,
            Err(e) => return format::render_error(&e),
        };

        match self.client.fetch(category, &range).await {
            Ok(records) => format::render_records(category, &range, &records),
            Err(e) => {
                tracing::warn!(category = category.label(), error = %e, "fetch failed");
                format::render_error(&e)
            }
        }
    }

    #[tool(
        name = "get_sleep_data",
        description = "Get sleep data from Oura for a date range (defaults to the last 7 days)"
    )]
    pub async fn get_sleep_data(&self, params: Parameters<DateRangeParams>) -> String {
        self.fetch_and_render(MetricCategory::Sleep, params.0).await
    }

    #[tool(
        name = "get_activity_data",
        description = "Get daily activity data from Oura for a date range (defaults to the last 7 days)"
    )]
    pub async fn get_activity_data(&self, params: Parameters<DateRangeParams>) -> String {
        self.fetch_and_render(MetricCategory::DailyActivity, params.0)
            .await
    }

    #[tool(
        name = "get_readiness_data",
        description = "Get readiness scores from Oura for a date range (defaults to the last 7 days)"
    )]
    pub async fn get_readiness_data(&self, params: Parameters<DateRangeParams>) -> String {
        self.fetch_and_render(MetricCategory::DailyReadiness, params.0)
            .await
    }

    #[tool(
        name = "get_heart_rate_data",
        description = "Get heart rate samples from Oura for a date range (defaults to the last 7 days)"
    )]
    pub async fn get_heart_rate_data(&self, params: Parameters<DateRangeParams>) -> String {
        self.fetch_and_render(MetricCategory::HeartRate, params.0)
            .await
    }

    #[tool(
        name = "check_connection",
        description = "Check that the Oura API token is configured and the API is reachable"
    )]
    pub async fn check_connection(&self) -> String {
        if self.client.test_connection().await {
            CONNECTION_OK_MESSAGE.into()
        } else {
            CONNECTION_FAILED_MESSAGE.into()
        }
    }
}

#[tool_handler]
impl rmcp::ServerHandler for OuraMcpHandler {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        let mut info = rmcp::model::ServerInfo::default();
        info.instructions = Some(
            "Oura MCP server - provides read-only tools for sleep, activity, \
             readiness and heart rate data from the Oura Ring API."
                .into(),
        );
        info.capabilities = rmcp::model::ServerCapabilities::builder()
            .enable_tools()
            .build();
        info
    }
}
