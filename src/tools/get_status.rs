//! Handler for the `app_get_status` tool.
//!
//! Reports application status and basic statistics. Takes no arguments.

use rmcp::model::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::tools::{HandlerFuture, ToolHandler};

/// `app_get_status` takes no arguments; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct GetStatusArgs {}

/// Snapshot returned by `app_get_status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: String,
    pub uptime: String,
    pub users_online: u64,
    pub requests_today: u64,
    pub database: String,
    pub cache: String,
}

impl Default for StatusReport {
    fn default() -> Self {
        Self {
            status: "online".to_string(),
            uptime: "24h 15m".to_string(),
            users_online: 42,
            requests_today: 1337,
            database: "connected".to_string(),
            cache: "healthy".to_string(),
        }
    }
}

/// Handler for the `app_get_status` tool.
#[derive(Default)]
pub struct GetStatusHandler {
    report: StatusReport,
}

impl GetStatusHandler {
    /// Create a status handler reporting the default snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a status handler reporting a fixed snapshot.
    pub fn with_report(report: StatusReport) -> Self {
        Self { report }
    }
}

impl ToolHandler for GetStatusHandler {
    type Args = GetStatusArgs;
    type Output = StatusReport;

    fn name(&self) -> &str {
        "app_get_status"
    }

    fn description(&self) -> &str {
        "Get current application status and statistics"
    }

    fn input_schema(&self) -> JsonObject {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), json!({}));
        schema.insert("required".to_string(), json!([]));
        schema
    }

    fn execute(&self, _args: GetStatusArgs) -> HandlerFuture<'_, StatusReport> {
        let report = self.report.clone();
        Box::pin(async move { Ok(report) })
    }
}
