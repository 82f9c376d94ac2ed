//! Tracker MCP Server Implementation
//!
//! Implements the MCP server with all tracker tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::dates;
use crate::export::ExportFormat;
use crate::models::DailyRecord;
use crate::tools::days;
use crate::tools::entries;
use crate::tools::export;
use crate::tools::status::StatusTracker;
use crate::tracker::DailyRecordStore;

/// Nutrition tracker MCP Service
#[derive(Clone)]
pub struct TrackerService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    store: DailyRecordStore,
    export_dir: PathBuf,
    tool_router: ToolRouter<TrackerService>,
}

impl TrackerService {
    pub fn new(store: DailyRecordStore, export_dir: PathBuf) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(store.backend_info()))),
            store,
            export_dir,
            tool_router: Self::tool_router(),
        }
    }
}

/// Serialize a tool response as pretty JSON text content
fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Calorie amounts arrive as JSON numbers or strings; validation works on text
fn amount_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Day Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDailyDataParams {
    /// Date in ISO format: YYYY-MM-DD (defaults to today)
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveDailyDataParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
    /// Full daily record: {date, foods: [...], activities: [...], summary}
    pub record: serde_json::Value,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SummaryChangeParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
    /// Free-text summary for the day (replaces the previous one)
    pub summary: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NavigateDateParams {
    /// Starting date in ISO format: YYYY-MM-DD (defaults to today)
    pub date: Option<String>,
    /// Days to move: -1 previous day, 1 next day
    #[serde(default)]
    pub offset: i64,
}

// ============================================================================
// Entry Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddFoodParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
    /// What was eaten
    pub description: String,
    /// Calories consumed (whole number, 0 or more)
    pub calories: serde_json::Value,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EditFoodParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
    /// Food entry ID
    pub id: String,
    /// New description
    pub description: String,
    /// New calories (whole number, 0 or more)
    pub calories: serde_json::Value,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddActivityParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
    /// What was done
    pub description: String,
    /// Calories burned (whole number, 0 or more)
    pub calories_burned: serde_json::Value,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EditActivityParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
    /// Activity entry ID
    pub id: String,
    /// New description
    pub description: String,
    /// New calories burned (whole number, 0 or more)
    pub calories_burned: serde_json::Value,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteEntryParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
    /// Entry ID
    pub id: String,
}

// ============================================================================
// Export Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportDataParams {
    /// "json" or "csv"; omit to write both
    pub format: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl TrackerService {
    // --- Status ---

    #[tool(description = "Get the current status of the tracker service including build info, storage backend, and process information")]
    async fn tracker_status(&self) -> Result<CallToolResult, McpError> {
        let dates_logged = self.store.all().await.len();
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status(dates_logged))
    }

    #[tool(description = "Get instructions for logging food, activities and summaries. Call this when starting a session or when unsure how to use the tools.")]
    fn tracker_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::TRACKER_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(TRACKER_INSTRUCTIONS)]))
    }

    // --- Days ---

    #[tool(description = "Get the daily record for a date (foods, activities, summary) with consumed/burned/net calorie totals")]
    async fn get_daily_data(&self, Parameters(p): Parameters<GetDailyDataParams>) -> Result<CallToolResult, McpError> {
        let date = p.date.unwrap_or_else(dates::today);
        let result = days::get_daily_data(&self.store, &date).await.map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Replace the full daily record for a date. Reports persisted=false if it is held in memory but could not be stored durably.")]
    async fn save_daily_data(&self, Parameters(p): Parameters<SaveDailyDataParams>) -> Result<CallToolResult, McpError> {
        let record: DailyRecord = serde_json::from_value(p.record)
            .map_err(|e| McpError::invalid_params(format!("Invalid daily record: {}", e), None))?;
        let result = days::save_daily_data(&self.store, &p.date, record).await.map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Set the free-text summary for a date")]
    async fn summary_change(&self, Parameters(p): Parameters<SummaryChangeParams>) -> Result<CallToolResult, McpError> {
        let result = days::summary_change(&self.store, &p.date, &p.summary).await.map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Move from a date by a number of days (e.g. -1 for the previous day) and get its display name")]
    fn navigate_date(&self, Parameters(p): Parameters<NavigateDateParams>) -> Result<CallToolResult, McpError> {
        let date = p.date.unwrap_or_else(dates::today);
        let result = days::navigate_date(&date, p.offset).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Foods ---

    #[tool(description = "Log a food with its calories. Blank descriptions or non-whole/negative calories are ignored (changed=false).")]
    async fn add_food(&self, Parameters(p): Parameters<AddFoodParams>) -> Result<CallToolResult, McpError> {
        let result = entries::add_food(&self.store, &p.date, &p.description, &amount_text(&p.calories))
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Edit a food entry's description and calories. Unknown ids and invalid input are ignored (changed=false).")]
    async fn edit_food(&self, Parameters(p): Parameters<EditFoodParams>) -> Result<CallToolResult, McpError> {
        let result = entries::edit_food(&self.store, &p.date, &p.id, &p.description, &amount_text(&p.calories))
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Delete a food entry by id")]
    async fn delete_food(&self, Parameters(p): Parameters<DeleteEntryParams>) -> Result<CallToolResult, McpError> {
        let result = entries::delete_food(&self.store, &p.date, &p.id).await.map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Activities ---

    #[tool(description = "Log a physical activity with calories burned. Blank descriptions or non-whole/negative calories are ignored (changed=false).")]
    async fn add_activity(&self, Parameters(p): Parameters<AddActivityParams>) -> Result<CallToolResult, McpError> {
        let result = entries::add_activity(&self.store, &p.date, &p.description, &amount_text(&p.calories_burned))
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Edit an activity entry's description and calories burned. Unknown ids and invalid input are ignored (changed=false).")]
    async fn edit_activity(&self, Parameters(p): Parameters<EditActivityParams>) -> Result<CallToolResult, McpError> {
        let result = entries::edit_activity(&self.store, &p.date, &p.id, &p.description, &amount_text(&p.calories_burned))
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Delete an activity entry by id")]
    async fn delete_activity(&self, Parameters(p): Parameters<DeleteEntryParams>) -> Result<CallToolResult, McpError> {
        let result = entries::delete_activity(&self.store, &p.date, &p.id).await.map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Export ---

    #[tool(description = "Export the full log to nutrition-tracker-<today>.json and/or .csv in the export directory")]
    async fn export_data(&self, Parameters(p): Parameters<ExportDataParams>) -> Result<CallToolResult, McpError> {
        let format = match p.format.as_deref() {
            Some(s) => Some(ExportFormat::from_str(s).ok_or_else(|| {
                McpError::invalid_params(format!("Unknown export format '{}': use json or csv", s), None)
            })?),
            None => None,
        };
        let result = export::export_data(&self.store, format, &self.export_dir)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for TrackerService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutrition-tracker".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Nutrition & Activity Tracker".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Nutrition & Activity Tracker - daily food and exercise calorie log. \
                 Call tracker_instructions first. \
                 Days: get_daily_data/save_daily_data/summary_change/navigate_date. \
                 Foods: add_food/edit_food/delete_food. \
                 Activities: add_activity/edit_activity/delete_activity. \
                 Export: export_data (json, csv or both). Status: tracker_status."
                    .into(),
            ),
        }
    }
}
