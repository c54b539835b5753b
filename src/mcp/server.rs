//! FitStack MCP Server Implementation
//!
//! Implements the MCP server with all FitStack tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::db::Database;
use crate::error::TrackerError;
use crate::models::Goals;
use crate::tools::status::StatusTracker;
use crate::tools::{dashboard, goals, logs, parse_date_or_today, products, status};
use crate::tracker::Tracker;

/// FitStack MCP Service
#[derive(Clone)]
pub struct FitStackService {
    tracker: Arc<Tracker<Database>>,
    status_tracker: Arc<StatusTracker>,
    tool_router: ToolRouter<FitStackService>,
}

impl FitStackService {
    pub fn new(config: &Config, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(StatusTracker::new(database.path().to_path_buf())),
            tracker: Arc::new(Tracker::new(database, config)),
            tool_router: Self::tool_router(),
        }
    }
}

fn to_mcp_error(e: TrackerError) -> McpError {
    match e {
        TrackerError::InvalidInput(_) => McpError::invalid_params(e.to_string(), None),
        _ => McpError::internal_error(e.to_string(), None),
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListProductsParams {
    /// Case-insensitive name filter (optional)
    pub query: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PreviewServingParams {
    /// Product ID
    pub product_id: i64,
    /// Amount in the product's base unit (grams or ml), 0 < quantity <= 10000
    pub quantity: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddLogParams {
    /// Product ID
    pub product_id: i64,
    /// Amount in the product's base unit (grams or ml), 0 < quantity <= 10000
    pub quantity: f64,
    /// Date (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteLogParams {
    /// Log entry ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDayParams {
    /// Date (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetTrendParams {
    /// Last day of the window (YYYY-MM-DD), defaults to today
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateGoalsParams {
    /// Daily calories in kcal (1000-5000)
    pub daily_calories: i64,
    /// Daily protein in grams (50-300)
    pub daily_protein: i64,
    /// Daily carbs in grams (50-500)
    pub daily_carbs: i64,
    /// Daily fat in grams (20-200)
    pub daily_fat: i64,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl FitStackService {
    // --- Status ---

    #[tool(description = "Get the current status of the FitStack service including build info, database path, cache settings, and process information")]
    fn tracker_status(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.status_tracker.get_status(&self.tracker))
    }

    #[tool(description = "Get instructions for logging food and reading progress. Call this when starting a tracking session or when unsure how to use the tools.")]
    fn tracker_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(status::TRACKER_INSTRUCTIONS)]))
    }

    #[tool(description = "Clear the cached product list and goals so the next read hits the database")]
    fn refresh_cache(&self) -> Result<CallToolResult, McpError> {
        json_result(&status::refresh_cache(&self.tracker))
    }

    // --- Products ---

    #[tool(description = "List products in the catalog, sorted by name. Nutrients are per 100 base units (g or ml).")]
    fn list_products(
        &self,
        Parameters(p): Parameters<ListProductsParams>,
    ) -> Result<CallToolResult, McpError> {
        json_result(&products::list_products(&self.tracker, p.query.as_deref()))
    }

    // --- Logs ---

    #[tool(description = "Estimate calories and macros for a serving of a product without logging it")]
    fn preview_serving(
        &self,
        Parameters(p): Parameters<PreviewServingParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = logs::preview_serving(&self.tracker, p.product_id, p.quantity)
            .map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Log a serving of a product for a date (defaults to today)")]
    fn add_log(&self, Parameters(p): Parameters<AddLogParams>) -> Result<CallToolResult, McpError> {
        let date = parse_date_or_today(p.date.as_deref()).map_err(to_mcp_error)?;
        let result = logs::add_log(&self.tracker, p.product_id, p.quantity, date)
            .map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Delete a logged serving by ID")]
    fn delete_log(
        &self,
        Parameters(p): Parameters<DeleteLogParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = logs::delete_log(&self.tracker, p.id).map_err(to_mcp_error)?;
        json_result(&result)
    }

    // --- Dashboard ---

    #[tool(description = "Get a day's logged servings, calorie and macro totals, goals, and percent of each goal reached (capped at 100)")]
    fn get_day(&self, Parameters(p): Parameters<GetDayParams>) -> Result<CallToolResult, McpError> {
        let date = parse_date_or_today(p.date.as_deref()).map_err(to_mcp_error)?;
        json_result(&dashboard::get_day(&self.tracker, date))
    }

    #[tool(description = "Get daily calorie and macro totals for the trend window (7 days by default) ending at end_date, oldest first")]
    fn get_trend(
        &self,
        Parameters(p): Parameters<GetTrendParams>,
    ) -> Result<CallToolResult, McpError> {
        let end_date = parse_date_or_today(p.end_date.as_deref()).map_err(to_mcp_error)?;
        json_result(&dashboard::get_trend(&self.tracker, end_date))
    }

    // --- Goals ---

    #[tool(description = "Get the daily calorie and macro goals (defaults apply when none are set)")]
    fn get_goals(&self) -> Result<CallToolResult, McpError> {
        json_result(&goals::get_goals(&self.tracker))
    }

    #[tool(description = "Set the daily calorie and macro goals")]
    fn update_goals(
        &self,
        Parameters(p): Parameters<UpdateGoalsParams>,
    ) -> Result<CallToolResult, McpError> {
        let data = Goals {
            daily_calories: p.daily_calories,
            daily_protein: p.daily_protein,
            daily_carbs: p.daily_carbs,
            daily_fat: p.daily_fat,
        };
        let result = goals::update_goals(&self.tracker, data).map_err(to_mcp_error)?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for FitStackService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "fitstack".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("FitStack Macro Tracker".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "FitStack Macro Tracker - daily calorie and macro tracking against goals. \
                 Call tracker_instructions first. \
                 Products: list_products. \
                 Logs: preview_serving/add_log/delete_log (quantities in grams, per-100g nutrients). \
                 Dashboard: get_day, get_trend. \
                 Goals: get_goals/update_goals. \
                 Maintenance: tracker_status, refresh_cache."
                    .into(),
            ),
        }
    }
}
