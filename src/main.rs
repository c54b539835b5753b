//! FitStack Macro Tracker
//!
//! An MCP server for daily calorie and macro tracking.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use fitstack::build_info;
use fitstack::config::Config;
use fitstack::db::Database;
use fitstack::mcp::FitStackService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr so stdout stays free for MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fitstack=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let config = Config::from_env();
    tracing::info!(
        database = %config.database_path.display(),
        product_cache_secs = config.product_cache_ttl.as_secs(),
        goal_cache_secs = config.goal_cache_ttl.as_secs(),
        trend_days = config.trend_days,
        "Loaded configuration"
    );

    let database = Database::open(&config.database_path)?;
    let service = FitStackService::new(&config, database);

    tracing::info!("Starting MCP server on stdio");
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
