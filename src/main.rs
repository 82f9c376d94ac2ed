//! Nutrition & Activity Tracker
//!
//! An MCP server for logging daily food and activity calories.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use nutrition_tracker::build_info;
use nutrition_tracker::config::Config;
use nutrition_tracker::mcp::TrackerService;
use nutrition_tracker::storage;
use nutrition_tracker::tracker::DailyRecordStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrition_tracker=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env();
    eprintln!("Storage backend: {}", config.backend.as_str());
    eprintln!("Data path: {}", config.data_path.display());
    eprintln!("Export directory: {}", config.export_dir.display());

    let backend = storage::open_backend(config.backend, config.data_path.clone());
    let store = DailyRecordStore::open(backend).await;

    let service = TrackerService::new(store.clone(), config.export_dir);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    // Flush anything still pending from background saves; failures are logged by save
    let _ = store.save().await;

    Ok(())
}
