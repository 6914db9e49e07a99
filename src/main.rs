#![cfg(not(tarpaulin_include))]

use campaignboard::{app, loader};
use std::env;

/// Main entry point for the dashboard server
///
/// Loads the campaign workbook into the process-wide table, then serves the
/// dashboard. A load failure is terminal: there is no degraded rendering
/// without the combined table.
///
/// # Arguments
/// * `args[1]` - Workbook path (default: "Template _ Campaigns Comparison.xlsx")
/// * `args[2]` - Bind address (default: "127.0.0.1:3000")
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let workbook = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("Template _ Campaigns Comparison.xlsx");
    let bind = args.get(2).map(String::as_str).unwrap_or("127.0.0.1:3000");

    let table = match loader::shared(workbook) {
        Ok(table) => table,
        Err(e) => {
            log::error!("failed to load '{}': {}", workbook, e);
            return Err(e);
        }
    };
    log::info!(
        "loaded {} rows across {} campaigns",
        table.len(),
        table.campaigns().len()
    );

    app::run(table.clone(), bind).await
}
