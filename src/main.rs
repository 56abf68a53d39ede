//! Odoo Stock Sync Tool
//!
//! Pushes stock quantities from a JSON file into Odoo and exports the stockable catalog

// stocksync/src/main.rs
mod catalog;
mod config;
mod errors;
mod export;
mod sync;
mod utils;

use anyhow::{Context, Result};
use config::AppConfig;
use std::env;
use std::process::ExitCode;

/// Main entry point for the stock sync tool
#[tokio::main]
async fn main() -> ExitCode {
    utils::logging::setup_tracing();

    match run_app().await {
        Ok(_) => {
            println!("✅ Operation completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_app() -> Result<()> {
    let app_config = AppConfig::load_from_env().context("Failed to load application configuration")?;

    // Without an argument the tool runs the stock sync.
    let choice = env::args()
        .nth(1)
        .map(|arg| arg.trim().to_string())
        .unwrap_or_else(|| "sync".to_string());

    match choice.as_str() {
        "1" | "sync" => {
            println!("⚙️ Starting Stock Sync...");
            sync::run_sync_flow(&app_config)
                .await
                .context("Stock sync failed")?;
        }
        "2" | "export" => {
            println!("📦 Starting Catalog Export...");
            export::run_export_flow(&app_config)
                .await
                .context("Catalog export failed")?;
        }
        _ => {
            println!("❌ Invalid choice. Please use '1' (sync) or '2' (export).");
            anyhow::bail!("Invalid operation choice");
        }
    }
    Ok(())
}
