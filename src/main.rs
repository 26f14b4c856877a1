use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

mod api;
mod config;
mod engine;
mod models;
mod notify;
mod source;

use crate::config::{MonitorConfig, RunMode};
use crate::engine::Monitor;
use crate::notify::MessageGateway;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_ansi(true)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    let config_content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path))?;
    let config: MonitorConfig =
        serde_json::from_str(&config_content).with_context(|| "Failed to parse config")?;

    let endpoints = source::load_endpoints(&config);
    if endpoints.is_empty() {
        warn!("No endpoints configured; nothing to monitor");
    }

    // No transport, no monitoring: a dead gateway is the one fatal error.
    let gateway = MessageGateway::connect(&config.gateway)
        .await
        .context("Failed to initialize message gateway")?;

    let mode = config.mode;
    let monitor = Arc::new(Monitor::new(config.clone(), endpoints, gateway)?);

    match mode {
        RunMode::SingleSweep => {
            monitor.run_once().await?;
        }
        RunMode::Continuous => {
            let state_for_api = monitor.state.clone();
            let api_port = config.api_port;
            tokio::spawn(async move {
                api::start_server(api_port, state_for_api).await;
            });

            let monitor_clone = Arc::clone(&monitor);
            tokio::spawn(async move {
                if let Err(e) = monitor_clone.run().await {
                    tracing::error!("Monitor engine failed: {}", e);
                }
            });

            signal::ctrl_c().await?;
            info!("Shutdown signal received. Closing UpWatch...");
        }
    }

    Ok(())
}
