use std::collections::HashSet;
use tracing::warn;

use crate::config::{EndpointConfig, MonitorConfig};
use crate::models::Endpoint;

/// Resolves the endpoint set for one monitoring session: inline config
/// entries plus an optional external endpoints file. A failed file lookup
/// degrades to whatever the inline list holds.
pub fn load_endpoints(config: &MonitorConfig) -> Vec<Endpoint> {
    let mut raw = config.endpoints.clone();

    if let Some(path) = &config.endpoints_file {
        match read_endpoints_file(path) {
            Ok(mut from_file) => raw.append(&mut from_file),
            Err(e) => warn!("Failed to load endpoint list from {}: {:#}", path, e),
        }
    }

    let mut seen = HashSet::new();
    let mut endpoints = Vec::with_capacity(raw.len());
    for cfg in &raw {
        if cfg.id.trim().is_empty() {
            warn!("Skipping endpoint with empty id (address {})", cfg.address);
            continue;
        }
        if !seen.insert(cfg.id.clone()) {
            warn!("Skipping duplicate endpoint id {}", cfg.id);
            continue;
        }
        let endpoint = Endpoint::from_config(cfg);
        if endpoint.notify_addresses.is_empty() {
            warn!("Skipping endpoint {}: no notify addresses", cfg.id);
            continue;
        }
        endpoints.push(endpoint);
    }
    endpoints
}

fn read_endpoints_file(path: &str) -> anyhow::Result<Vec<EndpointConfig>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
