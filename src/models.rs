use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::EndpointConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Unknown,
    Up,
    Down,
}

/// A monitored target, resolved from its config record.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub id: String,
    pub check_target: String,
    pub display_name: String,
    pub notify_addresses: Vec<String>,
}

impl Endpoint {
    pub fn from_config(cfg: &EndpointConfig) -> Self {
        let check_target = if cfg.address.contains("://") {
            cfg.address.clone()
        } else {
            format!("{}://{}", cfg.scheme, cfg.address)
        };
        let display_name = cfg.name.clone().unwrap_or_else(|| cfg.address.clone());
        Self {
            id: cfg.id.clone(),
            check_target,
            display_name,
            notify_addresses: cfg.notify.addresses(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusRecord {
    pub endpoint_id: String,
    pub state: Status,
    pub checked_at: DateTime<Utc>,
}

/// Last-known status per endpoint id. Sweeps are serialized by the engine,
/// so a record only changes between consecutive sweeps of its endpoint.
#[derive(Debug, Default)]
pub struct StatusTracker {
    records: HashMap<String, StatusRecord>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids never observed report `Unknown`.
    pub fn get(&self, endpoint_id: &str) -> Status {
        self.records
            .get(endpoint_id)
            .map(|r| r.state)
            .unwrap_or(Status::Unknown)
    }

    pub fn set(&mut self, endpoint_id: &str, state: Status) {
        self.records.insert(
            endpoint_id.to_string(),
            StatusRecord {
                endpoint_id: endpoint_id.to_string(),
                state,
                checked_at: Utc::now(),
            },
        );
    }

    pub fn snapshot(&self) -> Vec<StatusRecord> {
        let mut records: Vec<_> = self.records.values().cloned().collect();
        records.sort_by(|a, b| a.endpoint_id.cmp(&b.endpoint_id));
        records
    }
}

/// Outcome of comparing one probe result against the tracked status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Status unchanged, nothing to report.
    None,
    /// First observation for this endpoint; establishes the baseline.
    Initial(Status),
    /// Observed status differs from the tracked one.
    Changed { from: Status, to: Status },
}
