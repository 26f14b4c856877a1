use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MonitorConfig {
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
    #[serde(default)]
    pub endpoints_file: Option<String>,
    #[serde(default = "default_check_interval")]
    pub check_interval: u64,
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_ms: u64,
    #[serde(default = "default_mode")]
    pub mode: RunMode,
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    pub gateway: GatewayConfig,
}

fn default_check_interval() -> u64 {
    10
}
fn default_probe_timeout() -> u64 {
    5000
}
fn default_api_port() -> u16 {
    3000
}
fn default_mode() -> RunMode {
    RunMode::Continuous
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    Continuous,
    SingleSweep,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EndpointConfig {
    pub id: String,
    pub address: String,
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default)]
    pub name: Option<String>,
    pub notify: NotifyAddresses,
}

fn default_scheme() -> String {
    "http".to_string()
}

/// Recipient addresses, either a proper list or a single comma-delimited
/// string as the legacy records carry them.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum NotifyAddresses {
    List(Vec<String>),
    Delimited(String),
}

impl NotifyAddresses {
    pub fn addresses(&self) -> Vec<String> {
        let raw: Vec<String> = match self {
            NotifyAddresses::List(list) => list.clone(),
            NotifyAddresses::Delimited(s) => s.split(',').map(str::to_string).collect(),
        };
        raw.iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect()
    }
}
