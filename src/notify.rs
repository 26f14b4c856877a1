use anyhow::{bail, Context, Result};
use std::future::Future;
use std::time::Duration;
use tracing::info;

use crate::config::GatewayConfig;

const GATEWAY_TIMEOUT_SECS: u64 = 10;

/// Outbound messaging contract: deliver one text to one recipient.
/// Delivery failures are the caller's to log; they never stop a sweep.
pub trait Notifier: Send + Sync {
    fn send(&self, address: &str, text: &str) -> impl Future<Output = Result<()>> + Send;
}

/// HTTP messaging gateway client. The gateway owns sessions and device
/// pairing; this side only posts message bodies to it.
pub struct MessageGateway {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl MessageGateway {
    /// Verifies the gateway is reachable before any monitoring starts.
    /// An unreachable gateway is fatal: without a transport there is
    /// nothing to monitor for.
    pub async fn connect(config: &GatewayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(GATEWAY_TIMEOUT_SECS))
            .build()
            .context("Failed to create gateway HTTP client")?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let response = client
            .get(format!("{}/status", base_url))
            .send()
            .await
            .with_context(|| format!("Message gateway unreachable at {}", base_url))?;
        if !response.status().is_success() {
            bail!("Message gateway at {} returned {}", base_url, response.status());
        }

        info!("Message gateway ready at {}", base_url);
        Ok(Self {
            client,
            base_url,
            api_token: config.api_token.clone(),
        })
    }

    /// The gateway addresses recipients by bare digits.
    fn normalize_address(address: &str) -> String {
        address.trim().trim_start_matches('+').to_string()
    }
}

impl Notifier for MessageGateway {
    async fn send(&self, address: &str, text: &str) -> Result<()> {
        let payload = serde_json::json!({
            "to": Self::normalize_address(address),
            "body": text,
        });

        let mut request = self
            .client
            .post(format!("{}/messages", self.base_url))
            .json(&payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach gateway for {}", address))?;
        if !response.status().is_success() {
            bail!("Gateway rejected message to {}: {}", address, response.status());
        }

        info!("Sent to {}: {}", address, text);
        Ok(())
    }
}
