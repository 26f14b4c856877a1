use anyhow::{Context, Result};
use chrono::{Local, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::config::MonitorConfig;
use crate::models::{Endpoint, Status, StatusTracker, Transition};
use crate::notify::Notifier;

/// Compares one probe result against the tracked status and records it.
/// A first observation establishes the baseline silently; only a flip
/// between `Up` and `Down` is notification-worthy.
pub fn detect_transition(tracker: &mut StatusTracker, id: &str, observed: Status) -> Transition {
    let previous = tracker.get(id);
    if previous == Status::Unknown {
        tracker.set(id, observed);
        return Transition::Initial(observed);
    }
    if previous == observed {
        return Transition::None;
    }
    tracker.set(id, observed);
    Transition::Changed {
        from: previous,
        to: observed,
    }
}

pub struct Monitor<N> {
    config: MonitorConfig,
    endpoints: Vec<Endpoint>,
    http_client: reqwest::Client,
    pub state: Arc<Mutex<StatusTracker>>,
    notifier: N,
}

impl<N: Notifier> Monitor<N> {
    pub fn new(config: MonitorConfig, endpoints: Vec<Endpoint>, notifier: N) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.probe_timeout_ms))
            .build()
            .context("Failed to create probe HTTP client")?;

        Ok(Self {
            config,
            endpoints,
            http_client,
            state: Arc::new(Mutex::new(StatusTracker::new())),
            notifier,
        })
    }

    /// Continuous mode: one sweep per interval, forward order, until the
    /// process is terminated externally.
    pub async fn run(self: Arc<Self>) -> Result<()> {
        info!(
            "Monitoring {} endpoints every {}s: {}",
            self.endpoints.len(),
            self.config.check_interval,
            self.endpoint_names()
        );

        loop {
            let start_time = Utc::now();
            self.sweep(self.endpoints.iter()).await;
            let duration = Utc::now() - start_time;
            info!(
                "Sweep completed: {} endpoints in {:.2}s",
                self.endpoints.len(),
                duration.num_milliseconds() as f64 / 1000.0
            );

            tokio::time::sleep(Duration::from_secs(self.config.check_interval)).await;
        }
    }

    /// Single-sweep mode: exactly one pass in reverse registration order,
    /// then the caller exits.
    pub async fn run_once(&self) -> Result<()> {
        info!(
            "Single sweep over {} endpoints: {}",
            self.endpoints.len(),
            self.endpoint_names()
        );
        self.sweep(self.endpoints.iter().rev()).await;
        info!("Single sweep completed, stopping");
        Ok(())
    }

    fn endpoint_names(&self) -> String {
        self.endpoints
            .iter()
            .map(|e| e.display_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// One full pass: endpoints are probed strictly one at a time, and a
    /// sweep only finishes once every notification send has finished.
    async fn sweep<'a>(&self, endpoints: impl Iterator<Item = &'a Endpoint>) {
        for endpoint in endpoints {
            let observed = self.probe(endpoint).await;
            self.process_observation(endpoint, observed).await;
        }
    }

    /// Single bounded reachability check. Every failure mode is a valid
    /// `Down` observation, never an error.
    async fn probe(&self, endpoint: &Endpoint) -> Status {
        match self.http_client.get(&endpoint.check_target).send().await {
            Ok(response) if response.status().is_success() => Status::Up,
            Ok(response) => {
                debug!(
                    "Probe {} ({}): HTTP {}",
                    endpoint.id,
                    endpoint.check_target,
                    response.status()
                );
                Status::Down
            }
            Err(e) => {
                debug!("Probe {} ({}): {}", endpoint.id, endpoint.check_target, e);
                Status::Down
            }
        }
    }

    async fn process_observation(&self, endpoint: &Endpoint, observed: Status) {
        let transition = {
            let mut tracker = self.state.lock().await;
            detect_transition(&mut tracker, &endpoint.id, observed)
        };

        match transition {
            Transition::None => {}
            Transition::Initial(state) => {
                info!("Initial check {}: {:?}", endpoint.display_name, state);
            }
            Transition::Changed { from, to } => {
                let msg = format!(
                    "[CHANGE] {} ({}) {:?} -> {:?}",
                    endpoint.display_name, endpoint.check_target, from, to
                );
                if to == Status::Down {
                    error!("{}", msg);
                } else {
                    warn!("{}", msg);
                }
                self.notify_all(endpoint, to).await;
            }
        }
    }

    /// Fans one transition out to every recipient, sequentially. A failed
    /// send is logged and the remaining recipients still get theirs.
    async fn notify_all(&self, endpoint: &Endpoint, state: Status) {
        let text = notification_text(endpoint, state);
        for address in &endpoint.notify_addresses {
            if let Err(e) = self.notifier.send(address, &text).await {
                error!("Failed to send to {} for {}: {:#}", address, endpoint.id, e);
            }
        }
    }
}

fn notification_text(endpoint: &Endpoint, state: Status) -> String {
    let now = Local::now().format("%Y-%m-%d %H:%M:%S");
    if state == Status::Up {
        format!(
            "✅ {} is now UP and reachable. 🕒 Time: {}",
            endpoint.display_name, now
        )
    } else {
        format!(
            "⚠️ ALERT: {} is DOWN or unreachable! 🕒 Time: {}",
            endpoint.display_name, now
        )
    }
}
