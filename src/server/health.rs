// src/server/health.rs

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use tokio::process::Child;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::errors::{FixtureError, Result};

/// Upper bound for a single probe request.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// `GET /db?u=<admin>&p=<password>`, ready on HTTP 200.
#[derive(Debug, Clone)]
pub struct HealthProbe {
    client: reqwest::Client,
    url: String,
    params: Vec<(&'static str, String)>,
}

impl HealthProbe {
    pub fn new(host: &str, port: u16, admin: Option<&str>, password: Option<&str>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .no_proxy()
            .build()?;

        let mut params = Vec::with_capacity(2);
        if let Some(admin) = admin {
            params.push(("u", admin.to_string()));
        }
        if let Some(password) = password {
            params.push(("p", password.to_string()));
        }

        Ok(Self {
            client,
            url: format!("http://{host}:{port}/db"),
            params,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One probe. Connection errors, timeouts and non-200 answers all count
    /// as "not ready yet".
    pub async fn is_ready(&self) -> bool {
        match self.client.get(&self.url).query(&self.params).send().await {
            Ok(resp) if resp.status() == StatusCode::OK => true,
            Ok(resp) => {
                debug!(url = %self.url, status = %resp.status(), "InfluxDB not ready yet");
                false
            }
            Err(err) => {
                debug!(url = %self.url, error = %err, "InfluxDB not reachable yet");
                false
            }
        }
    }
}

/// Poll `probe` every `interval` until it succeeds.
///
/// Fails with `StartupFailed` as soon as `child` exits, and with
/// `StartupTimeout` once `deadline` (if any) has passed.
pub async fn wait_until_ready(
    child: &mut Child,
    probe: &HealthProbe,
    interval: Duration,
    deadline: Option<Duration>,
) -> Result<()> {
    let started = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        if probe.is_ready().await {
            info!(
                url = %probe.url(),
                attempts,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "InfluxDB is ready"
            );
            return Ok(());
        }

        if let Some(status) = child.try_wait()? {
            return Err(FixtureError::StartupFailed { status });
        }

        if let Some(limit) = deadline {
            if started.elapsed() >= limit {
                return Err(FixtureError::StartupTimeout(limit));
            }
        }

        sleep(interval).await;
    }
}
