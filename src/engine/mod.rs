//! Queue probe engine
//!
//! One probe is one synchronous round trip: build (or reuse) the HTTP
//! client, issue the management read, classify the outcome. The probe
//! holds no state between calls beyond the cached client.

mod jolokia;

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::client::build_client;
use crate::config::ScalerConfig;
use crate::error::ProbeError;

/// Default per-probe deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Probes a management endpoint for a queue's pending-message count.
pub struct QueueProbe {
    client: OnceLock<Client>,
    timeout: Duration,
}

impl Default for QueueProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueProbe {
    /// Create a probe with the default deadline.
    pub fn new() -> Self {
        Self {
            client: OnceLock::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-probe deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch the current pending-message count for the configured queue.
    pub async fn probe(&self, config: &ScalerConfig) -> Result<i32, ProbeError> {
        let client = self.client(config)?;

        let request_url = format!(
            "{}{}",
            config.endpoint,
            jolokia::message_count_path(&config.queue_name)
        );
        let mut url =
            Url::parse(&request_url).map_err(|err| ProbeError::Transport(err.to_string()))?;

        // Credentials travel as an Authorization header, not on the wire URL.
        let username = url.username().to_string();
        let password = url.password().map(str::to_string);
        let _ = url.set_username("");
        let _ = url.set_password(None);

        let mut request = client.get(url);
        if !username.is_empty() {
            request = request.basic_auth(username, password);
        }

        let response = request
            .send()
            .await
            .map_err(|err| ProbeError::Transport(err.to_string()))?;

        let status = response.status();
        // Buffer the body exactly once regardless of status, then release
        // the connection.
        let body = response
            .text()
            .await
            .map_err(|err| ProbeError::Transport(err.to_string()))?;

        match status.as_u16() {
            200 => jolokia::interpret(&body),
            403 => Err(ProbeError::PermissionDenied),
            code => Err(ProbeError::UnexpectedStatus(code)),
        }
    }

    /// Return the cached client, building it from the configuration on
    /// first use. Reuse avoids repeated TLS setup; each probe stays
    /// independent and idempotent.
    fn client(&self, config: &ScalerConfig) -> Result<&Client, ProbeError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }

        let built = build_client(config.trust_anchor.as_deref(), self.timeout)?;
        Ok(self.client.get_or_init(|| built))
    }
}
