//! Scaler adapter surface consumed by the autoscaling control loop

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;

use crate::config::ScalerConfig;
use crate::contracts::{MetricSpec, MetricValue, METRIC_NAME, METRIC_TYPE};
use crate::engine::QueueProbe;
use crate::error::{ConfigError, ProbeError};

/// Queue depth scaler for ActiveMQ Artemis.
///
/// Owns exactly one resolved configuration for its lifetime. Every liveness
/// or metric request delegates to a fresh probe of the management endpoint;
/// probe failures are returned to the caller, never folded into a zero count.
pub struct ArtemisScaler {
    config: ScalerConfig,
    probe: QueueProbe,
}

impl ArtemisScaler {
    /// Resolve trigger metadata and construct the scaler.
    ///
    /// A resolution failure prevents the scaler from being registered at all.
    pub fn new(
        metadata: &HashMap<String, String>,
        resolved_secrets: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let config = ScalerConfig::resolve(metadata, resolved_secrets)?;
        Ok(Self {
            config,
            probe: QueueProbe::new(),
        })
    }

    /// Set the per-probe deadline. Expiry aborts the in-flight call and
    /// surfaces as a transport failure.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.probe = QueueProbe::new().with_timeout(timeout);
        self
    }

    /// True when the queue currently holds pending work.
    pub async fn is_active(&self) -> Result<bool, ProbeError> {
        let length = self.queue_length().await?;
        Ok(length > 0)
    }

    /// Sample the queue depth at call time.
    pub async fn metric_value(&self) -> Result<MetricValue, ProbeError> {
        let value = self.queue_length().await?;
        Ok(MetricValue {
            metric_name: METRIC_NAME.to_string(),
            value,
            timestamp: Utc::now(),
        })
    }

    /// Static descriptor the control loop compares samples against.
    pub fn metric_spec(&self) -> MetricSpec {
        MetricSpec {
            metric_name: METRIC_NAME.to_string(),
            target_average_value: self.config.target_queue_length,
            metric_type: METRIC_TYPE.to_string(),
        }
    }

    /// Resolved configuration backing this scaler.
    pub fn config(&self) -> &ScalerConfig {
        &self.config
    }

    async fn queue_length(&self) -> Result<i32, ProbeError> {
        match self.probe.probe(&self.config).await {
            Ok(length) => Ok(length),
            Err(err) => {
                tracing::warn!(
                    queue = %self.config.queue_name,
                    error = %err,
                    "queue depth probe failed"
                );
                Err(err)
            }
        }
    }
}
