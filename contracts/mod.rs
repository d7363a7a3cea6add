//! Queue Depth Agent Contracts
//!
//! Types consumed by the autoscaling control loop that drives this agent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metric identifier reported to the control loop.
pub const METRIC_NAME: &str = "queueLength";

/// Metric type reported in the static descriptor.
pub const METRIC_TYPE: &str = "External";

/// Scaling threshold applied when the trigger metadata omits one.
pub const DEFAULT_TARGET_QUEUE_LENGTH: i32 = 5;

/// Static metric descriptor used by the control loop to compute desired scale.
///
/// Fixed at scaler construction; never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSpec {
    /// Metric identifier
    pub metric_name: String,

    /// Queue depth the control loop scales towards
    pub target_average_value: i32,

    /// Metric source type
    pub metric_type: String,
}

/// A point-in-time queue depth sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricValue {
    /// Metric identifier
    pub metric_name: String,

    /// Pending-message count at sample time, never negative
    pub value: i32,

    /// Sample timestamp
    pub timestamp: DateTime<Utc>,
}
