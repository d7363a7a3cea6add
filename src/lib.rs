//! Queue Depth Agent
//!
//! Polls an ActiveMQ Artemis management endpoint for a queue's
//! pending-message count and exposes the count to an external autoscaling
//! control loop as a liveness check and a point-in-time metric sample.
//!
//! # Design Principles
//! - Stateless: every probe is one independent round trip
//! - Deterministic: identical metadata resolves to identical configuration
//! - Fail loud: probe failures surface as errors, never as an empty queue

mod client;

pub mod config;
pub mod engine;
pub mod error;
pub mod scaler;

// Re-export contracts
#[path = "../contracts/mod.rs"]
pub mod contracts;

pub use config::ScalerConfig;
pub use contracts::*;
pub use error::{ConfigError, ProbeError};
pub use scaler::ArtemisScaler;
