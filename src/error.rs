//! Error types for the Queue Depth Agent
//!
//! Split by lifecycle: configuration errors are raised once at scaler
//! construction and are fatal; probe errors are returned per call.

use thiserror::Error;

/// Raised while resolving trigger metadata. Fatal to scaler creation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required metadata key is absent or empty
    #[error("missing required metadata: {0}")]
    MissingField(&'static str),

    /// A numeric metadata value did not parse as a non-negative integer
    #[error("invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    /// The management endpoint value is not a well-formed URL
    #[error("invalid URL for {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    /// The credential reference names a secret that did not resolve
    #[error("secret reference {0} did not resolve to a value")]
    UnresolvedSecret(String),

    /// Credential injection requires a username in the endpoint URL
    #[error("management endpoint URL carries no username for credential injection")]
    MissingUsername,
}

/// Raised by a single probe. Surfaced verbatim to the caller; never retried
/// at this layer.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The configured trust anchor is not a usable PEM certificate bundle
    #[error("trust anchor is not a usable PEM certificate bundle: {0}")]
    BadTrustAnchor(String),

    /// Transport-level failure: DNS, connect, timeout, TLS handshake
    #[error("transport failure: {0}")]
    Transport(String),

    /// The management endpoint answered 403
    #[error("management endpoint denied access")]
    PermissionDenied,

    /// The management endpoint answered with an unexpected HTTP status
    #[error("unexpected management endpoint status: {0}")]
    UnexpectedStatus(u16),

    /// The response body did not parse as a known shape
    #[error("unparseable management response: {0}")]
    Parse(String),

    /// The broker envelope carried a non-200 status with an error message
    #[error("broker reported error: {0}")]
    BrokerReported(String),

    /// The broker envelope carried a non-200 status without detail
    #[error("broker reported failure without detail")]
    UnknownBrokerError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingField("queueName");
        assert_eq!(err.to_string(), "missing required metadata: queueName");

        let err = ConfigError::InvalidNumber {
            field: "queueLength",
            value: "five".to_string(),
        };
        assert_eq!(err.to_string(), "invalid number for queueLength: five");
    }

    #[test]
    fn test_probe_error_display() {
        let err = ProbeError::UnexpectedStatus(503);
        assert_eq!(err.to_string(), "unexpected management endpoint status: 503");

        let err = ProbeError::BrokerReported("address not found".to_string());
        assert_eq!(err.to_string(), "broker reported error: address not found");
    }
}
