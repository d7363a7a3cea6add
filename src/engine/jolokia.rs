//! Jolokia read-request construction and response interpretation

use std::collections::HashMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;

use crate::error::ProbeError;

/// Wildcard broker identifier accepted by the management subsystem.
const BROKER_WILDCARD: &str = "0.0.0.0";

/// Characters escaped when embedding the queue name in the object name.
/// Covers URL path delimiters plus the object-name syntax characters.
const OBJECT_NAME_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'?')
    .add(b'@');

/// Build the management read path for a queue's message count attribute.
pub(crate) fn message_count_path(queue_name: &str) -> String {
    let encoded = utf8_percent_encode(queue_name, OBJECT_NAME_ESCAPE);
    format!(
        "/console/jolokia/read/org.apache.activemq.artemis:broker=%22{}%22,component=addresses,address=%22{}%22/MessageCount",
        BROKER_WILDCARD, encoded
    )
}

/// Response shapes returned by the management endpoint.
///
/// Richer deployments answer with a status/error envelope wrapping per-address
/// counts; simpler ones return the bare attribute value. The envelope is
/// attempted first, so a body whose `value` is not a mapping falls through to
/// the scalar reading.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReadResponse {
    Envelope(Envelope),
    Scalar(ScalarValue),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    status: u16,
    #[serde(default)]
    error: String,
    #[serde(default)]
    value: Option<HashMap<String, AddressCount>>,
}

#[derive(Debug, Deserialize)]
struct AddressCount {
    #[serde(rename = "MessageCount")]
    message_count: i32,
}

#[derive(Debug, Deserialize)]
struct ScalarValue {
    value: i32,
}

/// Interpret a fully buffered 200 response body as a queue depth.
pub(crate) fn interpret(body: &str) -> Result<i32, ProbeError> {
    let response: ReadResponse =
        serde_json::from_str(body).map_err(|err| ProbeError::Parse(err.to_string()))?;

    match response {
        ReadResponse::Envelope(envelope) => {
            if envelope.status == 200 {
                Ok(aggregate(&envelope.value.unwrap_or_default()))
            } else if !envelope.error.is_empty() {
                Err(ProbeError::BrokerReported(envelope.error))
            } else {
                Err(ProbeError::UnknownBrokerError)
            }
        }
        ReadResponse::Scalar(scalar) => Ok(scalar.value.max(0)),
    }
}

/// Sum per-address counts. Non-positive entries contribute zero so one
/// malformed entry cannot suppress the true total.
fn aggregate(counts: &HashMap<String, AddressCount>) -> i32 {
    let total: i64 = counts
        .values()
        .map(|count| i64::from(count.message_count))
        .filter(|count| *count > 0)
        .sum();

    total.min(i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_embeds_queue_name() {
        assert_eq!(
            message_count_path("orders"),
            "/console/jolokia/read/org.apache.activemq.artemis:broker=%220.0.0.0%22,component=addresses,address=%22orders%22/MessageCount"
        );
    }

    #[test]
    fn test_path_percent_encodes_queue_name() {
        let path = message_count_path("orders queue/1");
        assert!(path.contains("address=%22orders%20queue%2F1%22"));
    }

    #[test]
    fn test_scalar_body() {
        assert_eq!(interpret(r#"{"value":42}"#).unwrap(), 42);
    }

    #[test]
    fn test_scalar_negative_clamps_to_zero() {
        assert_eq!(interpret(r#"{"value":-7}"#).unwrap(), 0);
    }

    #[test]
    fn test_scalar_inside_envelope_falls_through() {
        // Single-attribute reads wrap the bare value in an envelope.
        assert_eq!(interpret(r#"{"status":200,"value":7,"timestamp":1}"#).unwrap(), 7);
    }

    #[test]
    fn test_envelope_sums_positive_counts() {
        let body = r#"{"status":200,"value":{"a":{"MessageCount":3},"b":{"MessageCount":-1}}}"#;
        assert_eq!(interpret(body).unwrap(), 3);
    }

    #[test]
    fn test_envelope_with_only_nonpositive_counts() {
        let body = r#"{"status":200,"value":{"a":{"MessageCount":0},"b":{"MessageCount":-5}}}"#;
        assert_eq!(interpret(body).unwrap(), 0);
    }

    #[test]
    fn test_envelope_without_value_mapping() {
        assert_eq!(interpret(r#"{"status":200,"error":""}"#).unwrap(), 0);
    }

    #[test]
    fn test_envelope_broker_error() {
        let body = r#"{"status":500,"error":"address not found","value":null}"#;
        match interpret(body).unwrap_err() {
            ProbeError::BrokerReported(message) => assert_eq!(message, "address not found"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_envelope_broker_error_without_detail() {
        let result = interpret(r#"{"status":500,"error":""}"#);
        assert!(matches!(result, Err(ProbeError::UnknownBrokerError)));

        let result = interpret(r#"{"status":500}"#);
        assert!(matches!(result, Err(ProbeError::UnknownBrokerError)));
    }

    #[test]
    fn test_malformed_body() {
        let result = interpret("<html>broker console</html>");
        assert!(matches!(result, Err(ProbeError::Parse(_))));
    }
}
