//! HTTP client construction for management endpoint queries
//!
//! With a trust anchor configured the client trusts only the supplied PEM
//! bundle; the platform trust store is not consulted. Certificate and
//! hostname verification stay enabled in both modes.

use std::time::Duration;

use reqwest::{Certificate, Client};

use crate::error::ProbeError;

/// Build a client for the given trust configuration.
///
/// A malformed or empty trust anchor fails here, before any network use.
pub(crate) fn build_client(
    trust_anchor: Option<&str>,
    timeout: Duration,
) -> Result<Client, ProbeError> {
    let mut builder = Client::builder().timeout(timeout);

    if let Some(pem) = trust_anchor {
        let anchors = Certificate::from_pem_bundle(pem.as_bytes())
            .map_err(|err| ProbeError::BadTrustAnchor(err.to_string()))?;
        if anchors.is_empty() {
            return Err(ProbeError::BadTrustAnchor(
                "no certificates found in PEM bundle".to_string(),
            ));
        }

        builder = builder.tls_built_in_root_certs(false);
        for anchor in anchors {
            builder = builder.add_root_certificate(anchor);
        }

        // TLS setup is the only fallible part of the build once an anchor
        // is in play.
        return builder
            .build()
            .map_err(|err| ProbeError::BadTrustAnchor(err.to_string()));
    }

    builder
        .build()
        .map_err(|err| ProbeError::Transport(err.to_string()))
}
