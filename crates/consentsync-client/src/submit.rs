//! Submitting the sealed token to the ingest endpoint.

use std::time::Duration;

use serde_json::json;
use thiserror::Error;

/// A submission that did not end in server acknowledgement. Consent is
/// only granted once the server has said so; every variant leaves the
/// prompt open.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("a submission is already in flight")]
    InFlight,

    #[error("internal: {0}")]
    Internal(String),
}

/// Capability for delivering a token to the server.
pub trait ConsentSubmit {
    fn submit(&self, token: &str) -> impl std::future::Future<Output = Result<(), SubmitError>> + Send;
}

/// Posts `{"consent": token}` to the configured ingest endpoint with a
/// bounded timeout. A timeout is indistinguishable from any other
/// transport failure.
pub struct HttpSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmitter {
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("HTTP client construction");
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl ConsentSubmit for HttpSubmitter {
    async fn submit(&self, token: &str) -> Result<(), SubmitError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "consent": token }))
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(SubmitError::Status(resp.status().as_u16()))
        }
    }
}
