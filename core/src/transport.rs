//! Blocking `Transport` backed by ureq.

use std::time::Duration;

use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};

/// Timeout applied to a whole exchange unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Executes requests with a ureq agent.
///
/// 4xx/5xx responses come back as data rather than `Err` so the client can
/// classify them.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.get(&request.url);
        for (key, value) in &request.query {
            builder = builder.query(key.as_str(), value.as_str());
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder.call().map_err(TransportError::from)?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(TransportError::from)?;
        Ok(HttpResponse { status, body })
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Timeout(_) => TransportError::Timeout,
            other => TransportError::Other(other.to_string()),
        }
    }
}
