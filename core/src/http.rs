//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! `SearchClient` builds an `HttpRequest` and parses the outcome of executing
//! it, but never touches the network itself. Whatever executes the request
//! implements `Transport` and reports either an `HttpResponse` (any status,
//! including 4xx/5xx) or a `TransportError` when no response arrived.

use thiserror::Error;

/// A search call described as plain data.
///
/// `query` pairs are unencoded; the transport is responsible for encoding
/// them onto `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// The query as it goes on the wire, form-encoded with keys sorted.
    pub fn describe_query(&self) -> String {
        let mut pairs: Vec<(&str, &str)> = self
            .query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort_by_key(|&(k, _)| k);
        serde_urlencoded::to_string(&pairs).unwrap_or_default()
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Failure to obtain any response at all.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Other(String),
}

/// Executes `HttpRequest`s. Implemented by `UreqTransport`; tests may supply
/// their own.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}
