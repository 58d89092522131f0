//! Error types for the search client.
//!
//! # Design
//! Every failed `find_users` call ends in exactly one `ApiError` variant.
//! Request-shape variants (`LimitInvalid`, `OffsetInvalid`) are raised before
//! any I/O; the rest come from classifying the transport outcome. The
//! Display texts are what callers match on and are kept stable.

use thiserror::Error;

/// Classified outcome of a failed search call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No response within the transport timeout. Carries the sent query.
    #[error("timeout for {0}")]
    Timeout(String),

    /// The server answered 500.
    #[error("SearchServer fatal error")]
    ServerFault,

    /// A 400 whose body is not an error envelope.
    #[error("cant unpack error json: {0}")]
    BadEnvelope(String),

    /// A 200 whose body is not a list of users.
    #[error("cant unpack result json: {0}")]
    BadResultBody(String),

    #[error("Bad AccessToken")]
    BadAccessToken,

    /// The server rejected the requested order field.
    #[error("OrderFeld {0} invalid")]
    BadOrderField(String),

    /// Any other 400; carries the server's envelope text.
    #[error("unknown bad request error: {0}")]
    BadRequestGeneric(String),

    #[error("limit must be > 0")]
    LimitInvalid,

    #[error("offset must be > 0")]
    OffsetInvalid,

    /// A status outside the protocol, or a transport failure other than a
    /// timeout.
    #[error("unknown error {0}")]
    UnknownStatus(String),
}
