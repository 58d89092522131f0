//! Request failures and their HTTP rendering.
//!
//! A `SearchError` keeps the internal cause for logging; on the wire only
//! its `ErrorCode` text is sent, inside an `ErrorEnvelope`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use search_core::{ErrorCode, ErrorEnvelope};
use thiserror::Error;

use crate::dataset::DatasetError;

/// Query parameters that must parse as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Limit,
    Offset,
    OrderBy,
}

impl Param {
    pub const fn name(self) -> &'static str {
        match self {
            Param::Limit => "limit",
            Param::Offset => "offset",
            Param::OrderBy => "order_by",
        }
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("dataset unavailable: {0}")]
    DatasetUnavailable(#[source] std::io::Error),

    #[error("dataset malformed: {0}")]
    DatasetMalformed(#[from] DatasetError),

    #[error("access token rejected")]
    BadAccessToken,

    #[error("missing or non-integer `{}`", .0.name())]
    InvalidParam(Param),

    #[error("unknown order field {0:?}")]
    BadOrderField(String),

    #[error("unknown order direction {0}")]
    BadOrderBy(i64),

    #[error("encoding users failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SearchError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SearchError::DatasetUnavailable(_) => ErrorCode::DatasetUnavailable,
            SearchError::DatasetMalformed(_) => ErrorCode::DatasetMalformed,
            SearchError::BadAccessToken => ErrorCode::BadAccessToken,
            SearchError::InvalidParam(Param::Limit) => ErrorCode::NoLimit,
            SearchError::InvalidParam(Param::Offset) => ErrorCode::NoOffset,
            SearchError::InvalidParam(Param::OrderBy) => ErrorCode::NoOrderBy,
            SearchError::BadOrderField(_) => ErrorCode::BadOrderField,
            SearchError::BadOrderBy(_) => ErrorCode::BadOrderBy,
            SearchError::Encode(_) => ErrorCode::EncodeFailed,
        }
    }

    /// An unreadable dataset is reported as 400, not 5xx.
    pub fn status(&self) -> StatusCode {
        match self {
            SearchError::BadAccessToken => StatusCode::UNAUTHORIZED,
            SearchError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let code = self.code();
        tracing::warn!(error = %self, code = code.as_str(), "search rejected");
        (self.status(), Json(ErrorEnvelope::new(code))).into_response()
    }
}
