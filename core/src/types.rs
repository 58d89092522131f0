//! Wire types shared by the search server and its client.
//!
//! # Design
//! The server depends on this crate for `User`, `ErrorEnvelope` and
//! `ErrorCode`, so the envelope texts live in exactly one place. The client
//! classifies 400 responses by resolving the envelope text back into an
//! `ErrorCode` instead of matching on prose.

use serde::{Deserialize, Serialize};

/// Largest page the client will ever ask for. Larger requests are clamped.
pub const MAX_LIMIT: i64 = 25;

/// One person record as it travels over the wire.
///
/// Serialized with PascalCase keys: `Id`, `Name`, `Age`, `About`, `Gender`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub about: String,
    pub gender: String,
}

/// Parameters of a single search call, as supplied by the caller.
///
/// `order_field` stays free text so a caller can ask for a field the server
/// does not know; the server rejects it with `ErrorCode::BadOrderField`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub limit: i64,
    pub offset: i64,
    pub query: String,
    pub order_field: String,
    /// `-1` descending, `0` as stored, `1` ascending.
    pub order_by: i64,
}

/// A page of users plus whether more records exist past it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResponse {
    pub users: Vec<User>,
    pub has_more: bool,
}

/// Body of every non-success response: `{"error": "<message>"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            error: code.as_str().to_string(),
        }
    }

    /// The named code this envelope carries, if its text is one we emit.
    pub fn code(&self) -> Option<ErrorCode> {
        ErrorCode::from_message(&self.error)
    }
}

/// Closed set of error codes the server puts into an `ErrorEnvelope`.
///
/// | code                 | text                          |
/// |----------------------|-------------------------------|
/// | `NoLimit`            | `no limit in request`         |
/// | `NoOffset`           | `no offset in request`        |
/// | `NoOrderBy`          | `no order_by in request`      |
/// | `BadOrderField`      | `ErrorBadOrderField`          |
/// | `BadOrderBy`         | `have no such sort parameter` |
/// | `DatasetUnavailable` | `no such file or directory`   |
/// | `DatasetMalformed`   | `can't unpack result json`    |
/// | `BadAccessToken`     | `Bad AccessToken`             |
/// | `EncodeFailed`       | `can't marshal users`         |
///
/// The texts are part of the wire contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoLimit,
    NoOffset,
    NoOrderBy,
    BadOrderField,
    BadOrderBy,
    DatasetUnavailable,
    DatasetMalformed,
    BadAccessToken,
    EncodeFailed,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 9] = [
        ErrorCode::NoLimit,
        ErrorCode::NoOffset,
        ErrorCode::NoOrderBy,
        ErrorCode::BadOrderField,
        ErrorCode::BadOrderBy,
        ErrorCode::DatasetUnavailable,
        ErrorCode::DatasetMalformed,
        ErrorCode::BadAccessToken,
        ErrorCode::EncodeFailed,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NoLimit => "no limit in request",
            ErrorCode::NoOffset => "no offset in request",
            ErrorCode::NoOrderBy => "no order_by in request",
            ErrorCode::BadOrderField => "ErrorBadOrderField",
            ErrorCode::BadOrderBy => "have no such sort parameter",
            ErrorCode::DatasetUnavailable => "no such file or directory",
            ErrorCode::DatasetMalformed => "can't unpack result json",
            ErrorCode::BadAccessToken => "Bad AccessToken",
            ErrorCode::EncodeFailed => "can't marshal users",
        }
    }

    pub fn from_message(message: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == message)
    }
}
