//! Request shaping, outcome classification and result decoding for the
//! search endpoint.
//!
//! # Design
//! `SearchClient` holds only the base URL and the access token. A call is
//! split into `build_find_users`, which normalizes the request and produces
//! an `HttpRequest`, and `parse_find_users`, which classifies whatever the
//! transport reported. `find_users` glues the two around a `Transport`.
//!
//! The client asks for one record more than the caller wants. Getting that
//! extra record back is how `has_more` is detected, since the success body
//! is a bare array.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::types::{ErrorCode, ErrorEnvelope, SearchRequest, SearchResponse, User, MAX_LIMIT};

/// Header carrying the shared-secret token.
pub const ACCESS_TOKEN_HEADER: &str = "AccessToken";

/// Synchronous, stateless client for the search endpoint.
#[derive(Debug, Clone)]
pub struct SearchClient {
    base_url: String,
    access_token: String,
}

/// A built request together with the normalized parameters it was built
/// from. `parse_find_users` needs both.
#[derive(Debug, Clone)]
pub struct PreparedSearch {
    pub request: HttpRequest,
    pub normalized: SearchRequest,
}

impl SearchClient {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    pub fn build_find_users(&self, request: &SearchRequest) -> Result<PreparedSearch, ApiError> {
        let normalized = normalize(request)?;
        let query = vec![
            ("limit".to_string(), (normalized.limit + 1).to_string()),
            ("offset".to_string(), normalized.offset.to_string()),
            ("query".to_string(), normalized.query.clone()),
            ("order_field".to_string(), normalized.order_field.clone()),
            ("order_by".to_string(), normalized.order_by.to_string()),
        ];
        Ok(PreparedSearch {
            request: HttpRequest {
                url: format!("{}/", self.base_url),
                query,
                headers: vec![(ACCESS_TOKEN_HEADER.to_string(), self.access_token.clone())],
            },
            normalized,
        })
    }

    pub fn parse_find_users(
        &self,
        prepared: &PreparedSearch,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Result<SearchResponse, ApiError> {
        let users = classify(prepared, outcome)?;
        Ok(decode_page(users, prepared.normalized.limit))
    }

    /// Run one search call through `transport`. Performs no retries.
    pub fn find_users<T>(&self, transport: &T, request: &SearchRequest) -> Result<SearchResponse, ApiError>
    where
        T: Transport + ?Sized,
    {
        let prepared = self.build_find_users(request)?;
        debug!(url = %prepared.request.url, query = %prepared.request.describe_query(), "search request");
        let outcome = transport.execute(&prepared.request);
        let result = self.parse_find_users(&prepared, outcome);
        if let Err(err) = &result {
            debug!(error = %err, "search failed");
        }
        result
    }
}

/// Reject requests the server must never see and cap oversized pages.
pub fn normalize(request: &SearchRequest) -> Result<SearchRequest, ApiError> {
    if request.limit <= 0 {
        return Err(ApiError::LimitInvalid);
    }
    if request.offset < 0 {
        return Err(ApiError::OffsetInvalid);
    }
    let mut normalized = request.clone();
    normalized.limit = normalized.limit.min(MAX_LIMIT);
    Ok(normalized)
}

/// Map a transport outcome onto either the decoded user list or exactly one
/// `ApiError`. The first matching rule wins.
pub fn classify(
    prepared: &PreparedSearch,
    outcome: Result<HttpResponse, TransportError>,
) -> Result<Vec<User>, ApiError> {
    let response = match outcome {
        Ok(response) => response,
        Err(TransportError::Timeout) => {
            return Err(ApiError::Timeout(prepared.request.describe_query()))
        }
        Err(TransportError::Other(msg)) => return Err(ApiError::UnknownStatus(msg)),
    };

    match response.status {
        500 => Err(ApiError::ServerFault),
        401 => Err(ApiError::BadAccessToken),
        400 => {
            let envelope: ErrorEnvelope = serde_json::from_str(&response.body)
                .map_err(|e| ApiError::BadEnvelope(e.to_string()))?;
            if envelope.code() == Some(ErrorCode::BadOrderField) {
                Err(ApiError::BadOrderField(prepared.normalized.order_field.clone()))
            } else {
                Err(ApiError::BadRequestGeneric(envelope.error))
            }
        }
        200 => serde_json::from_str(&response.body)
            .map_err(|e| ApiError::BadResultBody(e.to_string())),
        status => Err(ApiError::UnknownStatus(format!("status {status}"))),
    }
}

/// Turn the `limit + 1` records the server sent into a page of `limit`.
fn decode_page(mut users: Vec<User>, limit: i64) -> SearchResponse {
    let has_more = usize::try_from(limit).is_ok_and(|limit| users.len() == limit + 1);
    if has_more {
        users.pop();
    }
    SearchResponse { users, has_more }
}
