//! Client core and shared wire types for the people search service.
//!
//! # Overview
//! Builds the search `HttpRequest`, lets a `Transport` execute it, and
//! classifies the outcome into either a `SearchResponse` or exactly one
//! `ApiError`. The server crate reuses `types` so both sides agree on the
//! record shape and the error envelope codes.
//!
//! # Design
//! - `SearchClient` is stateless: base URL and access token only.
//! - `build_find_users` / `parse_find_users` keep the I/O boundary explicit;
//!   `find_users` runs both around a `Transport`.
//! - `UreqTransport` is the blocking transport used in production and tests.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{PreparedSearch, SearchClient, ACCESS_TOKEN_HEADER};
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse, Transport, TransportError};
pub use transport::UreqTransport;
pub use types::{ErrorCode, ErrorEnvelope, SearchRequest, SearchResponse, User, MAX_LIMIT};
