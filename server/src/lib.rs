//! HTTP search over a people dataset.
//!
//! # Overview
//! A single `GET /` endpoint reads the configured XML dataset, validates the
//! query string, then filters, sorts and windows the records and returns
//! them as a JSON array. Every failure is a JSON `{"error": ...}` envelope
//! whose text is one of `search_core::ErrorCode`.
//!
//! # Design
//! - The dataset is re-read per request. Handlers share only the immutable
//!   `ServerConfig`, so concurrent requests need no locking.
//! - Stages run in a fixed order and the first failure ends the request.

pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod paginate;
pub mod query;
pub mod sort;

use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use search_core::ACCESS_TOKEN_HEADER;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::ServerConfig;
pub use error::SearchError;
pub use paginate::Page;
pub use query::{SearchParams, SearchQuery};

pub type SharedConfig = Arc<ServerConfig>;

pub fn app(config: ServerConfig) -> Router {
    Router::new()
        .route("/", get(search_users))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(config))
}

pub async fn run(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}

async fn search_users(
    State(config): State<SharedConfig>,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
) -> Result<Response, SearchError> {
    let raw = dataset::read(&config.dataset).await?;

    let token = headers
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    if token == Some(config.rejected_token.as_str()) {
        return Err(SearchError::BadAccessToken);
    }

    let query = SearchParams::from_query(raw_query.as_deref().unwrap_or_default()).validate()?;
    let page = search(dataset::decode(&raw)?, &query);
    info!(
        returned = page.users.len(),
        has_more = page.has_more,
        query = %query.query,
        "search served"
    );

    let body = serde_json::to_vec(&page.users)?;
    Ok((StatusCode::OK, [(CONTENT_TYPE, "application/json")], body).into_response())
}

/// Filter, sort and window `users` for an already validated query.
pub fn search(users: Vec<search_core::User>, query: &SearchQuery) -> Page {
    let mut users = filter::filter_users(users, &query.query);
    sort::sort_users(&mut users, query.sort);
    paginate::paginate(users, query.offset, query.limit)
}
