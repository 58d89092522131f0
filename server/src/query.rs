//! Validation of raw search parameters.
//!
//! Ordering is resolved here, at the boundary: the rest of the pipeline only
//! ever sees a `Sort`, never the free-text field name.

use tracing::debug;

use crate::error::{Param, SearchError};

/// Query string exactly as received. Every field is optional so that
/// validation, not extraction, decides which error to report.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub query: Option<String>,
    pub order_field: Option<String>,
    pub order_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Id,
    Name,
    Age,
}

impl OrderField {
    /// An empty field name orders by name.
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "Id" => Some(OrderField::Id),
            "" | "Name" => Some(OrderField::Name),
            "Age" => Some(OrderField::Age),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    /// Keep dataset order.
    AsIs,
    By(OrderField, Direction),
}

/// A request that passed validation. `limit` and `offset` may still be
/// negative; pagination copes with any value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub limit: i64,
    pub offset: i64,
    pub query: String,
    pub sort: Sort,
}

impl SearchParams {
    /// Parse a raw query string. When a key repeats, its first value wins.
    /// Broken percent escapes are kept literally, so they fail validation
    /// like any other bad value instead of rejecting the whole request.
    pub fn from_query(raw: &str) -> Self {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw).unwrap_or_else(|err| {
            debug!(error = %err, "undecodable query string");
            Vec::new()
        });

        let mut params = SearchParams::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                "query" => &mut params.query,
                "order_field" => &mut params.order_field,
                "order_by" => &mut params.order_by,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    pub fn validate(self) -> Result<SearchQuery, SearchError> {
        let limit = integer(self.limit.as_deref(), Param::Limit)?;
        let offset = integer(self.offset.as_deref(), Param::Offset)?;
        let order_by = integer(self.order_by.as_deref(), Param::OrderBy)?;
        let sort = resolve_sort(order_by, self.order_field.as_deref().unwrap_or_default())?;
        Ok(SearchQuery {
            limit,
            offset,
            query: self.query.unwrap_or_default(),
            sort,
        })
    }
}

fn integer(raw: Option<&str>, param: Param) -> Result<i64, SearchError> {
    raw.and_then(|value| value.parse().ok())
        .ok_or(SearchError::InvalidParam(param))
}

/// The direction is checked first; the field is only looked at when there
/// is something to sort by.
fn resolve_sort(order_by: i64, field: &str) -> Result<Sort, SearchError> {
    let direction = match order_by {
        0 => return Ok(Sort::AsIs),
        1 => Direction::Asc,
        -1 => Direction::Desc,
        other => return Err(SearchError::BadOrderBy(other)),
    };
    let field =
        OrderField::parse(field).ok_or_else(|| SearchError::BadOrderField(field.to_string()))?;
    Ok(Sort::By(field, direction))
}
