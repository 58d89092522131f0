//! Loading person records from the XML dataset.
//!
//! The file is read and decoded on every request; records are never cached.
//! Rows are `<row>` children of the document element. Text inside a field is
//! kept verbatim, surrounding whitespace included. Unknown fields are skipped
//! and missing ones stay empty or zero.

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use search_core::User;
use thiserror::Error;

use crate::error::SearchError;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error("field `{field}` is not an integer: {value:?}")]
    NotAnInteger { field: &'static str, value: String },

    #[error("document ends inside an element")]
    Truncated,
}

#[derive(Debug, Default)]
struct Row {
    id: i64,
    age: i64,
    first_name: String,
    last_name: String,
    about: String,
    gender: String,
}

impl Row {
    fn set(&mut self, field: &[u8], value: String) -> Result<(), DatasetError> {
        match field {
            b"id" => self.id = integer("id", &value)?,
            b"age" => self.age = integer("age", &value)?,
            b"first_name" => self.first_name = value,
            b"last_name" => self.last_name = value,
            b"about" => self.about = value,
            b"gender" => self.gender = value,
            _ => {}
        }
        Ok(())
    }
}

impl From<Row> for User {
    fn from(row: Row) -> Self {
        User {
            id: row.id,
            name: format!("{} {}", row.first_name, row.last_name),
            age: row.age,
            about: row.about,
            gender: row.gender,
        }
    }
}

/// An empty element is zero; anything else must parse once trimmed.
fn integer(field: &'static str, value: &str) -> Result<i64, DatasetError> {
    if value.is_empty() {
        return Ok(0);
    }
    value
        .trim()
        .parse()
        .map_err(|_| DatasetError::NotAnInteger {
            field,
            value: value.to_string(),
        })
}

pub async fn read(path: &Path) -> Result<Vec<u8>, SearchError> {
    tokio::fs::read(path)
        .await
        .map_err(SearchError::DatasetUnavailable)
}

/// Decode `<root><row>…</row>…</root>` into users, in file order.
pub fn decode(bytes: &[u8]) -> Result<Vec<User>, DatasetError> {
    let text = std::str::from_utf8(bytes)?;
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    let mut users = Vec::new();
    let mut row: Option<Row> = None;
    let mut field: Option<Vec<u8>> = None;
    let mut value = String::new();
    // 1 = document element, 2 = row, 3 = field
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                depth += 1;
                if depth == 2 && start.local_name().as_ref() == b"row" {
                    row = Some(Row::default());
                } else if depth == 3 && row.is_some() {
                    field = Some(start.local_name().as_ref().to_vec());
                    value.clear();
                }
            }
            Event::Empty(empty) => {
                if depth == 1 && empty.local_name().as_ref() == b"row" {
                    users.push(User::from(Row::default()));
                } else if depth == 2 {
                    if let Some(row) = row.as_mut() {
                        row.set(empty.local_name().as_ref(), String::new())?;
                    }
                }
            }
            Event::Text(text) if depth == 3 && field.is_some() => {
                value.push_str(&text.unescape()?);
            }
            Event::CData(data) if depth == 3 && field.is_some() => {
                value.push_str(std::str::from_utf8(&data)?);
            }
            Event::End(_) => {
                if depth == 3 {
                    if let (Some(row), Some(name)) = (row.as_mut(), field.take()) {
                        row.set(&name, std::mem::take(&mut value))?;
                    }
                } else if depth == 2 {
                    if let Some(row) = row.take() {
                        users.push(User::from(row));
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof if depth == 0 => break,
            Event::Eof => return Err(DatasetError::Truncated),
            _ => {}
        }
    }
    Ok(users)
}
