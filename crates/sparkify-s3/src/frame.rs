//! [`Frame`] — rows of JSON objects with a combined column list.

use serde_json::{Map, Value};

use crate::{Error, Result};

static NULL: Value = Value::Null;

/// An in-memory table built from newline-delimited JSON.
///
/// Columns are the union of every row's keys, in first-seen order. A row
/// that lacks a column reads as `null` for it. Row indices are positions in
/// the combined row list, contiguous from zero across concatenated frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
  columns: Vec<String>,
  rows:    Vec<Map<String, Value>>,
}

impl Frame {
  /// Parse one object body. Blank lines are skipped; every other line must
  /// be a JSON object. `key` only labels errors.
  pub fn from_ndjson(key: &str, body: &[u8]) -> Result<Self> {
    let mut frame = Self::default();

    for (n, line) in body.split(|b| *b == b'\n').enumerate() {
      if line.iter().all(u8::is_ascii_whitespace) {
        continue;
      }
      let row: Map<String, Value> =
        serde_json::from_slice(line).map_err(|source| Error::MalformedLine {
          key: key.to_owned(),
          line: n + 1,
          source,
        })?;
      frame.push(row);
    }

    Ok(frame)
  }

  /// Stack `frames` in order.
  pub fn concat(frames: impl IntoIterator<Item = Frame>) -> Self {
    let mut combined = Self::default();
    for frame in frames {
      for row in frame.rows {
        combined.push(row);
      }
    }
    combined
  }

  fn push(&mut self, row: Map<String, Value>) {
    for key in row.keys() {
      if !self.columns.iter().any(|c| c == key) {
        self.columns.push(key.clone());
      }
    }
    self.rows.push(row);
  }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  pub fn columns(&self) -> &[String] { &self.columns }

  pub fn rows(&self) -> &[Map<String, Value>] { &self.rows }

  pub fn row(&self, index: usize) -> Option<&Map<String, Value>> {
    self.rows.get(index)
  }

  /// Every row's value for `name`, `null` where the row lacks it. `None` if
  /// no row has the column.
  pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
    if !self.columns.iter().any(|c| c == name) {
      return None;
    }
    Some(
      self
        .rows
        .iter()
        .map(|row| row.get(name).unwrap_or(&NULL))
        .collect(),
    )
  }
}
