//! In-memory tabular data: `Value` cells and the `Dataset` container.

use crate::errors::{AppError, AppResult};
use chrono::NaiveDateTime;

/// A single cell value.
///
/// `Missing` is the sentinel for "no valid value" - distinct from zero and
/// from the empty string. Unparseable dates and non-numeric arithmetic
/// operands coerce to `Missing` rather than raising.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Missing,
    Number(f64),
    Text(String),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric view of the cell, `None` for anything non-numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Render the cell as a flat-file field. Missing becomes the empty
    /// field; integral numbers drop the trailing `.0`.
    pub fn to_field(&self) -> String {
        match self {
            Value::Missing => String::new(),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Value::Text(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Hashable identity of the cell, used for exact-duplicate detection.
    pub fn key(&self) -> ValueKey {
        match self {
            Value::Missing => ValueKey::Missing,
            Value::Number(n) => ValueKey::Number(n.to_bits()),
            Value::Text(s) => ValueKey::Text(s.clone()),
            Value::Bool(b) => ValueKey::Bool(*b),
            Value::DateTime(dt) => ValueKey::DateTime(*dt),
        }
    }
}

/// Hashable counterpart of `Value`. Numbers compare by bit pattern so rows
/// containing floats can live in a `HashSet`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Missing,
    Number(u64),
    Text(String),
    Bool(bool),
    DateTime(NaiveDateTime),
}

/// An ordered sequence of rows sharing a common column set.
///
/// Every row holds exactly `columns.len()` cells. Transformation produces a
/// new `Dataset`; rows are never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Column index, or a fatal schema error when the column is absent.
    pub fn require_column(&self, name: &str) -> AppResult<usize> {
        self.column_index(name).ok_or_else(|| AppError::Schema {
            column: name.to_string(),
        })
    }

    /// Append a row; its arity must match the column set.
    pub fn push_row(&mut self, row: Vec<Value>) -> AppResult<()> {
        if row.len() != self.columns.len() {
            return Err(AppError::InvalidData(format!(
                "Row has {} cells, expected {}",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Hashable identity of a full row, for exact-duplicate detection.
    pub fn row_key(row: &[Value]) -> Vec<ValueKey> {
        row.iter().map(Value::key).collect()
    }
}
