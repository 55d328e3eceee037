//! The database connection seam.
//!
//! Adapters and analyzers never talk to a driver directly; they issue SQL
//! text through the [`Connection`] trait and consume normalized [`Row`]
//! values. One connection is opened per extraction run and owned
//! exclusively by the orchestrator; all queries on it are sequential.
//!
//! [`SqliteConnection`] is the in-tree driver implementation;
//! [`ScriptedConnection`] is a canned-response double for tests.

mod scripted;
mod sqlite;

pub use scripted::ScriptedConnection;
pub use sqlite::SqliteConnection;

use async_trait::async_trait;

use crate::error::ConnectionError;

/// Result type for connection operations.
pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// A live database connection able to run one query at a time.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Run a query and return all result rows.
    async fn query(&self, sql: &str) -> ConnectionResult<Vec<Row>>;
}

/// A single normalized value from a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Any integer type.
    Integer(i64),
    /// Any floating-point type.
    Real(f64),
    /// Any character type.
    Text(String),
}

impl Value {
    /// Convenience text constructor.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Convenience integer constructor.
    pub fn int(n: i64) -> Self {
        Self::Integer(n)
    }
}

/// One result row as a positional list of values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    /// Build a row from values.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw value at position `i`, if present.
    pub fn value(&self, i: usize) -> Option<&Value> {
        self.values.get(i)
    }

    /// Text at position `i`; `None` for NULL, missing, or non-text values.
    pub fn text(&self, i: usize) -> Option<&str> {
        match self.values.get(i) {
            Some(Value::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Text at position `i`, defaulting to `""` for NULL or missing values.
    /// Integers are rendered as text, since some catalogs report numeric
    /// codes in string-typed columns and vice versa.
    pub fn text_or_empty(&self, i: usize) -> String {
        match self.values.get(i) {
            Some(Value::Text(s)) => s.clone(),
            Some(Value::Integer(n)) => n.to_string(),
            Some(Value::Real(f)) => f.to_string(),
            _ => String::new(),
        }
    }

    /// Integer at position `i`; text digits are parsed, since drivers
    /// disagree on the type of ordinal/flag columns.
    pub fn integer(&self, i: usize) -> Option<i64> {
        match self.values.get(i) {
            Some(Value::Integer(n)) => Some(*n),
            Some(Value::Text(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Whether position `i` is NULL or missing.
    pub fn is_null(&self, i: usize) -> bool {
        matches!(self.values.get(i), Some(Value::Null) | None)
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}
