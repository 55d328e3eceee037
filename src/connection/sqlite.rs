//! SQLite connection backed by rusqlite.

use async_trait::async_trait;
use rusqlite::types::ValueRef;
use tokio::sync::Mutex;

use super::{Connection, ConnectionResult, Row, Value};
use crate::error::ConnectionError;

/// A SQLite database connection.
///
/// rusqlite handles are `Send` but not `Sync`; the async mutex serializes
/// access, which matches the engine's one-query-at-a-time model anyway.
pub struct SqliteConnection {
    inner: Mutex<rusqlite::Connection>,
}

impl SqliteConnection {
    /// Open a database file.
    pub fn open(path: &str) -> Result<Self, ConnectionError> {
        let conn = rusqlite::Connection::open(path)
            .map_err(|e| ConnectionError::OpenFailed(e.to_string()))?;
        Ok(Self {
            inner: Mutex::new(conn),
        })
    }

    /// Open a fresh in-memory database.
    pub fn open_in_memory() -> Result<Self, ConnectionError> {
        let conn = rusqlite::Connection::open_in_memory()
            .map_err(|e| ConnectionError::OpenFailed(e.to_string()))?;
        Ok(Self {
            inner: Mutex::new(conn),
        })
    }

    /// Run one or more statements without collecting results. Intended for
    /// setting up fixtures in tests and demos.
    pub async fn execute_batch(&self, sql: &str) -> ConnectionResult<()> {
        let conn = self.inner.lock().await;
        conn.execute_batch(sql)
            .map_err(|e| ConnectionError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl Connection for SqliteConnection {
    async fn query(&self, sql: &str) -> ConnectionResult<Vec<Row>> {
        let conn = self.inner.lock().await;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| ConnectionError::QueryFailed(e.to_string()))?;
        let column_count = stmt.column_count();

        let mut rows = stmt
            .query([])
            .map_err(|e| ConnectionError::QueryFailed(e.to_string()))?;

        let mut out = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| ConnectionError::QueryFailed(e.to_string()))?
        {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value = match row
                    .get_ref(i)
                    .map_err(|e| ConnectionError::RowShape(e.to_string()))?
                {
                    ValueRef::Null => Value::Null,
                    ValueRef::Integer(n) => Value::Integer(n),
                    ValueRef::Real(f) => Value::Real(f),
                    ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
                    // Blobs never appear in catalog output; treat as NULL.
                    ValueRef::Blob(_) => Value::Null,
                };
                values.push(value);
            }
            out.push(Row::new(values));
        }
        Ok(out)
    }
}
