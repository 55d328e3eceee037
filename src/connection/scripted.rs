//! A scripted connection for tests.
//!
//! Routes incoming SQL to canned responses by substring match and records
//! every query issued, so tests can assert which statements the engine ran
//! (including that it ran none at all for a given stage).

use async_trait::async_trait;
use std::sync::Mutex;

use super::{Connection, ConnectionResult, Row};
use crate::error::ConnectionError;

enum Script {
    Rows(Vec<Row>),
    Fail(String),
}

/// A canned-response [`Connection`] with a query log.
///
/// The first route whose fragment occurs in the SQL (case-insensitive)
/// wins; unmatched queries return an empty result set.
#[derive(Default)]
pub struct ScriptedConnection {
    routes: Vec<(String, Script)>,
    log: Mutex<Vec<String>>,
}

impl ScriptedConnection {
    /// Create an empty scripted connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to queries containing `fragment` with `rows`.
    pub fn on(mut self, fragment: impl Into<String>, rows: Vec<Row>) -> Self {
        self.routes
            .push((fragment.into().to_lowercase(), Script::Rows(rows)));
        self
    }

    /// Fail queries containing `fragment` with a driver-level error.
    pub fn fail_on(mut self, fragment: impl Into<String>, message: impl Into<String>) -> Self {
        self.routes
            .push((fragment.into().to_lowercase(), Script::Fail(message.into())));
        self
    }

    /// All queries issued so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    /// How many issued queries contain `fragment` (case-insensitive).
    pub fn query_count_containing(&self, fragment: &str) -> usize {
        let fragment = fragment.to_lowercase();
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.to_lowercase().contains(&fragment))
            .count()
    }
}

#[async_trait]
impl Connection for ScriptedConnection {
    async fn query(&self, sql: &str) -> ConnectionResult<Vec<Row>> {
        self.log.lock().unwrap().push(sql.to_string());

        let sql_lower = sql.to_lowercase();
        for (fragment, script) in &self.routes {
            if sql_lower.contains(fragment) {
                return match script {
                    Script::Rows(rows) => Ok(rows.clone()),
                    Script::Fail(message) => Err(ConnectionError::QueryFailed(message.clone())),
                };
            }
        }
        Ok(Vec::new())
    }
}
