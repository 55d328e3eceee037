//! Error types for the extraction engine.

use thiserror::Error;

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Errors that can occur while opening or using a database connection.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// The underlying driver failed to open the database.
    #[error("failed to open database connection: {0}")]
    OpenFailed(String),

    /// Authentication was rejected by the server.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// A query failed at the driver level.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// A result row did not have the expected shape.
    #[error("unexpected row shape: {0}")]
    RowShape(String),
}

impl From<rusqlite::Error> for ConnectionError {
    fn from(err: rusqlite::Error) -> Self {
        Self::QueryFailed(err.to_string())
    }
}

/// Errors that abort or qualify an extraction run.
///
/// `CatalogQuery` is always fatal: every downstream step needs the
/// structural metadata. `SamplingQuery` is caught by the orchestrator and
/// downgraded to "inference inconclusive" for the affected column.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The connection could not be opened or failed mid-run.
    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// The requested backend has no catalog adapter.
    #[error("unsupported backend: {0}")]
    UnsupportedBackend(String),

    /// A catalog (metadata) query failed.
    #[error("catalog query failed during {stage}: {message}")]
    CatalogQuery {
        /// The extraction stage that issued the query.
        stage: &'static str,
        /// Driver-level failure description.
        message: String,
    },

    /// A data-sampling verification query failed.
    #[error("sampling query failed for {table}.{column}: {message}")]
    SamplingQuery {
        /// Table the sampled column belongs to.
        table: String,
        /// The sampled column.
        column: String,
        /// Driver-level failure description.
        message: String,
    },

    /// The caller's cancellation flag was set.
    #[error("extraction cancelled")]
    Cancelled,
}

impl ExtractError {
    /// Wrap a connection failure as a fatal catalog-query error.
    pub fn catalog(stage: &'static str, err: ConnectionError) -> Self {
        Self::CatalogQuery {
            stage,
            message: err.to_string(),
        }
    }

    /// Wrap a connection failure as a per-column sampling error.
    pub fn sampling(table: impl Into<String>, column: impl Into<String>, err: ConnectionError) -> Self {
        Self::SamplingQuery {
            table: table.into(),
            column: column.into(),
            message: err.to_string(),
        }
    }

    /// Whether this error aborts the whole run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::SamplingQuery { .. })
    }
}
