//! The extraction orchestrator.
//!
//! Owns the run: one connection, sequential catalog queries, the
//! inference pipeline, and assembly of the final [`Schema`]. Catalog
//! failures abort the run with no partial schema; sampling failures are
//! downgraded to "inconclusive" for the affected column only.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::{adapter_for, CatalogAdapter};
use crate::config::{Backend, ExtractionOptions};
use crate::connection::{Connection, SqliteConnection};
use crate::error::{ExtractError, ExtractResult};
use crate::inference::{name_patterns, relationships, sampling};
use crate::schema::{InferredType, Schema, Table, TableRef};

/// A cooperative cancellation handle.
///
/// The orchestrator checks the flag between per-table iterations and
/// before each query batch; a long extraction over many tables is the
/// natural cancellation boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One-run schema extractor: an adapter, the options, and an optional
/// cancellation flag.
#[derive(Debug)]
pub struct Extractor {
    adapter: Box<dyn CatalogAdapter>,
    options: ExtractionOptions,
    cancel: CancelFlag,
}

impl Extractor {
    /// Build an extractor for a backend.
    ///
    /// Fails with `UnsupportedBackend` when the backend has no catalog
    /// adapter (Oracle, by policy).
    pub fn new(backend: Backend, options: ExtractionOptions) -> ExtractResult<Self> {
        Ok(Self {
            adapter: adapter_for(backend)?,
            options,
            cancel: CancelFlag::new(),
        })
    }

    /// Attach a cancellation flag shared with the caller.
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = flag;
        self
    }

    fn check_cancelled(&self) -> ExtractResult<()> {
        if self.cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }
        Ok(())
    }

    /// Run the full extraction against an open connection and return the
    /// assembled schema.
    ///
    /// The connection is used exclusively and sequentially; no
    /// overlapping commands are ever issued on it.
    pub async fn extract(&self, conn: &dyn Connection) -> ExtractResult<Schema> {
        let filter = self.options.schema_filter.as_deref();

        self.check_cancelled()?;
        let mut refs = self
            .adapter
            .list_tables(conn, filter)
            .await
            .map_err(|e| ExtractError::catalog("list_tables", e))?;

        if self.options.include_views {
            let views = self
                .adapter
                .list_views(conn, filter)
                .await
                .map_err(|e| ExtractError::catalog("list_views", e))?;
            refs.extend(views);
        }
        debug!(count = refs.len(), "enumerated tables");

        let mut tables = Vec::with_capacity(refs.len());
        for table_ref in &refs {
            self.check_cancelled()?;
            tables.push(self.extract_table(conn, table_ref).await?);
        }

        let mut relationships = Vec::new();
        if self.options.include_relationships {
            self.check_cancelled()?;
            relationships = self
                .adapter
                .list_relationships(conn, filter, &refs)
                .await
                .map_err(|e| ExtractError::catalog("list_relationships", e))?;

            if relationships.is_empty() && self.options.legacy_relationship_inference {
                warn!("no explicit relationships found, falling back to naming-based inference");
                relationships = relationships::infer_relationships(&tables);
            }
            debug!(count = relationships.len(), "resolved relationships");
        }

        let mut functions = Vec::new();
        if self.options.include_user_defined_functions {
            self.check_cancelled()?;
            functions = self
                .adapter
                .list_scalar_functions(conn, filter)
                .await
                .map_err(|e| ExtractError::catalog("list_scalar_functions", e))?;
        }

        let mut procedures = Vec::new();
        if self.options.include_stored_procedures {
            self.check_cancelled()?;
            procedures = self
                .adapter
                .list_stored_procedures(conn, filter)
                .await
                .map_err(|e| ExtractError::catalog("list_stored_procedures", e))?;
        }

        let mut schema = Schema {
            tables,
            relationships,
            functions,
            procedures,
        };
        schema.recompute_relationship_views();
        Ok(schema)
    }

    /// Extract one table: columns, inference, indexes.
    async fn extract_table(
        &self,
        conn: &dyn Connection,
        table_ref: &TableRef,
    ) -> ExtractResult<Table> {
        let mut columns = self
            .adapter
            .list_columns(conn, table_ref)
            .await
            .map_err(|e| ExtractError::catalog("list_columns", e))?;

        if self.options.type_inference {
            // Name patterns first: free, and they gatekeep the sampling
            // round trips.
            for column in &mut columns {
                column.inferred = name_patterns::infer(&column.name, &column.native_type);
            }

            if self.options.data_sampling {
                for column in &mut columns {
                    if column.inferred != InferredType::Unresolved {
                        continue;
                    }
                    column.inferred = self.sample_column(conn, table_ref, &column.name, &column.native_type).await;
                }
            }
        }

        let indexes = self
            .adapter
            .list_indexes(conn, table_ref)
            .await
            .map_err(|e| ExtractError::catalog("list_indexes", e))?;

        Ok(Table {
            schema: table_ref.schema.clone(),
            name: table_ref.name.clone(),
            is_view: table_ref.is_view,
            columns,
            indexes,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        })
    }

    /// Run the applicable sampling analyzer for one unresolved column.
    ///
    /// A failed sampling query is logged and treated as inconclusive for
    /// this column; it never aborts the run.
    async fn sample_column(
        &self,
        conn: &dyn Connection,
        table_ref: &TableRef,
        column: &str,
        declared_type: &str,
    ) -> InferredType {
        if name_patterns::is_boolean_compatible_type(declared_type) {
            match sampling::confirm_boolean(conn, self.adapter.as_ref(), table_ref, column).await {
                Ok(true) => return InferredType::Boolean,
                Ok(false) => {}
                Err(e) => warn!(
                    table = %table_ref.name,
                    column,
                    error = %e,
                    "boolean sampling failed, leaving column unresolved"
                ),
            }
        } else if name_patterns::is_guid_compatible_type(declared_type) {
            match sampling::confirm_guid(conn, self.adapter.as_ref(), table_ref, column).await {
                Ok(true) => return InferredType::Guid,
                Ok(false) => {}
                Err(e) => warn!(
                    table = %table_ref.name,
                    column,
                    error = %e,
                    "GUID sampling failed, leaving column unresolved"
                ),
            }
        }
        InferredType::Unresolved
    }
}

/// Open a SQLite database and extract its schema in one call.
pub async fn extract_sqlite(path: &str, options: ExtractionOptions) -> ExtractResult<Schema> {
    let conn = SqliteConnection::open(path)?;
    let extractor = Extractor::new(Backend::Sqlite, options)?;
    extractor.extract(&conn).await
}
