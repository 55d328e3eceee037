//! Backend catalog adapters.
//!
//! Each adapter issues engine-native introspection statements
//! (`information_schema.*`, `sys.*`, `pg_catalog`, SQLite `pragma_*`) and
//! normalizes the results into the shared schema model. The query text is
//! an internal detail of each adapter; only the normalized output shape is
//! guaranteed.
//!
//! Adapters are stateless values behind the [`CatalogAdapter`] trait; the
//! orchestrator obtains one via [`adapter_for`], which returns a typed
//! error for backends without an adapter (Oracle).

pub mod helpers;
mod mysql;
mod postgres;
mod sqlite;
mod sqlserver;

pub use mysql::MySqlCatalog;
pub use postgres::PostgresCatalog;
pub use sqlite::SqliteCatalog;
pub use sqlserver::SqlServerCatalog;

use async_trait::async_trait;

use crate::config::Backend;
use crate::connection::{Connection, ConnectionResult};
use crate::error::ExtractError;
use crate::schema::{
    Column, Index, Relationship, ScalarFunction, StoredProcedure, TableRef,
};

/// The extraction capability set every backend adapter provides.
///
/// All listing methods take the run's single [`Connection`]; calls are
/// sequential, never overlapping. `list_relationships` additionally takes
/// the enumerated table set because some engines (SQLite) expose foreign
/// keys only through per-table pragmas.
#[async_trait]
pub trait CatalogAdapter: Send + Sync + std::fmt::Debug {
    /// The backend this adapter serves.
    fn backend(&self) -> Backend;

    /// Quote an identifier in the engine's syntax.
    fn quote_identifier(&self, ident: &str) -> String;

    /// The quoted, schema-qualified name of a table.
    fn qualified_table(&self, table: &TableRef) -> String {
        if table.schema.is_empty() {
            self.quote_identifier(&table.name)
        } else {
            format!(
                "{}.{}",
                self.quote_identifier(&table.schema),
                self.quote_identifier(&table.name)
            )
        }
    }

    /// SQL returning the distinct non-NULL values of a column. Used by the
    /// boolean sampling analyzer.
    fn distinct_values_sql(&self, table: &TableRef, column: &str) -> String {
        format!(
            "SELECT DISTINCT {col} FROM {table} WHERE {col} IS NOT NULL",
            col = self.quote_identifier(column),
            table = self.qualified_table(table)
        )
    }

    /// SQL sampling up to `limit` non-NULL values of a column. Used by the
    /// GUID sampling analyzer.
    fn sample_values_sql(&self, table: &TableRef, column: &str, limit: u32) -> String {
        format!(
            "SELECT {col} FROM {table} WHERE {col} IS NOT NULL LIMIT {limit}",
            col = self.quote_identifier(column),
            table = self.qualified_table(table)
        )
    }

    /// List base tables, optionally restricted to one schema.
    async fn list_tables(
        &self,
        conn: &dyn Connection,
        filter: Option<&str>,
    ) -> ConnectionResult<Vec<TableRef>>;

    /// List views, optionally restricted to one schema.
    async fn list_views(
        &self,
        conn: &dyn Connection,
        filter: Option<&str>,
    ) -> ConnectionResult<Vec<TableRef>>;

    /// List the columns of a table in catalog order.
    async fn list_columns(
        &self,
        conn: &dyn Connection,
        table: &TableRef,
    ) -> ConnectionResult<Vec<Column>>;

    /// List the indexes of a table, key columns in key order.
    async fn list_indexes(
        &self,
        conn: &dyn Connection,
        table: &TableRef,
    ) -> ConnectionResult<Vec<Index>>;

    /// List explicit foreign-key relationships, one `Relationship` per
    /// constraint with ordered key/foreign column lists.
    async fn list_relationships(
        &self,
        conn: &dyn Connection,
        filter: Option<&str>,
        tables: &[TableRef],
    ) -> ConnectionResult<Vec<Relationship>>;

    /// List user-defined scalar functions.
    async fn list_scalar_functions(
        &self,
        conn: &dyn Connection,
        filter: Option<&str>,
    ) -> ConnectionResult<Vec<ScalarFunction>>;

    /// List stored procedures with their output classification.
    async fn list_stored_procedures(
        &self,
        conn: &dyn Connection,
        filter: Option<&str>,
    ) -> ConnectionResult<Vec<StoredProcedure>>;
}

/// Construct the adapter for a backend kind.
///
/// Oracle (and any future kind without an adapter) yields
/// `ExtractError::UnsupportedBackend` here, at the edge, rather than deep
/// in a call chain.
pub fn adapter_for(backend: Backend) -> Result<Box<dyn CatalogAdapter>, ExtractError> {
    match backend {
        Backend::Postgres => Ok(Box::new(PostgresCatalog)),
        Backend::MySql => Ok(Box::new(MySqlCatalog)),
        Backend::SqlServer => Ok(Box::new(SqlServerCatalog)),
        Backend::Sqlite => Ok(Box::new(SqliteCatalog)),
        Backend::Oracle => Err(ExtractError::UnsupportedBackend(
            "oracle is not supported".to_string(),
        )),
    }
}
