//! SQLite catalog adapter.
//!
//! SQLite has no information_schema; the catalog is `sqlite_master` plus
//! the `pragma_*` table-valued functions. There is a single namespace, so
//! the schema filter is ignored and the schema field stays empty. Column
//! comments and routines do not exist in SQLite.

use async_trait::async_trait;

use super::helpers::escape_literal;
use super::CatalogAdapter;
use crate::config::Backend;
use crate::connection::{Connection, ConnectionResult};
use crate::schema::{
    Column, Index, IndexKind, Relationship, ScalarFunction, StoredProcedure, TableRef,
};

/// Catalog adapter for SQLite.
#[derive(Debug)]
pub struct SqliteCatalog;

impl SqliteCatalog {
    async fn list_master(
        &self,
        conn: &dyn Connection,
        kind: &str,
        as_view: bool,
    ) -> ConnectionResult<Vec<TableRef>> {
        let sql = format!(
            "SELECT name FROM sqlite_master \
             WHERE type = '{kind}' AND name NOT LIKE 'sqlite_%' \
             ORDER BY name"
        );
        let rows = conn.query(&sql).await?;
        Ok(rows
            .iter()
            .map(|r| {
                let mut t = TableRef::new("", r.text_or_empty(0));
                t.is_view = as_view;
                t
            })
            .collect())
    }

    /// Foreign keys of one table. `pragma_foreign_key_list` reports one
    /// row per column pair; `id` groups the pairs of one constraint and
    /// `seq` orders them. SQLite does not name constraints, so a name is
    /// synthesized from the table and constraint id. A NULL `to` column
    /// (FK declared against the implicit rowid key) defaults to `id`.
    async fn table_foreign_keys(
        &self,
        conn: &dyn Connection,
        table: &TableRef,
    ) -> ConnectionResult<Vec<Relationship>> {
        let sql = format!(
            "SELECT id, seq, \"table\", \"from\", \"to\" \
             FROM pragma_foreign_key_list('{t}') \
             ORDER BY id, seq",
            t = escape_literal(&table.name)
        );
        let rows = conn.query(&sql).await?;

        let mut relationships: Vec<(i64, Relationship)> = Vec::new();
        for row in &rows {
            let id = row.integer(0).unwrap_or(0);
            let target_table = row.text_or_empty(2);
            let foreign_column = row.text_or_empty(3);
            let key_column = match row.text(4) {
                Some(name) => name.to_string(),
                None => "id".to_string(),
            };

            match relationships.iter_mut().find(|(rel_id, _)| *rel_id == id) {
                Some((_, rel)) => {
                    rel.keys.push(key_column);
                    rel.foreigns.push(foreign_column);
                }
                None => relationships.push((
                    id,
                    Relationship {
                        name: format!("{}_fk_{id}", table.name),
                        source_schema: String::new(),
                        source_table: table.name.clone(),
                        target_schema: String::new(),
                        target_table,
                        keys: vec![key_column],
                        foreigns: vec![foreign_column],
                    },
                )),
            }
        }
        Ok(relationships.into_iter().map(|(_, rel)| rel).collect())
    }
}

#[async_trait]
impl CatalogAdapter for SqliteCatalog {
    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    async fn list_tables(
        &self,
        conn: &dyn Connection,
        _filter: Option<&str>,
    ) -> ConnectionResult<Vec<TableRef>> {
        self.list_master(conn, "table", false).await
    }

    async fn list_views(
        &self,
        conn: &dyn Connection,
        _filter: Option<&str>,
    ) -> ConnectionResult<Vec<TableRef>> {
        self.list_master(conn, "view", true).await
    }

    async fn list_columns(
        &self,
        conn: &dyn Connection,
        table: &TableRef,
    ) -> ConnectionResult<Vec<Column>> {
        let sql = format!(
            "SELECT name, type, \"notnull\" FROM pragma_table_info('{t}') ORDER BY cid",
            t = escape_literal(&table.name)
        );
        let rows = conn.query(&sql).await?;
        Ok(rows
            .iter()
            .map(|r| Column {
                name: r.text_or_empty(0),
                native_type: r.text_or_empty(1),
                nullable: r.integer(2) == Some(0),
                // SQLite has no column comments.
                comment: String::new(),
                inferred: Default::default(),
            })
            .collect())
    }

    async fn list_indexes(
        &self,
        conn: &dyn Connection,
        table: &TableRef,
    ) -> ConnectionResult<Vec<Index>> {
        let list_sql = format!(
            "SELECT name, \"unique\" FROM pragma_index_list('{t}') \
             WHERE name NOT LIKE 'sqlite_autoindex%' \
             ORDER BY seq",
            t = escape_literal(&table.name)
        );
        let index_rows = conn.query(&list_sql).await?;

        let mut indexes = Vec::new();
        for row in &index_rows {
            let name = row.text_or_empty(0);
            let is_unique = row.integer(1) == Some(1);

            let columns_sql = format!(
                "SELECT name FROM pragma_index_info('{n}') ORDER BY seqno",
                n = escape_literal(&name)
            );
            let column_rows = conn.query(&columns_sql).await?;
            let columns = column_rows.iter().map(|r| r.text_or_empty(0)).collect();

            indexes.push(Index {
                schema: String::new(),
                table: table.name.clone(),
                name,
                columns,
                // SQLite indexes are always btrees.
                kind: if is_unique {
                    IndexKind::Unique
                } else {
                    IndexKind::BTree
                },
            });
        }
        Ok(indexes)
    }

    async fn list_relationships(
        &self,
        conn: &dyn Connection,
        _filter: Option<&str>,
        tables: &[TableRef],
    ) -> ConnectionResult<Vec<Relationship>> {
        let mut relationships = Vec::new();
        for table in tables.iter().filter(|t| !t.is_view) {
            relationships.extend(self.table_foreign_keys(conn, table).await?);
        }
        Ok(relationships)
    }

    async fn list_scalar_functions(
        &self,
        _conn: &dyn Connection,
        _filter: Option<&str>,
    ) -> ConnectionResult<Vec<ScalarFunction>> {
        Ok(Vec::new())
    }

    async fn list_stored_procedures(
        &self,
        _conn: &dyn Connection,
        _filter: Option<&str>,
    ) -> ConnectionResult<Vec<StoredProcedure>> {
        Ok(Vec::new())
    }
}
