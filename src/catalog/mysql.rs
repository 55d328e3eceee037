//! MySQL / MariaDB catalog adapter.
//!
//! Everything lives in `information_schema`; a MySQL "schema" is a
//! database, so the default scope is `DATABASE()` when no filter is given.

use async_trait::async_trait;

use super::helpers::{
    escape_literal, group_foreign_key_rows, group_index_rows, parse_nullability, ForeignKeyRow,
    IndexRow,
};
use super::CatalogAdapter;
use crate::config::Backend;
use crate::connection::{Connection, ConnectionResult};
use crate::schema::{
    Column, Index, Parameter, ProcedureOutput, Relationship, ScalarFunction, StoredProcedure,
    TableRef,
};

/// Catalog adapter for MySQL and MariaDB.
#[derive(Debug)]
pub struct MySqlCatalog;

impl MySqlCatalog {
    fn schema_predicate(column: &str, filter: Option<&str>) -> String {
        match filter {
            Some(schema) => format!("{column} = '{}'", escape_literal(schema)),
            None => format!("{column} = DATABASE()"),
        }
    }

    async fn list_relations(
        &self,
        conn: &dyn Connection,
        filter: Option<&str>,
        table_type: &str,
        as_view: bool,
    ) -> ConnectionResult<Vec<TableRef>> {
        let sql = format!(
            "SELECT table_schema, table_name \
             FROM information_schema.tables \
             WHERE table_type = '{table_type}' AND {pred} \
             ORDER BY table_schema, table_name",
            pred = Self::schema_predicate("table_schema", filter)
        );
        let rows = conn.query(&sql).await?;
        Ok(rows
            .iter()
            .map(|r| {
                let mut t = TableRef::new(r.text_or_empty(0), r.text_or_empty(1));
                t.is_view = as_view;
                t
            })
            .collect())
    }

    async fn list_parameters(
        &self,
        conn: &dyn Connection,
        specific_schema: &str,
        specific_name: &str,
    ) -> ConnectionResult<Vec<Parameter>> {
        let sql = format!(
            "SELECT parameter_name, dtd_identifier, ordinal_position, parameter_mode \
             FROM information_schema.parameters \
             WHERE specific_schema = '{s}' AND specific_name = '{n}' AND ordinal_position > 0 \
             ORDER BY ordinal_position",
            s = escape_literal(specific_schema),
            n = escape_literal(specific_name)
        );
        let rows = conn.query(&sql).await?;
        Ok(rows
            .iter()
            .map(|r| {
                let mode = r.text_or_empty(3).to_ascii_uppercase();
                Parameter {
                    name: r.text_or_empty(0),
                    native_type: r.text_or_empty(1),
                    ordinal: r.integer(2).unwrap_or(0) as u32,
                    is_output: mode == "OUT" || mode == "INOUT",
                    // information_schema.parameters has no default marker
                    // in MySQL.
                    has_default: false,
                }
            })
            .collect())
    }
}

#[async_trait]
impl CatalogAdapter for MySqlCatalog {
    fn backend(&self) -> Backend {
        Backend::MySql
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    async fn list_tables(
        &self,
        conn: &dyn Connection,
        filter: Option<&str>,
    ) -> ConnectionResult<Vec<TableRef>> {
        self.list_relations(conn, filter, "BASE TABLE", false).await
    }

    async fn list_views(
        &self,
        conn: &dyn Connection,
        filter: Option<&str>,
    ) -> ConnectionResult<Vec<TableRef>> {
        self.list_relations(conn, filter, "VIEW", true).await
    }

    async fn list_columns(
        &self,
        conn: &dyn Connection,
        table: &TableRef,
    ) -> ConnectionResult<Vec<Column>> {
        let sql = format!(
            "SELECT column_name, column_type, is_nullable, column_comment \
             FROM information_schema.columns \
             WHERE table_schema = '{s}' AND table_name = '{t}' \
             ORDER BY ordinal_position",
            s = escape_literal(&table.schema),
            t = escape_literal(&table.name)
        );
        let rows = conn.query(&sql).await?;
        Ok(rows
            .iter()
            .map(|r| Column {
                name: r.text_or_empty(0),
                native_type: r.text_or_empty(1),
                nullable: parse_nullability(&r.text_or_empty(2)),
                comment: r.text_or_empty(3),
                inferred: Default::default(),
            })
            .collect())
    }

    async fn list_indexes(
        &self,
        conn: &dyn Connection,
        table: &TableRef,
    ) -> ConnectionResult<Vec<Index>> {
        let sql = format!(
            "SELECT index_name, column_name, non_unique, index_type, seq_in_index \
             FROM information_schema.statistics \
             WHERE table_schema = '{s}' AND table_name = '{t}' \
             ORDER BY index_name, seq_in_index",
            s = escape_literal(&table.schema),
            t = escape_literal(&table.name)
        );
        let rows = conn.query(&sql).await?;
        let index_rows = rows
            .iter()
            .map(|r| IndexRow {
                index_name: r.text_or_empty(0),
                column: r.text_or_empty(1),
                // non_unique is inverted relative to the shared model.
                is_unique: r.integer(2) == Some(0),
                type_tag: r.text_or_empty(3),
                ordinal: r.integer(4).unwrap_or(0),
            })
            .collect();
        Ok(group_index_rows(&table.schema, &table.name, index_rows))
    }

    async fn list_relationships(
        &self,
        conn: &dyn Connection,
        filter: Option<&str>,
        _tables: &[TableRef],
    ) -> ConnectionResult<Vec<Relationship>> {
        let sql = format!(
            "SELECT constraint_name, table_schema, table_name, column_name, \
                    referenced_table_schema, referenced_table_name, referenced_column_name, \
                    ordinal_position \
             FROM information_schema.key_column_usage \
             WHERE referenced_table_name IS NOT NULL AND {pred} \
             ORDER BY table_name, constraint_name, ordinal_position",
            pred = Self::schema_predicate("table_schema", filter)
        );
        let rows = conn.query(&sql).await?;
        let fk_rows = rows
            .iter()
            .map(|r| ForeignKeyRow {
                constraint: r.text_or_empty(0),
                source_schema: r.text_or_empty(1),
                source_table: r.text_or_empty(2),
                foreign_column: r.text_or_empty(3),
                target_schema: r.text_or_empty(4),
                target_table: r.text_or_empty(5),
                key_column: r.text_or_empty(6),
                ordinal: r.integer(7).unwrap_or(0),
            })
            .collect();
        Ok(group_foreign_key_rows(fk_rows))
    }

    async fn list_scalar_functions(
        &self,
        conn: &dyn Connection,
        filter: Option<&str>,
    ) -> ConnectionResult<Vec<ScalarFunction>> {
        let sql = format!(
            "SELECT routine_schema, routine_name, COALESCE(dtd_identifier, '') \
             FROM information_schema.routines \
             WHERE routine_type = 'FUNCTION' AND {pred} \
             ORDER BY routine_schema, routine_name",
            pred = Self::schema_predicate("routine_schema", filter)
        );
        let rows = conn.query(&sql).await?;

        let mut functions = Vec::new();
        for row in &rows {
            let schema = row.text_or_empty(0);
            let name = row.text_or_empty(1);
            // MySQL's specific_name equals the routine name.
            let parameters = self.list_parameters(conn, &schema, &name).await?;
            functions.push(ScalarFunction {
                name,
                schema: Some(schema),
                parameters,
                return_type: row.text_or_empty(2),
            });
        }
        Ok(functions)
    }

    async fn list_stored_procedures(
        &self,
        conn: &dyn Connection,
        filter: Option<&str>,
    ) -> ConnectionResult<Vec<StoredProcedure>> {
        let sql = format!(
            "SELECT routine_schema, routine_name \
             FROM information_schema.routines \
             WHERE routine_type = 'PROCEDURE' AND {pred} \
             ORDER BY routine_schema, routine_name",
            pred = Self::schema_predicate("routine_schema", filter)
        );
        let rows = conn.query(&sql).await?;

        let mut procedures = Vec::new();
        for row in &rows {
            let schema = row.text_or_empty(0);
            let name = row.text_or_empty(1);
            let parameters = self.list_parameters(conn, &schema, &name).await?;
            // MySQL has no catalog description of a procedure's result
            // set; OUT/INOUT parameters are the scalar signal.
            let output = if parameters.iter().any(|p| p.is_output) {
                ProcedureOutput::Scalar
            } else {
                ProcedureOutput::None
            };
            procedures.push(StoredProcedure {
                name,
                schema: Some(schema),
                parameters,
                output,
            });
        }
        Ok(procedures)
    }
}
