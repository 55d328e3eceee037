//! PostgreSQL catalog adapter.
//!
//! Structural metadata comes from `information_schema`; index details and
//! column comments need `pg_catalog` (`pg_index`, `pg_am`,
//! `col_description`), which `information_schema` does not expose.

use async_trait::async_trait;

use super::helpers::{
    escape_literal, group_foreign_key_rows, group_index_rows, parse_bool_value,
    parse_nullability, ForeignKeyRow, IndexRow,
};
use super::CatalogAdapter;
use crate::config::Backend;
use crate::connection::{Connection, ConnectionResult};
use crate::schema::{
    Column, Index, Parameter, ProcedureOutput, Relationship, ScalarFunction, StoredProcedure,
    TableRef,
};

/// Catalog adapter for PostgreSQL.
#[derive(Debug)]
pub struct PostgresCatalog;

impl PostgresCatalog {
    /// Schema predicate for a given column reference: either the explicit
    /// filter or "everything but the system schemas".
    fn schema_predicate(column: &str, filter: Option<&str>) -> String {
        match filter {
            Some(schema) => format!("{column} = '{}'", escape_literal(schema)),
            None => format!("{column} NOT IN ('pg_catalog', 'information_schema')"),
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
            "SELECT parameter_name, data_type, ordinal_position, parameter_mode, parameter_default \
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
                    has_default: !r.is_null(4),
                }
            })
            .collect())
    }

    /// List routines of one type. Returns (schema, name, specific_name,
    /// data_type) tuples.
    async fn list_routines(
        &self,
        conn: &dyn Connection,
        filter: Option<&str>,
        routine_type: &str,
    ) -> ConnectionResult<Vec<(String, String, String, String)>> {
        let sql = format!(
            "SELECT routine_schema, routine_name, specific_name, COALESCE(data_type, '') \
             FROM information_schema.routines \
             WHERE routine_type = '{routine_type}' AND {pred} \
             ORDER BY routine_schema, routine_name",
            pred = Self::schema_predicate("routine_schema", filter)
        );
        let rows = conn.query(&sql).await?;
        Ok(rows
            .iter()
            .map(|r| {
                (
                    r.text_or_empty(0),
                    r.text_or_empty(1),
                    r.text_or_empty(2),
                    r.text_or_empty(3),
                )
            })
            .collect())
    }
}

#[async_trait]
impl CatalogAdapter for PostgresCatalog {
    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
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
            "SELECT c.column_name, c.data_type, c.is_nullable, \
                    col_description(format('%I.%I', c.table_schema, c.table_name)::regclass, c.ordinal_position) \
             FROM information_schema.columns c \
             WHERE c.table_schema = '{s}' AND c.table_name = '{t}' \
             ORDER BY c.ordinal_position",
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
            "SELECT i.relname, a.attname, ix.indisunique, am.amname, k.ord \
             FROM pg_catalog.pg_class t \
             JOIN pg_catalog.pg_namespace n ON n.oid = t.relnamespace \
             JOIN pg_catalog.pg_index ix ON ix.indrelid = t.oid \
             JOIN pg_catalog.pg_class i ON i.oid = ix.indexrelid \
             JOIN pg_catalog.pg_am am ON am.oid = i.relam \
             CROSS JOIN LATERAL unnest(ix.indkey) WITH ORDINALITY AS k(attnum, ord) \
             JOIN pg_catalog.pg_attribute a ON a.attrelid = t.oid AND a.attnum = k.attnum \
             WHERE n.nspname = '{s}' AND t.relname = '{t}' \
             ORDER BY i.relname, k.ord",
            s = escape_literal(&table.schema),
            t = escape_literal(&table.name)
        );
        let rows = conn.query(&sql).await?;
        let index_rows = rows
            .iter()
            .map(|r| IndexRow {
                index_name: r.text_or_empty(0),
                column: r.text_or_empty(1),
                is_unique: parse_bool_value(r, 2),
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
            "SELECT tc.constraint_name, tc.table_schema, tc.table_name, kcu.column_name, \
                    ccu.table_schema, ccu.table_name, ccu.column_name, kcu.ordinal_position \
             FROM information_schema.table_constraints tc \
             JOIN information_schema.key_column_usage kcu \
               ON kcu.constraint_schema = tc.constraint_schema \
              AND kcu.constraint_name = tc.constraint_name \
             JOIN information_schema.constraint_column_usage ccu \
               ON ccu.constraint_schema = tc.constraint_schema \
              AND ccu.constraint_name = tc.constraint_name \
             WHERE tc.constraint_type = 'FOREIGN KEY' AND {pred} \
             ORDER BY tc.constraint_name, kcu.ordinal_position",
            pred = Self::schema_predicate("tc.table_schema", filter)
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
        let mut functions = Vec::new();
        for (schema, name, specific_name, return_type) in
            self.list_routines(conn, filter, "FUNCTION").await?
        {
            let parameters = self.list_parameters(conn, &schema, &specific_name).await?;
            functions.push(ScalarFunction {
                name,
                schema: Some(schema),
                parameters,
                return_type,
            });
        }
        Ok(functions)
    }

    async fn list_stored_procedures(
        &self,
        conn: &dyn Connection,
        filter: Option<&str>,
    ) -> ConnectionResult<Vec<StoredProcedure>> {
        let mut procedures = Vec::new();
        for (schema, name, specific_name, _) in
            self.list_routines(conn, filter, "PROCEDURE").await?
        {
            let parameters = self.list_parameters(conn, &schema, &specific_name).await?;
            // No portable result-set description for procedures; OUT/INOUT
            // parameters are the scalar signal.
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
