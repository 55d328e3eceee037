//! SQL Server catalog adapter.
//!
//! Uses the `sys.*` catalog views rather than `INFORMATION_SCHEMA`: the
//! latter loses index metadata and extended properties. Nullability
//! arrives as a 0/1 bit, index ordering as `key_ordinal`, and the index
//! kind as `type_desc`. Tabular procedure output is detected through
//! `sys.dm_exec_describe_first_result_set_for_object`.

use async_trait::async_trait;

use super::helpers::{
    escape_literal, group_foreign_key_rows, group_index_rows, parse_bool_value, ForeignKeyRow,
    IndexRow,
};
use super::CatalogAdapter;
use crate::config::Backend;
use crate::connection::{Connection, ConnectionResult};
use crate::schema::{
    Column, Index, Parameter, ProcedureOutput, Relationship, ResultColumn, ScalarFunction,
    StoredProcedure, TableRef,
};

/// Catalog adapter for Microsoft SQL Server.
#[derive(Debug)]
pub struct SqlServerCatalog;

impl SqlServerCatalog {
    fn schema_predicate(column: &str, filter: Option<&str>) -> String {
        match filter {
            Some(schema) => format!("{column} = '{}'", escape_literal(schema)),
            None => format!("{column} <> 'sys'"),
        }
    }

    /// OBJECT_ID argument for a table: the unquoted two-part name.
    fn object_name(table: &TableRef) -> String {
        escape_literal(&format!("{}.{}", table.schema, table.name))
    }

    async fn list_relations(
        &self,
        conn: &dyn Connection,
        filter: Option<&str>,
        catalog_view: &str,
        as_view: bool,
    ) -> ConnectionResult<Vec<TableRef>> {
        let sql = format!(
            "SELECT s.name, o.name \
             FROM sys.{catalog_view} o \
             JOIN sys.schemas s ON s.schema_id = o.schema_id \
             WHERE {pred} \
             ORDER BY s.name, o.name",
            pred = Self::schema_predicate("s.name", filter)
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
        object_id: i64,
    ) -> ConnectionResult<Vec<Parameter>> {
        let sql = format!(
            "SELECT p.name, ty.name, p.parameter_id, p.is_output, p.has_default_value \
             FROM sys.parameters p \
             JOIN sys.types ty ON ty.user_type_id = p.user_type_id \
             WHERE p.object_id = {object_id} AND p.parameter_id > 0 \
             ORDER BY p.parameter_id"
        );
        let rows = conn.query(&sql).await?;
        Ok(rows
            .iter()
            .map(|r| Parameter {
                name: r.text_or_empty(0).trim_start_matches('@').to_string(),
                native_type: r.text_or_empty(1),
                ordinal: r.integer(2).unwrap_or(0) as u32,
                is_output: parse_bool_value(r, 3),
                has_default: parse_bool_value(r, 4),
            })
            .collect())
    }

    /// The declared return type of a scalar function: parameter_id 0.
    async fn return_type(&self, conn: &dyn Connection, object_id: i64) -> ConnectionResult<String> {
        let sql = format!(
            "SELECT ty.name \
             FROM sys.parameters p \
             JOIN sys.types ty ON ty.user_type_id = p.user_type_id \
             WHERE p.object_id = {object_id} AND p.parameter_id = 0"
        );
        let rows = conn.query(&sql).await?;
        Ok(rows.first().map(|r| r.text_or_empty(0)).unwrap_or_default())
    }

    /// Columns of a procedure's first result set, when it has one.
    async fn result_set_columns(
        &self,
        conn: &dyn Connection,
        schema: &str,
        name: &str,
    ) -> ConnectionResult<Vec<ResultColumn>> {
        let sql = format!(
            "SELECT name, system_type_name \
             FROM sys.dm_exec_describe_first_result_set_for_object(OBJECT_ID('{object}'), NULL) \
             WHERE name IS NOT NULL \
             ORDER BY column_ordinal",
            object = escape_literal(&format!("{schema}.{name}"))
        );
        let rows = conn.query(&sql).await?;
        Ok(rows
            .iter()
            .map(|r| ResultColumn {
                name: r.text_or_empty(0),
                native_type: r.text_or_empty(1),
            })
            .collect())
    }
}

#[async_trait]
impl CatalogAdapter for SqlServerCatalog {
    fn backend(&self) -> Backend {
        Backend::SqlServer
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("[{}]", ident.replace(']', "]]"))
    }

    fn sample_values_sql(&self, table: &TableRef, column: &str, limit: u32) -> String {
        format!(
            "SELECT TOP {limit} {col} FROM {table} WHERE {col} IS NOT NULL",
            col = self.quote_identifier(column),
            table = self.qualified_table(table)
        )
    }

    async fn list_tables(
        &self,
        conn: &dyn Connection,
        filter: Option<&str>,
    ) -> ConnectionResult<Vec<TableRef>> {
        self.list_relations(conn, filter, "tables", false).await
    }

    async fn list_views(
        &self,
        conn: &dyn Connection,
        filter: Option<&str>,
    ) -> ConnectionResult<Vec<TableRef>> {
        self.list_relations(conn, filter, "views", true).await
    }

    async fn list_columns(
        &self,
        conn: &dyn Connection,
        table: &TableRef,
    ) -> ConnectionResult<Vec<Column>> {
        let sql = format!(
            "SELECT c.name, ty.name, c.is_nullable, CAST(ep.value AS nvarchar(4000)) \
             FROM sys.columns c \
             JOIN sys.types ty ON ty.user_type_id = c.user_type_id \
             LEFT JOIN sys.extended_properties ep \
               ON ep.major_id = c.object_id AND ep.minor_id = c.column_id \
              AND ep.class = 1 AND ep.name = 'MS_Description' \
             WHERE c.object_id = OBJECT_ID('{object}') \
             ORDER BY c.column_id",
            object = Self::object_name(table)
        );
        let rows = conn.query(&sql).await?;
        Ok(rows
            .iter()
            .map(|r| Column {
                name: r.text_or_empty(0),
                native_type: r.text_or_empty(1),
                nullable: parse_bool_value(r, 2),
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
            "SELECT i.name, col.name, i.is_unique, i.type_desc, ic.key_ordinal \
             FROM sys.indexes i \
             JOIN sys.index_columns ic \
               ON ic.object_id = i.object_id AND ic.index_id = i.index_id \
             JOIN sys.columns col \
               ON col.object_id = ic.object_id AND col.column_id = ic.column_id \
             WHERE i.object_id = OBJECT_ID('{object}') \
               AND i.name IS NOT NULL AND ic.key_ordinal > 0 \
             ORDER BY i.name, ic.key_ordinal",
            object = Self::object_name(table)
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
            "SELECT fk.name, ss.name, st.name, sc.name, ts.name, tt.name, tc.name, \
                    fkc.constraint_column_id \
             FROM sys.foreign_keys fk \
             JOIN sys.foreign_key_columns fkc ON fkc.constraint_object_id = fk.object_id \
             JOIN sys.tables st ON st.object_id = fk.parent_object_id \
             JOIN sys.schemas ss ON ss.schema_id = st.schema_id \
             JOIN sys.columns sc \
               ON sc.object_id = fkc.parent_object_id AND sc.column_id = fkc.parent_column_id \
             JOIN sys.tables tt ON tt.object_id = fk.referenced_object_id \
             JOIN sys.schemas ts ON ts.schema_id = tt.schema_id \
             JOIN sys.columns tc \
               ON tc.object_id = fkc.referenced_object_id \
              AND tc.column_id = fkc.referenced_column_id \
             WHERE {pred} \
             ORDER BY fk.name, fkc.constraint_column_id",
            pred = Self::schema_predicate("ss.name", filter)
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
            "SELECT s.name, o.name, o.object_id \
             FROM sys.objects o \
             JOIN sys.schemas s ON s.schema_id = o.schema_id \
             WHERE o.type = 'FN' AND {pred} \
             ORDER BY s.name, o.name",
            pred = Self::schema_predicate("s.name", filter)
        );
        let rows = conn.query(&sql).await?;

        let mut functions = Vec::new();
        for row in &rows {
            let object_id = row.integer(2).unwrap_or(0);
            functions.push(ScalarFunction {
                name: row.text_or_empty(1),
                schema: Some(row.text_or_empty(0)),
                parameters: self.list_parameters(conn, object_id).await?,
                return_type: self.return_type(conn, object_id).await?,
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
            "SELECT s.name, p.name, p.object_id \
             FROM sys.procedures p \
             JOIN sys.schemas s ON s.schema_id = p.schema_id \
             WHERE {pred} \
             ORDER BY s.name, p.name",
            pred = Self::schema_predicate("s.name", filter)
        );
        let rows = conn.query(&sql).await?;

        let mut procedures = Vec::new();
        for row in &rows {
            let schema = row.text_or_empty(0);
            let name = row.text_or_empty(1);
            let object_id = row.integer(2).unwrap_or(0);
            let parameters = self.list_parameters(conn, object_id).await?;

            let result_columns = self.result_set_columns(conn, &schema, &name).await?;
            let output = if !result_columns.is_empty() {
                ProcedureOutput::Tabular(result_columns)
            } else if parameters.iter().any(|p| p.is_output) {
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
