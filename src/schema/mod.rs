//! The normalized schema model produced by an extraction run.
//!
//! `Schema` is the root of the object tree. It owns tables, the global
//! relationship list, and routine catalogs. The per-table
//! `outgoing`/`incoming` relationship views are derived from the global
//! list and recomputed whenever it changes; they are never mutated
//! independently.

mod relationship;
mod routine;
mod table;

pub use relationship::Relationship;
pub use routine::{Parameter, ProcedureOutput, ResultColumn, ScalarFunction, StoredProcedure};
pub use table::{Column, Index, IndexKind, InferredType, Table, TableRef};

use serde::{Deserialize, Serialize};

/// The fully assembled schema of one database.
///
/// Everything is plain owned data; after `extract` returns, nothing in the
/// tree is mutated again.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Tables (and, when requested, views) in catalog order.
    pub tables: Vec<Table>,
    /// All relationships. Single source of truth for the per-table views.
    pub relationships: Vec<Relationship>,
    /// User-defined scalar functions.
    pub functions: Vec<ScalarFunction>,
    /// Stored procedures.
    pub procedures: Vec<StoredProcedure>,
}

impl Schema {
    /// Look up a table by (schema, name), case-insensitively.
    pub fn table(&self, schema: &str, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| {
            t.schema.eq_ignore_ascii_case(schema) && t.name.eq_ignore_ascii_case(name)
        })
    }

    /// Serialize the schema tree to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Rebuild a schema from its JSON form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Recompute every table's outgoing/incoming relationship views from
    /// the global relationship list.
    ///
    /// Must be called after the global list is replaced; the views hold no
    /// state of their own.
    pub fn recompute_relationship_views(&mut self) {
        for table in &mut self.tables {
            table.outgoing = self
                .relationships
                .iter()
                .filter(|r| {
                    r.source_schema.eq_ignore_ascii_case(&table.schema)
                        && r.source_table.eq_ignore_ascii_case(&table.name)
                })
                .cloned()
                .collect();
            table.incoming = self
                .relationships
                .iter()
                .filter(|r| {
                    r.target_schema.eq_ignore_ascii_case(&table.schema)
                        && r.target_table.eq_ignore_ascii_case(&table.name)
                })
                .cloned()
                .collect();
        }
    }
}
