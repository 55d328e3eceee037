//! Tables, columns and indexes.

use serde::{Deserialize, Serialize};

use super::Relationship;

/// A lightweight (schema, name) reference to a table, as returned by the
/// table-listing catalog queries before columns are fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    /// Owning schema. Empty for single-namespace engines (SQLite).
    pub schema: String,
    /// Table name.
    pub name: String,
    /// Whether this is a view appended as a read-only table.
    pub is_view: bool,
}

impl TableRef {
    /// Create a table reference.
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            is_view: false,
        }
    }

    /// Create a view reference.
    pub fn view(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            is_view: true,
        }
    }
}

/// A table (or view) with its columns, indexes and derived relationship views.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Owning schema. Empty for single-namespace engines.
    pub schema: String,
    /// Table name.
    pub name: String,
    /// True when this entry is a view included as a read-only table.
    pub is_view: bool,
    /// Columns in catalog order.
    pub columns: Vec<Column>,
    /// Indexes on this table.
    pub indexes: Vec<Index>,
    /// Relationships where this table is the source. Derived from
    /// `Schema::relationships`; recomputed, never edited directly.
    pub outgoing: Vec<Relationship>,
    /// Relationships where this table is the target. Derived, like
    /// `outgoing`.
    pub incoming: Vec<Relationship>,
}

impl Table {
    /// Look up a column by name, case-insensitively.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// Semantic type refinement produced by the inference pipeline.
///
/// Set at most once per run. A single enum (rather than independent
/// boolean/GUID flags) makes the contradictory "both" state
/// unrepresentable; when a column name matches both pattern families the
/// boolean pass wins because it runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InferredType {
    /// No inference made (or sampling was inconclusive).
    #[default]
    Unresolved,
    /// The column holds boolean semantics behind an integer type.
    Boolean,
    /// The column holds GUID text behind a fixed-length string type.
    Guid,
}

/// A column as reported by the catalog, plus its inferred semantic type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Declared native type string, as the engine reports it.
    pub native_type: String,
    /// Whether NULL is allowed.
    pub nullable: bool,
    /// Free-text comment; empty when the engine has none.
    pub comment: String,
    /// Result of the type-inference pipeline.
    pub inferred: InferredType,
}

impl Column {
    /// Create a column with no comment and no inference.
    pub fn new(name: impl Into<String>, native_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            native_type: native_type.into(),
            nullable,
            comment: String::new(),
            inferred: InferredType::Unresolved,
        }
    }
}

/// Normalized index type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IndexKind {
    /// Unique index or unique constraint.
    Unique,
    /// Plain btree (the default for most engines).
    #[default]
    BTree,
    /// Hash index.
    Hash,
    /// Full-text index.
    FullText,
    /// Anything else (GIN, spatial, clustered columnstore, ...).
    Other,
}

/// An index with its key columns in key order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Index {
    /// Owning schema.
    pub schema: String,
    /// Table the index belongs to.
    pub table: String,
    /// Index name.
    pub name: String,
    /// Key columns, ordered by ordinal/sequence position.
    pub columns: Vec<String>,
    /// Normalized type tag.
    pub kind: IndexKind,
}
