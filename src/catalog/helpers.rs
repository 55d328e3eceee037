//! Normalization helpers shared by the backend adapters.
//!
//! Catalog systems disagree on how they encode the same facts: nullability
//! arrives as `YES`/`NO` strings or 0/1 bits, index uniqueness as flags or
//! negated flags, foreign keys as one row per column pair. These helpers
//! fold the variants into the shared model.

use crate::connection::{Row, Value};
use crate::schema::{Index, IndexKind, Relationship};

/// Parse the nullability representations the catalogs use:
/// `YES`/`NO`, `Y`/`N`, `TRUE`/`FALSE`, `1`/`0`.
pub fn parse_nullability(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "t" | "1"
    )
}

/// Parse a boolean-ish catalog value at row position `i`: integer 0/1 or
/// one of the textual forms. Drivers disagree on which arrives.
pub fn parse_bool_value(row: &Row, i: usize) -> bool {
    match row.value(i) {
        Some(Value::Integer(n)) => *n != 0,
        Some(Value::Text(s)) => parse_nullability(s),
        _ => false,
    }
}

/// Escape a string literal for embedding in catalog SQL.
pub fn escape_literal(s: &str) -> String {
    s.replace('\'', "''")
}

/// Map an engine's index type tag and uniqueness flag to the shared kind.
/// Uniqueness beats the access-method tag.
pub fn index_kind(type_tag: &str, is_unique: bool) -> IndexKind {
    if is_unique {
        return IndexKind::Unique;
    }
    match type_tag.trim().to_ascii_lowercase().as_str() {
        "btree" | "clustered" | "nonclustered" => IndexKind::BTree,
        "hash" => IndexKind::Hash,
        "fulltext" => IndexKind::FullText,
        _ => IndexKind::Other,
    }
}

/// One index row as the catalogs report it: (index, column, unique,
/// type tag, ordinal).
#[derive(Debug, Clone)]
pub struct IndexRow {
    /// Index name.
    pub index_name: String,
    /// One key column of the index.
    pub column: String,
    /// Uniqueness flag.
    pub is_unique: bool,
    /// Engine-specific access-method or type tag.
    pub type_tag: String,
    /// 1-based position of the column within the index key.
    pub ordinal: i64,
}

/// Group per-column index rows into one `Index` per index name, key
/// columns ordered by ordinal. Index order follows first appearance.
pub fn group_index_rows(schema: &str, table: &str, rows: Vec<IndexRow>) -> Vec<Index> {
    let mut grouped: Vec<(String, Vec<IndexRow>)> = Vec::new();
    for row in rows {
        match grouped.iter_mut().find(|(name, _)| *name == row.index_name) {
            Some((_, group)) => group.push(row),
            None => grouped.push((row.index_name.clone(), vec![row])),
        }
    }

    grouped
        .into_iter()
        .map(|(name, mut group)| {
            group.sort_by_key(|r| r.ordinal);
            let kind = index_kind(&group[0].type_tag, group[0].is_unique);
            Index {
                schema: schema.to_string(),
                table: table.to_string(),
                name,
                columns: group.into_iter().map(|r| r.column).collect(),
                kind,
            }
        })
        .collect()
}

/// One foreign-key row as the catalogs report it: a single column pair of
/// a possibly composite constraint.
#[derive(Debug, Clone)]
pub struct ForeignKeyRow {
    /// Constraint name; the grouping key.
    pub constraint: String,
    /// Schema of the referencing table.
    pub source_schema: String,
    /// The referencing table.
    pub source_table: String,
    /// The referencing column.
    pub foreign_column: String,
    /// Schema of the referenced table.
    pub target_schema: String,
    /// The referenced table.
    pub target_table: String,
    /// The referenced column.
    pub key_column: String,
    /// 1-based ordinal of this pair within the constraint.
    pub ordinal: i64,
}

/// Group per-column foreign-key rows into one `Relationship` per
/// constraint. Grouping key is (source table, constraint name); within a
/// constraint the column pairs keep ordinal order. Constraint order
/// follows first appearance.
pub fn group_foreign_key_rows(rows: Vec<ForeignKeyRow>) -> Vec<Relationship> {
    let mut grouped: Vec<((String, String, String), Vec<ForeignKeyRow>)> = Vec::new();
    for row in rows {
        let key = (
            row.source_schema.clone(),
            row.source_table.clone(),
            row.constraint.clone(),
        );
        match grouped.iter_mut().find(|(k, _)| *k == key) {
            Some((_, group)) => group.push(row),
            None => grouped.push((key, vec![row])),
        }
    }

    grouped
        .into_iter()
        .map(|(_, mut group)| {
            group.sort_by_key(|r| r.ordinal);
            let first = &group[0];
            let mut rel = Relationship {
                name: first.constraint.clone(),
                source_schema: first.source_schema.clone(),
                source_table: first.source_table.clone(),
                target_schema: first.target_schema.clone(),
                target_table: first.target_table.clone(),
                keys: Vec::with_capacity(group.len()),
                foreigns: Vec::with_capacity(group.len()),
            };
            for row in group {
                rel.keys.push(row.key_column);
                rel.foreigns.push(row.foreign_column);
            }
            rel
        })
        .collect()
}
