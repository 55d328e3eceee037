//! Naming-based relationship inference.
//!
//! Used only when explicit relationship extraction found nothing and the
//! legacy option is set: many older databases encode foreign keys purely
//! in column names. The inferencer is a pure function over the in-memory
//! table set; no I/O.
//!
//! Per column, the candidate-stripping patterns are tested in a fixed
//! order and only the FIRST matching pattern is ever tried — a column
//! whose first candidate fails to resolve produces no relationship even
//! if a later pattern would have resolved. This mirrors the established
//! behavior downstream consumers rely on.

use tracing::debug;

use crate::schema::{Relationship, Table};

/// Strip the first matching naming pattern from a lowercased column name.
///
/// Pattern order: `_id` suffix, bare `id` suffix (name longer than two
/// chars), `_fk` suffix, `fk_` prefix. Returns the candidate table name,
/// or `None` when no pattern matches.
fn candidate_from_column(column: &str) -> Option<&str> {
    if let Some(base) = column.strip_suffix("_id") {
        return Some(base);
    }
    if column.len() > 2 {
        if let Some(base) = column.strip_suffix("id") {
            return Some(base);
        }
    }
    if let Some(base) = column.strip_suffix("_fk") {
        return Some(base);
    }
    if let Some(base) = column.strip_prefix("fk_") {
        return Some(base);
    }
    None
}

/// Resolve a candidate name against the table set: exact match, candidate
/// plus "s", candidate minus a trailing "s", candidate with underscores
/// removed — first hit wins. All comparisons are case-insensitive.
fn resolve_candidate<'a>(candidate: &str, tables: &'a [Table]) -> Option<&'a Table> {
    let find = |name: &str| {
        tables
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    };

    if let Some(t) = find(candidate) {
        return Some(t);
    }
    if let Some(t) = find(&format!("{candidate}s")) {
        return Some(t);
    }
    if let Some(stripped) = candidate.strip_suffix('s') {
        if let Some(t) = find(stripped) {
            return Some(t);
        }
    }
    find(&candidate.replace('_', ""))
}

/// The referenced key column of a target table: a column literally named
/// `id` or `<table>_id` when present, defaulting to the literal `"id"`
/// otherwise — even when no such column exists. Suppressing the
/// relationship instead would silently change downstream output, so the
/// historical default stands.
fn referenced_key_column(target: &Table) -> String {
    if let Some(col) = target.column("id") {
        return col.name.clone();
    }
    let table_id = format!("{}_id", target.name.to_lowercase());
    if let Some(col) = target.column(&table_id) {
        return col.name.clone();
    }
    "id".to_string()
}

/// Infer relationships for the whole table set from column naming
/// conventions.
pub fn infer_relationships(tables: &[Table]) -> Vec<Relationship> {
    let mut relationships = Vec::new();

    for table in tables {
        let own_key = format!("{}_id", table.name.to_lowercase());

        for column in &table.columns {
            let col = column.name.to_lowercase();

            // The table's own primary-key-shaped columns are not FKs.
            if col == "id" || col == own_key {
                continue;
            }

            let Some(candidate) = candidate_from_column(&col) else {
                continue;
            };
            let Some(target) = resolve_candidate(candidate, tables) else {
                debug!(
                    table = %table.name,
                    column = %column.name,
                    candidate,
                    "no table resolves the candidate, skipping"
                );
                continue;
            };

            relationships.push(Relationship {
                name: format!("fk_{}_{}", table.name, column.name),
                source_schema: table.schema.clone(),
                source_table: table.name.clone(),
                target_schema: target.schema.clone(),
                target_table: target.name.clone(),
                keys: vec![referenced_key_column(target)],
                foreigns: vec![column.name.clone()],
            });
        }
    }
    relationships
}
