//! Name-pattern inference: zero-I/O classification of a column's semantic
//! type from its name and declared type.
//!
//! A match requires BOTH a name pattern and a compatible declared type;
//! `is_deleted VARCHAR(200)` is not a boolean candidate. Matching is
//! case-insensitive on both name and type. A column matches at most one
//! category per pass; boolean patterns are tested first.

use crate::schema::InferredType;

const BOOLEAN_PREFIXES: &[&str] = &[
    "is_", "has_", "can_", "should_", "will_", "allow_", "enable_", "disable_",
];

const BOOLEAN_SUFFIXES: &[&str] = &[
    "_flag", "_enabled", "_disabled", "_active", "_deleted", "_visible", "_hidden", "_required",
];

const BOOLEAN_NAMES: &[&str] = &[
    "active", "enabled", "disabled", "deleted", "visible", "hidden", "published", "approved",
    "verified", "confirmed",
];

const BOOLEAN_TYPES: &[&str] = &["tinyint", "smallint", "bit", "boolean", "bool", "int2", "int1"];

const GUID_NAMES: &[&str] = &["uuid", "guid"];

const GUID_SUFFIXES: &[&str] = &["_uuid", "_guid"];

const GUID_CONVENTION_NAMES: &[&str] = &[
    "correlation_id",
    "tracking_id",
    "external_id",
    "request_id",
    "session_id",
    "transaction_id",
];

const GUID_TYPES: &[&str] = &[
    "char(36)",
    "varchar(36)",
    "character(36)",
    "uuid",
    "uniqueidentifier",
];

/// Whether a declared type can hide boolean semantics. The comparison
/// ignores case and anything after the base type name, so `tinyint(1)`
/// and `TINYINT UNSIGNED` both qualify.
pub fn is_boolean_compatible_type(declared_type: &str) -> bool {
    let t = declared_type.trim().to_lowercase();
    BOOLEAN_TYPES
        .iter()
        .any(|base| t == *base || t.starts_with(&format!("{base}(")) || t.starts_with(&format!("{base} ")))
}

/// Whether a declared type can hide GUID text. Spaces are stripped so
/// `char (36)` still matches.
pub fn is_guid_compatible_type(declared_type: &str) -> bool {
    let t = declared_type.trim().to_lowercase().replace(' ', "");
    GUID_TYPES.contains(&t.as_str())
}

fn name_matches_boolean(name: &str) -> bool {
    BOOLEAN_PREFIXES.iter().any(|p| name.starts_with(p))
        || BOOLEAN_SUFFIXES.iter().any(|s| name.ends_with(s))
        || BOOLEAN_NAMES.contains(&name)
}

fn name_matches_guid(name: &str) -> bool {
    GUID_NAMES.contains(&name)
        || GUID_SUFFIXES.iter().any(|s| name.ends_with(s))
        || GUID_CONVENTION_NAMES.contains(&name)
}

/// Classify a column from its name and declared type alone.
///
/// Returns `InferredType::Unresolved` when neither category matches;
/// the data-sampling phase may still resolve such columns.
pub fn infer(column_name: &str, declared_type: &str) -> InferredType {
    let name = column_name.trim().to_lowercase();

    if name_matches_boolean(&name) && is_boolean_compatible_type(declared_type) {
        return InferredType::Boolean;
    }
    if name_matches_guid(&name) && is_guid_compatible_type(declared_type) {
        return InferredType::Guid;
    }
    InferredType::Unresolved
}
