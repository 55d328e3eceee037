//! Foreign-key style relationships between tables.

use serde::{Deserialize, Serialize};

/// A relationship from a source table to a target (referenced) table.
///
/// `keys` holds the referenced columns on the target table and `foreigns`
/// the referencing columns on the source table. Index `i` of `keys` pairs
/// with index `i` of `foreigns`; for composite keys the order is
/// significant and preserved end-to-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Constraint name (or a synthesized name for inferred relationships).
    pub name: String,
    /// Schema of the referencing table.
    pub source_schema: String,
    /// The referencing table.
    pub source_table: String,
    /// Schema of the referenced table.
    pub target_schema: String,
    /// The referenced table.
    pub target_table: String,
    /// Referenced columns on the target, in constraint order.
    pub keys: Vec<String>,
    /// Referencing columns on the source, paired index-wise with `keys`.
    pub foreigns: Vec<String>,
}

impl Relationship {
    /// Whether the column lists satisfy the structural invariant:
    /// equal length, at least one pair.
    pub fn is_well_formed(&self) -> bool {
        !self.keys.is_empty() && self.keys.len() == self.foreigns.len()
    }

    /// Whether this relationship spans more than one column pair.
    pub fn is_composite(&self) -> bool {
        self.keys.len() > 1
    }
}
