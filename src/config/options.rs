//! Extraction options.

use serde::{Deserialize, Serialize};

/// Immutable configuration for one extraction run.
///
/// Constructed once per invocation and read-only thereafter. The flags are
/// independent: data sampling only runs when type inference is also
/// enabled, and legacy relationship inference only fires when explicit
/// relationship extraction found nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOptions {
    /// Restrict extraction to one named schema/catalog.
    pub schema_filter: Option<String>,
    /// Apply name-pattern inference to column semantics.
    pub type_inference: bool,
    /// Verify still-ambiguous columns by sampling user data.
    pub data_sampling: bool,
    /// Append views as read-only tables.
    pub include_views: bool,
    /// Extract explicit relationships.
    pub include_relationships: bool,
    /// Fall back to naming-based relationship inference when no explicit
    /// relationships exist.
    pub legacy_relationship_inference: bool,
    /// Extract user-defined scalar functions.
    pub include_user_defined_functions: bool,
    /// Extract stored procedures.
    pub include_stored_procedures: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            schema_filter: None,
            type_inference: true,
            data_sampling: false,
            include_views: true,
            include_relationships: true,
            legacy_relationship_inference: false,
            include_user_defined_functions: false,
            include_stored_procedures: false,
        }
    }
}

impl ExtractionOptions {
    /// Options for a structure-only run: no inference, no sampling, no
    /// routines.
    pub fn structure_only() -> Self {
        Self {
            type_inference: false,
            data_sampling: false,
            ..Default::default()
        }
    }

    /// Restrict the run to one schema.
    pub fn with_schema_filter(mut self, schema: impl Into<String>) -> Self {
        self.schema_filter = Some(schema.into());
        self
    }
}
