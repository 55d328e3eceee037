//! Data-sampling analyzers: verification queries against user data.
//!
//! These are the only queries the engine issues against rows rather than
//! catalog metadata. They run only for columns the name pass left
//! unresolved, and only when data sampling is enabled.

use tracing::debug;
use uuid::Uuid;

use crate::catalog::CatalogAdapter;
use crate::connection::{Connection, ConnectionResult, Value};
use crate::schema::TableRef;

/// How many values the GUID analyzer samples.
pub const GUID_SAMPLE_LIMIT: u32 = 100;

/// How many valid GUIDs confirmation requires.
pub const GUID_MIN_VALID: usize = 10;

/// Confirm boolean semantics for a column by inspecting its distinct
/// non-NULL values.
///
/// Confirmed iff the distinct set is non-empty and a subset of {0, 1}.
/// An all-NULL column produces an empty set and is inconclusive.
pub async fn confirm_boolean(
    conn: &dyn Connection,
    adapter: &dyn CatalogAdapter,
    table: &TableRef,
    column: &str,
) -> ConnectionResult<bool> {
    let sql = adapter.distinct_values_sql(table, column);
    let rows = conn.query(&sql).await?;

    if rows.is_empty() {
        debug!(table = %table.name, column, "all-NULL column, boolean sampling inconclusive");
        return Ok(false);
    }

    Ok(rows.iter().all(|row| match row.value(0) {
        Some(Value::Integer(n)) => *n == 0 || *n == 1,
        Some(Value::Text(s)) => matches!(s.trim(), "0" | "1"),
        _ => false,
    }))
}

/// Confirm GUID semantics for a column by sampling its values.
///
/// Confirmed iff at least [`GUID_MIN_VALID`] sampled values parse as
/// GUID text AND no sampled value is blank or whitespace-only. A single
/// blank vetoes confirmation regardless of the valid count.
pub async fn confirm_guid(
    conn: &dyn Connection,
    adapter: &dyn CatalogAdapter,
    table: &TableRef,
    column: &str,
) -> ConnectionResult<bool> {
    let sql = adapter.sample_values_sql(table, column, GUID_SAMPLE_LIMIT);
    let rows = conn.query(&sql).await?;

    let mut valid = 0usize;
    for row in &rows {
        let text = row.text_or_empty(0);
        if text.trim().is_empty() {
            debug!(table = %table.name, column, "blank value vetoes GUID confirmation");
            return Ok(false);
        }
        if Uuid::parse_str(text.trim()).is_ok() {
            valid += 1;
        }
    }
    Ok(valid >= GUID_MIN_VALID)
}
