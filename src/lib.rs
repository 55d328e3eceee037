//! # schemascan
//!
//! A database schema introspection and type-inference engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Connection (one per run)                │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [catalog adapter]
//! ┌─────────────────────────────────────────────────────────┐
//! │     Tables / Columns / Indexes / Relationships /         │
//! │            Functions / Procedures                        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [name-pattern inference, no I/O]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Boolean / GUID candidates from names+types        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [data sampling, unresolved columns only]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Verified semantics from distinct/sample queries   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [naming-based fallback when no FKs]
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Schema (owned tree)                   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The orchestrator ([`extract::Extractor`]) owns a single connection for
//! the run, sequences the catalog adapter calls, applies the inference
//! pipeline, and returns the assembled [`schema::Schema`]. Backends:
//! PostgreSQL, MySQL, SQL Server, SQLite. Oracle is recognized and
//! declined with a typed error.

pub mod catalog;
pub mod config;
pub mod connection;
pub mod error;
pub mod extract;
pub mod inference;
pub mod schema;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{Backend, ConnectionConfig, ExtractionOptions};
    pub use crate::connection::{Connection, SqliteConnection};
    pub use crate::error::{ConnectionError, ExtractError, ExtractResult};
    pub use crate::extract::{extract_sqlite, CancelFlag, Extractor};
    pub use crate::schema::{
        Column, Index, IndexKind, InferredType, Relationship, Schema, Table,
    };
}
