//! The two-phase type-inference pipeline and the naming-based
//! relationship inferencer.
//!
//! Phase one, [`name_patterns`], is pure: it classifies a column from its
//! name and declared type alone, with no I/O. Phase two, [`sampling`],
//! issues verification queries against user data, and only for columns
//! phase one left unresolved. [`relationships`] is the legacy fallback
//! that synthesizes foreign-key relationships from naming conventions
//! when a database declares none.

pub mod name_patterns;
pub mod relationships;
pub mod sampling;
