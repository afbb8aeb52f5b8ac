//! Persisted data shapes and validated SQL identifiers.
//!
//! # Responsibility
//! - Define row structures exchanged with gateways and the finder.
//! - Define the privilege enumeration and its storage ordinals.
//! - Build table names only from validated components.
//!
//! # Invariants
//! - `Grant` ordinals are storage-compatible: ADMIN=0, SUB_ADMIN=1, USER=2.
//! - Dates are stored as `YYYYMMDD` text.

pub mod grant;
pub mod row;
pub mod table;

/// Storage format for calendar dates.
pub const DATE_FORMAT: &str = "%Y%m%d";
