//! Domain entities that own their gateways.
//!
//! # Responsibility
//! - Keep in-memory field values for one member or one content row.
//! - Apply business validation before member write-back.
//!
//! # Invariants
//! - Member validation runs on `update()` only; construction and `insert()`
//!   persist values as given.

pub mod content_record;
pub mod member;
