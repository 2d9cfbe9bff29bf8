//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - fields(id, object_type, field_name, label, field_type, description, search_key)
//! - sessions(id, title, created_at, messages)
//!
//! The store is the exclusive owner of the backing database; the search
//! engine reads it only through [`FieldStore::scan`].

pub mod schema;
pub mod sqlite;

pub use sqlite::{FieldStore, ImportObserver, StoreStats, StoredField};

/// How many committed records between progress notifications during bulk
/// insert. A UI-feedback tuning knob, not a correctness constraint.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;
