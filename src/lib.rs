//! # CDM Navigator
//!
//! A reference-data explorer for Common Domain Model (CDM) field definitions.
//!
//! cdmnav provides:
//! - A durable SQLite-backed store of field definitions with derived search keys
//! - A scan-based substring search engine with offset/limit pagination
//! - Bulk import of replacement datasets from delimited text, with progress reporting
//! - An HTTP API for the explorer and a client for the AI assistant backend

pub mod backend;
pub mod config;
pub mod data;
pub mod field;
pub mod import;
pub mod query;
pub mod server;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use field::{FieldRecord, SearchResult};
pub use query::SearchEngine;
pub use storage::FieldStore;

/// Result type alias for cdmnav operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cdmnav operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The database could not be opened or its schema created.
    /// Fatal to the session; there is no fallback to a memory-only store.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A mutation could not be durably committed. The store's contents
    /// afterwards are unspecified; callers must re-check `count()`.
    #[error("write failed: {0}")]
    WriteFailed(#[source] rusqlite::Error),

    /// A scan or count could not complete. Retry the query from scratch;
    /// offsets are not stable across a failed-and-retried search.
    #[error("query failed: {0}")]
    QueryFailed(#[source] rusqlite::Error),

    #[error("import error: {0}")]
    Import(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
