//! Query engine - scan-based substring search with pagination

pub mod engine;

pub use engine::SearchEngine;
