//! Database schema definitions

/// SQL to create the fields table.
///
/// The AUTOINCREMENT rowkey is the record's identity: store-local, monotonic,
/// never reused within a store lifetime. `search_key` is derived at write
/// time and never updated independently of the source columns.
pub const CREATE_FIELDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS fields (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    object_type TEXT NOT NULL,
    field_name TEXT NOT NULL,
    label TEXT NOT NULL,
    field_type TEXT NOT NULL,
    description TEXT NOT NULL,
    search_key TEXT NOT NULL
)
"#;

/// SQL to create the chat sessions table
/// Transcripts are stored as a JSON blob per session
pub const CREATE_SESSIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    messages TEXT NOT NULL
)
"#;

/// SQL to create indexes.
///
/// Search does not use these: matching is a full scan over `search_key` in
/// rowkey order. They only serve point lookups and keep the on-disk layout
/// aligned with the original dataset's shape.
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_fields_field_name ON fields(field_name)",
    "CREATE INDEX IF NOT EXISTS idx_fields_object_type ON fields(object_type)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_FIELDS_TABLE, CREATE_SESSIONS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
