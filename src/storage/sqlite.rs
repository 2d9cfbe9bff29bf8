//! SQLite storage implementation

use std::path::Path;

use rusqlite::{Connection, Transaction, params};

use super::{DEFAULT_PROGRESS_INTERVAL, schema};
use crate::backend::ChatSession;
use crate::field::FieldRecord;
use crate::{Error, Result};

/// Observer for bulk-insert progress.
///
/// Notified with the running committed count every `progress_interval`
/// records. A side channel for UI feedback only: the store never pauses or
/// applies backpressure based on the observer, and correctness must not
/// depend on it being called.
pub trait ImportObserver {
    fn committed(&mut self, count: usize);
}

impl<F: FnMut(usize)> ImportObserver for F {
    fn committed(&mut self, count: usize) {
        self(count)
    }
}

/// A row as seen by the scan path: the record plus its stored search key.
#[derive(Debug, Clone)]
pub struct StoredField {
    /// Rowkey assigned at insertion; monotonic within a store lifetime
    pub id: i64,
    pub field: FieldRecord,
    /// Derived lowercase key the search engine matches against
    pub search_key: String,
}

/// SQLite-backed store of field definitions.
///
/// Exclusive owner of the backing database. One logical writer at a time:
/// the store guarantees durability of each completed mutation, not mutual
/// exclusion between overlapping mutating calls.
pub struct FieldStore {
    conn: Connection,
    progress_interval: usize,
}

impl FieldStore {
    /// Open a database file (creates schema on first use). Idempotent.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| Error::StorageUnavailable(format!("{}: {}", path.display(), e)))?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::StorageUnavailable(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Override the progress notification cadence (committed records between
    /// observer calls). Values below 1 are clamped to 1.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn
                .execute(stmt, [])
                .map_err(|e| Error::StorageUnavailable(e.to_string()))?;
        }
        Ok(())
    }

    // ========== Field Operations ==========

    /// Remove all field records.
    ///
    /// Not atomic with respect to a subsequent `insert_all`: a reader
    /// overlapping the gap between the two calls can observe an empty or
    /// partially repopulated store. Import paths that need the old and new
    /// datasets never to interleave should use [`FieldStore::replace_all`].
    pub fn clear(&self) -> Result<()> {
        self.conn
            .execute("DELETE FROM fields", [])
            .map_err(Error::WriteFailed)?;
        Ok(())
    }

    /// Append records, computing each record's search key at write time.
    ///
    /// All records land in one transaction: a failure leaves the store as it
    /// was, and an unrelated concurrent reader never observes a partial
    /// batch. The observer fires inside the transaction as records are
    /// staged, which is exactly the cadence an import UI wants.
    pub fn insert_all(
        &mut self,
        fields: &[FieldRecord],
        observer: Option<&mut dyn ImportObserver>,
    ) -> Result<usize> {
        let interval = self.progress_interval;
        let tx = self.conn.transaction().map_err(Error::WriteFailed)?;
        let inserted = insert_within(&tx, fields, interval, observer)?;
        tx.commit().map_err(Error::WriteFailed)?;
        Ok(inserted)
    }

    /// Atomically swap the entire dataset: delete-then-insert in a single
    /// transaction, so no reader can ever observe a half-replaced store.
    pub fn replace_all(
        &mut self,
        fields: &[FieldRecord],
        observer: Option<&mut dyn ImportObserver>,
    ) -> Result<usize> {
        let interval = self.progress_interval;
        let tx = self.conn.transaction().map_err(Error::WriteFailed)?;
        tx.execute("DELETE FROM fields", [])
            .map_err(Error::WriteFailed)?;
        let inserted = insert_within(&tx, fields, interval, observer)?;
        tx.commit().map_err(Error::WriteFailed)?;
        Ok(inserted)
    }

    /// Count field records, reflecting the latest completed mutation.
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM fields", [], |row| row.get(0))
            .map_err(Error::QueryFailed)?;
        Ok(count as usize)
    }

    /// Visit every stored field in rowkey (= insertion) order.
    ///
    /// The search engine's only read path. Row conversion errors propagate;
    /// nothing is skipped silently.
    pub fn scan<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(&StoredField),
    {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, object_type, field_name, label, field_type, description, search_key
                 FROM fields ORDER BY id",
            )
            .map_err(Error::QueryFailed)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(StoredField {
                    id: row.get(0)?,
                    field: FieldRecord {
                        object_type: row.get(1)?,
                        field_name: row.get(2)?,
                        label: row.get(3)?,
                        field_type: row.get(4)?,
                        description: row.get(5)?,
                    },
                    search_key: row.get(6)?,
                })
            })
            .map_err(Error::QueryFailed)?;

        for row in rows {
            let row = row.map_err(Error::QueryFailed)?;
            f(&row);
        }
        Ok(())
    }

    // ========== Session Operations ==========

    /// Insert or replace a chat session transcript
    pub fn save_session(&self, session: &ChatSession) -> Result<()> {
        let messages = serde_json::to_string(&session.messages)?;
        self.conn
            .execute(
                "INSERT OR REPLACE INTO sessions (id, title, created_at, messages)
                 VALUES (?1, ?2, ?3, ?4)",
                params![session.id, session.title, session.created_at, messages],
            )
            .map_err(Error::WriteFailed)?;
        Ok(())
    }

    /// Load a session by id
    pub fn load_session(&self, id: &str) -> Result<Option<ChatSession>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, created_at, messages FROM sessions WHERE id = ?1")
            .map_err(Error::QueryFailed)?;
        let mut rows = stmt
            .query_map([id], row_to_session_parts)
            .map_err(Error::QueryFailed)?;

        match rows.next() {
            Some(row) => {
                let (id, title, created_at, messages) = row.map_err(Error::QueryFailed)?;
                Ok(Some(ChatSession {
                    id,
                    title,
                    created_at,
                    messages: serde_json::from_str(&messages)?,
                }))
            }
            None => Ok(None),
        }
    }

    /// Load all sessions, newest first
    pub fn load_sessions(&self) -> Result<Vec<ChatSession>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, created_at, messages FROM sessions ORDER BY created_at DESC")
            .map_err(Error::QueryFailed)?;
        let rows = stmt
            .query_map([], row_to_session_parts)
            .map_err(Error::QueryFailed)?;

        let mut sessions = Vec::new();
        for row in rows {
            let (id, title, created_at, messages) = row.map_err(Error::QueryFailed)?;
            sessions.push(ChatSession {
                id,
                title,
                created_at,
                messages: serde_json::from_str(&messages)?,
            });
        }
        Ok(sessions)
    }

    /// Delete a session by id
    pub fn delete_session(&self, id: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM sessions WHERE id = ?1", [id])
            .map_err(Error::WriteFailed)?;
        Ok(())
    }

    fn count_sessions(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
            .map_err(Error::QueryFailed)?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            fields: self.count()?,
            sessions: self.count_sessions()?,
        })
    }
}

fn insert_within(
    tx: &Transaction<'_>,
    fields: &[FieldRecord],
    interval: usize,
    mut observer: Option<&mut dyn ImportObserver>,
) -> Result<usize> {
    let mut stmt = tx
        .prepare(
            "INSERT INTO fields (object_type, field_name, label, field_type, description, search_key)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .map_err(Error::WriteFailed)?;

    let mut committed = 0usize;
    for field in fields {
        stmt.execute(params![
            field.object_type,
            field.field_name,
            field.label,
            field.field_type,
            field.description,
            field.search_key(),
        ])
        .map_err(Error::WriteFailed)?;
        committed += 1;
        if committed % interval == 0 {
            if let Some(obs) = observer.as_deref_mut() {
                obs.committed(committed);
            }
        }
    }
    Ok(committed)
}

type SessionParts = (String, String, i64, String);

fn row_to_session_parts(row: &rusqlite::Row) -> rusqlite::Result<SessionParts> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

/// Database statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoreStats {
    pub fields: usize,
    pub sessions: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Store Statistics:")?;
        writeln!(f, "  Fields: {}", self.fields)?;
        writeln!(f, "  Sessions: {}", self.sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ChatMessage, Role};
    use crate::data;

    fn sample_field(name: &str) -> FieldRecord {
        FieldRecord::new("Account", name, name, "Text", "sample description")
    }

    #[test]
    fn test_insert_and_count() {
        let mut store = FieldStore::open_in_memory().unwrap();

        let inserted = store
            .insert_all(&[sample_field("A"), sample_field("B")], None)
            .unwrap();
        assert_eq!(inserted, 2);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_clear_then_count_is_zero() {
        let mut store = FieldStore::open_in_memory().unwrap();
        store.insert_all(&data::initial_fields(), None).unwrap();

        store.clear().unwrap();
        assert_eq!(store.count().unwrap(), 0);

        // clearing an already-empty store is a no-op
        store.clear().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_identical_records_are_distinct() {
        let mut store = FieldStore::open_in_memory().unwrap();
        store
            .insert_all(&[sample_field("Dup"), sample_field("Dup")], None)
            .unwrap();
        assert_eq!(store.count().unwrap(), 2);

        let mut ids = Vec::new();
        store.scan(|row| ids.push(row.id)).unwrap();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_scan_preserves_insertion_order() {
        let mut store = FieldStore::open_in_memory().unwrap();
        let fields: Vec<_> = (0..10).map(|i| sample_field(&format!("F{i}"))).collect();
        store.insert_all(&fields, None).unwrap();

        let mut names = Vec::new();
        store.scan(|row| names.push(row.field.field_name.clone())).unwrap();
        let expected: Vec<_> = fields.iter().map(|f| f.field_name.clone()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_search_key_stored_lowercase() {
        let mut store = FieldStore::open_in_memory().unwrap();
        store
            .insert_all(&[sample_field("SwiftUETRIdentifier")], None)
            .unwrap();

        let mut keys = Vec::new();
        store.scan(|row| keys.push(row.search_key.clone())).unwrap();
        assert!(keys[0].contains("swiftuetridentifier"));
        assert_eq!(keys[0], keys[0].to_lowercase());
    }

    #[test]
    fn test_progress_cadence_every_100() {
        let mut store = FieldStore::open_in_memory().unwrap();
        let fields: Vec<_> = (0..250).map(|i| sample_field(&format!("F{i}"))).collect();

        let mut reported = Vec::new();
        let mut observer = |count: usize| reported.push(count);
        store.insert_all(&fields, Some(&mut observer)).unwrap();

        assert_eq!(reported, vec![100, 200]);
    }

    #[test]
    fn test_progress_monotonic_and_bounded() {
        let mut store = FieldStore::open_in_memory().unwrap().with_progress_interval(7);
        let fields: Vec<_> = (0..100).map(|i| sample_field(&format!("F{i}"))).collect();

        let mut reported = Vec::new();
        let mut observer = |count: usize| reported.push(count);
        store.insert_all(&fields, Some(&mut observer)).unwrap();

        assert!(reported.windows(2).all(|w| w[0] <= w[1]));
        assert!(reported.last().is_none_or(|&last| last <= fields.len()));
    }

    #[test]
    fn test_replace_all_swaps_dataset() {
        let mut store = FieldStore::open_in_memory().unwrap();
        store.insert_all(&data::initial_fields(), None).unwrap();
        assert_eq!(store.count().unwrap(), 14);

        store
            .replace_all(&[sample_field("X"), sample_field("Y")], None)
            .unwrap();
        assert_eq!(store.count().unwrap(), 2);

        let mut names = Vec::new();
        store.scan(|row| names.push(row.field.field_name.clone())).unwrap();
        assert_eq!(names, vec!["X", "Y"]);
    }

    #[test]
    fn test_open_is_idempotent_and_durable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fields.db");

        {
            let mut store = FieldStore::open(&path).unwrap();
            store.insert_all(&data::initial_fields(), None).unwrap();
        }

        let store = FieldStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 14);
    }

    #[test]
    fn test_session_roundtrip() {
        let store = FieldStore::open_in_memory().unwrap();

        let session = ChatSession {
            id: "s1".to_string(),
            title: "What is a TradeState?".to_string(),
            created_at: 1_700_000_000,
            messages: vec![
                ChatMessage {
                    role: Role::User,
                    content: "What is a TradeState?".to_string(),
                },
                ChatMessage {
                    role: Role::Model,
                    content: "TradeState represents the state of a trade.".to_string(),
                },
            ],
        };
        store.save_session(&session).unwrap();

        let loaded = store.load_session("s1").unwrap().unwrap();
        assert_eq!(loaded.title, session.title);
        assert_eq!(loaded.messages.len(), 2);
        assert_eq!(loaded.messages[1].role, Role::Model);

        store.delete_session("s1").unwrap();
        assert!(store.load_session("s1").unwrap().is_none());
        assert_eq!(store.stats().unwrap().sessions, 0);
    }
}
