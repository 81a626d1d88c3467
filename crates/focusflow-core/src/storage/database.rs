//! SQLite-backed snapshot storage.
//!
//! The timer snapshot is kept as a JSON document in a key-value table, which
//! is written after every change and read once at startup.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection};

use super::{data_dir, migrations, SnapshotStore};
use crate::error::{CoreError, Result, StoreError};
use crate::timer::TimerSnapshot;

/// Key under which the snapshot document is stored.
pub const SNAPSHOT_KEY: &str = "timer_snapshot";

/// SQLite database for snapshot storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data dir>/focusflow.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("focusflow.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database file at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        migrations::migrate(&self.conn)?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

impl SnapshotStore for Database {
    fn load(&self) -> Result<Option<TimerSnapshot>> {
        let Some(json) = self.kv_get(SNAPSHOT_KEY)? else {
            return Ok(None);
        };
        let snapshot = serde_json::from_str(&json)
            .map_err(|e| CoreError::Store(StoreError::Corrupt(e.to_string())))?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &TimerSnapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        self.kv_set(SNAPSHOT_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Durations;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_set("test", "again").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "again");
    }

    #[test]
    fn snapshot_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert!(db.load().unwrap().is_none());

        let mut snap = TimerSnapshot::new(Durations::default(), Utc::now());
        snap.attribute(Utc::now().date_naive(), 300, 1);
        db.save(&snap).unwrap();

        let loaded = db.load().unwrap().unwrap();
        assert_eq!(loaded, snap);
    }

    #[test]
    fn corrupt_snapshot_is_reported() {
        let db = Database::open_memory().unwrap();
        db.kv_set(SNAPSHOT_KEY, "{not json").unwrap();
        let err = db.load().unwrap_err();
        assert!(matches!(err, CoreError::Store(StoreError::Corrupt(_))));
    }

    #[test]
    fn file_database_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focusflow.db");
        let snap = TimerSnapshot::new(Durations::default(), Utc::now());
        {
            let db = Database::open_at(&path).unwrap();
            db.save(&snap).unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.load().unwrap().unwrap(), snap);
    }
}
