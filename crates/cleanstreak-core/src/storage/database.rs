//! SQLite-backed key-value storage.
//!
//! A single `kv` table holds every tracker key (`addiction`, `startDate`,
//! `goalDays`, and the per-day `addiction_<date>` / `checked_<date>` pairs).

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, KeyValueStore, KvOp};
use crate::error::StorageError;

/// SQLite database for tracker state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/cleanstreak.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(data_dir()?.join("cleanstreak.db"))
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn apply(&mut self, ops: &[KvOp]) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        for op in ops {
            match op {
                KvOp::Set { key, value } => {
                    tx.execute(
                        "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                        params![key, value],
                    )?;
                }
                KvOp::Remove { key } => {
                    tx.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let mut db = Database::open_memory().unwrap();
        assert!(db.get("test").unwrap().is_none());
        db.set("test", "hello").unwrap();
        assert_eq!(db.get("test").unwrap().unwrap(), "hello");
        db.set("test", "again").unwrap();
        assert_eq!(db.get("test").unwrap().unwrap(), "again");
        db.remove("test").unwrap();
        assert!(db.get("test").unwrap().is_none());
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let mut db = Database::open_memory().unwrap();
        db.remove("never-written").unwrap();
    }

    #[test]
    fn apply_runs_sets_and_removes_in_order() {
        let mut db = Database::open_memory().unwrap();
        db.set("gone", "x").unwrap();
        db.apply(&[
            KvOp::Set {
                key: "a".into(),
                value: "1".into(),
            },
            KvOp::Remove { key: "gone".into() },
            KvOp::Set {
                key: "a".into(),
                value: "2".into(),
            },
        ])
        .unwrap();
        assert_eq!(db.get("a").unwrap().as_deref(), Some("2"));
        assert!(db.get("gone").unwrap().is_none());
    }

    #[test]
    fn reopening_a_file_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streak.db");
        {
            let mut db = Database::open_at(&path).unwrap();
            db.set("addiction", "\"smoking\"").unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.get("addiction").unwrap().as_deref(), Some("\"smoking\""));
    }
}
