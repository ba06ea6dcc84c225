mod config;
pub mod database;
pub mod memory;
pub mod persistence;

pub use config::{Config, DisplayConfig, LogConfig, RolloverConfig, TrackerConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// A single write against a [`KeyValueStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvOp {
    Set { key: String, value: String },
    Remove { key: String },
}

impl KvOp {
    pub fn key(&self) -> &str {
        match self {
            KvOp::Set { key, .. } | KvOp::Remove { key } => key,
        }
    }
}

/// Durable string-to-string storage.
///
/// Reads of missing keys return `Ok(None)`; only real storage failures are errors.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Apply `ops` in order. Implementations with transactions apply all or none.
    fn apply(&mut self, ops: &[KvOp]) -> Result<(), StorageError> {
        for op in ops {
            match op {
                KvOp::Set { key, value } => self.set(key, value)?,
                KvOp::Remove { key } => self.remove(key)?,
            }
        }
        Ok(())
    }
}

/// Returns the cleanstreak data directory, creating it if needed.
///
/// `CLEANSTREAK_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/cleanstreak`, or `~/.config/cleanstreak-dev` with `CLEANSTREAK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("CLEANSTREAK_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env =
                std::env::var("CLEANSTREAK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("cleanstreak-dev")
            } else {
                base_dir.join("cleanstreak")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
