//! Persistence tiers backing the simulated shared backend.
//!
//! # Responsibility
//! - Define the key/value contract both tiers implement.
//! - Fix the namespace keys the rest of the crate reads and writes.
//!
//! # Invariants
//! - Values are opaque strings; callers own the JSON encoding.
//! - A key that was never set reads back as `None`, not an error.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
pub mod migrations;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::{open_db, open_db_in_memory, SqliteStorage};

/// Key holding the JSON-encoded profile array, same in both tiers.
pub const TEACHERS_KEY: &str = "global_teachers_data";
/// Key holding the JSON-encoded array of raw pending form payloads.
pub const SUBMISSIONS_KEY: &str = "teacher_submissions";
/// Key holding the JSON-encoded registered-account array (durable tier).
pub const USERS_KEY: &str = "users";
/// Key holding the JSON-encoded logged-in account (session namespace);
/// absence means logged out.
pub const CURRENT_USER_KEY: &str = "currentUser";

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer error for tier bootstrap and access.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Key/value contract shared by the durable tier, the shared tier, and the
/// session namespace. Mirrors the web-storage shape the original relied on.
pub trait StorageTier {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}
