//! SQLite-backed durable tier.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for the durable tier.
//! - Trigger schema migrations before returning a usable tier.
//!
//! # Invariants
//! - Returned tiers have migrations fully applied; no key is read or
//!   written before bootstrap succeeds.

use super::migrations::apply_migrations;
use super::{StorageResult, StorageTier};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::Instant;

/// Durable key/value tier over one `kv_entries` table.
pub struct SqliteStorage {
    conn: Connection,
}

/// Opens a SQLite-backed tier at `path` and applies pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> StorageResult<SqliteStorage> {
    let started_at = Instant::now();
    info!("event=db_open module=storage status=start mode=file");

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=storage status=error mode=file duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    bootstrap(conn, started_at, "file")
}

/// Opens an in-memory SQLite tier and applies pending migrations.
pub fn open_db_in_memory() -> StorageResult<SqliteStorage> {
    let started_at = Instant::now();
    info!("event=db_open module=storage status=start mode=memory");

    let conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=storage status=error mode=memory duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    bootstrap(conn, started_at, "memory")
}

fn bootstrap(
    mut conn: Connection,
    started_at: Instant,
    mode: &str,
) -> StorageResult<SqliteStorage> {
    match apply_migrations(&mut conn) {
        Ok(()) => {
            info!(
                "event=db_open module=storage status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(SqliteStorage { conn })
        }
        Err(err) => {
            error!(
                "event=db_open module=storage status=error mode={} duration_ms={} error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

impl StorageTier for SqliteStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", params![key])?;
        Ok(())
    }
}
