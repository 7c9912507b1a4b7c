//! Schema version management using `PRAGMA user_version`.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Current schema version.
const CURRENT_VERSION: u32 = 2;

/// Runs database migrations up to `CURRENT_VERSION`.
///
/// # Errors
///
/// Returns an error if any SQL statement fails.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version")?;

    if version < 1 {
        migrate_v1(conn).context("migration to v1 failed")?;
    }
    if version < 2 {
        migrate_v2(conn).context("migration to v2 failed")?;
    }

    conn.pragma_update(None, "user_version", CURRENT_VERSION)
        .context("failed to update user_version")?;

    Ok(())
}

/// Migration to v1: create the `shows` table.
///
/// `start_time`/`end_time` are nullable time-of-day text (`HH:MM` or
/// `HH:MM:SS`); shows without a start time exist but are never scheduled.
fn migrate_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS shows (
            show_id      INTEGER PRIMARY KEY AUTOINCREMENT,
            title        TEXT NOT NULL,
            description  TEXT NOT NULL DEFAULT '',
            thumbnail    TEXT,
            start_time   TEXT,
            end_time     TEXT,
            last_update  TEXT NOT NULL
        );",
    )
    .context("failed to create shows table")?;

    Ok(())
}

/// Migration to v2: index `start_time` for the schedule query.
fn migrate_v2(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_shows_start_time ON shows(start_time);")
        .context("failed to create start_time index")?;

    Ok(())
}
