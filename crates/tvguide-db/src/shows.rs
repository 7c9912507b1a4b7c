//! Show CRUD operations and the schedule query.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

/// A stored show with its schedule fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    /// Store-assigned row id.
    pub show_id: i64,
    /// Display name.
    pub title: String,
    /// Free-text body.
    pub description: String,
    /// Thumbnail image URL (nullable).
    pub thumbnail: Option<String>,
    /// Start time-of-day text (nullable). Shows without one are never scheduled.
    pub start_time: Option<String>,
    /// End time-of-day text (nullable).
    pub end_time: Option<String>,
    /// Last write timestamp (set by the store).
    pub last_update: String,
}

/// Field set for inserting a new show; the store assigns `show_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewShow {
    /// Display name.
    pub title: String,
    /// Free-text body.
    pub description: String,
    /// Thumbnail image URL (nullable).
    pub thumbnail: Option<String>,
    /// Start time-of-day text (nullable).
    pub start_time: Option<String>,
    /// End time-of-day text (nullable).
    pub end_time: Option<String>,
}

/// Inserts a show and returns the assigned `show_id`.
///
/// # Errors
///
/// Returns an error if the database operation fails.
#[allow(clippy::module_name_repetitions)]
pub fn insert_show(conn: &Connection, show: &NewShow) -> Result<i64> {
    conn.execute(
        "INSERT INTO shows (title, description, thumbnail, start_time, end_time, last_update)
         VALUES (?1, ?2, ?3, ?4, ?5, datetime('now'))",
        rusqlite::params![
            show.title,
            show.description,
            show.thumbnail,
            show.start_time,
            show.end_time,
        ],
    )
    .with_context(|| format!("failed to insert show {:?}", show.title))?;

    Ok(conn.last_insert_rowid())
}

/// Updates a show by `show_id`. Returns the number of rows changed.
///
/// # Errors
///
/// Returns an error if the database operation fails.
#[allow(clippy::module_name_repetitions)]
pub fn update_show(conn: &Connection, show: &Show) -> Result<usize> {
    conn.execute(
        "UPDATE shows SET
            title = ?2,
            description = ?3,
            thumbnail = ?4,
            start_time = ?5,
            end_time = ?6,
            last_update = datetime('now')
         WHERE show_id = ?1",
        rusqlite::params![
            show.show_id,
            show.title,
            show.description,
            show.thumbnail,
            show.start_time,
            show.end_time,
        ],
    )
    .with_context(|| format!("failed to update show {}", show.show_id))
}

/// Deletes a show by id. Returns the number of rows deleted.
///
/// # Errors
///
/// Returns an error if the database operation fails.
#[allow(clippy::module_name_repetitions)]
pub fn delete_show(conn: &Connection, show_id: i64) -> Result<usize> {
    conn.execute("DELETE FROM shows WHERE show_id = ?1", [show_id])
        .with_context(|| format!("failed to delete show {show_id}"))
}

/// Loads one show by id. Returns `None` if it does not exist.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[allow(clippy::module_name_repetitions)]
pub fn get_show(conn: &Connection, show_id: i64) -> Result<Option<Show>> {
    conn.query_row(
        "SELECT show_id, title, description, thumbnail, start_time, end_time, last_update
         FROM shows
         WHERE show_id = ?1",
        [show_id],
        map_show_row,
    )
    .optional()
    .with_context(|| format!("failed to load show {show_id}"))
}

/// Loads all shows, ordered by `show_id`.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[allow(clippy::module_name_repetitions)]
pub fn load_shows(conn: &Connection) -> Result<Vec<Show>> {
    let mut stmt = conn
        .prepare(
            "SELECT show_id, title, description, thumbnail, start_time, end_time, last_update
             FROM shows
             ORDER BY show_id",
        )
        .context("failed to prepare shows query")?;

    let rows = stmt
        .query_map([], map_show_row)
        .context("failed to query shows")?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .context("failed to read shows rows")
}

/// Loads all shows with a start time, ordered ascending by `start_time`.
///
/// Ties are broken by `show_id` so retrieval order is stable. Shows with a
/// NULL `start_time` are excluded; the result is unbounded.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[allow(clippy::module_name_repetitions)]
pub fn load_scheduled_shows(conn: &Connection) -> Result<Vec<Show>> {
    let mut stmt = conn
        .prepare(
            "SELECT show_id, title, description, thumbnail, start_time, end_time, last_update
             FROM shows
             WHERE start_time IS NOT NULL
             ORDER BY start_time, show_id",
        )
        .context("failed to prepare scheduled shows query")?;

    let rows = stmt
        .query_map([], map_show_row)
        .context("failed to query scheduled shows")?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .context("failed to read scheduled shows rows")
}

/// Maps a database row to a `Show`.
fn map_show_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Show> {
    Ok(Show {
        show_id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        thumbnail: row.get(3)?,
        start_time: row.get(4)?,
        end_time: row.get(5)?,
        last_update: row.get(6)?,
    })
}
