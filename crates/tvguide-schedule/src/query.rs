//! Schedule selection.

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::instrument;
use tvguide_db::shows::Show;

/// Returns the shows to display today: every show with a start time,
/// ordered ascending by `start_time` (ties by `show_id`), unbounded.
///
/// A store failure is an `Err`, never an empty `Vec` — "no shows" and
/// "query failed" must stay distinguishable for the caller. Read-only.
///
/// # Errors
///
/// Returns an error if the store query fails.
#[instrument(skip_all)]
pub fn todays_schedule(conn: &Connection) -> Result<Vec<Show>> {
    let shows =
        tvguide_db::load_scheduled_shows(conn).context("failed to query scheduled shows")?;
    tracing::debug!(count = shows.len(), "schedule query completed");
    Ok(shows)
}
