//! Schedule query and fragment rendering.
//!
//! Selects the shows to display today from the record store and renders
//! them as an HTML fragment for the embedding host.

/// Time-of-day parsing and formatting.
pub mod clock;
/// Schedule selection.
pub mod query;
/// Fragment rendering.
pub mod render;

use anyhow::Result;
use rusqlite::Connection;
use tracing::instrument;

pub use clock::{format_12h, parse_time_of_day};
pub use query::todays_schedule;
pub use render::{RenderOptions, render_schedule, render_unavailable};

/// Produces the schedule fragment for today: store query + render.
///
/// A store failure is an `Err`; callers decide between propagating it and
/// showing [`render_unavailable`]. It is never conflated with the
/// empty-schedule fragment.
///
/// # Errors
///
/// Returns an error if the store query fails.
#[instrument(skip_all)]
pub fn schedule_fragment(conn: &Connection, opts: &RenderOptions) -> Result<String> {
    let shows = query::todays_schedule(conn)?;
    Ok(render::render_schedule(&shows, opts))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use tvguide_db::shows::NewShow;
    use tvguide_db::{insert_show, open_db};

    #[test]
    fn test_schedule_fragment_end_to_end() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let conn = open_db(Some(&dir.path().to_path_buf())).unwrap();
        insert_show(
            &conn,
            &NewShow {
                title: String::from("Evening News"),
                description: String::from("Headlines & weather"),
                thumbnail: None,
                start_time: Some(String::from("19:00")),
                end_time: Some(String::from("20:00")),
            },
        )
        .unwrap();

        // Act
        let fragment = schedule_fragment(&conn, &RenderOptions::default()).unwrap();

        // Assert
        assert!(fragment.contains("<strong>Evening News</strong>"));
        assert!(fragment.contains("Time: 7:00 PM \u{2013} 8:00 PM<br>"));
        assert!(fragment.contains("Headlines &amp; weather"));
    }

    #[test]
    fn test_schedule_fragment_empty_store() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let conn = open_db(Some(&dir.path().to_path_buf())).unwrap();

        // Act
        let fragment = schedule_fragment(&conn, &RenderOptions::default()).unwrap();

        // Assert
        assert!(fragment.contains("No shows scheduled for today."));
    }

    #[test]
    fn test_schedule_fragment_store_failure_is_err() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let conn = open_db(Some(&dir.path().to_path_buf())).unwrap();
        conn.execute_batch("DROP TABLE shows").unwrap();

        // Act
        let result = schedule_fragment(&conn, &RenderOptions::default());

        // Assert: never an empty-schedule fragment
        assert!(result.is_err());
    }
}
