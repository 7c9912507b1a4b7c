//! Show record store.
//!
//! Uses `rusqlite` (bundled `SQLite`) to persist Show records and their
//! schedule fields (start/end time-of-day text).

mod connection;
mod migrations;
/// Show CRUD operations and the schedule query.
pub mod shows;

#[allow(clippy::module_name_repetitions)]
pub use connection::open_db;
#[allow(clippy::module_name_repetitions)]
pub use shows::{
    NewShow, Show, delete_show, get_show, insert_show, load_scheduled_shows, load_shows,
    update_show,
};
