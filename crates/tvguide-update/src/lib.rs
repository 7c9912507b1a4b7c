//! Update checker library for tvguide.
//!
//! Compares the installed version against the newest release published
//! on a GitHub releases feed.

mod api;
mod check;
mod client;
mod types;
mod version;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalReleaseFeed, ReleaseFeed};
#[allow(clippy::module_name_repetitions)]
pub use check::{UpdateInfo, check_for_update};
pub use client::{GithubClient, GithubClientBuilder};
pub use types::{Release, ReleaseAsset};
pub use version::Version;
