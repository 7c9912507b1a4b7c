//! `ReleaseFeed` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::Release;

/// Release feed trait.
///
/// Abstracts the feed lookup for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(ReleaseFeed: Send)]
pub trait LocalReleaseFeed {
    /// Fetches the latest published release for a repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or if
    /// the repository has no published release.
    async fn latest_release(&self, owner: &str, repo: &str) -> Result<Release>;
}
