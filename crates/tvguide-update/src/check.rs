//! Update availability check.

use anyhow::{Context, Result};
use tracing::instrument;

use super::api::LocalReleaseFeed;
use super::version::Version;

/// A newer release discovered in the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateInfo {
    /// Currently installed version.
    pub installed: Version,
    /// Newest published version.
    pub latest: Version,
    /// Tag of the newest release.
    pub tag_name: String,
    /// Release page URL.
    pub release_url: String,
    /// Installable package URL (first asset, else source zipball).
    pub package_url: Option<String>,
}

/// Checks whether the feed offers a release newer than `installed`.
///
/// Returns `Ok(None)` when the installed version is current (or newer,
/// e.g. a local development build). Draft and pre-release entries never
/// count as updates, even if the feed serves one as "latest".
///
/// # Errors
///
/// Returns an error if the feed lookup fails, or if `installed` or the
/// release tag does not parse as a version.
#[allow(clippy::module_name_repetitions)]
#[instrument(skip_all)]
pub async fn check_for_update(
    feed: &(impl LocalReleaseFeed + Sync),
    owner: &str,
    repo: &str,
    installed: &str,
) -> Result<Option<UpdateInfo>> {
    let installed: Version = installed
        .parse()
        .context("installed version is not a valid version")?;

    let release = feed.latest_release(owner, repo).await?;

    if release.draft || release.prerelease {
        tracing::debug!(tag = %release.tag_name, "latest entry is a draft or pre-release, ignoring");
        return Ok(None);
    }

    let latest: Version = release
        .tag_name
        .parse()
        .with_context(|| format!("release tag {:?} is not a valid version", release.tag_name))?;

    if latest <= installed {
        tracing::debug!(%installed, %latest, "installed version is current");
        return Ok(None);
    }

    Ok(Some(UpdateInfo {
        package_url: release.package_url().map(String::from),
        release_url: release.html_url,
        tag_name: release.tag_name,
        installed,
        latest,
    }))
}
