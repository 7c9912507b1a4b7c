//! Release feed response types.

use serde::Deserialize;

/// One downloadable asset attached to a release.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseAsset {
    /// File name.
    pub name: String,
    /// Direct download URL.
    pub browser_download_url: String,
    /// Size in bytes (absent in some feeds).
    #[serde(default)]
    pub size: Option<u64>,
}

/// A release descriptor from the feed.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Release {
    /// Git tag of the release (e.g. `v0.2.0`).
    pub tag_name: String,
    /// Human-readable release name (nullable).
    #[serde(default)]
    pub name: Option<String>,
    /// Release page URL.
    pub html_url: String,
    /// Source archive URL (nullable).
    #[serde(default)]
    pub zipball_url: Option<String>,
    /// Draft flag.
    #[serde(default)]
    pub draft: bool,
    /// Pre-release flag.
    #[serde(default)]
    pub prerelease: bool,
    /// Publication timestamp (nullable for drafts).
    #[serde(default)]
    pub published_at: Option<String>,
    /// Release notes body (nullable).
    #[serde(default)]
    pub body: Option<String>,
    /// Attached downloadable assets.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// URL of the installable package: the first asset if any, otherwise
    /// the source zipball.
    #[must_use]
    pub fn package_url(&self) -> Option<&str> {
        self.assets
            .first()
            .map(|a| a.browser_download_url.as_str())
            .or(self.zipball_url.as_deref())
    }
}
