// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub REST adapter used by the mod-catalog and mod-manager sources.
//!
//! ```text
//! RepoLocator::parse("owner/name" | "https://github.com/owner/name")
//!        |
//!        v
//! GitHubClient::releases()   GET /repos/{owner}/{name}/releases
//! GitHubClient::repository() GET /repos/{owner}/{name}
//!        |
//!        v
//! ReleaseSummary::from_releases()
//!   latest stable, newer prerelease, total download count
//! ```

use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::error::{CatalogResult, SourceError};
use crate::net::HttpRequest;

/// Default GitHub API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// An `owner/name` repository reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocator {
    owner: String,
    name: String,
}

impl RepoLocator {
    /// Parse `owner/name`, `https://github.com/owner/name` or the same with a
    /// trailing `.git` or `/`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidRepo` if the locator has another shape.
    pub fn parse(locator: &str) -> CatalogResult<Self> {
        let pattern = Regex::new(r"^(?:https?://(?:www\.)?github\.com/)?([\w.-]+)/([\w.-]+?)(?:\.git)?/?$")
            .map_err(|e| SourceError::InvalidRepo(format!("{locator}: {e}")))?;

        let captures = pattern
            .captures(locator.trim())
            .ok_or_else(|| SourceError::InvalidRepo(locator.to_string()))?;

        Ok(Self {
            owner: captures[1].to_string(),
            name: captures[2].to_string(),
        })
    }

    /// Repository owner (user or organization).
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Browser URL of the repository.
    #[must_use]
    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// GitHub release from the API.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub zipball_url: Option<String>,
    #[serde(default)]
    pub assets: Vec<GitHubAsset>,
}

/// Downloadable asset attached to a release.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubAsset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub download_count: u64,
}

/// Repository metadata from the API.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepository {
    #[serde(default)]
    pub description: Option<String>,
    pub owner: GitHubOwner,
}

/// Repository owner.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubOwner {
    pub login: String,
}

impl GitHubRelease {
    /// First asset whose name ends with `extension` (case-insensitive).
    #[must_use]
    pub fn asset_with_extension(&self, extension: &str) -> Option<&GitHubAsset> {
        self.assets
            .iter()
            .find(|asset| asset.name.to_ascii_lowercase().ends_with(extension))
    }

    /// URL of the main download: a `.zip` asset, then any asset, then the
    /// source archive.
    #[must_use]
    pub fn download_url(&self) -> Option<&str> {
        self.asset_with_extension(".zip")
            .or_else(|| self.assets.first())
            .map(|asset| asset.browser_download_url.as_str())
            .or(self.zipball_url.as_deref())
    }

    fn download_count(&self) -> u64 {
        self.assets.iter().map(|asset| asset.download_count).sum()
    }
}

/// The releases of one repository reduced to what the catalog needs.
#[derive(Debug, Clone, Copy)]
pub struct ReleaseSummary<'a> {
    /// Latest stable release (newest prerelease if none is stable).
    pub latest: &'a GitHubRelease,
    /// Prerelease published after `latest`, if any.
    pub prerelease: Option<&'a GitHubRelease>,
    /// Downloads summed over every asset of every release.
    pub download_count: u64,
}

impl<'a> ReleaseSummary<'a> {
    /// Summarize a newest-first release list. Drafts are ignored.
    #[must_use]
    pub fn from_releases(releases: &'a [GitHubRelease]) -> Option<Self> {
        let published: Vec<&GitHubRelease> = releases.iter().filter(|r| !r.draft).collect();
        let stable_index = published.iter().position(|r| !r.prerelease);

        let (latest, prerelease) = match stable_index {
            Some(index) => (published[index], published[..index].first().copied()),
            None => (*published.first()?, None),
        };

        Some(Self {
            latest,
            prerelease,
            download_count: published.iter().map(|r| r.download_count()).sum(),
        })
    }
}

/// Thin GitHub REST client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    api_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl GitHubClient {
    /// Creates a client against `api_url`. An empty token means anonymous.
    #[must_use]
    pub fn new(api_url: impl Into<String>, token: &str, timeout: Duration) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: (!token.is_empty()).then(|| token.to_string()),
            timeout,
        }
    }

    fn request(&self, path: &str) -> HttpRequest {
        let request = HttpRequest::get(format!("{}{path}", self.api_url))
            .header("Accept", "application/vnd.github+json")
            .timeout(self.timeout);
        match &self.token {
            Some(token) => request.bearer(token),
            None => request,
        }
    }

    /// List releases of `repo`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a release
    /// list.
    pub async fn releases(&self, repo: &RepoLocator) -> CatalogResult<Vec<GitHubRelease>> {
        debug!(%repo, "fetching releases");
        self.request(&format!("/repos/{repo}/releases?per_page=100"))
            .fetch_json()
            .await
    }

    /// Fetch repository metadata of `repo`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a repository.
    pub async fn repository(&self, repo: &RepoLocator) -> CatalogResult<GitHubRepository> {
        debug!(%repo, "fetching repository metadata");
        self.request(&format!("/repos/{repo}")).fetch_json().await
    }
}
