// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod-manager source: latest release of the manager application.

use futures_util::future::BoxFuture;

use super::Source;
use super::github::{GitHubClient, ReleaseSummary, RepoLocator};
use crate::error::{CatalogResult, SourceError};
use crate::model::Release;

const NAME: &str = "modManager";

/// Fetches the mod manager's latest stable release.
pub struct ModManagerSource {
    github: GitHubClient,
    repo: String,
}

impl ModManagerSource {
    #[must_use]
    pub fn new(github: GitHubClient, repo: &str) -> Self {
        Self {
            github,
            repo: repo.to_string(),
        }
    }

    async fn fetch_release(&self) -> CatalogResult<Release> {
        if self.repo.trim().is_empty() {
            return Err(SourceError::Unavailable {
                source_name: NAME,
                message: "no mod manager repository configured".to_string(),
            }
            .into());
        }

        let repo = RepoLocator::parse(&self.repo)?;
        let releases = self.github.releases(&repo).await?;
        let summary = ReleaseSummary::from_releases(&releases)
            .ok_or_else(|| SourceError::NoRelease(repo.to_string()))?;

        let latest = summary.latest;
        let download_url = latest
            .download_url()
            .ok_or_else(|| SourceError::NoRelease(repo.to_string()))?;

        Ok(Release {
            version: latest.tag_name.clone(),
            download_url: download_url.to_string(),
            download_count: summary.download_count,
            installer_download_url: latest
                .asset_with_extension(".exe")
                .or_else(|| latest.asset_with_extension(".msi"))
                .map(|asset| asset.browser_download_url.clone()),
        })
    }
}

impl Source for ModManagerSource {
    type Output = Release;

    fn name(&self) -> &'static str {
        NAME
    }

    fn fetch(&self) -> BoxFuture<'_, CatalogResult<Release>> {
        Box::pin(self.fetch_release())
    }
}
