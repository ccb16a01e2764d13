// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod-catalog source: mod list + per-mod GitHub releases.
//!
//! ```text
//! mods (inline JSON | URL) --> Vec<ModInfo>
//!        |
//!        v  buffered(MAX_CONCURRENT_REPOS), order kept
//! per mod: releases + repository (try_join)
//!        |
//!        v
//! Catalog (mods that failed are skipped with a warning)
//! ```

use futures_util::future::BoxFuture;
use futures_util::{StreamExt, stream};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

use super::Source;
use super::github::{GitHubClient, ReleaseSummary, RepoLocator};
use crate::error::{CatalogResult, SourceError};
use crate::model::{Catalog, ModInfo, ModRecord, Prerelease};
use crate::net::HttpRequest;

/// Upper bound on repositories queried at the same time.
pub const MAX_CONCURRENT_REPOS: usize = 8;

const NAME: &str = "nextDatabase";

/// Returns whether `value` should be fetched rather than parsed inline.
pub(crate) fn is_remote(value: &str) -> bool {
    let value = value.trim_start();
    value.starts_with("https://") || value.starts_with("http://")
}

/// Builds the fresh catalog from the configured mod list.
pub struct CatalogSource {
    github: GitHubClient,
    mods: String,
    timeout: Duration,
}

impl CatalogSource {
    /// `mods` is either a JSON array of mod list entries or a URL serving one.
    #[must_use]
    pub fn new(github: GitHubClient, mods: &str, timeout: Duration) -> Self {
        Self {
            github,
            mods: mods.to_string(),
            timeout,
        }
    }

    async fn load_mod_list(&self) -> CatalogResult<Vec<ModInfo>> {
        let text = if is_remote(&self.mods) {
            HttpRequest::get(self.mods.trim())
                .timeout(self.timeout)
                .fetch_string()
                .await?
        } else {
            self.mods.clone()
        };

        if text.trim().is_empty() {
            return Err(SourceError::InvalidData {
                source_name: NAME,
                message: "mod list is empty".to_string(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        let list: Vec<ModInfo> =
            serde_json::from_str(&text).map_err(|e| SourceError::InvalidData {
                source_name: NAME,
                message: format!("mod list is not valid JSON: {e}"),
            })?;

        Ok(list
            .into_iter()
            .filter(|info| {
                let fresh = seen.insert(info.unique_name.clone());
                if !fresh {
                    warn!(unique_name = %info.unique_name, "duplicate mod list entry ignored");
                }
                fresh
            })
            .collect())
    }

    async fn fetch_mod(&self, info: &ModInfo) -> CatalogResult<ModRecord> {
        let repo = RepoLocator::parse(&info.repo)?;
        let (releases, repository) =
            tokio::try_join!(self.github.releases(&repo), self.github.repository(&repo))?;

        let summary = ReleaseSummary::from_releases(&releases)
            .ok_or_else(|| SourceError::NoRelease(repo.to_string()))?;
        let download_url = summary
            .latest
            .download_url()
            .ok_or_else(|| SourceError::NoRelease(repo.to_string()))?;

        let prerelease = summary.prerelease.and_then(|release| {
            Some(Prerelease {
                version: release.tag_name.clone(),
                download_url: release.download_url()?.to_string(),
            })
        });

        Ok(ModRecord {
            name: info.name.clone(),
            unique_name: info.unique_name.clone(),
            description: repository.description.unwrap_or_default(),
            author: repository.owner.login,
            repo: repo.html_url(),
            required: info.required,
            utility: info.utility,
            alpha: info.alpha,
            version: summary.latest.tag_name.clone(),
            download_url: download_url.to_string(),
            download_count: summary.download_count,
            prerelease,
            latest_release_description: summary.latest.body.clone(),
            latest_prerelease_description: summary.prerelease.and_then(|r| r.body.clone()),
        })
    }

    async fn fetch_catalog(&self) -> CatalogResult<Catalog> {
        let mod_list = self.load_mod_list().await?;
        debug!(count = mod_list.len(), "mod list loaded");

        let pending: Vec<_> = mod_list.iter().map(|info| self.fetch_mod(info)).collect();
        let results: Vec<_> = stream::iter(pending)
            .buffered(MAX_CONCURRENT_REPOS)
            .collect()
            .await;

        let mut catalog = Vec::with_capacity(mod_list.len());
        for (info, result) in mod_list.iter().zip(results) {
            match result {
                Ok(record) => catalog.push(record),
                Err(e) => {
                    warn!(unique_name = %info.unique_name, error = %e, "skipping mod");
                }
            }
        }

        if catalog.is_empty() && !mod_list.is_empty() {
            return Err(SourceError::Unavailable {
                source_name: NAME,
                message: format!("none of the {} listed mods could be fetched", mod_list.len()),
            }
            .into());
        }

        Ok(catalog)
    }
}

impl Source for CatalogSource {
    type Output = Catalog;

    fn name(&self) -> &'static str {
        NAME
    }

    fn fetch(&self) -> BoxFuture<'_, CatalogResult<Catalog>> {
        Box::pin(self.fetch_catalog())
    }
}
