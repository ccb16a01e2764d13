// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Upstream data sources.
//!
//! ```text
//!            SourceSet::from_config()
//!                      |
//!   +---------+--------+--------+-----------+
//!   v         v        v        v           v
//! manager  catalog   views   installs   snapshot
//! GitHub   mod list  HTTP    HTTP       HTTP/file
//! Release  Catalog   CountMap CountMap  Catalog
//! ```
//!
//! Every source is independent and may fail; the collector decides what a
//! failure means. Sources own their timeout (the request timeout of the
//! shared HTTP client), so a slow upstream settles as an error instead of
//! hanging the run.

pub mod analytics;
pub mod catalog;
pub mod github;
pub mod manager;
pub mod snapshot;


use futures_util::future::BoxFuture;
use std::time::Duration;

use crate::config::Config;
use crate::error::CatalogResult;
use crate::model::{Catalog, CountMap, Release};

use analytics::{AnalyticsKind, AnalyticsSource};
use catalog::CatalogSource;
use github::GitHubClient;
use manager::ModManagerSource;
use snapshot::SnapshotSource;

/// An asynchronous upstream fetch.
///
/// Methods return `BoxFuture` so sources can be stored as trait objects in a
/// [`SourceSet`].
pub trait Source {
    /// What a successful fetch yields.
    type Output;

    /// Short name used in logs and timing reports.
    fn name(&self) -> &'static str;

    /// Fetch the data.
    fn fetch(&self) -> BoxFuture<'_, CatalogResult<Self::Output>>;
}

/// Boxed source yielding `T`.
pub type DynSource<T> = Box<dyn Source<Output = T> + Send + Sync>;

/// The fixed set of sources polled by one run.
pub struct SourceSet {
    pub mod_manager: DynSource<Release>,
    pub catalog: DynSource<Catalog>,
    pub view_counts: DynSource<CountMap>,
    pub install_counts: DynSource<CountMap>,
    pub snapshot: DynSource<Catalog>,
}

impl SourceSet {
    /// Build the real HTTP/file backed sources from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let sources = &config.sources;
        let timeout = Duration::from_secs(sources.request_timeout_secs);
        let github = GitHubClient::new(&sources.github_api_url, &sources.github_token, timeout);

        Self {
            mod_manager: Box::new(ModManagerSource::new(
                github.clone(),
                &sources.mod_manager_repo,
            )),
            catalog: Box::new(CatalogSource::new(github, &sources.mods, timeout)),
            view_counts: Box::new(AnalyticsSource::new(
                AnalyticsKind::Views,
                &sources.view_counts_url,
                &sources.analytics_credential,
                timeout,
            )),
            install_counts: Box::new(AnalyticsSource::new(
                AnalyticsKind::Installs,
                &sources.install_counts_url,
                &sources.analytics_credential,
                timeout,
            )),
            snapshot: Box::new(SnapshotSource::new(&sources.snapshot, timeout)),
        }
    }
}
