// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::cell::RefCell;
use std::time::Duration;

use futures_util::future::BoxFuture;

use super::{Reporter, SourceOutcome, collect};
use crate::error::{self, CatalogResult};
use crate::model::{Catalog, CountMap, ModRecord, Release};
use crate::source::{Source, SourceSet};

struct FakeSource<T> {
    name: &'static str,
    delay: Duration,
    result: Result<T, &'static str>,
}

impl<T: Clone + Send + Sync> Source for FakeSource<T> {
    type Output = T;

    fn name(&self) -> &'static str {
        self.name
    }

    fn fetch(&self) -> BoxFuture<'_, CatalogResult<T>> {
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            self.result.clone().map_err(error::other)
        })
    }
}

fn ok<T>(name: &'static str, delay_ms: u64, value: T) -> Box<FakeSource<T>> {
    Box::new(FakeSource {
        name,
        delay: Duration::from_millis(delay_ms),
        result: Ok(value),
    })
}

fn failing<T>(name: &'static str, delay_ms: u64) -> Box<FakeSource<T>> {
    Box::new(FakeSource {
        name,
        delay: Duration::from_millis(delay_ms),
        result: Err("upstream exploded"),
    })
}

fn record(unique_name: &str) -> ModRecord {
    ModRecord {
        name: unique_name.to_string(),
        unique_name: unique_name.to_string(),
        description: String::new(),
        author: String::new(),
        repo: String::new(),
        required: None,
        utility: None,
        alpha: None,
        version: "1.0".to_string(),
        download_url: String::new(),
        download_count: 0,
        prerelease: None,
        latest_release_description: None,
        latest_prerelease_description: None,
    }
}

fn manager() -> Release {
    Release {
        version: "2.0".to_string(),
        download_url: "https://example.com/manager.zip".to_string(),
        download_count: 9,
        installer_download_url: None,
    }
}

#[derive(Default)]
struct RecordingReporter {
    reports: RefCell<Vec<(&'static str, bool)>>,
}

impl Reporter for RecordingReporter {
    fn source_settled(&self, source: &'static str, _elapsed: Duration, outcome: SourceOutcome<'_>) {
        let fetched = matches!(outcome, SourceOutcome::Fetched);
        self.reports.borrow_mut().push((source, fetched));
    }
}

#[tokio::test]
async fn test_collect_all_sources_succeed() {
    let views: CountMap = [("a".to_string(), 3)].into_iter().collect();
    let sources = SourceSet {
        mod_manager: ok("modManager", 0, manager()),
        catalog: ok("nextDatabase", 5, vec![record("a")]),
        view_counts: ok("viewCounts", 1, views.clone()),
        install_counts: ok("installCounts", 0, CountMap::new()),
        snapshot: ok("previousDatabase", 2, Catalog::new()),
    };
    let reporter = RecordingReporter::default();

    let collected = collect(&sources, &reporter).await;

    assert_eq!(collected.mod_manager, Some(manager()));
    assert_eq!(collected.catalog.len(), 1);
    assert_eq!(collected.analytics.views, views);
    assert!(collected.degraded.is_empty());
    assert_eq!(reporter.reports.borrow().len(), 5);
}

#[tokio::test]
async fn test_collect_substitutes_defaults_for_failed_sources() {
    let sources = SourceSet {
        mod_manager: failing("modManager", 0),
        catalog: ok("nextDatabase", 20, vec![record("a"), record("b")]),
        view_counts: failing("viewCounts", 1),
        install_counts: failing("installCounts", 30),
        snapshot: failing("previousDatabase", 0),
    };
    let reporter = RecordingReporter::default();

    let collected = collect(&sources, &reporter).await;

    assert_eq!(collected.mod_manager, None);
    assert_eq!(collected.catalog.len(), 2);
    assert!(collected.analytics.views.is_empty());
    assert!(collected.analytics.installs.is_empty());
    assert!(collected.previous.is_empty());
    assert_eq!(
        collected.degraded,
        ["modManager", "viewCounts", "installCounts", "previousDatabase"]
    );
}

#[tokio::test]
async fn test_collect_reports_every_source_even_when_all_fail() {
    let sources = SourceSet {
        mod_manager: failing("modManager", 3),
        catalog: failing("nextDatabase", 1),
        view_counts: failing("viewCounts", 2),
        install_counts: failing("installCounts", 0),
        snapshot: failing("previousDatabase", 4),
    };
    let reporter = RecordingReporter::default();

    let collected = collect(&sources, &reporter).await;

    assert!(collected.catalog.is_empty());
    assert_eq!(collected.degraded.len(), 5);

    let mut reported: Vec<_> = reporter.reports.borrow().clone();
    reported.sort_unstable();
    assert_eq!(
        reported,
        [
            ("installCounts", false),
            ("modManager", false),
            ("nextDatabase", false),
            ("previousDatabase", false),
            ("viewCounts", false),
        ]
    );
}

#[tokio::test]
async fn test_slow_failure_does_not_discard_fast_results() {
    let sources = SourceSet {
        mod_manager: ok("modManager", 0, manager()),
        catalog: ok("nextDatabase", 0, vec![record("fast")]),
        view_counts: ok("viewCounts", 0, CountMap::new()),
        install_counts: ok("installCounts", 0, CountMap::new()),
        snapshot: failing("previousDatabase", 50),
    };

    let collected = collect(&sources, &super::TracingReporter).await;

    assert_eq!(collected.catalog[0].unique_name, "fast");
    assert_eq!(collected.mod_manager, Some(manager()));
    assert_eq!(collected.degraded, ["previousDatabase"]);
}
