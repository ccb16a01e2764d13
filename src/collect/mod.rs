// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Resilient collection of all sources.
//!
//! ```text
//! collect(&SourceSet, &dyn Reporter)
//!        |
//!   tokio::join! (settle-all, never first-error)
//!   +--------+--------+--------+--------+
//!   v        v        v        v        v
//! manager catalog  views  installs  snapshot
//!   |        |        |        |        |
//!   settle: Ok -> Some(value) | Err -> report + None
//!        |
//!        v
//! Collected  (failed sources replaced by their defaults)
//!   modManager None | catalog [] | views {} | installs {} | previous []
//! ```
//!
//! All sources run on the calling task; no thread is spawned and no source
//! can cancel another.

use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::model::{AnalyticsMaps, Catalog, Release};
use crate::source::{Source, SourceSet};

/// How a source settled.
#[derive(Debug)]
pub enum SourceOutcome<'a> {
    Fetched,
    Failed(&'a CatalogError),
}

/// Receives one report per source when it settles.
pub trait Reporter {
    fn source_settled(&self, source: &'static str, elapsed: Duration, outcome: SourceOutcome<'_>);
}

/// Reporter that writes timings and failures to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn source_settled(&self, source: &'static str, elapsed: Duration, outcome: SourceOutcome<'_>) {
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        match outcome {
            SourceOutcome::Fetched => {
                info!(source, elapsed_ms, "Finished getting {source}");
            }
            SourceOutcome::Failed(error) => {
                warn!(source, elapsed_ms, %error, "Failed getting {source}, using default");
            }
        }
    }
}

/// Inputs for the downstream stages, defaults substituted where a source
/// failed.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub mod_manager: Option<Release>,
    pub catalog: Catalog,
    pub analytics: AnalyticsMaps,
    pub previous: Catalog,
    /// Names of the sources that failed, in source order.
    pub degraded: Vec<&'static str>,
}

/// Await one source and report how it settled.
///
/// `started` is shared by all sources so the reported time is the wall
/// clock since the collection began.
pub async fn settle<T>(
    source: &(dyn Source<Output = T> + Send + Sync),
    started: Instant,
    reporter: &dyn Reporter,
) -> CatalogResult<T> {
    let result = source.fetch().await;
    let outcome = match &result {
        Ok(_) => SourceOutcome::Fetched,
        Err(error) => SourceOutcome::Failed(error),
    };
    reporter.source_settled(source.name(), started.elapsed(), outcome);
    result
}

fn or_default<T: Default>(
    result: CatalogResult<T>,
    name: &'static str,
    degraded: &mut Vec<&'static str>,
) -> T {
    result.unwrap_or_else(|_| {
        degraded.push(name);
        T::default()
    })
}

/// Run every source concurrently and wait until all of them settled.
pub async fn collect(sources: &SourceSet, reporter: &dyn Reporter) -> Collected {
    let started = Instant::now();

    let (mod_manager, catalog, views, installs, previous) = tokio::join!(
        settle(sources.mod_manager.as_ref(), started, reporter),
        settle(sources.catalog.as_ref(), started, reporter),
        settle(sources.view_counts.as_ref(), started, reporter),
        settle(sources.install_counts.as_ref(), started, reporter),
        settle(sources.snapshot.as_ref(), started, reporter),
    );

    let mut degraded = Vec::new();
    let mod_manager = or_default(mod_manager.map(Some), sources.mod_manager.name(), &mut degraded);
    let catalog = or_default(catalog, sources.catalog.name(), &mut degraded);
    let views = or_default(views, sources.view_counts.name(), &mut degraded);
    let installs = or_default(installs, sources.install_counts.name(), &mut degraded);
    let previous = or_default(previous, sources.snapshot.name(), &mut degraded);

    if degraded.is_empty() {
        info!(mods = catalog.len(), "All sources fetched");
    } else {
        warn!(
            mods = catalog.len(),
            degraded = ?degraded,
            "Some sources failed, continuing with defaults"
        );
    }

    Collected {
        mod_manager,
        catalog,
        analytics: AnalyticsMaps { views, installs },
        previous,
        degraded,
    }
}

#[cfg(test)]
mod tests;
