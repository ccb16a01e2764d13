// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `run` command: one full pipeline pass.
//!
//! ```text
//! collect(sources)
//!      |
//!      +----------------------------+
//!      v                            v
//! enrich -> partition          diff(previous, catalog)
//!      -> serialize                 |
//!      -> out file, step output     v
//!      |                       router.dispatch()
//!      +-------------+--------------+
//!                    v
//!            RunReport { catalog, ... }
//! ```

use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::collect::{Reporter, TracingReporter, collect};
use crate::config::Config;
use crate::diff::diff;
use crate::enrich::{enrich, partition};
use crate::error::{CatalogResult, Result};
use crate::notify::{DiscordWebhook, DispatchReport, NotificationRouter, NotificationSettings, Transport};
use crate::output::{RELEASES_OUTPUT, emit_step_output, serialize_catalog, write_artifact};
use crate::source::SourceSet;

/// Where the serialized catalog is written besides the returned value.
#[derive(Debug, Clone, Default)]
pub struct ArtifactTargets {
    pub out_file: Option<PathBuf>,
    pub step_output: Option<PathBuf>,
}

/// Result of one pipeline pass.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Serialized catalog.
    pub catalog: String,
    /// Sources that failed and were replaced by defaults.
    pub degraded: Vec<&'static str>,
    /// Number of change events detected.
    pub changes: usize,
    pub notifications: DispatchReport,
}

/// Run the pipeline against explicit collaborators.
///
/// # Errors
///
/// Returns an error only if the catalog cannot be serialized; source,
/// artifact and notification failures are logged and absorbed.
pub async fn run_pipeline(
    sources: &SourceSet,
    reporter: &dyn Reporter,
    settings: &NotificationSettings,
    transport: &dyn Transport,
    targets: &ArtifactTargets,
) -> CatalogResult<RunReport> {
    let collected = collect(sources, reporter).await;

    if !collected.degraded.is_empty() {
        warn!(sources = ?collected.degraded, "Running with degraded sources");
    }
    if collected.catalog.is_empty() {
        warn!("Fresh catalog is empty");
    }

    let artifact = async {
        let partitioned = partition(enrich(&collected.catalog, &collected.analytics));
        let catalog = serialize_catalog(collected.mod_manager.as_ref(), &partitioned)?;

        if let Some(path) = &targets.out_file {
            write_artifact(path, &catalog).await;
        }
        if let Some(file) = &targets.step_output {
            emit_step_output(file, RELEASES_OUTPUT, &catalog).await;
        }
        CatalogResult::Ok(catalog)
    };

    let notifications = async {
        let events = diff(&collected.previous, &collected.catalog);
        info!(changes = events.len(), "Compared against previous catalog");
        let report = NotificationRouter::new(settings, transport)
            .dispatch(&events)
            .await;
        (events.len(), report)
    };

    let (catalog, (changes, notifications)) = tokio::join!(artifact, notifications);

    Ok(RunReport {
        catalog: catalog?,
        degraded: collected.degraded,
        changes,
        notifications,
    })
}

/// Run the `run` command with the real sources and webhook transport.
///
/// Prints the catalog to stdout.
///
/// # Errors
///
/// Returns an error if the catalog cannot be serialized.
pub async fn run_command(config: &Config) -> Result<()> {
    let sources = SourceSet::from_config(config);
    let settings = config.notifications.settings();
    let transport = DiscordWebhook::new(Duration::from_secs(config.sources.request_timeout_secs));
    let targets = ArtifactTargets {
        out_file: config.output.out_file.clone(),
        step_output: config.output.step_output.clone(),
    };

    let report = run_pipeline(&sources, &TracingReporter, &settings, &transport, &targets).await?;

    info!(
        degraded = report.degraded.len(),
        changes = report.changes,
        delivered = report.notifications.delivered,
        failed = report.notifications.failed,
        "Run finished"
    );
    println!("{}", report.catalog);
    Ok(())
}
