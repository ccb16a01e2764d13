// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Catalog serialization and artifact output.
//!
//! ```text
//! {modManager?, releases, alphaReleases}
//!        |  partitions ordered by uniqueName, fixed field order
//!        v
//! pretty JSON (byte-identical for equal content)
//!        |
//!   +----+-----------------+
//!   v                      v
//! out file (optional)   step output `releases` (GITHUB_OUTPUT)
//! failures logged only  failures logged only
//! ```

use serde::Serialize;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::enrich::Partitioned;
use crate::error::{CatalogResult, FsError, other};
use crate::model::{EnrichedMod, Release};

/// Name of the step output carrying the catalog.
pub const RELEASES_OUTPUT: &str = "releases";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    mod_manager: Option<&'a Release>,
    releases: Vec<&'a EnrichedMod>,
    alpha_releases: Vec<&'a EnrichedMod>,
}

fn canonical_order(mods: &[EnrichedMod]) -> Vec<&EnrichedMod> {
    let mut ordered: Vec<&EnrichedMod> = mods.iter().collect();
    ordered.sort_by(|a, b| a.record.unique_name.cmp(&b.record.unique_name));
    ordered
}

/// Serialize the catalog document.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn serialize_catalog(
    mod_manager: Option<&Release>,
    partitioned: &Partitioned,
) -> CatalogResult<String> {
    let document = CatalogDocument {
        mod_manager,
        releases: canonical_order(&partitioned.releases),
        alpha_releases: canonical_order(&partitioned.alpha_releases),
    };
    serde_json::to_string_pretty(&document)
        .map_err(|e| other(format!("failed to serialize catalog: {e}")))
}

async fn write_file(path: &Path, contents: &str) -> CatalogResult<()> {
    let io_error = |source| FsError::IoError {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    tokio::fs::write(path, contents).await.map_err(io_error)?;
    Ok(())
}

/// Write the catalog artifact. Failures are logged, not returned.
///
/// Returns whether the file was written.
pub async fn write_artifact(path: &Path, contents: &str) -> bool {
    match write_file(path, contents).await {
        Ok(()) => {
            info!(path = %path.display(), bytes = contents.len(), "Catalog written");
            true
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Error saving catalog to file");
            false
        }
    }
}

/// Delimiter for a multi-line step output value that does not occur in it.
fn output_delimiter(value: &str) -> String {
    let mut delimiter = String::from("MODCAT_EOF");
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    delimiter
}

async fn append_step_output(file: &Path, name: &str, value: &str) -> CatalogResult<()> {
    let io_error = |source| FsError::IoError {
        path: file.display().to_string(),
        source,
    };
    let delimiter = output_delimiter(value);
    let entry = format!("{name}<<{delimiter}\n{value}\n{delimiter}\n");

    let mut handle = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .await
        .map_err(io_error)?;
    handle.write_all(entry.as_bytes()).await.map_err(io_error)?;
    handle.flush().await.map_err(io_error)?;
    Ok(())
}

/// Publish `value` as a named step output (`name<<DELIM` block appended to
/// the output file). Failures are logged, not returned.
pub async fn emit_step_output(file: &Path, name: &str, value: &str) -> bool {
    match append_step_output(file, name, value).await {
        Ok(()) => true,
        Err(e) => {
            warn!(output = name, error = %e, "Error setting step output");
            false
        }
    }
}
