// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Previous-snapshot source: the catalog published by the last run.
//!
//! The snapshot is the serialized catalog document; stable and alpha
//! releases are flattened back into one list.

use futures_util::future::BoxFuture;
use serde::Deserialize;
use std::time::Duration;

use super::Source;
use super::catalog::is_remote;
use crate::error::{CatalogResult, FsError, SourceError};
use crate::model::{Catalog, ModRecord};
use crate::net::HttpRequest;

const NAME: &str = "previousDatabase";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotDocument {
    #[serde(default)]
    releases: Vec<ModRecord>,
    #[serde(default)]
    alpha_releases: Vec<ModRecord>,
}

/// Parse a serialized catalog into a flat list of records.
///
/// # Errors
///
/// Returns `SourceError::InvalidData` if `text` is not a catalog document.
pub fn parse_snapshot(text: &str) -> CatalogResult<Catalog> {
    let document: SnapshotDocument =
        serde_json::from_str(text).map_err(|e| SourceError::InvalidData {
            source_name: NAME,
            message: e.to_string(),
        })?;

    let mut catalog = document.releases;
    catalog.extend(document.alpha_releases);
    Ok(catalog)
}

/// Loads the previous catalog from a URL or a local file.
pub struct SnapshotSource {
    location: String,
    timeout: Duration,
}

impl SnapshotSource {
    #[must_use]
    pub fn new(location: &str, timeout: Duration) -> Self {
        Self {
            location: location.trim().to_string(),
            timeout,
        }
    }

    async fn read(&self) -> CatalogResult<String> {
        if is_remote(&self.location) {
            return HttpRequest::get(&self.location)
                .timeout(self.timeout)
                .fetch_string()
                .await;
        }

        tokio::fs::read_to_string(&self.location)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => FsError::NotFound(self.location.clone()).into(),
                _ => FsError::IoError {
                    path: self.location.clone(),
                    source: e,
                }
                .into(),
            })
    }

    async fn fetch_snapshot(&self) -> CatalogResult<Catalog> {
        if self.location.is_empty() {
            return Err(SourceError::Unavailable {
                source_name: NAME,
                message: "no snapshot location configured".to_string(),
            }
            .into());
        }

        let text = self.read().await?;
        parse_snapshot(&text)
    }
}

impl Source for SnapshotSource {
    type Output = Catalog;

    fn name(&self) -> &'static str {
        NAME
    }

    fn fetch(&self) -> BoxFuture<'_, CatalogResult<Catalog>> {
        Box::pin(self.fetch_snapshot())
    }
}
