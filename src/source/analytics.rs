// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Analytics sources: page views and installs.
//!
//! ```text
//! GET endpoint (Bearer credential)
//!   {"key": count, ...}
//!   | {"rows": [{"key": "...", "count": n}, ...]}
//!        |
//!        v
//!   CountMap  (counts may be numbers or numeric strings)
//! ```
//!
//! View counts are keyed by the normalized path-name of the mod, install
//! counts by unique name; this module does not care which.

use futures_util::future::BoxFuture;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

use super::Source;
use crate::error::{CatalogResult, SourceError};
use crate::model::CountMap;
use crate::net::HttpRequest;

/// Which analytics report a source reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsKind {
    Views,
    Installs,
}

impl AnalyticsKind {
    /// Source name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Views => "viewCounts",
            Self::Installs => "installCounts",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnalyticsResponse {
    Rows { rows: Vec<AnalyticsRow> },
    Map(BTreeMap<String, Value>),
}

#[derive(Debug, Deserialize)]
struct AnalyticsRow {
    key: String,
    count: Value,
}

fn count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.round() as u64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Parse an analytics report body into a count map.
///
/// Entries whose count is not a non-negative number are dropped.
///
/// # Errors
///
/// Returns `SourceError::InvalidData` if the body matches neither report
/// shape.
pub fn parse_report(kind: AnalyticsKind, body: &str) -> CatalogResult<CountMap> {
    let response: AnalyticsResponse =
        serde_json::from_str(body).map_err(|e| SourceError::InvalidData {
            source_name: kind.name(),
            message: e.to_string(),
        })?;

    let entries: Vec<(String, Value)> = match response {
        AnalyticsResponse::Rows { rows } => rows.into_iter().map(|r| (r.key, r.count)).collect(),
        AnalyticsResponse::Map(map) => map.into_iter().collect(),
    };

    let mut counts = CountMap::new();
    for (key, value) in entries {
        match count_from_value(&value) {
            Some(count) => {
                *counts.entry(key).or_insert(0) += count;
            }
            None => debug!(source = kind.name(), key, "ignoring non-numeric count"),
        }
    }
    Ok(counts)
}

/// Reads one analytics report.
pub struct AnalyticsSource {
    kind: AnalyticsKind,
    endpoint: String,
    credential: String,
    timeout: Duration,
}

impl AnalyticsSource {
    #[must_use]
    pub fn new(kind: AnalyticsKind, endpoint: &str, credential: &str, timeout: Duration) -> Self {
        Self {
            kind,
            endpoint: endpoint.to_string(),
            credential: credential.to_string(),
            timeout,
        }
    }

    async fn fetch_counts(&self) -> CatalogResult<CountMap> {
        if self.credential.is_empty() {
            return Err(SourceError::MissingCredential(self.kind.name()).into());
        }
        if self.endpoint.is_empty() {
            return Err(SourceError::Unavailable {
                source_name: self.kind.name(),
                message: "no endpoint configured".to_string(),
            }
            .into());
        }

        let body = HttpRequest::get(&self.endpoint)
            .bearer(&self.credential)
            .timeout(self.timeout)
            .fetch_string()
            .await?;

        parse_report(self.kind, &body)
    }
}

impl Source for AnalyticsSource {
    type Output = CountMap;

    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn fetch(&self) -> BoxFuture<'_, CatalogResult<CountMap>> {
        Box::pin(self.fetch_counts())
    }
}
