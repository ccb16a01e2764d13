// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Change detection between the previous snapshot and the fresh catalog.
//!
//! ```text
//! fresh mod --uniqueName--> previous snapshot
//!    absent                       -> New
//!    version differs              -> Updated(Stable)
//!    prerelease added/removed/bumped -> Updated(Prerelease)
//!    otherwise                    -> (no event)
//! ```
//!
//! Mods missing from the fresh catalog produce no event.

use std::collections::HashMap;
use std::fmt;

use crate::model::ModRecord;

/// Release channel an update happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseChannel {
    Stable,
    Prerelease,
}

impl fmt::Display for ReleaseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stable => f.write_str("stable"),
            Self::Prerelease => f.write_str("prerelease"),
        }
    }
}

/// A change detected for one mod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    New {
        record: ModRecord,
    },
    Updated {
        record: ModRecord,
        /// Version on the changed channel before this run. Empty when a
        /// prerelease appeared.
        previous_version: String,
        channel: ReleaseChannel,
    },
}

impl ChangeEvent {
    #[must_use]
    pub fn record(&self) -> &ModRecord {
        match self {
            Self::New { record } | Self::Updated { record, .. } => record,
        }
    }

    #[must_use]
    pub fn unique_name(&self) -> &str {
        &self.record().unique_name
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.record().name
    }

    /// Version on the relevant channel after this run. Empty when a
    /// prerelease was withdrawn.
    #[must_use]
    pub fn new_version(&self) -> &str {
        match self {
            Self::New { record } => &record.version,
            Self::Updated {
                record,
                channel: ReleaseChannel::Stable,
                ..
            } => &record.version,
            Self::Updated {
                record,
                channel: ReleaseChannel::Prerelease,
                ..
            } => record.prerelease.as_ref().map_or("", |p| p.version.as_str()),
        }
    }

    #[must_use]
    pub const fn is_new(&self) -> bool {
        matches!(self, Self::New { .. })
    }
}

fn prerelease_version(record: &ModRecord) -> Option<&str> {
    record.prerelease.as_ref().map(|p| p.version.as_str())
}

fn classify(previous: Option<&ModRecord>, fresh: &ModRecord) -> Option<ChangeEvent> {
    let Some(previous) = previous else {
        return Some(ChangeEvent::New {
            record: fresh.clone(),
        });
    };

    if previous.version != fresh.version {
        return Some(ChangeEvent::Updated {
            record: fresh.clone(),
            previous_version: previous.version.clone(),
            channel: ReleaseChannel::Stable,
        });
    }

    let before = prerelease_version(previous);
    if before != prerelease_version(fresh) {
        return Some(ChangeEvent::Updated {
            record: fresh.clone(),
            previous_version: before.unwrap_or_default().to_string(),
            channel: ReleaseChannel::Prerelease,
        });
    }

    None
}

/// Classify every mod of `fresh` against `previous`.
///
/// Events follow `fresh` order, at most one per mod. Versions are compared
/// as plain strings.
#[must_use]
pub fn diff(previous: &[ModRecord], fresh: &[ModRecord]) -> Vec<ChangeEvent> {
    let index: HashMap<&str, &ModRecord> = previous
        .iter()
        .map(|record| (record.unique_name.as_str(), record))
        .collect();

    fresh
        .iter()
        .filter_map(|record| classify(index.get(record.unique_name.as_str()).copied(), record))
        .collect()
}
