// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Catalog data model.
//!
//! ```text
//! ModInfo (mod list entry)
//!    |  + releases from the repository host
//!    v
//! ModRecord ----+---> DiffEngine (pre-enrichment)
//!    |          |
//!    |  + views / installs
//!    v
//! EnrichedMod --> releases | alphaReleases --> JSON
//! ```
//!
//! Field names serialize as camelCase; this is the wire format shared with
//! the previous snapshot and the site that consumes the catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered list of mods as returned by the mod-catalog source.
pub type Catalog = Vec<ModRecord>;

/// Counts keyed by a lookup key (normalized path-name or unique name).
pub type CountMap = BTreeMap<String, u64>;

/// Entry of the configured mod list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModInfo {
    pub name: String,
    pub unique_name: String,
    pub repo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utility: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<bool>,
}

/// Release-shaped record, used for the mod manager itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub version: String,
    pub download_url: String,
    pub download_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installer_download_url: Option<String>,
}

/// Pre-release published ahead of the latest stable release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prerelease {
    pub version: String,
    pub download_url: String,
}

/// One mod with its latest release information.
///
/// Release notes are kept for notifications but never serialized into the
/// catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModRecord {
    pub name: String,
    pub unique_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utility: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<bool>,
    pub version: String,
    #[serde(default)]
    pub download_url: String,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<Prerelease>,
    #[serde(default, skip_serializing)]
    pub latest_release_description: Option<String>,
    #[serde(default, skip_serializing)]
    pub latest_prerelease_description: Option<String>,
}

impl ModRecord {
    /// Returns whether the mod belongs to the alpha tier.
    #[must_use]
    pub fn is_alpha(&self) -> bool {
        self.alpha.unwrap_or(false)
    }
}

/// A mod record with analytics attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedMod {
    #[serde(flatten)]
    pub record: ModRecord,
    pub view_count: u64,
    pub install_count: u64,
}

/// View and install counts gathered from the analytics sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyticsMaps {
    /// Keyed by [`crate::enrich::mod_path_name`] of the mod name.
    pub views: CountMap,
    /// Keyed by unique name.
    pub installs: CountMap,
}
