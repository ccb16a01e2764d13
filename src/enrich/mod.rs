// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Analytics enrichment and release-tier partitioning.
//!
//! ```text
//! Catalog + AnalyticsMaps
//!    viewCount    = views[mod_path_name(name)]  or 0
//!    installCount = installs[uniqueName]        or 0
//!        |
//!        v
//! Vec<EnrichedMod> --partition--> releases | alphaReleases
//! ```

use crate::model::{AnalyticsMaps, EnrichedMod, ModRecord};

/// Path-name of a mod as used by the mod website and its analytics.
///
/// Removes every character that is not an ASCII letter, digit or `_`, then
/// lower-cases. Must stay identical to the website's routing rule or view
/// counts stop matching.
#[must_use]
pub fn mod_path_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Attach view and install counts to every record, keeping order.
#[must_use]
pub fn enrich(catalog: &[ModRecord], analytics: &AnalyticsMaps) -> Vec<EnrichedMod> {
    catalog
        .iter()
        .map(|record| EnrichedMod {
            view_count: analytics
                .views
                .get(&mod_path_name(&record.name))
                .copied()
                .unwrap_or(0),
            install_count: analytics
                .installs
                .get(&record.unique_name)
                .copied()
                .unwrap_or(0),
            record: record.clone(),
        })
        .collect()
}

/// Enriched catalog split by release tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partitioned {
    pub releases: Vec<EnrichedMod>,
    pub alpha_releases: Vec<EnrichedMod>,
}

/// Split into stable and alpha tiers; relative order is kept in both.
#[must_use]
pub fn partition(mods: Vec<EnrichedMod>) -> Partitioned {
    let (alpha_releases, releases) = mods.into_iter().partition(|m| m.record.is_alpha());
    Partitioned {
        releases,
        alpha_releases,
    }
}
