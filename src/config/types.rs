// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! [global]         log levels, log file, JSON console logs
//! [sources]        mod list, mod manager repo, analytics, snapshot, GitHub
//! [output]         out_file, step_output
//! [notifications]  hook_url, role ids, mod_hook_urls
//! ```

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::logging::LogLevel;
use crate::notify::NotificationSettings;
use crate::source::github::DEFAULT_API_URL;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. No file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Emit console logs as JSON lines.
    pub json_logs: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            json_logs: false,
        }
    }
}

/// Upstream source locations and credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// Mod list: inline JSON array or an http(s) URL serving one.
    pub mods: String,
    /// `owner/name` or URL of the mod manager repository.
    pub mod_manager_repo: String,
    /// Previous catalog: http(s) URL or local path.
    pub snapshot: String,
    /// View-count report endpoint.
    pub view_counts_url: String,
    /// Install-count report endpoint.
    pub install_counts_url: String,
    /// Bearer credential for both analytics endpoints.
    pub analytics_credential: String,
    /// Repository host API base URL.
    pub github_api_url: String,
    /// Optional repository host token (raises rate limits).
    pub github_token: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            mods: String::new(),
            mod_manager_repo: String::new(),
            snapshot: String::new(),
            view_counts_url: String::new(),
            install_counts_url: String::new(),
            analytics_credential: String::new(),
            github_api_url: DEFAULT_API_URL.to_string(),
            github_token: String::new(),
            request_timeout_secs: 30,
        }
    }
}

/// Where the serialized catalog goes besides stdout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Catalog artifact path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_file: Option<PathBuf>,
    /// CI step output file (`GITHUB_OUTPUT`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_output: Option<PathBuf>,
}

/// Change notification settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationsConfig {
    /// Global webhook endpoint. Empty disables notifications.
    pub hook_url: String,
    /// Role mentioned on mod updates.
    pub update_role_id: String,
    /// Role mentioned on new mods.
    pub new_mod_role_id: String,
    /// Per-mod endpoint overrides keyed by unique name.
    pub mod_hook_urls: ModHookUrls,
}

impl NotificationsConfig {
    /// Settings consumed by the notification router.
    #[must_use]
    pub fn settings(&self) -> NotificationSettings {
        let optional = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        NotificationSettings {
            hook_url: optional(&self.hook_url),
            update_role_id: optional(&self.update_role_id),
            new_mod_role_id: optional(&self.new_mod_role_id),
            mod_hook_urls: self.mod_hook_urls.0.clone(),
        }
    }
}

/// Unique name to webhook URL overrides.
///
/// Accepts a TOML table or a JSON object string (`{"Mod.Name": "https://..."}`);
/// an empty string means no overrides. Every URL must be http(s).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModHookUrls(pub BTreeMap<String, String>);

impl ModHookUrls {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn validated<E: de::Error>(map: BTreeMap<String, String>) -> Result<Self, E> {
        for (unique_name, url) in &map {
            if unique_name.trim().is_empty() {
                return Err(E::custom("mod_hook_urls: empty unique name"));
            }
            let url = url.trim();
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(E::custom(format!(
                    "mod_hook_urls: '{unique_name}' has invalid URL '{url}'"
                )));
            }
        }
        Ok(Self(map))
    }
}

impl<'de> Deserialize<'de> for ModHookUrls {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ModHookUrlsVisitor;

        impl<'de> Visitor<'de> for ModHookUrlsVisitor {
            type Value = ModHookUrls;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table or a JSON object string of unique name to URL")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                if value.trim().is_empty() {
                    return Ok(ModHookUrls::default());
                }
                let map: BTreeMap<String, String> = serde_json::from_str(value)
                    .map_err(|e| E::custom(format!("mod_hook_urls: invalid JSON object: {e}")))?;
                ModHookUrls::validated(map)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = BTreeMap::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    map.insert(key, value);
                }
                ModHookUrls::validated(map)
            }
        }

        deserializer.deserialize_any(ModHookUrlsVisitor)
    }
}
