// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for modcat.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. modcat.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. MODCAT_* env vars
//! 5. --set and dedicated CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! MODCAT_SOURCES__MODS=https://...             → sources.mods
//! MODCAT_NOTIFICATIONS__HOOK_URL=https://...   → notifications.hook_url
//! MODCAT_NOTIFICATIONS__MOD_HOOK_URLS='{...}'  → notifications.mod_hook_urls
//! ```
//!
//! Sections are separated by a double underscore because keys contain
//! single ones.

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

use loader::ConfigLoader;
use types::{GlobalConfig, NotificationsConfig, OutputConfig, SourcesConfig};

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "modcat.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "MODCAT";

const HIDDEN: &str = "[hidden]";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Upstream sources.
    pub sources: SourcesConfig,
    /// Artifact output.
    pub output: OutputConfig,
    /// Change notifications.
    pub notifications: NotificationsConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use modcat::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("modcat.toml")
    ///     .with_env_prefix("MODCAT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Format configuration options for display.
    ///
    /// Credentials and webhook URLs are hidden with a `[hidden]` marker.
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_sources_options(&mut options);
        self.format_output_options(&mut options);
        self.format_notifications_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".into(), display_path(self.global.log_file.as_ref()));
        options.insert("global.json_logs".into(), self.global.json_logs.to_string());
    }

    fn format_sources_options(&self, options: &mut BTreeMap<String, String>) {
        let s = &self.sources;
        let mods = if s.mods.trim_start().starts_with('[') {
            "<inline>".to_string()
        } else {
            s.mods.clone()
        };
        options.insert("sources.mods".into(), mods);
        options.insert("sources.mod_manager_repo".into(), s.mod_manager_repo.clone());
        options.insert("sources.snapshot".into(), s.snapshot.clone());
        options.insert("sources.view_counts_url".into(), s.view_counts_url.clone());
        options.insert("sources.install_counts_url".into(), s.install_counts_url.clone());
        options.insert("sources.github_api_url".into(), s.github_api_url.clone());
        options.insert(
            "sources.request_timeout_secs".into(),
            s.request_timeout_secs.to_string(),
        );
        if !s.analytics_credential.is_empty() {
            options.insert("sources.analytics_credential".into(), HIDDEN.into());
        }
        if !s.github_token.is_empty() {
            options.insert("sources.github_token".into(), HIDDEN.into());
        }
    }

    fn format_output_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("output.out_file".into(), display_path(self.output.out_file.as_ref()));
        options.insert(
            "output.step_output".into(),
            display_path(self.output.step_output.as_ref()),
        );
    }

    fn format_notifications_options(&self, options: &mut BTreeMap<String, String>) {
        let n = &self.notifications;
        if !n.hook_url.is_empty() {
            options.insert("notifications.hook_url".into(), HIDDEN.into());
        }
        options.insert("notifications.update_role_id".into(), n.update_role_id.clone());
        options.insert("notifications.new_mod_role_id".into(), n.new_mod_role_id.clone());
        for unique_name in n.mod_hook_urls.0.keys() {
            options.insert(
                format!("notifications.mod_hook_urls.{unique_name}"),
                HIDDEN.into(),
            );
        }
    }
}

fn display_path(path: Option<&PathBuf>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}
