// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the `run` command.
//!
//! Every flag mirrors a config key and can also come from the environment,
//! which is how a CI step passes its inputs.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Writes the catalog to this file as well as stdout.
    #[arg(long = "out-file", value_name = "FILE", env = "MODCAT_OUT_FILE")]
    pub out_file: Option<PathBuf>,

    /// Mod list: inline JSON array or URL.
    #[arg(long, value_name = "JSON|URL", env = "MODCAT_MODS")]
    pub mods: Option<String>,

    /// Global webhook URL. Notifications are off without it.
    #[arg(long = "discord-hook-url", value_name = "URL", env = "MODCAT_DISCORD_HOOK_URL")]
    pub discord_hook_url: Option<String>,

    /// Role mentioned when a mod is updated.
    #[arg(
        long = "discord-mod-update-role-id",
        value_name = "ID",
        env = "MODCAT_DISCORD_MOD_UPDATE_ROLE_ID"
    )]
    pub discord_mod_update_role_id: Option<String>,

    /// Role mentioned when a mod is added.
    #[arg(
        long = "discord-new-mod-role-id",
        value_name = "ID",
        env = "MODCAT_DISCORD_NEW_MOD_ROLE_ID"
    )]
    pub discord_new_mod_role_id: Option<String>,

    /// Per-mod webhook overrides as a JSON object of unique name to URL.
    #[arg(
        long = "discord-mod-hook-urls",
        value_name = "JSON",
        env = "MODCAT_DISCORD_MOD_HOOK_URLS"
    )]
    pub discord_mod_hook_urls: Option<String>,

    /// Credential for the analytics endpoints.
    #[arg(
        long = "analytics-credential",
        value_name = "SECRET",
        env = "MODCAT_ANALYTICS_CREDENTIAL",
        hide_env_values = true
    )]
    pub analytics_credential: Option<String>,

    /// Repository host token.
    #[arg(long = "github-token", value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Step output file the catalog is published to as `releases`.
    #[arg(long = "step-output", value_name = "FILE", env = "GITHUB_OUTPUT")]
    pub step_output: Option<PathBuf>,
}

impl RunArgs {
    /// Pairs of config key and value for every flag that was given.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, String)> {
        let path = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string());
        [
            ("output.out_file", path(&self.out_file)),
            ("output.step_output", path(&self.step_output)),
            ("sources.mods", self.mods.clone()),
            ("sources.analytics_credential", self.analytics_credential.clone()),
            ("sources.github_token", self.github_token.clone()),
            ("notifications.hook_url", self.discord_hook_url.clone()),
            (
                "notifications.update_role_id",
                self.discord_mod_update_role_id.clone(),
            ),
            (
                "notifications.new_mod_role_id",
                self.discord_new_mod_role_id.clone(),
            ),
            (
                "notifications.mod_hook_urls",
                self.discord_mod_hook_urls.clone(),
            ),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}
