// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["modcat", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "modcat",
        "-l",
        "5",
        "--config",
        "a.toml",
        "-c",
        "b.toml",
        "--set",
        "sources.snapshot=prev.json",
        "options",
    ])
    .unwrap();

    assert_eq!(cli.global.configs.len(), 2);
    insta::assert_debug_snapshot!(cli.global.to_config_overrides(), @r#"
    [
        "sources.snapshot=prev.json",
        "global.output_log_level=5",
        "global.file_log_level=5",
    ]
    "#);
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = Cli::try_parse_from(["modcat", "options", "--log-level", "1", "--json-logs"]).unwrap();
    assert_eq!(cli.global.log_level, Some(1));
    assert!(cli.global.json_logs);
}

#[test]
fn test_log_level_out_of_range_is_rejected() {
    assert!(Cli::try_parse_from(["modcat", "-l", "7", "version"]).is_err());
}

#[test]
fn test_parse_run_arguments() {
    let cli = Cli::try_parse_from([
        "modcat",
        "run",
        "--out-file",
        "database.json",
        "--mods",
        "https://example.com/mods.json",
        "--discord-hook-url",
        "https://hooks.example.com/x",
        "--discord-mod-update-role-id",
        "111",
        "--discord-new-mod-role-id",
        "222",
        "--discord-mod-hook-urls",
        r#"{"a": "https://hooks.example.com/a"}"#,
        "--analytics-credential",
        "secret",
    ])
    .unwrap();

    let Some(Command::Run(args)) = cli.command else {
        panic!("expected run command");
    };
    let overrides: Vec<_> = args
        .to_config_overrides()
        .into_iter()
        .filter(|(key, _)| !matches!(*key, "output.step_output" | "sources.github_token"))
        .collect();
    insta::assert_debug_snapshot!(overrides, @r#"
    [
        (
            "output.out_file",
            "database.json",
        ),
        (
            "sources.mods",
            "https://example.com/mods.json",
        ),
        (
            "sources.analytics_credential",
            "secret",
        ),
        (
            "notifications.hook_url",
            "https://hooks.example.com/x",
        ),
        (
            "notifications.update_role_id",
            "111",
        ),
        (
            "notifications.new_mod_role_id",
            "222",
        ),
        (
            "notifications.mod_hook_urls",
            "{\"a\": \"https://hooks.example.com/a\"}",
        ),
    ]
    "#);
}

#[test]
fn test_no_command_parses() {
    let cli = Cli::try_parse_from(["modcat"]).unwrap();
    assert!(cli.command.is_none());
}
