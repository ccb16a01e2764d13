// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> load config --> Logging --> Command Dispatch
//!   Run | Options | Inis | Version
//! ```

use std::process::ExitCode;

use modcat::cli::global::GlobalOptions;
use modcat::cli::{self, Command};
use modcat::cmd::config::{run_inis_command, run_options_command};
use modcat::cmd::run::run_command;
use modcat::config::loader::ConfigLoader;
use modcat::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use modcat::logging::{LogConfig, LogGuard, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Inis) => {
            let loader = build_config_loader(&cli.global);
            run_inis_command(&loader.format_loaded_files());
            Ok(())
        }
        Some(Command::Options) => {
            load_config(&cli.global, &[]).map(|config| run_options_command(&config))
        }
        Some(Command::Run(args)) => match load_config(&cli.global, &args.to_config_overrides()) {
            Ok(config) => match start_logging(&config) {
                Ok(_log_guard) => run_command(&config).await,
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Run failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn start_logging(config: &Config) -> modcat::error::Result<LogGuard> {
    let global = &config.global;
    let log_config = LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .with_json(global.json_logs)
        .build();
    init_logging(&log_config)
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

fn load_config(
    global: &GlobalOptions,
    command_overrides: &[(&str, String)],
) -> modcat::error::Result<Config> {
    let mut loader = build_config_loader(global).apply_overrides(&global.to_config_overrides())?;
    for (key, value) in command_overrides {
        loader = loader.set(key, value.as_str())?;
    }
    loader.build().map_err(|e| {
        eprintln!("Failed to load config: {e:#}");
        e
    })
}
