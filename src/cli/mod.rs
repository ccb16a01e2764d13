// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for modcat using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! modcat [global options] <command>
//! run [--out-file F] [--mods JSON|URL] [--discord-* ...]
//! options
//! inis
//! version
//! ```

pub mod global;
pub mod run;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::run::RunArgs;
use clap::{Parser, Subcommand};

/// Mod catalog aggregator.
#[derive(Debug, Parser)]
#[command(
    name = "modcat",
    author,
    version,
    about = "Mod Catalog Aggregator",
    long_about = "modcat Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Builds the mod catalog from the configured sources, prints it\n\
                  to stdout and notifies about new and updated mods.\n\n\
                  `modcat run` does a full run. See `modcat <command> --help`\n\
                  for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  modcat reads `modcat.toml` from the current directory if it\n\
                  exists, then every file given with --config, in order. MODCAT_*\n\
                  environment variables (MODCAT_SECTION__KEY) override files, and\n\
                  command-line flags override everything. Use --no-default-config\n\
                  to skip `modcat.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetches all sources, writes the catalog and sends notifications.
    Run(RunArgs),

    /// Shows the version.
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files used by modcat.
    Inis,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
