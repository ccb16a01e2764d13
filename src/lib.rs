// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |               run / options / inis
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, env, CLI layers   |
//!              '-------------+-------------'
//!                            v
//!    source (GitHub, analytics, snapshot) --> collect (settle-all)
//!                                                  |
//!                         +------------------------+
//!                         v                        v
//!               enrich -> output              diff -> notify
//!             (partition, JSON)            (route, webhook)
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, net, model |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod collect;
pub mod config;
pub mod diff;
pub mod enrich;
pub mod error;
pub mod logging;
pub mod model;
pub mod net;
pub mod notify;
pub mod output;
pub mod source;
