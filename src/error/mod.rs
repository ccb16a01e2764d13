// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            CatalogError (~24 bytes)
//!                     |
//!   +------+------+---+---+------+------+
//!   |      |      |       |      |      |
//!   v      v      v       v      v      v
//!  Net    Cfg   Source  Notify   Fs   Io/Other
//!  Box    Box    Box     Box    Box   Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Network  Reqwest, HttpError, Decode, Timeout
//!   Config   ParseError, InvalidValue
//!   Source   Unavailable, MissingCredential, InvalidData, InvalidRepo, NoRelease
//!   Notify   Rejected, Transport
//!   Fs       NotFound, IoError
//!
//! All variants boxed => CatalogError fits in 24 bytes.
//! ```
//!
//! Source and notification errors are recoverable within the
//! pipeline: the collector and the router log them and carry on. Config
//! errors abort the run.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`CatalogError`].
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// An upstream data source failed.
    #[error("source error: {0}")]
    Source(#[from] Box<SourceError>),

    /// A notification could not be delivered.
    #[error("notify error: {0}")]
    Notify(#[from] Box<NotifyError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a [`CatalogError::Other`] from a message.
pub fn other(message: impl Into<String>) -> CatalogError {
    CatalogError::Other(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for CatalogError {
                fn from(err: $error) -> Self {
                    CatalogError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    NetworkError => Network,
    ConfigError => Config,
    SourceError => Source,
    NotifyError => Notify,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Connection timeout.
    #[error("connection timeout: {url}")]
    Timeout { url: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration input.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Source Errors ---

/// Upstream data source errors.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be reached or answered with an error.
    #[error("source '{source_name}' unavailable: {message}")]
    Unavailable {
        source_name: &'static str,
        message: String,
    },

    /// The source requires a credential that was not configured.
    #[error("source '{0}' requires a credential")]
    MissingCredential(&'static str),

    /// The source returned data that does not match its contract.
    #[error("source '{source_name}' returned invalid data: {message}")]
    InvalidData {
        source_name: &'static str,
        message: String,
    },

    /// A repository locator could not be understood.
    #[error("invalid repository locator: {0}")]
    InvalidRepo(String),

    /// A repository has no usable release.
    #[error("no release found for {0}")]
    NoRelease(String),
}

// --- Notify Errors ---

/// Notification delivery errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The endpoint rejected the message.
    #[error("endpoint rejected notification for '{unique_name}' with status {status}")]
    Rejected { unique_name: String, status: u16 },

    /// The transport failed before a response was received.
    #[error("failed to deliver notification for '{unique_name}': {message}")]
    Transport {
        unique_name: String,
        message: String,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
