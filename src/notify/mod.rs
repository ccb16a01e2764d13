// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Notification routing and dispatch.
//!
//! ```text
//! ChangeEvent
//!    |  resolve()
//!    |    mod_hook_urls[uniqueName]  -> override endpoint, no role mention
//!    |    else hook_url              -> global endpoint + role
//!    |         New     -> new_mod_role_id
//!    |         Updated -> update_role_id
//!    v
//! compose() -> WebhookMessage
//!    |
//!    v
//! join_all(transport.send(...))   failures logged, never raised
//! ```
//!
//! Without a global endpoint the whole phase is skipped, overrides included.

pub mod message;
pub mod webhook;

#[cfg(test)]
mod tests;

use futures_util::future::{BoxFuture, join_all};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::diff::ChangeEvent;
use crate::error::{CatalogError, CatalogResult, NetworkError, NotifyError};

pub use message::{WebhookMessage, compose};
pub use webhook::DiscordWebhook;

/// Where notifications go and whom they mention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSettings {
    /// Global endpoint. `None` disables notifications.
    pub hook_url: Option<String>,
    /// Role mentioned on updates.
    pub update_role_id: Option<String>,
    /// Role mentioned on new mods.
    pub new_mod_role_id: Option<String>,
    /// Per-mod endpoint overrides keyed by unique name.
    pub mod_hook_urls: BTreeMap<String, String>,
}

/// Resolved destination of one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTarget {
    pub endpoint: String,
    pub role_id: Option<String>,
}

/// Delivers one message to one endpoint.
pub trait Transport: Send + Sync {
    fn send<'a>(
        &'a self,
        target: &'a NotificationTarget,
        message: &'a WebhookMessage,
    ) -> BoxFuture<'a, CatalogResult<()>>;
}

/// Outcome counts of a dispatch phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failed: usize,
    /// No global endpoint was configured.
    pub skipped: bool,
}

pub struct NotificationRouter<'a> {
    settings: &'a NotificationSettings,
    transport: &'a dyn Transport,
}

impl<'a> NotificationRouter<'a> {
    #[must_use]
    pub fn new(settings: &'a NotificationSettings, transport: &'a dyn Transport) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Resolve the destination for `event`, or `None` when notifications are
    /// disabled.
    #[must_use]
    pub fn resolve(&self, event: &ChangeEvent) -> Option<NotificationTarget> {
        let global = non_empty(self.settings.hook_url.as_deref())?;

        if let Some(endpoint) = self.settings.mod_hook_urls.get(event.unique_name()) {
            return Some(NotificationTarget {
                endpoint: endpoint.clone(),
                role_id: None,
            });
        }

        let role_id = if event.is_new() {
            &self.settings.new_mod_role_id
        } else {
            &self.settings.update_role_id
        };
        Some(NotificationTarget {
            endpoint: global.to_string(),
            role_id: non_empty(role_id.as_deref()).map(str::to_string),
        })
    }

    /// Send one message per event, all concurrently.
    pub async fn dispatch(&self, events: &[ChangeEvent]) -> DispatchReport {
        if non_empty(self.settings.hook_url.as_deref()).is_none() {
            info!(events = events.len(), "No notification endpoint configured, skipping");
            return DispatchReport {
                skipped: true,
                ..DispatchReport::default()
            };
        }

        let deliveries = events.iter().filter_map(|event| {
            let target = self.resolve(event)?;
            let message = compose(event, target.role_id.as_deref());
            Some(self.deliver(event, target, message))
        });
        let results = join_all(deliveries).await;

        let delivered = results.iter().filter(|ok| **ok).count();
        let report = DispatchReport {
            delivered,
            failed: results.len() - delivered,
            skipped: false,
        };
        info!(
            delivered = report.delivered,
            failed = report.failed,
            "Notifications dispatched"
        );
        report
    }

    async fn deliver(
        &self,
        event: &ChangeEvent,
        target: NotificationTarget,
        message: WebhookMessage,
    ) -> bool {
        let unique_name = event.unique_name();
        match self.transport.send(&target, &message).await {
            Ok(()) => {
                debug!(unique_name, "Notification delivered");
                true
            }
            Err(e) => {
                let error = delivery_error(unique_name, &e);
                warn!(unique_name, %error, "Notification failed");
                false
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn delivery_error(unique_name: &str, error: &CatalogError) -> NotifyError {
    if let CatalogError::Network(network) = error
        && let NetworkError::HttpError { status, .. } = &**network
    {
        return NotifyError::Rejected {
            unique_name: unique_name.to_string(),
            status: *status,
        };
    }
    NotifyError::Transport {
        unique_name: unique_name.to_string(),
        message: error.to_string(),
    }
}
