// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Webhook transport over HTTP.

use futures_util::future::BoxFuture;
use std::time::Duration;

use super::message::WebhookMessage;
use super::{NotificationTarget, Transport};
use crate::error::CatalogResult;
use crate::net::{DEFAULT_TIMEOUT, HttpRequest};

/// Posts messages as JSON to Discord-compatible webhook URLs.
#[derive(Debug, Clone)]
pub struct DiscordWebhook {
    timeout: Duration,
}

impl DiscordWebhook {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for DiscordWebhook {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Transport for DiscordWebhook {
    fn send<'a>(
        &'a self,
        target: &'a NotificationTarget,
        message: &'a WebhookMessage,
    ) -> BoxFuture<'a, CatalogResult<()>> {
        Box::pin(async move {
            HttpRequest::post(target.endpoint.as_str())
                .timeout(self.timeout)
                .send_json(message)
                .await
        })
    }
}
