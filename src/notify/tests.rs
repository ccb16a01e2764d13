// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use futures_util::future::BoxFuture;
use std::sync::Mutex;

use super::message::{MAX_NOTES_CHARS, truncate_notes};
use super::{
    DispatchReport, NotificationRouter, NotificationSettings, NotificationTarget, Transport,
    WebhookMessage, compose,
};
use crate::diff::{ChangeEvent, ReleaseChannel};
use crate::error::{CatalogResult, NetworkError};
use crate::model::{ModRecord, Prerelease};

const GLOBAL: &str = "https://hooks.example.com/global";
const OVERRIDE: &str = "https://hooks.example.com/special";

#[derive(Default)]
struct RecordingTransport {
    sent: Mutex<Vec<(NotificationTarget, WebhookMessage)>>,
    reject: Option<&'static str>,
}

impl Transport for RecordingTransport {
    fn send<'a>(
        &'a self,
        target: &'a NotificationTarget,
        message: &'a WebhookMessage,
    ) -> BoxFuture<'a, CatalogResult<()>> {
        Box::pin(async move {
            if self.reject == Some(target.endpoint.as_str()) {
                return Err(NetworkError::HttpError {
                    status: 404,
                    url: target.endpoint.clone(),
                }
                .into());
            }
            self.sent
                .lock()
                .unwrap()
                .push((target.clone(), message.clone()));
            Ok(())
        })
    }
}

fn record(unique_name: &str, version: &str) -> ModRecord {
    ModRecord {
        name: format!("Mod {unique_name}"),
        unique_name: unique_name.to_string(),
        description: String::new(),
        author: "Author".to_string(),
        repo: format!("https://github.com/author/{unique_name}"),
        required: None,
        utility: None,
        alpha: None,
        version: version.to_string(),
        download_url: String::new(),
        download_count: 0,
        prerelease: None,
        latest_release_description: Some("Fixed things.".to_string()),
        latest_prerelease_description: None,
    }
}

fn new_event(unique_name: &str) -> ChangeEvent {
    ChangeEvent::New {
        record: record(unique_name, "1.0"),
    }
}

fn updated_event(unique_name: &str) -> ChangeEvent {
    ChangeEvent::Updated {
        record: record(unique_name, "2.0"),
        previous_version: "1.0".to_string(),
        channel: ReleaseChannel::Stable,
    }
}

fn settings() -> NotificationSettings {
    NotificationSettings {
        hook_url: Some(GLOBAL.to_string()),
        update_role_id: Some("111".to_string()),
        new_mod_role_id: Some("222".to_string()),
        mod_hook_urls: [("special".to_string(), OVERRIDE.to_string())]
            .into_iter()
            .collect(),
    }
}

#[test]
fn test_override_takes_precedence_over_global() {
    let settings = settings();
    let transport = RecordingTransport::default();
    let router = NotificationRouter::new(&settings, &transport);

    let special = router.resolve(&updated_event("special")).unwrap();
    assert_eq!(special.endpoint, OVERRIDE);
    assert_eq!(special.role_id, None);

    let other = router.resolve(&updated_event("other")).unwrap();
    assert_eq!(other.endpoint, GLOBAL);
    assert_eq!(other.role_id.as_deref(), Some("111"));

    let fresh = router.resolve(&new_event("other")).unwrap();
    assert_eq!(fresh.role_id.as_deref(), Some("222"));
}

#[test]
fn test_blank_role_ids_mention_nobody() {
    let settings = NotificationSettings {
        update_role_id: Some("  ".to_string()),
        new_mod_role_id: None,
        ..settings()
    };
    let transport = RecordingTransport::default();
    let router = NotificationRouter::new(&settings, &transport);

    assert_eq!(router.resolve(&updated_event("x")).unwrap().role_id, None);
    assert_eq!(router.resolve(&new_event("x")).unwrap().role_id, None);
}

#[tokio::test]
async fn test_no_global_endpoint_skips_everything() {
    let settings = NotificationSettings {
        hook_url: None,
        ..settings()
    };
    let transport = RecordingTransport::default();
    let router = NotificationRouter::new(&settings, &transport);

    assert_eq!(router.resolve(&updated_event("special")), None);
    let report = router
        .dispatch(&[new_event("a"), updated_event("special")])
        .await;

    assert!(report.skipped);
    assert!(transport.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_dispatch_routes_every_event() {
    let settings = settings();
    let transport = RecordingTransport::default();
    let router = NotificationRouter::new(&settings, &transport);

    let report = router
        .dispatch(&[new_event("a"), updated_event("special"), updated_event("b")])
        .await;

    assert_eq!(
        report,
        DispatchReport {
            delivered: 3,
            failed: 0,
            skipped: false
        }
    );
    let sent = transport.sent.lock().unwrap();
    let endpoints: Vec<_> = sent.iter().map(|(t, _)| t.endpoint.as_str()).collect();
    assert_eq!(endpoints, [GLOBAL, OVERRIDE, GLOBAL]);
}

#[tokio::test]
async fn test_failed_delivery_does_not_affect_others() {
    let settings = settings();
    let transport = RecordingTransport {
        reject: Some(OVERRIDE),
        ..RecordingTransport::default()
    };
    let router = NotificationRouter::new(&settings, &transport);

    let report = router
        .dispatch(&[updated_event("special"), new_event("a")])
        .await;

    assert_eq!((report.delivered, report.failed), (1, 1));
    assert_eq!(transport.sent.lock().unwrap()[0].0.endpoint, GLOBAL);
}

#[test]
fn test_compose_update_message() {
    let message = compose(&updated_event("a"), Some("111"));
    let json = serde_json::to_string_pretty(&message).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "content": "<@&111>",
      "embeds": [
        {
          "title": "Updated: Mod a",
          "description": "`1.0` -> `2.0`\n\nFixed things.",
          "url": "https://github.com/author/a",
          "color": 5793266
        }
      ],
      "allowed_mentions": {
        "parse": [],
        "roles": [
          "111"
        ]
      }
    }
    "#);
}

#[test]
fn test_compose_new_mod_without_role() {
    let message = compose(&new_event("a"), None);
    assert_eq!(message.content, None);
    assert!(message.allowed_mentions.roles.is_empty());
    insta::assert_snapshot!(message.embeds[0].description, @r"
    **Mod a** by Author was added with version `1.0`.

    Fixed things.
    ");
}

#[test]
fn test_compose_prerelease_messages() {
    let mut appeared = record("a", "1.0");
    appeared.prerelease = Some(Prerelease {
        version: "1.1-rc1".to_string(),
        download_url: String::new(),
    });
    appeared.latest_prerelease_description = Some("Beta notes".to_string());
    let event = ChangeEvent::Updated {
        record: appeared,
        previous_version: String::new(),
        channel: ReleaseChannel::Prerelease,
    };
    let embed = &compose(&event, None).embeds[0];
    assert_eq!(embed.title, "Prerelease: Mod a");
    assert_eq!(embed.description, "Prerelease `1.1-rc1` is available.\n\nBeta notes");

    let withdrawn = ChangeEvent::Updated {
        record: record("a", "1.0"),
        previous_version: "1.1-rc1".to_string(),
        channel: ReleaseChannel::Prerelease,
    };
    let embed = &compose(&withdrawn, None).embeds[0];
    assert_eq!(embed.description, "Prerelease `1.1-rc1` was withdrawn.");
}

#[test]
fn test_truncate_notes() {
    assert_eq!(truncate_notes("  short  "), "short");

    let long = "é".repeat(MAX_NOTES_CHARS + 10);
    let cut = truncate_notes(&long);
    assert_eq!(cut.chars().count(), MAX_NOTES_CHARS + 1);
    assert!(cut.ends_with('…'));

    let exact = "x".repeat(MAX_NOTES_CHARS);
    assert_eq!(truncate_notes(&exact), exact);
}
