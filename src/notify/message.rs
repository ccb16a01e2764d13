// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Webhook message composition.

use serde::Serialize;

use crate::diff::{ChangeEvent, ReleaseChannel};

/// Release notes longer than this many characters are cut.
pub const MAX_NOTES_CHARS: usize = 1000;

const COLOR_NEW: u32 = 0x0057_F287;
const COLOR_UPDATE: u32 = 0x0058_65F2;
const COLOR_PRERELEASE: u32 = 0x00FE_E75C;

/// Discord-style webhook payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    pub allowed_mentions: AllowedMentions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub color: u32,
}

/// Only the listed roles may be pinged; `@everyone` and user mentions in
/// release notes stay inert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllowedMentions {
    pub parse: Vec<String>,
    pub roles: Vec<String>,
}

/// Cut `notes` to [`MAX_NOTES_CHARS`] characters, marking the cut.
#[must_use]
pub fn truncate_notes(notes: &str) -> String {
    let notes = notes.trim();
    match notes.char_indices().nth(MAX_NOTES_CHARS) {
        Some((cut, _)) => format!("{}…", notes[..cut].trim_end()),
        None => notes.to_string(),
    }
}

fn headline(event: &ChangeEvent) -> (String, String, u32) {
    let record = event.record();
    match event {
        ChangeEvent::New { .. } => (
            format!("New mod: {}", record.name),
            format!(
                "**{}** by {} was added with version `{}`.",
                record.name,
                if record.author.is_empty() { "an unknown author" } else { record.author.as_str() },
                record.version
            ),
            COLOR_NEW,
        ),
        ChangeEvent::Updated {
            previous_version,
            channel: ReleaseChannel::Stable,
            ..
        } => (
            format!("Updated: {}", record.name),
            format!("`{previous_version}` -> `{}`", record.version),
            COLOR_UPDATE,
        ),
        ChangeEvent::Updated {
            previous_version,
            channel: ReleaseChannel::Prerelease,
            ..
        } => {
            let description = match (previous_version.is_empty(), event.new_version()) {
                (_, "") => format!("Prerelease `{previous_version}` was withdrawn."),
                (true, next) => format!("Prerelease `{next}` is available."),
                (false, next) => format!("Prerelease `{previous_version}` -> `{next}`"),
            };
            (
                format!("Prerelease: {}", record.name),
                description,
                COLOR_PRERELEASE,
            )
        }
    }
}

fn release_notes(event: &ChangeEvent) -> Option<&str> {
    let record = event.record();
    let notes = match event {
        ChangeEvent::Updated {
            channel: ReleaseChannel::Prerelease,
            ..
        } => record.latest_prerelease_description.as_deref(),
        _ => record.latest_release_description.as_deref(),
    };
    notes.filter(|n| !n.trim().is_empty())
}

/// Compose the message for one change, mentioning `role_id` if given.
#[must_use]
pub fn compose(event: &ChangeEvent, role_id: Option<&str>) -> WebhookMessage {
    let (title, mut description, color) = headline(event);
    if let Some(notes) = release_notes(event) {
        description.push_str("\n\n");
        description.push_str(&truncate_notes(notes));
    }

    let repo = &event.record().repo;
    let roles: Vec<String> = role_id.map(str::to_string).into_iter().collect();

    WebhookMessage {
        content: role_id.map(|id| format!("<@&{id}>")),
        embeds: vec![Embed {
            title,
            description,
            url: (!repo.is_empty()).then(|| repo.clone()),
            color,
        }],
        allowed_mentions: AllowedMentions {
            parse: Vec::new(),
            roles,
        },
    }
}
