// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end pipeline tests against mocked upstreams.
//!
//! Every source, the snapshot and the webhooks are served by one wiremock
//! server; the pipeline is driven through `run_pipeline` with the real
//! HTTP-backed sources built from configuration.

use modcat::cmd::run::{ArtifactTargets, run_pipeline};
use modcat::collect::TracingReporter;
use modcat::config::Config;
use modcat::notify::DiscordWebhook;
use modcat::source::SourceSet;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_mod(server: &MockServer, repo: &str, tag: &str) {
    mount_json(
        server,
        &format!("/repos/{repo}/releases"),
        json!([{
            "tag_name": tag,
            "body": format!("Changes in {tag}"),
            "assets": [{
                "name": "mod.zip",
                "browser_download_url": format!("https://dl.example.com/{repo}/{tag}.zip"),
                "download_count": 10
            }]
        }]),
    )
    .await;
    mount_json(
        server,
        &format!("/repos/{repo}"),
        json!({"description": "A mod", "owner": {"login": "owner"}}),
    )
    .await;
}

fn config_for(server: &MockServer) -> Config {
    let uri = server.uri();
    let mods = json!([
        {"name": "Zeta Mod", "uniqueName": "owner.zeta", "repo": "owner/zeta"},
        {"name": "Alpha Thing!", "uniqueName": "owner.alpha", "repo": "owner/alpha", "alpha": true},
        {"name": "Beta Mod", "uniqueName": "owner.beta", "repo": "owner/beta"}
    ])
    .to_string();
    let overrides = json!({"owner.beta": format!("{uri}/hooks/beta")}).to_string();

    Config::parse(&format!(
        r#"
[sources]
mods = '{mods}'
mod_manager_repo = "owner/manager"
snapshot = "{uri}/database.json"
view_counts_url = "{uri}/analytics/views"
install_counts_url = "{uri}/analytics/installs"
analytics_credential = "secret"
github_api_url = "{uri}"
request_timeout_secs = 5

[notifications]
hook_url = "{uri}/hooks/global"
update_role_id = "111"
new_mod_role_id = "222"
mod_hook_urls = '{overrides}'
"#
    ))
    .expect("test config should parse")
}

async fn mount_upstreams(server: &MockServer) {
    mount_mod(server, "owner/zeta", "2.0").await;
    mount_mod(server, "owner/alpha", "0.1").await;
    mount_mod(server, "owner/beta", "1.0").await;
    mount_json(
        server,
        "/repos/owner/manager/releases",
        json!([{
            "tag_name": "v3.1.0",
            "assets": [{
                "name": "manager.zip",
                "browser_download_url": "https://dl.example.com/manager.zip",
                "download_count": 99
            }]
        }]),
    )
    .await;
    mount_json(
        server,
        "/database.json",
        json!({
            "releases": [
                {"name": "Zeta Mod", "uniqueName": "owner.zeta", "version": "1.0"},
                {"name": "Removed", "uniqueName": "owner.removed", "version": "1.0"}
            ],
            "alphaReleases": [
                {"name": "Alpha Thing!", "uniqueName": "owner.alpha", "version": "0.1", "alpha": true}
            ]
        }),
    )
    .await;
}

#[tokio::test]
async fn test_pipeline_degrades_gracefully_when_analytics_fail() {
    let server = MockServer::start().await;
    mount_upstreams(&server).await;
    Mock::given(method("GET"))
        .and(path("/analytics/views"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/analytics/installs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let sources = SourceSet::from_config(&config);
    let report = run_pipeline(
        &sources,
        &TracingReporter,
        &config.notifications.settings(),
        &DiscordWebhook::default(),
        &ArtifactTargets::default(),
    )
    .await
    .expect("pipeline should complete");

    assert_eq!(report.degraded, ["viewCounts", "installCounts"]);

    let catalog: Value = serde_json::from_str(&report.catalog).expect("catalog is JSON");
    let releases = catalog["releases"].as_array().expect("releases array");
    let names: Vec<_> = releases.iter().map(|m| m["uniqueName"].as_str()).collect();
    assert_eq!(names, [Some("owner.beta"), Some("owner.zeta")]);
    assert_eq!(catalog["alphaReleases"][0]["uniqueName"], "owner.alpha");
    for entry in releases {
        assert_eq!(entry["viewCount"], 0);
        assert_eq!(entry["installCount"], 0);
        assert!(entry.get("latestReleaseDescription").is_none());
    }
    assert_eq!(catalog["modManager"]["version"], "v3.1.0");
}

#[tokio::test]
async fn test_pipeline_enriches_routes_and_writes_artifacts() {
    let server = MockServer::start().await;
    mount_upstreams(&server).await;
    mount_json(&server, "/analytics/views", json!({"zetamod": 15, "alphathing": 2})).await;
    mount_json(
        &server,
        "/analytics/installs",
        json!({"rows": [{"key": "owner.zeta", "count": 8}]}),
    )
    .await;

    // Zeta changed version: update on the global hook mentioning the update role.
    Mock::given(method("POST"))
        .and(path("/hooks/global"))
        .and(body_partial_json(json!({
            "content": "<@&111>",
            "allowed_mentions": {"roles": ["111"]}
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    // Beta is new and overridden: its own hook, no role mention.
    Mock::given(method("POST"))
        .and(path("/hooks/beta"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let targets = ArtifactTargets {
        out_file: Some(dir.path().join("out").join("database.json")),
        step_output: Some(dir.path().join("github_output")),
    };

    let config = config_for(&server);
    let sources = SourceSet::from_config(&config);
    let report = run_pipeline(
        &sources,
        &TracingReporter,
        &config.notifications.settings(),
        &DiscordWebhook::default(),
        &targets,
    )
    .await
    .expect("pipeline should complete");

    assert!(report.degraded.is_empty());
    assert_eq!(report.changes, 2);
    assert_eq!(
        (report.notifications.delivered, report.notifications.failed),
        (2, 0)
    );

    let catalog: Value = serde_json::from_str(&report.catalog).expect("catalog is JSON");
    let zeta = &catalog["releases"][1];
    assert_eq!(zeta["uniqueName"], "owner.zeta");
    assert_eq!(zeta["viewCount"], 15);
    assert_eq!(zeta["installCount"], 8);
    assert_eq!(catalog["alphaReleases"][0]["viewCount"], 2);

    let written = std::fs::read_to_string(dir.path().join("out").join("database.json"))
        .expect("artifact should be written");
    assert_eq!(written, report.catalog);

    let step_output =
        std::fs::read_to_string(dir.path().join("github_output")).expect("step output written");
    assert!(step_output.starts_with("releases<<MODCAT_EOF\n"));
    assert!(step_output.contains(&report.catalog));

    server.verify().await;
}

#[tokio::test]
async fn test_pipeline_failed_webhook_does_not_fail_run() {
    let server = MockServer::start().await;
    mount_upstreams(&server).await;
    Mock::given(method("POST"))
        .and(path("/hooks/global"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hooks/beta"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let report = run_pipeline(
        &SourceSet::from_config(&config),
        &TracingReporter,
        &config.notifications.settings(),
        &DiscordWebhook::default(),
        &ArtifactTargets::default(),
    )
    .await
    .expect("pipeline should complete");

    assert_eq!(
        (report.notifications.delivered, report.notifications.failed),
        (1, 1)
    );
}

#[tokio::test]
async fn test_pipeline_with_nothing_configured_yields_empty_catalog() {
    let config = Config::default();
    let report = run_pipeline(
        &SourceSet::from_config(&config),
        &TracingReporter,
        &config.notifications.settings(),
        &DiscordWebhook::default(),
        &ArtifactTargets::default(),
    )
    .await
    .expect("pipeline should complete");

    assert_eq!(report.degraded.len(), 5);
    assert!(report.notifications.skipped);
    insta::assert_snapshot!(report.catalog, @r#"
    {
      "releases": [],
      "alphaReleases": []
    }
    "#);
}
