// Integration tests: HTTP endpoints

mod common;

use appstats::history::{BackfillMode, HistoryBuffer};
use appstats::routes::{self, AppIdentity};
use axum_test::TestServer;
use common::*;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

fn test_history() -> Arc<HistoryBuffer> {
    Arc::new(HistoryBuffer::backfill(
        &grouped_multi(0, &["0", "1"]),
        NonZeroUsize::new(100).unwrap(),
        chrono::Duration::seconds(3),
        BackfillMode::Repeat,
    ))
}

fn test_app(history: Arc<HistoryBuffer>) -> axum::Router {
    routes::app(
        history,
        AppIdentity {
            name: "web".into(),
            guid: "guid-1".into(),
        },
        3,
    )
}

#[tokio::test]
async fn test_data_json_serves_window_newest_first() {
    let history = test_history();
    history.push(grouped(3));
    let server = TestServer::new(test_app(history)).unwrap();

    let response = server.get("/data.json").await;
    response.assert_status_ok();
    assert!(
        response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("application/json")
    );
    let records: Vec<BTreeMap<String, String>> = response.json();
    assert_eq!(records.len(), 100);
    assert_eq!(records[0]["time"], "2014-12-07T16:41:08Z");
    assert_eq!(records[0]["cpu_0"], "0.100000");
    assert!(!records[0].contains_key("cpu_1"));
    assert_eq!(records[1]["time"], "2014-12-07T16:41:05Z");
    assert_eq!(records[1]["mem_1"], "100");
    assert_eq!(records[1]["disk_1"], "200");
    assert_eq!(records[99]["time"], "2014-12-07T16:36:11Z");
}

#[tokio::test]
async fn test_data_json_reflects_pushes_between_requests() {
    let history = test_history();
    let server = TestServer::new(test_app(history.clone())).unwrap();

    let first: Vec<BTreeMap<String, String>> = server.get("/data.json").await.json();
    history.push(grouped(3));
    let second: Vec<BTreeMap<String, String>> = server.get("/data.json").await.json();

    assert_eq!(first.len(), second.len());
    assert_eq!(second[1], first[0]);
    assert_eq!(second[99], first[98]);
}

#[tokio::test]
async fn test_version_endpoint() {
    let server = TestServer::new(test_app(test_history())).unwrap();
    let response = server.get("/version").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json.get("name").and_then(|v| v.as_str()), Some("appstats"));
    assert!(json.get("version").and_then(|v| v.as_str()).is_some());
}

#[tokio::test]
async fn test_app_info_endpoint() {
    let server = TestServer::new(test_app(test_history())).unwrap();
    let json: serde_json::Value = server.get("/api/app").await.json();
    assert_eq!(json["name"], "web");
    assert_eq!(json["guid"], "guid-1");
    assert_eq!(json["capacity"], 100);
    assert_eq!(json["sampleIntervalSecs"], 3);
}

#[tokio::test]
async fn test_root_serves_index_html() {
    let server = TestServer::new(test_app(test_history())).unwrap();
    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(
        response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    assert!(response.text().contains("app.js"));
}

#[tokio::test]
async fn test_named_assets_have_inferred_content_type() {
    let server = TestServer::new(test_app(test_history())).unwrap();

    let js = server.get("/app.js").await;
    js.assert_status_ok();
    assert!(
        js.header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/javascript")
    );
    assert!(js.text().contains("data.json"));

    let css = server.get("/style.css").await;
    css.assert_status_ok();
    assert!(
        css.header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/css")
    );
}

#[tokio::test]
async fn test_missing_asset_is_404_with_empty_body() {
    let server = TestServer::new(test_app(test_history())).unwrap();
    let response = server.get("/nope/missing.png").await;
    response.assert_status_not_found();
    assert!(response.as_bytes().is_empty());
}
