//! Contract Test: POST /api/trigger, GET /api/trigger
//!
//! 監査トリガーはサイトを解決し、監査タイプごとに1件ずつキューへ送信する。

use crate::support::{accept_queue, build_app, empty_request, json_request, reject_queue};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_trigger_cwv_all_skips_disabled_site() {
    let t = build_app().await;
    accept_queue(&t.queue).await;
    t.create_site(json!({
        "baseURL": "https://a.example.com",
        "auditConfig": {"auditTypeConfigs": {"cwv": {"disabled": true}}}
    }))
    .await;
    let b = t
        .create_site(json!({"baseURL": "https://b.example.com"}))
        .await;

    let (status, body) = t
        .send(json_request(
            Method::POST,
            "/api/trigger",
            json!({"type": "cwv", "url": "all"}),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    let confirmations = body["message"].as_array().unwrap();
    assert_eq!(confirmations.len(), 1);
    assert_eq!(confirmations[0]["type"], "cwv");
    assert_eq!(confirmations[0]["siteCount"], 1);
    assert_eq!(confirmations[0]["messageId"], "queued");

    let messages = t.queued_messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["type"], "cwv");
    assert_eq!(messages[0]["siteIds"], json!([b["id"]]));
}

#[tokio::test]
async fn test_trigger_lhs_dispatches_desktop_then_mobile() {
    let t = build_app().await;
    accept_queue(&t.queue).await;
    let a = t
        .create_site(json!({
            "baseURL": "https://a.example.com",
            "auditConfig": {"auditTypeConfigs": {"lhs-mobile": {"disabled": true}}}
        }))
        .await;

    let (status, body) = t
        .send(json_request(
            Method::POST,
            "/api/trigger",
            json!({"type": "lhs", "url": "https://a.example.com"}),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    let types: Vec<_> = body["message"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["type"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(types, vec!["lhs-desktop", "lhs-mobile"]);

    let messages = t.queued_messages().await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["type"], "lhs-desktop");
    assert_eq!(messages[0]["siteIds"], json!([a["id"]]));
    // mobileは無効化されているが空リストのまま送信される
    assert_eq!(messages[1]["type"], "lhs-mobile");
    assert_eq!(messages[1]["siteIds"], json!([]));
}

#[tokio::test]
async fn test_trigger_forwards_audit_context() {
    let t = build_app().await;
    accept_queue(&t.queue).await;
    t.create_site(json!({"baseURL": "https://a.example.com"}))
        .await;
    let context = json!({"slackContext": {"channel": "C0123", "ts": "1700000000.000100"}});

    let (status, _) = t
        .send(json_request(
            Method::POST,
            "/api/trigger",
            json!({"type": "404", "url": "all", "auditContext": context}),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(t.queued_messages().await[0]["auditContext"], context);
}

#[tokio::test]
async fn test_trigger_excludes_globally_disabled_sites() {
    let t = build_app().await;
    accept_queue(&t.queue).await;
    t.create_site(json!({
        "baseURL": "https://a.example.com",
        "auditConfig": {"auditsDisabled": true}
    }))
    .await;

    let (status, body) = t
        .send(json_request(
            Method::POST,
            "/api/trigger",
            json!({"type": "cwv", "url": "https://a.example.com"}),
        ))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Site not found");
    assert!(t.queued_messages().await.is_empty());
}

#[tokio::test]
async fn test_trigger_unknown_url_is_not_found() {
    let t = build_app().await;
    accept_queue(&t.queue).await;

    let (status, body) = t
        .send(json_request(
            Method::POST,
            "/api/trigger",
            json!({"type": "cwv", "url": "https://missing.example.com"}),
        ))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Site not found");
}

#[tokio::test]
async fn test_trigger_queue_failure_is_internal_error() {
    let t = build_app().await;
    reject_queue(&t.queue).await;
    t.create_site(json!({"baseURL": "https://a.example.com"}))
        .await;

    let (status, body) = t
        .send(json_request(
            Method::POST,
            "/api/trigger",
            json!({"type": "lhs", "url": "all"}),
        ))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to dispatch audit");
    // desktopで失敗した時点で打ち切り
    assert_eq!(t.queued_messages().await.len(), 1);
}

#[tokio::test]
async fn test_trigger_requires_type_and_url() {
    let t = build_app().await;

    let (status, body) = t
        .send(json_request(
            Method::POST,
            "/api/trigger",
            json!({"type": " ", "url": "all"}),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Audit type required");

    let (status, body) = t
        .send(json_request(
            Method::POST,
            "/api/trigger",
            json!({"type": "cwv"}),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "URL required");
}

#[tokio::test]
async fn test_trigger_query_form() {
    let t = build_app().await;
    accept_queue(&t.queue).await;
    t.create_site(json!({"baseURL": "https://a.example.com"}))
        .await;

    let (status, body) = t
        .send(empty_request(Method::GET, "/api/trigger?type=cwv&url=ALL"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"][0]["type"], "cwv");
    assert_eq!(body["message"][0]["siteCount"], 1);
    assert!(t.queued_messages().await[0].get("auditContext").is_none());
}
