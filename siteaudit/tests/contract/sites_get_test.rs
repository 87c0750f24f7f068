//! Contract Test: GET /api/sites, /api/sites/:siteId,
//! /api/sites/by-base-url/:base64, /api/sites/by-delivery-type/:deliveryType

use crate::support::{build_app, empty_request};
use axum::http::{Method, StatusCode};
use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};
use serde_json::json;

#[tokio::test]
async fn test_list_sites_empty() {
    let t = build_app().await;

    let (status, body) = t.send(empty_request(Method::GET, "/api/sites")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_sites_returns_all() {
    let t = build_app().await;
    t.create_site(json!({"baseURL": "https://a.example.com"}))
        .await;
    t.create_site(json!({"baseURL": "https://b.example.com"}))
        .await;

    let (status, body) = t.send(empty_request(Method::GET, "/api/sites")).await;

    assert_eq!(status, StatusCode::OK);
    let mut urls: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["baseURL"].as_str().unwrap().to_string())
        .collect();
    urls.sort();
    assert_eq!(urls, vec!["https://a.example.com", "https://b.example.com"]);
}

#[tokio::test]
async fn test_get_site_by_id() {
    let t = build_app().await;
    let created = t
        .create_site(json!({"baseURL": "https://a.example.com"}))
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = t
        .send(empty_request(Method::GET, &format!("/api/sites/{id}")))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["baseURL"], "https://a.example.com");
    assert_eq!(body["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_get_site_unknown_id_is_not_found() {
    let t = build_app().await;

    let (status, body) = t
        .send(empty_request(Method::GET, "/api/sites/does-not-exist"))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Site not found");
}

#[tokio::test]
async fn test_get_site_blank_id_is_bad_request() {
    let t = build_app().await;

    let (status, body) = t.send(empty_request(Method::GET, "/api/sites/%20")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Site ID required");
}

#[tokio::test]
async fn test_get_site_by_base_url_accepts_both_alphabets() {
    let t = build_app().await;
    // `?`や`>`を含むURLは標準とURLセーフで符号化結果が異なる
    let base_url = "https://a.example.com/?q=>>";
    let created = t.create_site(json!({"baseURL": base_url})).await;

    for encoded in [URL_SAFE_NO_PAD.encode(base_url), STANDARD.encode(base_url)] {
        let encoded = encoded.replace('/', "%2F").replace('+', "%2B");
        let (status, body) = t
            .send(empty_request(
                Method::GET,
                &format!("/api/sites/by-base-url/{encoded}"),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "encoded={encoded}");
        assert_eq!(body["id"], created["id"]);
    }
}

#[tokio::test]
async fn test_get_site_by_base_url_unknown_is_not_found() {
    let t = build_app().await;
    let encoded = URL_SAFE_NO_PAD.encode("https://missing.example.com");

    let (status, body) = t
        .send(empty_request(
            Method::GET,
            &format!("/api/sites/by-base-url/{encoded}"),
        ))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Site not found");
}

#[tokio::test]
async fn test_get_site_by_base_url_undecodable_is_bad_request() {
    let t = build_app().await;

    let (status, body) = t
        .send(empty_request(Method::GET, "/api/sites/by-base-url/%20"))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Base URL required");
}

#[tokio::test]
async fn test_list_sites_by_delivery_type() {
    let t = build_app().await;
    t.create_site(json!({"baseURL": "https://edge.example.com", "deliveryType": "aem_edge"}))
        .await;
    t.create_site(json!({"baseURL": "https://cs.example.com", "deliveryType": "aem_cs"}))
        .await;

    let (status, body) = t
        .send(empty_request(
            Method::GET,
            "/api/sites/by-delivery-type/aem_edge",
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    let sites = body.as_array().unwrap();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0]["baseURL"], "https://edge.example.com");

    let (status, body) = t
        .send(empty_request(
            Method::GET,
            "/api/sites/by-delivery-type/unknown",
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid delivery type");
}

#[tokio::test]
async fn test_health() {
    let t = build_app().await;

    let (status, body) = t.send(empty_request(Method::GET, "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
