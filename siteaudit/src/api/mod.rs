//! REST APIハンドラー
//!
//! サイト管理と監査トリガーのエンドポイント

pub mod error;
pub mod sites;
pub mod trigger;

use crate::AppState;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/sites", post(sites::create_site).get(sites::list_sites))
        .route(
            "/sites/by-delivery-type/:delivery_type",
            get(sites::list_sites_by_delivery_type),
        )
        .route(
            "/sites/by-base-url/:base_url",
            get(sites::get_site_by_base_url),
        )
        .route(
            "/sites/:site_id",
            get(sites::get_site_by_id)
                .patch(sites::update_site)
                .delete(sites::remove_site),
        )
        .route(
            "/trigger",
            post(trigger::trigger_audits).get(trigger::trigger_audits_by_query),
        );

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - 死活確認
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
