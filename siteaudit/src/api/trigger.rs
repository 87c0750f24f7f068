//! 監査トリガーAPI

use crate::api::error::AppError;
use crate::common::error::SiteAuditError;
use crate::queue::DispatchConfirmation;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

/// 監査トリガーリクエスト
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerAuditsRequest {
    /// 監査タイプ（`lhs`はエイリアス）
    #[serde(default, rename = "type")]
    pub audit_type: String,
    /// `all` またはベースURL
    #[serde(default)]
    pub url: String,
    /// 送信メッセージにそのまま載せるコンテキスト
    #[serde(default)]
    pub audit_context: Option<serde_json::Value>,
}

/// クエリ形式のトリガー（コンテキストなし）
#[derive(Debug, Default, Deserialize)]
pub struct TriggerAuditsQuery {
    /// 監査タイプ
    #[serde(default, rename = "type")]
    pub audit_type: String,
    /// `all` またはベースURL
    #[serde(default)]
    pub url: String,
}

/// 監査トリガーレスポンス
#[derive(Debug, Serialize)]
pub struct TriggerAuditsResponse {
    /// 監査タイプ順の送信確認
    pub message: Vec<DispatchConfirmation>,
}

async fn run_trigger(
    state: &AppState,
    req: TriggerAuditsRequest,
) -> Result<Json<TriggerAuditsResponse>, AppError> {
    let audit_type = req.audit_type.trim();
    if audit_type.is_empty() {
        return Err(SiteAuditError::BadRequest("Audit type required".to_string()).into());
    }
    let url = req.url.trim();
    if url.is_empty() {
        return Err(SiteAuditError::BadRequest("URL required".to_string()).into());
    }

    let message = state
        .audit_trigger
        .trigger(audit_type, url, req.audit_context)
        .await?;

    Ok(Json(TriggerAuditsResponse { message }))
}

/// POST /api/trigger - 監査トリガー
pub async fn trigger_audits(
    State(state): State<AppState>,
    Json(req): Json<TriggerAuditsRequest>,
) -> Result<Json<TriggerAuditsResponse>, AppError> {
    run_trigger(&state, req).await
}

/// GET /api/trigger?type=..&url=.. - 監査トリガー（クエリ形式）
pub async fn trigger_audits_by_query(
    State(state): State<AppState>,
    Query(query): Query<TriggerAuditsQuery>,
) -> Result<Json<TriggerAuditsResponse>, AppError> {
    let req = TriggerAuditsRequest {
        audit_type: query.audit_type,
        url: query.url,
        audit_context: None,
    };
    run_trigger(&state, req).await
}
