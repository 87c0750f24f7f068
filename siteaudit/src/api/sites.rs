//! サイト管理API
//!
//! サイトレコードのCRUD。入力検証とステータスコードへの変換を担う。

use crate::api::error::AppError;
use crate::common::error::SiteAuditError;
use crate::types::site::{AuditConfig, DeliveryType, NewSite, Site};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// サイト登録リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSiteRequest {
    /// ベースURL
    #[serde(default, rename = "baseURL")]
    pub base_url: String,
    /// 配信形態
    #[serde(default)]
    pub delivery_type: Option<DeliveryType>,
    /// GitHubリポジトリURL
    #[serde(default, rename = "gitHubURL")]
    pub git_hub_url: Option<String>,
    /// 組織ID
    #[serde(default)]
    pub organization_id: Option<String>,
    /// 公開中フラグ
    #[serde(default)]
    pub is_live: Option<bool>,
    /// 監査設定
    #[serde(default)]
    pub audit_config: Option<AuditConfig>,
}

/// サイト更新リクエスト
///
/// 更新可能なフィールドの許可リスト。ここに無いキーは無視され、
/// 変更としても数えない。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSiteRequest {
    /// 組織ID（空文字列は未指定扱い）
    #[serde(default)]
    pub organization_id: Option<String>,
    /// 公開中フラグ
    #[serde(default)]
    pub is_live: Option<bool>,
    /// 配信形態
    #[serde(default)]
    pub delivery_type: Option<DeliveryType>,
    /// GitHubリポジトリURL（空文字列は未指定扱い）
    #[serde(default, rename = "gitHubURL")]
    pub git_hub_url: Option<String>,
    /// 監査設定（丸ごと置き換え）
    #[serde(default)]
    pub audit_config: Option<AuditConfig>,
}

impl UpdateSiteRequest {
    /// 更新内容を適用し、1つでも値が変わったかを返す
    pub fn apply(self, site: &mut Site) -> bool {
        let mut updated = false;

        if let Some(organization_id) = non_blank(self.organization_id) {
            updated |= site.set_organization_id(organization_id);
        }
        if let Some(is_live) = self.is_live {
            updated |= site.set_is_live(is_live);
        }
        if let Some(delivery_type) = self.delivery_type {
            updated |= site.set_delivery_type(delivery_type);
        }
        if let Some(git_hub_url) = non_blank(self.git_hub_url) {
            updated |= site.set_git_hub_url(git_hub_url);
        }
        if let Some(audit_config) = self.audit_config {
            updated |= site.set_audit_config(audit_config);
        }

        updated
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// サイトレスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteResponse {
    /// 一意識別子
    pub id: String,
    /// ベースURL
    #[serde(rename = "baseURL")]
    pub base_url: String,
    /// 配信形態
    pub delivery_type: String,
    /// GitHubリポジトリURL
    #[serde(rename = "gitHubURL", skip_serializing_if = "Option::is_none")]
    pub git_hub_url: Option<String>,
    /// 組織ID
    pub organization_id: String,
    /// 公開中フラグ
    pub is_live: bool,
    /// 監査設定
    pub audit_config: AuditConfig,
    /// 作成日時
    pub created_at: String,
    /// 更新日時
    pub updated_at: String,
}

impl From<Site> for SiteResponse {
    fn from(site: Site) -> Self {
        SiteResponse {
            id: site.id,
            base_url: site.base_url,
            delivery_type: site.delivery_type.as_str().to_string(),
            git_hub_url: site.git_hub_url,
            organization_id: site.organization_id,
            is_live: site.is_live,
            audit_config: site.audit_config,
            created_at: site.created_at.to_rfc3339(),
            updated_at: site.updated_at.to_rfc3339(),
        }
    }
}

/// パスから受け取ったサイトIDを検証
fn require_site_id(site_id: &str) -> Result<&str, SiteAuditError> {
    let site_id = site_id.trim();
    if site_id.is_empty() {
        return Err(SiteAuditError::BadRequest("Site ID required".to_string()));
    }
    Ok(site_id)
}

/// base64（標準/URLセーフ、パディング任意）でエンコードされたベースURLを復号
pub fn decode_base_url(encoded: &str) -> Option<String> {
    let normalized: String = encoded
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    if normalized.is_empty() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(normalized).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    let decoded = decoded.trim();
    if decoded.is_empty() {
        None
    } else {
        Some(decoded.to_string())
    }
}

fn is_valid_base_url(base_url: &str) -> bool {
    Url::parse(base_url)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}

// --- Handlers ---

/// POST /api/sites - サイト登録
pub async fn create_site(
    State(state): State<AppState>,
    Json(req): Json<CreateSiteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let base_url = req.base_url.trim().to_string();
    if !is_valid_base_url(&base_url) {
        return Err(SiteAuditError::BadRequest("Invalid base URL".to_string()).into());
    }

    let site = state
        .site_repository
        .add_site(NewSite {
            base_url,
            delivery_type: req.delivery_type,
            git_hub_url: non_blank(req.git_hub_url),
            organization_id: non_blank(req.organization_id),
            is_live: req.is_live,
            audit_config: req.audit_config,
        })
        .await?;

    tracing::info!(site_id = %site.id, base_url = %site.base_url, "Site created");

    Ok((StatusCode::CREATED, Json(SiteResponse::from(site))))
}

/// GET /api/sites - サイト一覧
pub async fn list_sites(
    State(state): State<AppState>,
) -> Result<Json<Vec<SiteResponse>>, AppError> {
    let sites = state.site_repository.get_sites().await?;
    Ok(Json(sites.into_iter().map(SiteResponse::from).collect()))
}

/// GET /api/sites/by-delivery-type/:delivery_type - 配信形態でフィルタしたサイト一覧
pub async fn list_sites_by_delivery_type(
    State(state): State<AppState>,
    Path(delivery_type): Path<String>,
) -> Result<Json<Vec<SiteResponse>>, AppError> {
    let delivery_type: DeliveryType = delivery_type
        .trim()
        .parse()
        .map_err(|_| SiteAuditError::BadRequest("Invalid delivery type".to_string()))?;

    let sites = state
        .site_repository
        .get_sites_by_delivery_type(delivery_type)
        .await?;
    Ok(Json(sites.into_iter().map(SiteResponse::from).collect()))
}

/// GET /api/sites/by-base-url/:base_url - ベースURL（base64）でサイト取得
pub async fn get_site_by_base_url(
    State(state): State<AppState>,
    Path(encoded): Path<String>,
) -> Result<Json<SiteResponse>, AppError> {
    let base_url = decode_base_url(&encoded)
        .ok_or_else(|| SiteAuditError::BadRequest("Base URL required".to_string()))?;

    let site = state
        .site_repository
        .get_site_by_base_url(&base_url)
        .await?
        .ok_or_else(SiteAuditError::site_not_found)?;

    Ok(Json(SiteResponse::from(site)))
}

/// GET /api/sites/:site_id - サイト詳細
pub async fn get_site_by_id(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
) -> Result<Json<SiteResponse>, AppError> {
    let site_id = require_site_id(&site_id)?;

    let site = state
        .site_repository
        .get_site_by_id(site_id)
        .await?
        .ok_or_else(SiteAuditError::site_not_found)?;

    Ok(Json(SiteResponse::from(site)))
}

/// PATCH /api/sites/:site_id - サイト更新
///
/// 本文が無い・JSONオブジェクトでない場合は`Request body required`、
/// 許可リスト内のフィールドで値が変わるものが無い場合は`No updates provided`。
pub async fn update_site(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
    body: Option<Json<serde_json::Value>>,
) -> Result<Json<SiteResponse>, AppError> {
    let site_id = require_site_id(&site_id)?;

    let body = match body {
        Some(Json(value)) if value.is_object() => value,
        _ => return Err(SiteAuditError::BadRequest("Request body required".to_string()).into()),
    };
    let req: UpdateSiteRequest = serde_json::from_value(body)
        .map_err(|e| SiteAuditError::BadRequest(format!("Invalid request body: {}", e)))?;

    let mut site = state
        .site_repository
        .get_site_by_id(site_id)
        .await?
        .ok_or_else(SiteAuditError::site_not_found)?;

    if !req.apply(&mut site) {
        return Err(SiteAuditError::BadRequest("No updates provided".to_string()).into());
    }

    let updated = state.site_repository.update_site(&site).await?;
    tracing::info!(site_id = %updated.id, "Site updated");

    Ok(Json(SiteResponse::from(updated)))
}

/// DELETE /api/sites/:site_id - サイト削除
pub async fn remove_site(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let site_id = require_site_id(&site_id)?;

    if state
        .site_repository
        .get_site_by_id(site_id)
        .await?
        .is_none()
    {
        return Err(SiteAuditError::site_not_found().into());
    }

    state.site_repository.remove_site(site_id).await?;
    tracing::info!(site_id = %site_id, "Site removed");

    Ok(StatusCode::NO_CONTENT)
}
