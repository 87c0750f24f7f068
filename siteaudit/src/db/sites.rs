//! サイトデータベース操作

use crate::types::site::{AuditConfig, DeliveryType, Site};
use sqlx::SqlitePool;

const SITE_COLUMNS: &str = r#"
    id, base_url, delivery_type, git_hub_url, organization_id,
    is_live, audit_config, created_at, updated_at
"#;

/// サイトを登録
pub async fn create_site(pool: &SqlitePool, site: &Site) -> Result<(), sqlx::Error> {
    let audit_config = serde_json::to_string(&site.audit_config).unwrap_or_else(|_| "{}".into());

    sqlx::query(
        r#"
        INSERT INTO sites (
            id, base_url, delivery_type, git_hub_url, organization_id,
            is_live, audit_config, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&site.id)
    .bind(&site.base_url)
    .bind(site.delivery_type.as_str())
    .bind(&site.git_hub_url)
    .bind(&site.organization_id)
    .bind(site.is_live as i32)
    .bind(&audit_config)
    .bind(site.created_at.to_rfc3339())
    .bind(site.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// サイト一覧を取得（登録順）
pub async fn list_sites(pool: &SqlitePool) -> Result<Vec<Site>, sqlx::Error> {
    let sql = format!(
        "SELECT {} FROM sites ORDER BY created_at ASC, id ASC",
        SITE_COLUMNS
    );
    let rows = sqlx::query_as::<_, SiteRow>(&sql).fetch_all(pool).await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// 配信形態でフィルタしてサイト一覧を取得
pub async fn list_sites_by_delivery_type(
    pool: &SqlitePool,
    delivery_type: DeliveryType,
) -> Result<Vec<Site>, sqlx::Error> {
    let sql = format!(
        "SELECT {} FROM sites WHERE delivery_type = ? ORDER BY created_at ASC, id ASC",
        SITE_COLUMNS
    );
    let rows = sqlx::query_as::<_, SiteRow>(&sql)
        .bind(delivery_type.as_str())
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// IDでサイトを取得
pub async fn get_site(pool: &SqlitePool, id: &str) -> Result<Option<Site>, sqlx::Error> {
    let sql = format!("SELECT {} FROM sites WHERE id = ?", SITE_COLUMNS);
    let row = sqlx::query_as::<_, SiteRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.into()))
}

/// ベースURLでサイトを検索（完全一致）
pub async fn find_by_base_url(
    pool: &SqlitePool,
    base_url: &str,
) -> Result<Option<Site>, sqlx::Error> {
    let sql = format!("SELECT {} FROM sites WHERE base_url = ?", SITE_COLUMNS);
    let row = sqlx::query_as::<_, SiteRow>(&sql)
        .bind(base_url)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.into()))
}

/// サイトを更新
///
/// 対象が存在しない場合は`false`を返す。
pub async fn update_site(pool: &SqlitePool, site: &Site) -> Result<bool, sqlx::Error> {
    let audit_config = serde_json::to_string(&site.audit_config).unwrap_or_else(|_| "{}".into());

    let result = sqlx::query(
        r#"
        UPDATE sites SET
            base_url = ?, delivery_type = ?, git_hub_url = ?, organization_id = ?,
            is_live = ?, audit_config = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&site.base_url)
    .bind(site.delivery_type.as_str())
    .bind(&site.git_hub_url)
    .bind(&site.organization_id)
    .bind(site.is_live as i32)
    .bind(&audit_config)
    .bind(site.updated_at.to_rfc3339())
    .bind(&site.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// サイトを削除
pub async fn delete_site(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sites WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[derive(sqlx::FromRow)]
struct SiteRow {
    id: String,
    base_url: String,
    delivery_type: String,
    git_hub_url: Option<String>,
    organization_id: String,
    is_live: i32,
    audit_config: String,
    created_at: String,
    updated_at: String,
}

fn parse_timestamp(value: &str) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .unwrap_or_else(|_| chrono::Utc::now())
}

impl From<SiteRow> for Site {
    fn from(row: SiteRow) -> Self {
        let audit_config: AuditConfig = serde_json::from_str(&row.audit_config)
            .unwrap_or_else(|e| {
                tracing::warn!(site_id = %row.id, error = %e, "Invalid audit_config JSON, using defaults");
                AuditConfig::default()
            });

        Site {
            base_url: row.base_url,
            delivery_type: row.delivery_type.parse().unwrap_or_default(),
            git_hub_url: row.git_hub_url,
            organization_id: row.organization_id,
            is_live: row.is_live != 0,
            audit_config,
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
            id: row.id,
        }
    }
}
