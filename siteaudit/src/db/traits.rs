//! Repository traitパターン定義
//!
//! データアクセスを抽象化し、ハンドラー・監査トリガーから
//! 具体的なストレージを切り離すためのtrait。

use async_trait::async_trait;
use chrono::Utc;

use crate::common::error::{SiteAuditError, SiteAuditResult};
use crate::types::site::{DeliveryType, NewSite, Site};

// ---------------------------------------------------------------------------
// SiteRepository
// ---------------------------------------------------------------------------

/// サイトCRUD操作のRepository trait
#[async_trait]
pub trait SiteRepository: Send + Sync {
    /// サイト一覧を取得（順序は実装ごとに決定的）
    async fn get_sites(&self) -> SiteAuditResult<Vec<Site>>;
    /// 配信形態でフィルタしてサイト一覧を取得
    async fn get_sites_by_delivery_type(
        &self,
        delivery_type: DeliveryType,
    ) -> SiteAuditResult<Vec<Site>>;
    /// ベースURLでサイトを取得（完全一致）
    async fn get_site_by_base_url(&self, base_url: &str) -> SiteAuditResult<Option<Site>>;
    /// IDでサイトを取得
    async fn get_site_by_id(&self, id: &str) -> SiteAuditResult<Option<Site>>;
    /// サイトを登録
    async fn add_site(&self, fields: NewSite) -> SiteAuditResult<Site>;
    /// サイトを更新して更新後の値を返す
    async fn update_site(&self, site: &Site) -> SiteAuditResult<Site>;
    /// サイトを削除
    async fn remove_site(&self, id: &str) -> SiteAuditResult<()>;
}

// ===========================================================================
// SqlitePool implementation
// ===========================================================================

use sqlx::SqlitePool;

#[async_trait]
impl SiteRepository for SqlitePool {
    async fn get_sites(&self) -> SiteAuditResult<Vec<Site>> {
        Ok(super::sites::list_sites(self).await?)
    }

    async fn get_sites_by_delivery_type(
        &self,
        delivery_type: DeliveryType,
    ) -> SiteAuditResult<Vec<Site>> {
        Ok(super::sites::list_sites_by_delivery_type(self, delivery_type).await?)
    }

    async fn get_site_by_base_url(&self, base_url: &str) -> SiteAuditResult<Option<Site>> {
        Ok(super::sites::find_by_base_url(self, base_url).await?)
    }

    async fn get_site_by_id(&self, id: &str) -> SiteAuditResult<Option<Site>> {
        Ok(super::sites::get_site(self, id).await?)
    }

    async fn add_site(&self, fields: NewSite) -> SiteAuditResult<Site> {
        let site = fields.into_site();
        super::sites::create_site(self, &site).await?;
        Ok(site)
    }

    async fn update_site(&self, site: &Site) -> SiteAuditResult<Site> {
        let mut updated = site.clone();
        updated.updated_at = Utc::now();
        if super::sites::update_site(self, &updated).await? {
            Ok(updated)
        } else {
            Err(SiteAuditError::site_not_found())
        }
    }

    async fn remove_site(&self, id: &str) -> SiteAuditResult<()> {
        if super::sites::delete_site(self, id).await? {
            Ok(())
        } else {
            Err(SiteAuditError::site_not_found())
        }
    }
}
