//! テスト用ユーティリティ

use super::traits::SiteRepository;
use crate::common::error::{SiteAuditError, SiteAuditResult};
use crate::types::site::{DeliveryType, NewSite, Site};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// マイグレーション済みのインメモリDBを作成
pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// 登録順を保持するインメモリRepository
#[derive(Default)]
pub struct MockSiteRepository {
    sites: Mutex<Vec<Site>>,
    fail: AtomicBool,
}

impl MockSiteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定サイトで初期化
    pub fn with_sites(sites: Vec<Site>) -> Self {
        Self {
            sites: Mutex::new(sites),
            fail: AtomicBool::new(false),
        }
    }

    /// 以降の呼び出しをすべて失敗させる
    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> SiteAuditResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SiteAuditError::Database("backend unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SiteRepository for MockSiteRepository {
    async fn get_sites(&self) -> SiteAuditResult<Vec<Site>> {
        self.check()?;
        Ok(self.sites.lock().unwrap().clone())
    }

    async fn get_sites_by_delivery_type(
        &self,
        delivery_type: DeliveryType,
    ) -> SiteAuditResult<Vec<Site>> {
        self.check()?;
        Ok(self
            .sites
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.delivery_type == delivery_type)
            .cloned()
            .collect())
    }

    async fn get_site_by_base_url(&self, base_url: &str) -> SiteAuditResult<Option<Site>> {
        self.check()?;
        Ok(self
            .sites
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.base_url == base_url)
            .cloned())
    }

    async fn get_site_by_id(&self, id: &str) -> SiteAuditResult<Option<Site>> {
        self.check()?;
        Ok(self.sites.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn add_site(&self, fields: NewSite) -> SiteAuditResult<Site> {
        self.check()?;
        let site = fields.into_site();
        let mut sites = self.sites.lock().unwrap();
        if sites.iter().any(|s| s.base_url == site.base_url) {
            return Err(SiteAuditError::Conflict("Site already exists".to_string()));
        }
        sites.push(site.clone());
        Ok(site)
    }

    async fn update_site(&self, site: &Site) -> SiteAuditResult<Site> {
        self.check()?;
        let mut sites = self.sites.lock().unwrap();
        let existing = sites
            .iter_mut()
            .find(|s| s.id == site.id)
            .ok_or_else(SiteAuditError::site_not_found)?;
        *existing = site.clone();
        existing.updated_at = chrono::Utc::now();
        Ok(existing.clone())
    }

    async fn remove_site(&self, id: &str) -> SiteAuditResult<()> {
        self.check()?;
        let mut sites = self.sites.lock().unwrap();
        let before = sites.len();
        sites.retain(|s| s.id != id);
        if sites.len() == before {
            return Err(SiteAuditError::site_not_found());
        }
        Ok(())
    }
}
