//! Site audit API Server
//!
//! サイトレコードを管理し、監査ジョブをキューへ送るHTTPサーバー

#![warn(missing_docs)]

/// 共通型定義
pub mod common;

/// REST APIハンドラー
pub mod api;

/// 監査トリガー（サイト解決・監査設定の評価・キュー送信）
pub mod audit;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 監査キューへのメッセージ送信
pub mod queue;

/// axumサーバー起動・シャットダウンハンドリング
pub mod server;

/// 型定義
pub mod types;

use crate::audit::AuditTrigger;
use crate::common::error::CommonError;
use crate::db::SiteRepository;
use crate::queue::MessageDispatcher;
use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// サイトRepository
    pub site_repository: Arc<dyn SiteRepository>,
    /// 監査トリガー
    pub audit_trigger: AuditTrigger,
}

impl AppState {
    /// ビルダーを作成
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::default()
    }
}

/// `AppState`のビルダー
///
/// 依存が欠けている場合は`build()`が即座に失敗する。
#[derive(Default)]
pub struct AppStateBuilder {
    site_repository: Option<Arc<dyn SiteRepository>>,
    dispatcher: Option<Arc<dyn MessageDispatcher>>,
    audit_queue_url: Option<String>,
}

impl AppStateBuilder {
    /// サイトRepositoryを設定
    pub fn site_repository(mut self, repository: Arc<dyn SiteRepository>) -> Self {
        self.site_repository = Some(repository);
        self
    }

    /// メッセージ送信先を設定
    pub fn dispatcher(mut self, dispatcher: Arc<dyn MessageDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// 監査ジョブキューのURLを設定
    pub fn audit_queue_url(mut self, url: impl Into<String>) -> Self {
        self.audit_queue_url = Some(url.into());
        self
    }

    /// `AppState`を構築
    pub fn build(self) -> Result<AppState, CommonError> {
        let site_repository = self
            .site_repository
            .ok_or_else(|| CommonError::Config("Data access required".to_string()))?;
        let dispatcher = self
            .dispatcher
            .ok_or_else(|| CommonError::Config("Message dispatcher required".to_string()))?;
        let audit_queue_url = self
            .audit_queue_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| CommonError::Config("Audit queue required".to_string()))?;

        let audit_trigger =
            AuditTrigger::new(site_repository.clone(), dispatcher, audit_queue_url);

        Ok(AppState {
            site_repository,
            audit_trigger,
        })
    }
}
