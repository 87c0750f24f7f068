//! 監査トリガー
//!
//! 候補サイトを解決し、監査タイプごとに1件のメッセージをキューへ送る。

use crate::common::error::{SiteAuditError, SiteAuditResult};
use crate::db::traits::SiteRepository;
use crate::queue::{DispatchConfirmation, DispatchMessage, MessageDispatcher};
use std::sync::Arc;

use super::config::is_audit_type_enabled;
use super::resolve::resolve_sites;

/// 監査タイプのエイリアス表
///
/// エイリアスは展開後の監査タイプ列（順序固定）に置き換えられる。
pub const AUDIT_TYPE_ALIASES: &[(&str, &[&str])] = &[("lhs", &["lhs-desktop", "lhs-mobile"])];

/// 要求された監査タイプを展開
///
/// エイリアスでなければ、要求された値をそのまま1要素で返す
/// （既知タイプとの照合は行わない）。
pub fn expand_audit_type(audit_type: &str) -> Vec<String> {
    AUDIT_TYPE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == audit_type)
        .map(|(_, expanded)| expanded.iter().map(|t| t.to_string()).collect())
        .unwrap_or_else(|| vec![audit_type.to_string()])
}

/// 監査トリガー
#[derive(Clone)]
pub struct AuditTrigger {
    site_repository: Arc<dyn SiteRepository>,
    dispatcher: Arc<dyn MessageDispatcher>,
    queue_url: String,
}

impl AuditTrigger {
    /// 新しい監査トリガーを作成
    pub fn new(
        site_repository: Arc<dyn SiteRepository>,
        dispatcher: Arc<dyn MessageDispatcher>,
        queue_url: impl Into<String>,
    ) -> Self {
        Self {
            site_repository,
            dispatcher,
            queue_url: queue_url.into(),
        }
    }

    /// 送信先キュー
    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }

    /// 監査をトリガーし、監査タイプ順の送信確認を返す
    ///
    /// 監査タイプごとの送信は逐次実行する。前のタイプの送信完了を待ってから
    /// 次を送ることで、キュー上のメッセージ順（例: lhs-desktop → lhs-mobile）を
    /// 保証している。並行送信に変えるとこの順序保証が崩れる。
    ///
    /// 送信が1件でも失敗した時点で残りは送らずにエラーを返す（リトライなし）。
    pub async fn trigger(
        &self,
        audit_type: &str,
        target: &str,
        audit_context: Option<serde_json::Value>,
    ) -> SiteAuditResult<Vec<DispatchConfirmation>> {
        let sites = resolve_sites(self.site_repository.as_ref(), target).await?;
        if sites.is_empty() {
            return Err(SiteAuditError::site_not_found());
        }

        let audit_types = expand_audit_type(audit_type);
        let mut confirmations = Vec::with_capacity(audit_types.len());

        for audit_type in audit_types {
            let site_ids: Vec<String> = sites
                .iter()
                .filter(|site| is_audit_type_enabled(site, &audit_type))
                .map(|site| site.id.clone())
                .collect();

            let message = DispatchMessage {
                audit_type,
                site_ids,
                audit_context: audit_context.clone(),
            };

            let confirmation = self
                .dispatcher
                .send(&self.queue_url, &message)
                .await
                .inspect_err(|e| {
                    tracing::error!(
                        audit_type = %message.audit_type,
                        error = %e,
                        "Failed to dispatch audit message"
                    );
                })?;

            tracing::info!(
                audit_type = %confirmation.audit_type,
                site_count = confirmation.site_count,
                message_id = %confirmation.message_id,
                "Audit message dispatched"
            );
            confirmations.push(confirmation);
        }

        Ok(confirmations)
    }
}
