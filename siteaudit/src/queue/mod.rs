//! 監査キューへのメッセージ送信
//!
//! 監査タイプごとのメッセージをキューへ届ける`MessageDispatcher`と、
//! HTTP経由でキューに投入する既定実装

use crate::common::error::{SiteAuditError, SiteAuditResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// キューへ送信する監査メッセージ
///
/// 監査タイプごとに1件。キューに渡した時点でライフサイクルは終了する。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchMessage {
    /// 監査タイプ
    #[serde(rename = "type")]
    pub audit_type: String,
    /// 対象サイトID（候補サイトの順序を保持）
    pub site_ids: Vec<String>,
    /// 呼び出し元コンテキスト（無加工で転送）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_context: Option<serde_json::Value>,
}

/// キュー投入の確認情報
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchConfirmation {
    /// キュー側のメッセージID
    pub message_id: String,
    /// 監査タイプ
    #[serde(rename = "type")]
    pub audit_type: String,
    /// メッセージに含めたサイト数
    pub site_count: usize,
}

/// 監査メッセージの送信先
#[async_trait]
pub trait MessageDispatcher: Send + Sync {
    /// `destination` にメッセージを送信し、確認情報を返す
    async fn send(
        &self,
        destination: &str,
        message: &DispatchMessage,
    ) -> SiteAuditResult<DispatchConfirmation>;
}

/// HTTP POSTでキューへ投入するDispatcher
///
/// 送信先URLにメッセージJSONをPOSTし、2xxを受理とみなす。
/// レスポンスに`messageId`（または`MessageId`）があればそれを確認IDとして使う。
#[derive(Debug, Clone)]
pub struct HttpQueueDispatcher {
    client: reqwest::Client,
}

impl HttpQueueDispatcher {
    /// タイムアウト付きのDispatcherを作成
    pub fn new(timeout: Duration) -> SiteAuditResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SiteAuditError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// 既存のHTTPクライアントを共有して作成
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessageDispatcher for HttpQueueDispatcher {
    async fn send(
        &self,
        destination: &str,
        message: &DispatchMessage,
    ) -> SiteAuditResult<DispatchConfirmation> {
        let response = self
            .client
            .post(destination)
            .json(message)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SiteAuditError::Queue(format!("Request timeout: {}", e))
                } else if e.is_connect() {
                    SiteAuditError::Queue(format!("Connection failed: {}", e))
                } else {
                    SiteAuditError::Queue(format!("Request error: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiteAuditError::Queue(format!(
                "Queue rejected message with HTTP {}",
                status
            )));
        }

        // 本文が空・非JSONでも受理済みとして扱う
        let message_id = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("messageId")
                    .or_else(|| body.get("MessageId"))
                    .and_then(|v| v.as_str())
                    .map(String::from)
            })
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        tracing::debug!(
            destination = %destination,
            audit_type = %message.audit_type,
            message_id = %message_id,
            "Audit message accepted by queue"
        );

        Ok(DispatchConfirmation {
            message_id,
            audit_type: message.audit_type.clone(),
            site_count: message.site_ids.len(),
        })
    }
}
