//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::SiteAuditError;
use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub SiteAuditError);

impl From<SiteAuditError> for AppError {
    fn from(err: SiteAuditError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();

        // 5xxは詳細をログにのみ残し、クライアントには汎用メッセージを返す
        if status.is_server_error() {
            tracing::error!(error = %self.0, status = %status, "Request failed");
        } else {
            tracing::debug!(error = %self.0, status = %status, "Request rejected");
        }

        let payload = json!({
            "error": self.0.external_message()
        });

        (status, Json(payload)).into_response()
    }
}
