//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `SiteAuditError`は`status_code()`と`external_message()`を提供し、
//! HTTP境界で内部詳細を漏らさないレスポンスを生成できます。

use axum::http::StatusCode;
use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// site audit service error type
#[derive(Debug, Error)]
pub enum SiteAuditError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Client input is invalid (missing or empty required field)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Referenced resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict error (e.g., duplicate base URL)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Audit queue delivery error
    #[error("Queue error: {0}")]
    Queue(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SiteAuditError {
    /// Returns a safe error message for external clients.
    ///
    /// Client-facing errors (bad request, not found, conflict) carry their own
    /// message verbatim. Everything else maps to a generic message; the full
    /// `Display` text belongs in server logs only.
    pub fn external_message(&self) -> &str {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) | Self::Conflict(msg) => msg,
            Self::Common(_) => "Internal server error",
            Self::Database(_) => "Database error",
            Self::Queue(_) => "Failed to dispatch audit",
            Self::Internal(_) => "Internal server error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Queue(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `Site not found` を返すNotFoundエラー
    pub fn site_not_found() -> Self {
        Self::NotFound("Site not found".to_string())
    }
}

impl From<sqlx::Error> for SiteAuditError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return Self::Conflict("Site already exists".to_string());
            }
        }
        Self::Database(err.to_string())
    }
}

/// Result type alias (Common)
pub type CommonResult<T> = Result<T, CommonError>;

/// Result type alias (site audit)
pub type SiteAuditResult<T> = Result<T, SiteAuditError>;
