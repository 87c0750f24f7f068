//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to legacy variable names with warning logs.

use std::time::Duration;

/// Get an environment variable with fallback to a legacy name
///
/// If the new variable name is set, returns its value.
/// If only the legacy variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use siteaudit::config::get_env_with_fallback;
///
/// let queue = get_env_with_fallback("SITEAUDIT_AUDIT_JOBS_QUEUE_URL", "AUDIT_JOBS_QUEUE_URL");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// 既定のデータベースURL
pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/siteaudit.db";

/// Audit queue configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    /// Destination of audit job messages. `None` when not configured.
    pub audit_jobs_queue_url: Option<String>,
    /// Timeout for a single queue delivery.
    pub timeout: Duration,
}

impl QueueConfig {
    /// Load queue configuration from environment variables.
    pub fn from_env() -> Self {
        let audit_jobs_queue_url =
            get_env_with_fallback("SITEAUDIT_AUDIT_JOBS_QUEUE_URL", "AUDIT_JOBS_QUEUE_URL")
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty());
        let timeout_secs = get_env_with_fallback_parse(
            "SITEAUDIT_QUEUE_TIMEOUT_SECS",
            "QUEUE_TIMEOUT_SECS",
            10u64,
        );

        Self {
            audit_jobs_queue_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// データベースURLを取得
///
/// 環境変数 `SITEAUDIT_DATABASE_URL`（旧: `DATABASE_URL`）から取得し、
/// 未設定の場合は `sqlite:data/siteaudit.db` を返す。
pub fn get_database_url() -> String {
    get_env_with_fallback_or("SITEAUDIT_DATABASE_URL", "DATABASE_URL", DEFAULT_DATABASE_URL)
}
