//! serve サブコマンド
//!
//! APIサーバーを起動します。

use clap::Args;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value = "3000", env = "SITEAUDIT_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "SITEAUDIT_HOST")]
    pub host: String,

    /// Database URL (falls back to SITEAUDIT_DATABASE_URL / DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Audit jobs queue URL (falls back to SITEAUDIT_AUDIT_JOBS_QUEUE_URL / AUDIT_JOBS_QUEUE_URL)
    #[arg(long)]
    pub queue_url: Option<String>,
}
