//! ロギング初期化ユーティリティ
//!
//! `SITEAUDIT_LOG_LEVEL`（未設定時は`RUST_LOG`、どちらも無ければ`info`）で
//! フィルタし、標準出力へ出す。`SITEAUDIT_LOG_DIR`が設定されていれば
//! 日次ローテーションのファイル出力も追加する。

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_PREFIX: &str = "siteaudit.log";

/// フィルタ指定を解決
fn filter_directive() -> String {
    std::env::var("SITEAUDIT_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string())
}

/// グローバルsubscriberを初期化
///
/// ファイル出力を有効にした場合は`WorkerGuard`を返す。
/// 呼び出し側はプロセス終了まで保持すること（dropでバッファがflushされる）。
pub fn init() -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(filter_directive()).unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(true);

    match std::env::var("SITEAUDIT_LOG_DIR").ok().filter(|d| !d.trim().is_empty()) {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer().with_ansi(false).with_writer(writer);

            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .with(file_layer)
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .try_init()?;
            Ok(None)
        }
    }
}
