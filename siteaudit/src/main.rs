//! Site audit API Server Entry Point

use anyhow::Context;
use clap::Parser;
use siteaudit::cli::{Cli, Commands};
use siteaudit::config::{
    get_database_url, get_env_with_fallback_or, get_env_with_fallback_parse, QueueConfig,
};
use siteaudit::db::migrations::initialize_database;
use siteaudit::queue::HttpQueueDispatcher;
use siteaudit::{logging, server, AppState};
use std::sync::Arc;
use tracing::info;

#[derive(Clone, Debug)]
struct ServerConfig {
    host: String,
    port: u16,
    database_url: String,
    queue: QueueConfig,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = get_env_with_fallback_or("SITEAUDIT_HOST", "HOST", "0.0.0.0");
        let port = get_env_with_fallback_parse("SITEAUDIT_PORT", "PORT", 3000);
        Self {
            host,
            port,
            database_url: get_database_url(),
            queue: QueueConfig::from_env(),
        }
    }

    fn from_args(args: siteaudit::cli::serve::ServeArgs) -> Self {
        let mut queue = QueueConfig::from_env();
        if let Some(url) = args.queue_url.filter(|u| !u.trim().is_empty()) {
            queue.audit_jobs_queue_url = Some(url.trim().to_string());
        }
        Self {
            host: args.host,
            port: args.port,
            database_url: args.database_url.unwrap_or_else(get_database_url),
            queue,
        }
    }

    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init().context("failed to initialize logging")?;

    let cfg = match cli.command {
        Some(Commands::Serve(args)) => ServerConfig::from_args(args),
        None => ServerConfig::from_env(),
    };

    run_server(cfg).await
}

async fn run_server(cfg: ServerConfig) -> anyhow::Result<()> {
    info!(
        "Starting site audit server v{} on {}",
        env!("CARGO_PKG_VERSION"),
        cfg.bind_addr()
    );

    let queue_url = cfg
        .queue
        .audit_jobs_queue_url
        .clone()
        .context("SITEAUDIT_AUDIT_JOBS_QUEUE_URL is not set")?;

    let db_pool = initialize_database(&cfg.database_url)
        .await
        .with_context(|| format!("failed to initialize database: {}", cfg.database_url))?;
    info!("Database initialized: {}", cfg.database_url);

    let dispatcher = HttpQueueDispatcher::new(cfg.queue.timeout)?;

    let state = AppState::builder()
        .site_repository(Arc::new(db_pool))
        .dispatcher(Arc::new(dispatcher))
        .audit_queue_url(queue_url)
        .build()?;

    server::run(state, &cfg.bind_addr()).await?;
    Ok(())
}
