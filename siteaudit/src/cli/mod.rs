//! CLI module for siteaudit
//!
//! Provides command-line interface for the site audit server.

pub mod serve;

use clap::{Parser, Subcommand};

/// Site audit API - site records and audit job dispatch
#[derive(Parser, Debug)]
#[command(name = "siteaudit")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    SITEAUDIT_HOST                  Bind address (default: 0.0.0.0)
    SITEAUDIT_PORT                  Listen port (default: 3000)
    SITEAUDIT_LOG_LEVEL             Log level (default: info)
    SITEAUDIT_LOG_DIR               Directory for daily rolling log files
    SITEAUDIT_DATABASE_URL          Database URL (default: sqlite:data/siteaudit.db)
    SITEAUDIT_AUDIT_JOBS_QUEUE_URL  Audit jobs queue URL (required)
    SITEAUDIT_QUEUE_TIMEOUT_SECS    Queue delivery timeout (default: 10)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server
    Serve(serve::ServeArgs),
}
