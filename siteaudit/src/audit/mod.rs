//! 監査トリガー
//!
//! サイト解決・監査設定による絞り込み・監査タイプごとのキュー送信

/// 監査設定の評価
pub mod config;

/// 対象サイトの解決
pub mod resolve;

/// 監査トリガー本体
pub mod trigger;

pub use resolve::{resolve_sites, ALL_SITES};
pub use trigger::{expand_audit_type, AuditTrigger, AUDIT_TYPE_ALIASES};
