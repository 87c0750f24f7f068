//! 型定義モジュール

/// サイト型定義
pub mod site;

pub use site::{AuditConfig, AuditTypeConfig, DeliveryType, NewSite, Site};
