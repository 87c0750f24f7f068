//! 監査設定の評価

use crate::types::site::{AuditConfig, Site};

impl AuditConfig {
    /// 全監査が無効化されているか
    pub fn audits_disabled(&self) -> bool {
        self.audits_disabled
    }

    /// 監査タイプが有効か
    ///
    /// エントリが存在し`disabled = true`の場合のみ無効。
    pub fn is_audit_type_enabled(&self, audit_type: &str) -> bool {
        self.audit_type_configs
            .get(audit_type)
            .map_or(true, |config| !config.disabled)
    }
}

/// サイトに対して監査タイプが有効か
pub fn is_audit_type_enabled(site: &Site, audit_type: &str) -> bool {
    site.audit_config.is_audit_type_enabled(audit_type)
}
