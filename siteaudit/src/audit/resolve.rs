//! 対象サイトの解決

use crate::common::error::SiteAuditResult;
use crate::db::traits::SiteRepository;
use crate::types::site::Site;

/// 全サイトを指す予約トークン（大文字小文字は区別しない）
pub const ALL_SITES: &str = "all";

/// ターゲット指定から候補サイトを解決
///
/// - `all` の場合は全サイト
/// - それ以外はベースURLの完全一致で1件（存在しなければ空）
///
/// いずれの場合も、全監査が無効化されたサイトは除外される。
pub async fn resolve_sites(
    repo: &dyn SiteRepository,
    target: &str,
) -> SiteAuditResult<Vec<Site>> {
    let target = target.trim();

    let candidates = if target.eq_ignore_ascii_case(ALL_SITES) {
        repo.get_sites().await?
    } else {
        repo.get_site_by_base_url(target)
            .await?
            .into_iter()
            .collect()
    };

    Ok(candidates
        .into_iter()
        .filter(|site| !site.audit_config.audits_disabled())
        .collect())
}
