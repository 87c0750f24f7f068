//! サイト型定義
//!
//! 監査対象サイトとサイト単位の監査設定

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use uuid::Uuid;

/// 組織ID未指定時の既定値
pub const DEFAULT_ORGANIZATION_ID: &str = "default";

/// サイトの配信形態
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    /// AEM Edge Delivery
    AemEdge,
    /// AEM as a Cloud Service
    AemCs,
    /// その他
    #[default]
    Other,
}

impl DeliveryType {
    /// DeliveryTypeを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AemEdge => "aem_edge",
            Self::AemCs => "aem_cs",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeliveryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aem_edge" => Ok(Self::AemEdge),
            "aem_cs" => Ok(Self::AemCs),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown delivery type: {}", s)),
        }
    }
}

/// 監査タイプ単位の設定
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditTypeConfig {
    /// trueの場合、この監査タイプは実行しない
    #[serde(default)]
    pub disabled: bool,
}

/// サイト単位の監査設定
///
/// `audit_type_configs` にエントリが無い監査タイプは有効扱い。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditConfig {
    /// 全監査の無効化フラグ
    #[serde(default)]
    pub audits_disabled: bool,
    /// 監査タイプ名 → 設定
    #[serde(default)]
    pub audit_type_configs: BTreeMap<String, AuditTypeConfig>,
}

/// 監査対象サイト
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    /// 一意識別子（不透明な文字列）
    pub id: String,
    /// ベースURL（一意）
    pub base_url: String,
    /// 配信形態
    pub delivery_type: DeliveryType,
    /// GitHubリポジトリURL
    pub git_hub_url: Option<String>,
    /// 組織ID
    pub organization_id: String,
    /// 公開中フラグ
    pub is_live: bool,
    /// 監査設定
    pub audit_config: AuditConfig,
    /// 作成日時
    pub created_at: DateTime<Utc>,
    /// 更新日時
    pub updated_at: DateTime<Utc>,
}

impl Site {
    /// 新しいサイトを作成（IDは自動採番）
    pub fn new(base_url: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            base_url,
            delivery_type: DeliveryType::default(),
            git_hub_url: None,
            organization_id: DEFAULT_ORGANIZATION_ID.to_string(),
            is_live: false,
            audit_config: AuditConfig::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 組織IDを設定し、値が変化したかを返す
    pub fn set_organization_id(&mut self, organization_id: String) -> bool {
        if self.organization_id == organization_id {
            return false;
        }
        self.organization_id = organization_id;
        true
    }

    /// 公開中フラグを設定し、値が変化したかを返す
    pub fn set_is_live(&mut self, is_live: bool) -> bool {
        if self.is_live == is_live {
            return false;
        }
        self.is_live = is_live;
        true
    }

    /// 配信形態を設定し、値が変化したかを返す
    pub fn set_delivery_type(&mut self, delivery_type: DeliveryType) -> bool {
        if self.delivery_type == delivery_type {
            return false;
        }
        self.delivery_type = delivery_type;
        true
    }

    /// GitHub URLを設定し、値が変化したかを返す
    pub fn set_git_hub_url(&mut self, git_hub_url: String) -> bool {
        if self.git_hub_url.as_deref() == Some(git_hub_url.as_str()) {
            return false;
        }
        self.git_hub_url = Some(git_hub_url);
        true
    }

    /// 監査設定を置き換え、値が変化したかを返す
    pub fn set_audit_config(&mut self, audit_config: AuditConfig) -> bool {
        if self.audit_config == audit_config {
            return false;
        }
        self.audit_config = audit_config;
        true
    }
}

/// サイト登録時の入力
#[derive(Debug, Clone, Default)]
pub struct NewSite {
    /// ベースURL
    pub base_url: String,
    /// 配信形態
    pub delivery_type: Option<DeliveryType>,
    /// GitHubリポジトリURL
    pub git_hub_url: Option<String>,
    /// 組織ID
    pub organization_id: Option<String>,
    /// 公開中フラグ
    pub is_live: Option<bool>,
    /// 監査設定
    pub audit_config: Option<AuditConfig>,
}

impl NewSite {
    /// 既定値を補完してSiteを生成
    pub fn into_site(self) -> Site {
        let mut site = Site::new(self.base_url);
        if let Some(delivery_type) = self.delivery_type {
            site.delivery_type = delivery_type;
        }
        site.git_hub_url = self.git_hub_url;
        if let Some(organization_id) = self.organization_id {
            site.organization_id = organization_id;
        }
        site.is_live = self.is_live.unwrap_or(false);
        site.audit_config = self.audit_config.unwrap_or_default();
        site
    }
}
