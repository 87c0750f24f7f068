//! データベースアクセス
//!
//! SQLiteによるサイト永続化とRepository trait

/// データベース初期化・マイグレーション
pub mod migrations;

/// サイトテーブル操作
pub mod sites;

/// Repository trait定義
pub mod traits;

#[cfg(test)]
pub(crate) mod test_utils;

pub use traits::SiteRepository;
