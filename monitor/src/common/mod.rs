//! 共通型定義
//!
//! プローブ・ストア・APIのすべてが参照する型とエラー

/// エラー型定義
pub mod error;

/// ステータスレコード型定義
pub mod types;
