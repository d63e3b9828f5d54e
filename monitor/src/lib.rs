//! Rinzler Grid Monitor
//!
//! セルフホストのメディア/自動化サービス群を定期的にポーリングし、
//! 正規化したステータスをJSON APIとダッシュボードで公開する集約サーバー

#![warn(missing_docs)]

/// 共通型定義（ステータスレコード、エラー型）
pub mod common;

/// REST APIハンドラー
pub mod api;

/// 収集ループ
pub mod collector;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// ロギング初期化ユーティリティ
pub mod logging;

/// サービスごとのプローブ実装
pub mod probe;

/// ステータスストア
pub mod store;

/// axumサーバー起動・シャットダウンハンドリング
pub mod server;

/// Shutdown controller (collector loop / HTTP server)
pub mod shutdown;

/// CLIインターフェース
pub mod cli;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// ステータスストア（収集ループと共有）
    pub store: store::StatusStore,
    /// シャットダウン制御（収集ループとサーバーで共有）
    pub shutdown: shutdown::ShutdownController,
}

impl AppState {
    /// ストアを指定して状態を作成
    pub fn new(store: store::StatusStore) -> Self {
        Self {
            store,
            shutdown: shutdown::ShutdownController::default(),
        }
    }

    /// シャットダウン制御を差し替える
    pub fn with_shutdown(mut self, shutdown: shutdown::ShutdownController) -> Self {
        self.shutdown = shutdown;
        self
    }
}
