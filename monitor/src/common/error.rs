//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `ProbeError`の`Display`はそのままステータスレコードの`message`になる。
//! プローブの外へは伝播せず、必ず異常レコードへ変換される。

use reqwest::StatusCode;
use thiserror::Error;

/// 認証トークン未設定時のメッセージ（Plex）
pub const NO_API_TOKEN: &str = "No API token configured";

/// APIキー未設定時のメッセージ（arr系、Bazarr）
pub const NO_API_KEY: &str = "No API key configured";

/// プローブ内部のエラー
#[derive(Debug, Error)]
pub enum ProbeError {
    /// 必須の認証情報が未設定（通信は行わない）
    #[error("{0}")]
    MissingCredential(&'static str),

    /// 名前解決・接続・タイムアウトなどの通信エラー
    #[error("Connection error: {0}")]
    Transport(reqwest::Error),

    /// 成功以外のHTTPステータス
    #[error("HTTP {}", .0.as_u16())]
    Status(StatusCode),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        // クエリパラメータのAPIキーをダッシュボードに出さない
        ProbeError::Transport(err.without_url())
    }
}

/// プロセス全体のエラー
#[derive(Debug, Error)]
pub enum MonitorError {
    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTPクライアントの構築に失敗
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// 待ち受けポートのバインドに失敗
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// バインド先アドレス
        addr: String,
        /// 元のI/Oエラー
        #[source]
        source: std::io::Error,
    },

    /// サーバー実行中のエラー
    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),

    /// ロギング初期化エラー
    #[error("Logging initialization error: {0}")]
    Logging(String),

    /// シリアライズエラー
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type MonitorResult<T> = Result<T, MonitorError>;
