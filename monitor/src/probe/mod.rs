//! サービスごとのプローブ
//!
//! 各プローブは接続パラメータを受け取り、対象サービスの状態を
//! `StatusRecord`に正規化する。どのような失敗も呼び出し側へは伝播せず、
//! `healthy=false`と説明メッセージを持つレコードに変換される。
//!
//! 1回の呼び出しにつきサブチェックごとに1回だけリクエストを送り、リトライはしない。

/// Argo CD（GitOpsコントローラー）
pub mod argocd;
/// Radarr / Sonarr / Readarr / Lidarr
pub mod arr;
/// Bazarr（字幕マネージャー）
pub mod bazarr;
/// Jackett（インデクサープロキシ）
pub mod jackett;
/// Plex（メディアサーバー）
pub mod plex;
/// Tautulli（ストリーミング分析）
pub mod tautulli;
/// Transmission（トレントクライアント）
pub mod transmission;

use crate::common::error::{MonitorError, MonitorResult, ProbeError};
use crate::common::types::{Details, StatusRecord};
use crate::config::MonitorConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

pub use argocd::ArgoCdProbe;
pub use arr::ArrProbe;
pub use bazarr::BazarrProbe;
pub use jackett::JackettProbe;
pub use plex::PlexProbe;
pub use tautulli::TautulliProbe;
pub use transmission::TransmissionProbe;

/// 接続タイムアウト（秒）
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// 1回のプローブ結果（時刻・名前を付与する前の状態）
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    /// 正常か
    pub healthy: bool,
    /// 要約メッセージ
    pub message: String,
    /// 補足情報
    pub details: Option<Details>,
}

impl ProbeOutcome {
    /// 正常な結果
    pub fn healthy(message: impl Into<String>) -> Self {
        Self {
            healthy: true,
            message: message.into(),
            details: None,
        }
    }

    /// 異常な結果
    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            healthy: false,
            message: message.into(),
            details: None,
        }
    }

    /// 補足情報を付与
    pub fn with_details(mut self, details: Details) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<ProbeError> for ProbeOutcome {
    fn from(err: ProbeError) -> Self {
        ProbeOutcome::unhealthy(err.to_string())
    }
}

/// 監視対象サービス1件分のプローブ
#[async_trait]
pub trait Probe: Send + Sync {
    /// サービス識別子（ストアのキー）
    fn name(&self) -> &str;

    /// グルーピング用タグ
    fn category(&self) -> &str;

    /// 対象サービスを確認する
    ///
    /// エラーは`probe`で異常レコードに変換される。
    async fn check(&self, client: &Client) -> Result<ProbeOutcome, ProbeError>;

    /// 確認を実行し、完了時刻付きのレコードを返す
    async fn probe(&self, client: &Client) -> StatusRecord {
        let outcome = self
            .check(client)
            .await
            .unwrap_or_else(ProbeOutcome::from);
        StatusRecord::new(
            self.name(),
            self.category(),
            outcome.healthy,
            outcome.message,
            outcome.details,
        )
    }
}

/// プローブ用HTTPクライアントを作成
///
/// `timeout`が`None`の場合はリクエスト全体のタイムアウトを設定しない。
pub fn build_client(timeout: Option<Duration>) -> MonitorResult<Client> {
    let mut builder = Client::builder()
        .user_agent(concat!("rinzler-monitor/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(MonitorError::HttpClient)
}

/// 設定から収集順にプローブを組み立てる
///
/// 順序: Plex, Tautulli, arr系（Readarrはキー設定時のみ）, Bazarr, Jackett,
/// Transmission, Argo CD
pub fn build_probes(config: &MonitorConfig) -> Vec<Box<dyn Probe>> {
    let mut probes: Vec<Box<dyn Probe>> = vec![
        Box::new(PlexProbe::new(config.plex.clone())),
        Box::new(TautulliProbe::new(config.tautulli.clone())),
        Box::new(ArrProbe::new("radarr", config.radarr.clone())),
        Box::new(ArrProbe::new("sonarr", config.sonarr.clone())),
    ];
    if config.readarr.has_credential() {
        probes.push(Box::new(ArrProbe::new("readarr", config.readarr.clone())));
    }
    probes.push(Box::new(ArrProbe::new("lidarr", config.lidarr.clone())));
    probes.push(Box::new(BazarrProbe::new(config.bazarr.clone())));
    probes.push(Box::new(JackettProbe::new(config.jackett.clone())));
    probes.push(Box::new(TransmissionProbe::new(config.transmission.clone())));
    probes.push(Box::new(ArgoCdProbe::new(config.argocd.clone())));
    probes
}

/// 必須の認証情報を取り出す（未設定なら通信せずにエラー）
pub(crate) fn require_credential<'a>(
    credential: &'a str,
    message: &'static str,
) -> Result<&'a str, ProbeError> {
    if credential.is_empty() {
        Err(ProbeError::MissingCredential(message))
    } else {
        Ok(credential)
    }
}

/// リクエストを送信し、成功ステータスを要求する
pub(crate) async fn send_checked(request: RequestBuilder) -> Result<Response, ProbeError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ProbeError::Status(status))
    }
}

/// 補助情報をベストエフォートで取得する
///
/// 通信エラー・非成功ステータス・JSONパース失敗はすべて`None`になる。
pub(crate) async fn fetch_json(request: RequestBuilder) -> Option<serde_json::Value> {
    let response = request.send().await.ok()?;
    if !response.status().is_success() {
        return None;
    }
    response.json().await.ok()
}

#[cfg(test)]
pub(crate) mod test_support {
    use reqwest::Client;

    /// 閉じているポートを指すURL（接続拒否を起こす）
    pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

    pub fn client() -> Client {
        super::build_client(Some(std::time::Duration::from_secs(5))).unwrap()
    }
}
