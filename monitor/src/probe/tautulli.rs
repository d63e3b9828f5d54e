//! Tautulliのプローブ
//!
//! APIキーがあれば `get_activity` コマンドでアクティブストリーム数を取得し、
//! なければWeb UIへの到達性だけを確認する。

use super::{send_checked, Probe, ProbeOutcome};
use crate::common::error::ProbeError;
use crate::common::types::Details;
use crate::config::ServiceConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Tautulliのプローブ
pub struct TautulliProbe {
    config: ServiceConfig,
}

impl TautulliProbe {
    /// 接続設定からプローブを作成
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }
}

/// `get_activity`応答からストリーム数を取り出す
///
/// `response.result`が`"success"`で`stream_count`が数値の場合のみ値を返す。
fn stream_count(body: &Value) -> Option<u64> {
    let response = body.get("response")?;
    if response.get("result").and_then(Value::as_str) != Some("success") {
        return None;
    }
    response.pointer("/data/stream_count")?.as_u64()
}

#[async_trait]
impl Probe for TautulliProbe {
    fn name(&self) -> &str {
        "tautulli"
    }

    fn category(&self) -> &str {
        "media"
    }

    async fn check(&self, client: &Client) -> Result<ProbeOutcome, ProbeError> {
        if !self.config.has_credential() {
            send_checked(client.get(&self.config.url)).await?;
            return Ok(ProbeOutcome::healthy("Web UI accessible"));
        }

        let request = client.get(self.config.endpoint("/api/v2")).query(&[
            ("apikey", self.config.credential.as_str()),
            ("cmd", "get_activity"),
        ]);
        let response = send_checked(request).await?;

        let mut details = Details::new();
        if let Ok(body) = response.json::<Value>().await {
            if let Some(count) = stream_count(&body) {
                details.insert("active_streams", count);
            }
        }

        Ok(ProbeOutcome::healthy("Connected to Tautulli").with_details(details))
    }
}
