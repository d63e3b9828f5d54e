//! Jackettのプローブ
//!
//! APIキーがあればインデクサー検索APIを、なければダッシュボードを叩いて
//! 到達性を確認する。

use super::{send_checked, Probe, ProbeOutcome};
use crate::common::error::ProbeError;
use crate::config::ServiceConfig;
use async_trait::async_trait;
use reqwest::Client;

/// Jackettのプローブ
pub struct JackettProbe {
    config: ServiceConfig,
}

impl JackettProbe {
    /// 接続設定からプローブを作成
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Probe for JackettProbe {
    fn name(&self) -> &str {
        "jackett"
    }

    fn category(&self) -> &str {
        "download"
    }

    async fn check(&self, client: &Client) -> Result<ProbeOutcome, ProbeError> {
        let request = if self.config.has_credential() {
            client
                .get(self.config.endpoint("/api/v2.0/indexers/all/results"))
                .query(&[("apikey", self.config.credential.as_str())])
        } else {
            client.get(self.config.endpoint("/UI/Dashboard"))
        };
        send_checked(request).await?;

        Ok(ProbeOutcome::healthy("Service is running"))
    }
}
