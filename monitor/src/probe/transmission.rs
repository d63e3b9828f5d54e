//! Transmissionのプローブ
//!
//! Web UIへの到達性のみを確認する（RPCの状態は見ない）。

use super::{Probe, ProbeOutcome};
use crate::common::error::ProbeError;
use crate::config::TransmissionConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Transmissionのプローブ
pub struct TransmissionProbe {
    config: TransmissionConfig,
}

impl TransmissionProbe {
    /// 接続設定からプローブを作成
    pub fn new(config: TransmissionConfig) -> Self {
        Self { config }
    }
}

/// 到達できたとみなすステータス（成功またはWeb UIへのリダイレクト）
fn is_reachable(status: StatusCode) -> bool {
    status.is_success() || status == StatusCode::MOVED_PERMANENTLY || status == StatusCode::FOUND
}

#[async_trait]
impl Probe for TransmissionProbe {
    fn name(&self) -> &str {
        "transmission"
    }

    fn category(&self) -> &str {
        "download"
    }

    async fn check(&self, client: &Client) -> Result<ProbeOutcome, ProbeError> {
        let mut request = client.get(self.config.endpoint("/transmission/web/"));
        if let Some((username, password)) = self.config.basic_auth() {
            request = request.basic_auth(username, Some(password));
        }

        let status = request.send().await?.status();
        if is_reachable(status) {
            Ok(ProbeOutcome::healthy("Web UI accessible"))
        } else {
            Err(ProbeError::Status(status))
        }
    }
}
