//! Bazarrのプローブ
//!
//! arr系とは別のAPI体系（`/api/system/*`、クエリは小文字の`apikey`）を持つ。

use super::{fetch_json, require_credential, send_checked, Probe, ProbeOutcome};
use crate::common::error::{ProbeError, NO_API_KEY};
use crate::common::types::Details;
use crate::config::ServiceConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Bazarrのプローブ
pub struct BazarrProbe {
    config: ServiceConfig,
}

impl BazarrProbe {
    /// 接続設定からプローブを作成
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Probe for BazarrProbe {
    fn name(&self) -> &str {
        "bazarr"
    }

    fn category(&self) -> &str {
        super::arr::CATEGORY
    }

    async fn check(&self, client: &Client) -> Result<ProbeOutcome, ProbeError> {
        let api_key = require_credential(&self.config.credential, NO_API_KEY)?;

        send_checked(
            client
                .get(self.config.endpoint("/api/system/health"))
                .query(&[("apikey", api_key)]),
        )
        .await?;

        let mut details = Details::new();
        let status = fetch_json(
            client
                .get(self.config.endpoint("/api/system/status"))
                .query(&[("apikey", api_key)]),
        )
        .await;
        if let Some(version) = status
            .as_ref()
            .and_then(|body| body.pointer("/data/bazarr_version"))
            .and_then(Value::as_str)
        {
            details.insert("version", version);
        }

        Ok(ProbeOutcome::healthy("Service is running").with_details(details))
    }
}
