//! arr系サービスのプローブ
//!
//! Radarr / Sonarr / Readarr / Lidarr は共通の v3 API を持つ。
//! `/api/v3/health` の警告件数で正常性を判定し、キュー長とバージョンを
//! 補足情報として取得する。

use super::{fetch_json, require_credential, send_checked, Probe, ProbeOutcome};
use crate::common::error::{ProbeError, NO_API_KEY};
use crate::common::types::Details;
use crate::config::ServiceConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// arr系サービスのカテゴリ
pub const CATEGORY: &str = "arr-stack";

/// arr系サービスのプローブ
pub struct ArrProbe {
    name: String,
    config: ServiceConfig,
}

impl ArrProbe {
    /// サービス名と接続設定からプローブを作成
    pub fn new(name: impl Into<String>, config: ServiceConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    fn get(&self, client: &Client, path: &str, api_key: &str) -> reqwest::RequestBuilder {
        client
            .get(self.config.endpoint(path))
            .query(&[("apiKey", api_key)])
    }
}

#[async_trait]
impl Probe for ArrProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        CATEGORY
    }

    async fn check(&self, client: &Client) -> Result<ProbeOutcome, ProbeError> {
        let api_key = require_credential(&self.config.credential, NO_API_KEY)?;

        let response = send_checked(self.get(client, "/api/v3/health", api_key)).await?;

        let mut details = Details::new();
        let mut outcome = ProbeOutcome::healthy("All systems operational");

        // 配列として読めない本文は警告なしとして扱う
        if let Ok(Value::Array(issues)) = response.json::<Value>().await {
            if !issues.is_empty() {
                outcome = ProbeOutcome::unhealthy(format!(
                    "{} health issues detected",
                    issues.len()
                ));
                details.insert("health_issues", issues);
            }
        }

        if let Some(queue) = fetch_json(self.get(client, "/api/v3/queue", api_key)).await {
            if let Some(records) = queue.get("records").and_then(Value::as_array) {
                details.insert("queue_size", records.len());
            }
        }

        if let Some(status) = fetch_json(self.get(client, "/api/v3/system/status", api_key)).await
        {
            if let Some(version) = status.get("version").and_then(Value::as_str) {
                details.insert("version", version);
            }
        }

        Ok(outcome.with_details(details))
    }
}
