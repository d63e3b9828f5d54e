//! Argo CDのプローブ
//!
//! トークンがあればアプリケーション一覧から同期・ヘルス状態を集計する。
//! トークンがなければ認証不要のセッションAPIで到達性だけを確認し、
//! 縮退したメッセージで区別する。

use super::{send_checked, Probe, ProbeOutcome};
use crate::common::error::ProbeError;
use crate::common::types::Details;
use crate::config::ServiceConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// トークン未設定かつセッションAPIが200以外の場合のメッセージ
const NO_TOKEN: &str = "No token configured";

/// Argo CDのプローブ
pub struct ArgoCdProbe {
    config: ServiceConfig,
}

impl ArgoCdProbe {
    /// 接続設定からプローブを作成
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    async fn check_without_token(&self, client: &Client) -> Result<ProbeOutcome, ProbeError> {
        let response = client
            .get(self.config.endpoint("/api/v1/session"))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(ProbeOutcome::healthy("API accessible (no auth)"))
        } else {
            Ok(ProbeOutcome::unhealthy(NO_TOKEN))
        }
    }
}

/// アプリケーション一覧の集計結果
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AppSummary {
    /// アプリ総数
    pub total: usize,
    /// Synced の数
    pub synced: usize,
    /// OutOfSync の数
    pub out_of_sync: usize,
    /// ヘルスが Degraded の数
    pub degraded: usize,
}

impl AppSummary {
    /// `/api/v1/applications` の応答本文を集計する
    ///
    /// `items`が配列でなければ`None`。各要素の欠損・型違いのフィールドは数えない。
    pub fn from_application_list(body: &Value) -> Option<Self> {
        let items = body.get("items")?.as_array()?;
        let mut summary = AppSummary {
            total: items.len(),
            ..AppSummary::default()
        };

        for app in items {
            match app.pointer("/status/sync/status").and_then(Value::as_str) {
                Some("Synced") => summary.synced += 1,
                Some("OutOfSync") => summary.out_of_sync += 1,
                _ => {}
            }
            if app.pointer("/status/health/status").and_then(Value::as_str) == Some("Degraded") {
                summary.degraded += 1;
            }
        }

        Some(summary)
    }

    fn into_details(self) -> Details {
        Details::new()
            .with("total_apps", self.total)
            .with("synced", self.synced)
            .with("out_of_sync", self.out_of_sync)
            .with("degraded", self.degraded)
    }
}

#[async_trait]
impl Probe for ArgoCdProbe {
    fn name(&self) -> &str {
        "argocd"
    }

    fn category(&self) -> &str {
        "infrastructure"
    }

    async fn check(&self, client: &Client) -> Result<ProbeOutcome, ProbeError> {
        if !self.config.has_credential() {
            return self.check_without_token(client).await;
        }

        let response = send_checked(
            client
                .get(self.config.endpoint("/api/v1/applications"))
                .bearer_auth(&self.config.credential),
        )
        .await?;

        let details = response
            .json::<Value>()
            .await
            .ok()
            .as_ref()
            .and_then(AppSummary::from_application_list)
            .map(AppSummary::into_details)
            .unwrap_or_default();

        Ok(ProbeOutcome::healthy("Connected to ArgoCD").with_details(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::test_support::{client, UNREACHABLE_URL};
    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn app(sync: &str, health: &str) -> Value {
        json!({
            "metadata": {"name": format!("app-{sync}-{health}")},
            "status": {"sync": {"status": sync}, "health": {"status": health}}
        })
    }

    #[test]
    fn test_summary_ignores_malformed_items() {
        let body = json!({"items": [
            app("Synced", "Healthy"),
            {"status": {"sync": {"status": 42}}},
            "not-an-object"
        ]});

        let summary = AppSummary::from_application_list(&body).unwrap();
        assert_eq!(
            summary,
            AppSummary {
                total: 3,
                synced: 1,
                out_of_sync: 0,
                degraded: 0
            }
        );
    }

    #[test]
    fn test_summary_requires_item_list() {
        assert_eq!(AppSummary::from_application_list(&json!({"items": null})), None);
        assert_eq!(AppSummary::from_application_list(&json!([])), None);
    }

    #[tokio::test]
    async fn test_token_aggregates_application_states() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/applications"))
            .and(header("authorization", "Bearer argo-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    app("Synced", "Healthy"),
                    app("Synced", "Degraded"),
                    app("OutOfSync", "Healthy")
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let record = ArgoCdProbe::new(ServiceConfig::new(server.uri(), "argo-token"))
            .probe(&client())
            .await;

        assert_eq!(record.category, "infrastructure");
        assert!(record.healthy);
        assert_eq!(record.message, "Connected to ArgoCD");
        assert_eq!(
            serde_json::to_value(record.details.unwrap()).unwrap(),
            json!({"total_apps": 3, "synced": 2, "out_of_sync": 1, "degraded": 1})
        );
    }

    #[tokio::test]
    async fn test_token_with_unexpected_payload_has_empty_details() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/applications"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": null})))
            .mount(&server)
            .await;

        let record = ArgoCdProbe::new(ServiceConfig::new(server.uri(), "argo-token"))
            .probe(&client())
            .await;

        assert!(record.healthy);
        assert!(record.details.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_token_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/applications"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let record = ArgoCdProbe::new(ServiceConfig::new(server.uri(), "expired"))
            .probe(&client())
            .await;

        assert!(!record.healthy);
        assert_eq!(record.message, "HTTP 403");
    }

    #[tokio::test]
    async fn test_without_token_reachable_session_is_degraded_healthy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/session"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/applications"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let record = ArgoCdProbe::new(ServiceConfig::new(server.uri(), ""))
            .probe(&client())
            .await;

        assert!(record.healthy);
        assert_eq!(record.message, "API accessible (no auth)");
        assert!(record.details.is_none());
        server.verify().await;
    }

    #[tokio::test]
    async fn test_without_token_unreachable_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/session"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let record = ArgoCdProbe::new(ServiceConfig::new(server.uri(), ""))
            .probe(&client())
            .await;

        assert!(!record.healthy);
        assert_eq!(record.message, "No token configured");
    }

    #[tokio::test]
    async fn test_transport_error() {
        let record = ArgoCdProbe::new(ServiceConfig::new(UNREACHABLE_URL, "argo-token"))
            .probe(&client())
            .await;

        assert!(!record.healthy);
        assert!(record.message.starts_with("Connection error: "));
        assert!(record.details.is_none());
    }
}
