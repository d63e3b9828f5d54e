//! Plexのプローブ
//!
//! ルートエンドポイントにトークン付きでアクセスし、
//! `X-Plex-Version` ヘッダーからバージョンを取得する。

use super::{require_credential, send_checked, Probe, ProbeOutcome};
use crate::common::error::{ProbeError, NO_API_TOKEN};
use crate::common::types::Details;
use crate::config::ServiceConfig;
use async_trait::async_trait;
use reqwest::Client;

/// バージョンを返すレスポンスヘッダー
const VERSION_HEADER: &str = "X-Plex-Version";

/// Plexのプローブ
pub struct PlexProbe {
    config: ServiceConfig,
}

impl PlexProbe {
    /// 接続設定からプローブを作成
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Probe for PlexProbe {
    fn name(&self) -> &str {
        "plex"
    }

    fn category(&self) -> &str {
        "media"
    }

    async fn check(&self, client: &Client) -> Result<ProbeOutcome, ProbeError> {
        let token = require_credential(&self.config.credential, NO_API_TOKEN)?;

        let request = client
            .get(self.config.endpoint("/"))
            .query(&[("X-Plex-Token", token)]);
        let response = send_checked(request).await?;

        let mut details = Details::new();
        if let Some(version) = response
            .headers()
            .get(VERSION_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            details.insert("version", version);
        }

        Ok(ProbeOutcome::healthy("Server is running").with_details(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::test_support::{client, UNREACHABLE_URL};
    use serde_json::json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    #[tokio::test]
    async fn test_empty_token_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let record = PlexProbe::new(ServiceConfig::new(server.uri(), ""))
            .probe(&client())
            .await;

        assert_eq!(record.name, "plex");
        assert!(!record.healthy);
        assert_eq!(record.message, "No API token configured");
        assert!(record.details.is_none());
        server.verify().await;
    }

    #[tokio::test]
    async fn test_running_server_reports_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("X-Plex-Token", "plex-token"))
            .respond_with(ResponseTemplate::new(200).insert_header("X-Plex-Version", "1.40.2.8395"))
            .expect(1)
            .mount(&server)
            .await;

        let record = PlexProbe::new(ServiceConfig::new(server.uri(), "plex-token"))
            .probe(&client())
            .await;

        assert!(record.healthy);
        assert_eq!(record.message, "Server is running");
        assert_eq!(
            serde_json::to_value(record.details.unwrap()).unwrap(),
            json!({"version": "1.40.2.8395"})
        );
    }

    #[tokio::test]
    async fn test_missing_version_header_is_omitted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let record = PlexProbe::new(ServiceConfig::new(server.uri(), "plex-token"))
            .probe(&client())
            .await;

        assert!(record.healthy);
        assert!(record.details.unwrap().get("version").is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let record = PlexProbe::new(ServiceConfig::new(server.uri(), "wrong"))
            .probe(&client())
            .await;

        assert!(!record.healthy);
        assert_eq!(record.message, "HTTP 401");
        assert!(record.details.is_none());
    }

    #[tokio::test]
    async fn test_transport_error() {
        let record = PlexProbe::new(ServiceConfig::new(UNREACHABLE_URL, "plex-token"))
            .probe(&client())
            .await;

        assert!(!record.healthy);
        assert!(record.message.starts_with("Connection error: "));
        assert!(!record.message.contains("plex-token"));
        assert!(record.details.is_none());
    }
}
