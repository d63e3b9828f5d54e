//! 統合テスト用ユーティリティ

#![allow(dead_code)]

use std::{io, net::SocketAddr};

use axum::Router;
use rinzler_monitor::config::{MonitorConfig, ServiceConfig, TransmissionConfig};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

/// 接続を拒否されるURL（ポート1は待ち受けていない前提）
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

/// テスト用に実ポートで起動したHTTPサーバー
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<(), io::Error>>,
}

impl TestServer {
    /// サーバーがバインドしているアドレスを返す
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// ベースURL
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// サーバーを停止し、バックグラウンドタスクの終了を待つ
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

/// ルーターを127.0.0.1の空きポートで起動する
pub async fn spawn_router(router: Router) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = rx.await;
            })
            .await
    });

    TestServer {
        addr,
        shutdown: Some(tx),
        handle,
    }
}

/// すべてのサービスが到達不能な設定
///
/// 実DNSへの問い合わせを避けるため、既定のクラスタ内URLは使わない。
pub fn unreachable_config() -> MonitorConfig {
    let unreachable = |credential: &str| ServiceConfig::new(UNREACHABLE_URL, credential);
    MonitorConfig {
        plex: unreachable(""),
        tautulli: unreachable(""),
        radarr: unreachable("radarr-key"),
        sonarr: unreachable("sonarr-key"),
        readarr: unreachable(""),
        lidarr: unreachable("lidarr-key"),
        bazarr: unreachable("bazarr-key"),
        jackett: unreachable(""),
        transmission: TransmissionConfig {
            url: UNREACHABLE_URL.to_string(),
            ..TransmissionConfig::default()
        },
        argocd: unreachable(""),
        ..MonitorConfig::default()
    }
}
