//! 収集ループ
//!
//! 起動直後から「全プローブを順番に実行 → 間隔だけ待機」を繰り返す。
//! 待機はサイクル所要時間を補正しない（実周期 = 間隔 + サイクル時間）。
//!
//! ストアはサービスごとに逐次更新されるため、サイクルの途中で読み取ると
//! 前サイクルと今サイクルのレコードが混在したスナップショットが見える。

use crate::probe::Probe;
use crate::shutdown::ShutdownController;
use crate::store::StatusStore;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// デフォルトの収集間隔（秒）
const DEFAULT_COLLECT_INTERVAL_SECS: u64 = crate::config::DEFAULT_COLLECT_INTERVAL_SECS;

/// 1サイクルの実行結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    /// 実行したプローブ数
    pub probed: usize,
    /// 正常だったプローブ数
    pub healthy: usize,
    /// 所要時間
    pub elapsed: Duration,
    /// シャットダウン要求で途中終了したか
    pub cancelled: bool,
}

/// 収集ループ
///
/// プローブ一覧・ストア・HTTPクライアントを所有し、
/// `ShutdownController`で停止できる。
#[derive(Clone)]
pub struct Collector {
    /// 収集順に並んだプローブ
    probes: Arc<Vec<Box<dyn Probe>>>,
    /// 書き込み先のストア
    store: StatusStore,
    /// HTTPクライアント
    client: Client,
    /// サイクル間の待機時間
    interval: Duration,
    /// 停止シグナル
    shutdown: ShutdownController,
}

impl Collector {
    /// 新しい収集ループを作成
    pub fn new(probes: Vec<Box<dyn Probe>>, store: StatusStore, client: Client) -> Self {
        Self {
            probes: Arc::new(probes),
            store,
            client,
            interval: Duration::from_secs(DEFAULT_COLLECT_INTERVAL_SECS),
            shutdown: ShutdownController::default(),
        }
    }

    /// 収集間隔を設定
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// 停止シグナルを設定
    pub fn with_shutdown(mut self, shutdown: ShutdownController) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// 収集間隔
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// 収集順のサービス名
    pub fn service_names(&self) -> Vec<&str> {
        self.probes.iter().map(|probe| probe.name()).collect()
    }

    /// バックグラウンドで収集を開始
    ///
    /// 返されたハンドルはシャットダウン要求後にループが抜けると完了する。
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    /// 収集ループ本体
    pub async fn run(&self) {
        info!(
            interval_secs = self.interval.as_secs(),
            services = self.probes.len(),
            "Status collector started"
        );

        loop {
            let summary = self.run_cycle().await;
            if summary.cancelled {
                break;
            }
            info!(
                probed = summary.probed,
                healthy = summary.healthy,
                elapsed_ms = summary.elapsed.as_millis() as u64,
                "Collection cycle completed"
            );

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.shutdown.wait() => break,
            }
        }

        info!("Status collector stopped");
    }

    /// 全プローブを順番に1回ずつ実行し、結果をストアへ書き込む
    ///
    /// シャットダウン要求は各プローブの間と実行中のプローブの両方で確認する。
    pub async fn run_cycle(&self) -> CycleSummary {
        let start = Instant::now();
        let mut summary = CycleSummary {
            probed: 0,
            healthy: 0,
            elapsed: Duration::ZERO,
            cancelled: false,
        };

        info!(services = self.probes.len(), "Collection cycle started");

        for probe in self.probes.iter() {
            if self.shutdown.is_shutdown_requested() {
                summary.cancelled = true;
                break;
            }

            let probe_start = Instant::now();
            // 実行中のプローブは停止要求で打ち切り、結果は書き込まない
            let record = tokio::select! {
                record = probe.probe(&self.client) => record,
                _ = self.shutdown.wait() => {
                    summary.cancelled = true;
                    break;
                }
            };
            let elapsed_ms = probe_start.elapsed().as_millis() as u64;

            summary.probed += 1;
            if record.healthy {
                summary.healthy += 1;
                debug!(
                    service = %record.name,
                    elapsed_ms,
                    message = %record.message,
                    "Probe succeeded"
                );
            } else {
                warn!(
                    service = %record.name,
                    elapsed_ms,
                    message = %record.message,
                    "Probe reported unhealthy"
                );
            }

            let name = record.name.clone();
            let healthy = record.healthy;
            match self.store.write(record).await {
                Some(previous) if previous != healthy => {
                    info!(
                        service = %name,
                        healthy,
                        "Service health changed"
                    );
                }
                _ => {}
            }
        }

        summary.elapsed = start.elapsed();
        summary
    }
}
