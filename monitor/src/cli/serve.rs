//! serve サブコマンド
//!
//! 収集ループとステータスサーバーを起動します。

use crate::collector::Collector;
use crate::common::error::{MonitorError, MonitorResult};
use crate::config::{get_env, get_env_or, MonitorConfig};
use crate::probe::{build_client, build_probes};
use crate::shutdown::ShutdownController;
use crate::store::StatusStore;
use crate::{server, AppState};
use clap::Args;
use tracing::{info, warn};

/// デフォルトの待ち受けポート
const DEFAULT_PORT: u16 = 8080;

/// デフォルトのバインドアドレス
const DEFAULT_HOST: &str = "0.0.0.0";

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value = "8080", env = "MONITOR_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "MONITOR_HOST")]
    pub host: String,
}

impl ServeArgs {
    /// サブコマンド省略時の引数を環境変数から組み立てる
    ///
    /// `serve`の引数解析と同じく、解釈できない`MONITOR_PORT`はエラーにする。
    pub fn from_env() -> MonitorResult<Self> {
        let port = match get_env("MONITOR_PORT") {
            Some(raw) => raw.parse().map_err(|_| {
                MonitorError::Config(format!("invalid MONITOR_PORT '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };
        Ok(Self {
            port,
            host: get_env_or("MONITOR_HOST", DEFAULT_HOST),
        })
    }

    /// `host:port`形式のバインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// serve コマンドを実行する
///
/// サーバーが停止すると収集ループにも停止を要求し、その終了を待ってから戻る。
pub async fn execute(args: &ServeArgs) -> MonitorResult<()> {
    let config = MonitorConfig::from_env();
    config.validate()?;

    let client = build_client(config.probe_timeout)?;
    let store = StatusStore::new();
    let shutdown = ShutdownController::new();

    let collector = Collector::new(build_probes(&config), store.clone(), client)
        .with_interval(config.collect_interval)
        .with_shutdown(shutdown.clone());
    info!(
        services = ?collector.service_names(),
        interval_secs = config.collect_interval.as_secs(),
        probe_timeout_secs = config.probe_timeout.map(|t| t.as_secs()).unwrap_or(0),
        "Starting Rinzler Grid Monitor"
    );
    let collector_handle = collector.start();

    let state = AppState::new(store).with_shutdown(shutdown.clone());
    let result = server::run(state, &args.bind_addr()).await;

    shutdown.request_shutdown();
    if let Err(err) = collector_handle.await {
        warn!("Collector task ended abnormally: {}", err);
    }

    result
}
