//! ロギング初期化ユーティリティ
//!
//! 標準出力へのfmtレイヤーに加え、`MONITOR_LOG_DIR`が設定されていれば
//! 日次ローテーションのファイル出力を追加する。

use crate::common::error::{MonitorError, MonitorResult};
use crate::config::{get_env, get_env_or};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログファイル名のプレフィックス
const LOG_FILE_PREFIX: &str = "rinzler-monitor.log";

/// デフォルトのログレベル
const DEFAULT_LOG_LEVEL: &str = "info";

/// フィルタ指定を決定する
///
/// `RUST_LOG`があれば優先し、なければ`MONITOR_LOG_LEVEL`（既定は`info`）。
fn filter_directive() -> String {
    get_env("RUST_LOG").unwrap_or_else(|| get_env_or("MONITOR_LOG_LEVEL", DEFAULT_LOG_LEVEL))
}

/// グローバルのtracingサブスクライバーを初期化する
///
/// ファイル出力を有効にした場合は`WorkerGuard`を返す。
/// 呼び出し側はプロセス終了まで保持すること（dropでバッファがフラッシュされる）。
pub fn init() -> MonitorResult<Option<WorkerGuard>> {
    let directive = filter_directive();
    let filter = EnvFilter::try_new(&directive)
        .map_err(|err| MonitorError::Logging(format!("invalid filter '{directive}': {err}")))?;

    let (file_layer, guard) = match get_env("MONITOR_LOG_DIR") {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .try_init()
        .map_err(|err| MonitorError::Logging(err.to_string()))?;

    Ok(guard)
}
