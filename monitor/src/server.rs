//! axumサーバー起動・シャットダウンハンドリング

use crate::common::error::{MonitorError, MonitorResult};
use crate::shutdown::ShutdownController;
use crate::AppState;
use tracing::{error, info};

/// axumサーバーを起動し、シャットダウンシグナルを待機する
///
/// Ctrl+C / SIGTERM を受けると`ShutdownController`へ停止を要求するため、
/// 同じコントローラを持つ収集ループも合わせて止まる。
pub async fn run(state: AppState, bind_addr: &str) -> MonitorResult<()> {
    let shutdown = state.shutdown.clone();

    let app = crate::api::create_app(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|source| MonitorError::Bind {
            addr: bind_addr.to_string(),
            source,
        })?;

    info!("Rinzler Grid Monitor listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .map_err(MonitorError::Server)?;

    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
async fn shutdown_signal(shutdown: ShutdownController) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
        _ = shutdown.wait() => {
            info!("Shutdown requested, shutting down...");
        }
    }

    shutdown.request_shutdown();
}
