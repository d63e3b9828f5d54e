//! HTTP APIルーター
//!
//! `/api/status`（JSONスナップショット）、`/`（ダッシュボード）、
//! `/health`（プロセスの生存確認）の3ルートを提供する。

pub mod dashboard;
pub mod health;
pub mod status;

use crate::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(status::get_status))
        .route("/", get(dashboard::get_dashboard))
        .route("/health", get(health::get_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
