//! ステータスAPIハンドラー
//!
//! ストアの全レコードをサービス名をキーとするJSONオブジェクトで返す。
//! ブラウザから別オリジンで読めるよう`Access-Control-Allow-Origin: *`を付与する。

use crate::AppState;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

/// GET /api/status - 最新のステータススナップショット
///
/// 初回サイクル完了前は`{}`を返す。
pub async fn get_status(State(state): State<AppState>) -> Response {
    let snapshot = state.store.read_all().await;
    (
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(snapshot),
    )
        .into_response()
}
