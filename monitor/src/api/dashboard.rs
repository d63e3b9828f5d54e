//! ダッシュボード配信
//!
//! HTMLはバイナリに埋め込まれ、描画はすべてブラウザ側で行う。
//! ページは30秒ごとに`/api/status`を取得して再描画する。

use axum::response::Html;

/// 埋め込みダッシュボードHTML
const DASHBOARD_HTML: &str = include_str!("../../assets/dashboard.html");

/// GET / - ダッシュボードページ
pub async fn get_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
