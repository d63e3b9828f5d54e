//! プロセスの生存確認

/// GET /health - 常に`OK`を返す
///
/// 監視対象サービスの状態とは無関係。
pub async fn get_health() -> &'static str {
    "OK"
}
