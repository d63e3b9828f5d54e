//! ステータスストア
//!
//! サービス名 → 最新の`StatusRecord`をメモリ内で保持する。
//! 書き込みは排他ロック、読み取りは共有ロックで行い、
//! 読み取り側が書き込み途中のレコードを観測することはない。

use crate::common::types::StatusRecord;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// ステータスストア
///
/// 収集ループとリクエストハンドラーの双方にクローンして渡すハンドル。
/// 起動直後は空で、まだプローブしていないサービスはスナップショットに含まれない。
#[derive(Clone, Default)]
pub struct StatusStore {
    records: Arc<RwLock<BTreeMap<String, StatusRecord>>>,
}

impl StatusStore {
    /// 空のストアを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// レコードを挿入または丸ごと置き換える
    ///
    /// 置き換え前のレコードの`healthy`を返す（初回書き込み時は`None`）。
    pub async fn write(&self, record: StatusRecord) -> Option<bool> {
        let mut records = self.records.write().await;
        records
            .insert(record.name.clone(), record)
            .map(|previous| previous.healthy)
    }

    /// 現在のスナップショットを取得
    pub async fn read_all(&self) -> BTreeMap<String, StatusRecord> {
        self.records.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::Details;

    fn record(name: &str, healthy: bool, message: &str) -> StatusRecord {
        StatusRecord::new(name, "arr-stack", healthy, message, None)
    }

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = StatusStore::new();
        assert!(store.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_write_distinct_names_then_read_all() {
        let store = StatusStore::new();
        let names = ["plex", "radarr", "sonarr", "lidarr", "argocd"];

        for name in names {
            store.write(record(name, true, "first")).await;
        }
        store.write(record("radarr", false, "HTTP 500")).await;

        let snapshot = store.read_all().await;
        assert_eq!(snapshot.len(), names.len());
        assert_eq!(snapshot["radarr"].message, "HTTP 500");
        assert!(!snapshot["radarr"].healthy);
        assert_eq!(snapshot["plex"].message, "first");
    }

    #[tokio::test]
    async fn test_write_replaces_details_wholesale() {
        let store = StatusStore::new();
        let old = StatusRecord::new(
            "radarr",
            "arr-stack",
            true,
            "All systems operational",
            Some(Details::new().with("queue_size", 3usize).with("version", "4.5.0")),
        );
        store.write(old).await;

        let new = StatusRecord::new(
            "radarr",
            "arr-stack",
            true,
            "All systems operational",
            Some(Details::new().with("version", "4.6.0")),
        );
        store.write(new.clone()).await;

        let stored = store.read_all().await.remove("radarr").unwrap();
        assert_eq!(stored, new);
        // 古いqueue_sizeはマージされない
        assert!(stored.details.unwrap().get("queue_size").is_none());
    }

    #[tokio::test]
    async fn test_write_returns_previous_verdict() {
        let store = StatusStore::new();

        assert_eq!(store.write(record("sonarr", true, "ok")).await, None);
        assert_eq!(store.write(record("sonarr", false, "HTTP 503")).await, Some(true));
        assert_eq!(store.write(record("sonarr", true, "ok")).await, Some(false));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reads_never_observe_torn_record() {
        let store = StatusStore::new();
        store.write(record("plex", true, "healthy")).await;

        // healthy と message は常に対応したペアで書き込まれる
        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for i in 0..500 {
                    let healthy = i % 2 == 0;
                    let message = if healthy { "healthy" } else { "unhealthy" };
                    store.write(record("plex", healthy, message)).await;
                    tokio::task::yield_now().await;
                }
            })
        };

        let mut readers = Vec::new();
        for _ in 0..4 {
            let store = store.clone();
            readers.push(tokio::spawn(async move {
                for _ in 0..500 {
                    let snapshot = store.read_all().await;
                    let plex = &snapshot["plex"];
                    let expected = if plex.healthy { "healthy" } else { "unhealthy" };
                    assert_eq!(plex.message, expected);
                    tokio::task::yield_now().await;
                }
            }));
        }

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
    }
}
