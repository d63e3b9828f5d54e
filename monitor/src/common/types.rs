//! ステータスレコード型定義
//!
//! 監視対象サービスごとの正規化された状態と、その補足情報

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// 補足情報の値
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DetailValue {
    /// 件数（キュー長、ストリーム数、アプリ数など）
    Count(u64),
    /// 文字列（バージョンなど）
    Text(String),
    /// 上流サービスから受け取ったエントリの一覧（ヘルス警告など）
    Entries(Vec<serde_json::Value>),
}

impl From<u64> for DetailValue {
    fn from(value: u64) -> Self {
        DetailValue::Count(value)
    }
}

impl From<usize> for DetailValue {
    fn from(value: usize) -> Self {
        DetailValue::Count(value as u64)
    }
}

impl From<String> for DetailValue {
    fn from(value: String) -> Self {
        DetailValue::Text(value)
    }
}

impl From<&str> for DetailValue {
    fn from(value: &str) -> Self {
        DetailValue::Text(value.to_string())
    }
}

impl From<Vec<serde_json::Value>> for DetailValue {
    fn from(value: Vec<serde_json::Value>) -> Self {
        DetailValue::Entries(value)
    }
}

/// サービス固有の補足情報
///
/// 挿入順を保持したキーと値の組。同じキーを再度挿入すると値を置き換える。
/// 取得できなかった項目は挿入しない（nullで埋めない）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Details {
    entries: Vec<(String, DetailValue)>,
}

impl Details {
    /// 空の補足情報を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 値を挿入（同じキーがあれば置き換え）
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<DetailValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// 値を挿入した自身を返す（ビルダー形式）
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DetailValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// キーで値を取得
    pub fn get(&self, key: &str) -> Option<&DetailValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// 項目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 項目がないか
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 挿入順に走査
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DetailValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for Details {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// サービス1件分のステータス
///
/// 同じ`name`のレコードは常に1件だけ存在し、新しいプローブ結果で丸ごと置き換えられる。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    /// サービス識別子（例: "radarr"）
    pub name: String,
    /// グルーピング用のタグ（例: "arr-stack"）
    #[serde(rename = "type")]
    pub category: String,
    /// 直近のプローブ結果
    pub healthy: bool,
    /// 直近のプローブ完了時刻
    pub last_checked: DateTime<Utc>,
    /// 結果または失敗理由の要約
    pub message: String,
    /// 補足情報（サービスごとにスキーマが異なる）
    pub details: Option<Details>,
}

impl StatusRecord {
    /// 現在時刻でレコードを作成
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        healthy: bool,
        message: impl Into<String>,
        details: Option<Details>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            healthy,
            last_checked: Utc::now(),
            message: message.into(),
            details,
        }
    }
}
