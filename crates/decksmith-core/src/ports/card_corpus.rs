//! CardCorpus port - カード検索コーパス
//!
//! エンジンはコーパスの接続ライフサイクルを持ちません。
//! クエリを投げて順位付きの結果を受け取るだけです。
//!
//! # 実装
//! - `impls::InMemoryCardCorpus`（テスト / JSON スナップショット用）

use async_trait::async_trait;

use crate::domain::{Card, CardQuery, CorpusError};

/// CardCorpus はカードを検索するためのインターフェース
///
/// # 契約
/// - `search` は最大 `limit` 件を順位順で返す
/// - 件数が足りないのはエラーではない（空の Vec もあり得る）
/// - transport / protocol の失敗だけを `Err` で返す
#[async_trait]
pub trait CardCorpus: Send + Sync {
    async fn search(&self, query: &CardQuery, limit: usize) -> Result<Vec<Card>, CorpusError>;

    /// Legendary creature の中から名前の完全一致で探す
    async fn lookup_commander(&self, name: &str) -> Result<Option<Card>, CorpusError>;
}
