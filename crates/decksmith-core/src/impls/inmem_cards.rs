//! InMemoryCardCorpus - 開発用・テスト用のカードコーパス
//!
//! クエリ言語の評価は `CardQuery::matches` に任せ、
//! ここでは挿入順（= 順位）と ordering hint の適用だけを行います。

use async_trait::async_trait;

use crate::domain::{Card, CardQuery, CorpusError};
use crate::ports::CardCorpus;

/// InMemoryCardCorpus は `Vec<Card>` をそのまま検索する
///
/// # 実装詳細
/// - 読み取り専用なのでロック不要（複数リクエストから並行に使える）
/// - ordering hint がなければ挿入順で返す
/// - 同じ入力には常に同じ結果を返す（決定的）
#[derive(Debug, Clone, Default)]
pub struct InMemoryCardCorpus {
    cards: Vec<Card>,
}

impl InMemoryCardCorpus {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[async_trait]
impl CardCorpus for InMemoryCardCorpus {
    async fn search(&self, query: &CardQuery, limit: usize) -> Result<Vec<Card>, CorpusError> {
        let mut hits: Vec<&Card> = self.cards.iter().filter(|c| query.matches(c)).collect();
        if let Some(order) = query.order() {
            hits.sort_by(|a, b| order.compare(a, b));
        }
        Ok(hits.into_iter().take(limit).cloned().collect())
    }

    async fn lookup_commander(&self, name: &str) -> Result<Option<Card>, CorpusError> {
        let found = self.cards.iter().find(|c| {
            c.name.eq_ignore_ascii_case(name.trim())
                && c.is_legendary()
                && c.is_creature()
                && c.legal_commander
        });
        Ok(found.cloned())
    }
}
