//! CorpusGateway - コーパス呼び出しの共通窓口
//!
//! 各呼び出しに独立したタイムアウトを掛けます。
//! - タイムアウト: その呼び出し地点では「結果 0 件」として扱う（shortfall）
//! - transport / protocol エラー: そのまま上に返す（リクエスト全体を中断）
//!
//! コマンダー検索だけは例外で、タイムアウトも上流障害として返します。
//! 「見つからない」と「応答がない」を混同しないためです。

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;

use crate::domain::{BudgetTier, Card, CardId, CardQuery, ColorIdentity, Combo, CorpusError};
use crate::ports::{CardCorpus, ComboCorpus};

#[derive(Clone)]
pub struct CorpusGateway {
    cards: Arc<dyn CardCorpus>,
    combos: Arc<dyn ComboCorpus>,
    timeout: Duration,
}

impl CorpusGateway {
    pub fn new(cards: Arc<dyn CardCorpus>, combos: Arc<dyn ComboCorpus>, timeout: Duration) -> Self {
        Self {
            cards,
            combos,
            timeout,
        }
    }

    pub async fn lookup_commander(&self, name: &str) -> Result<Option<Card>, CorpusError> {
        match tokio::time::timeout(self.timeout, self.cards.lookup_commander(name)).await {
            Ok(result) => result,
            Err(_) => Err(CorpusError::Transport(format!(
                "commander lookup timed out after {:?}",
                self.timeout
            ))),
        }
    }

    pub async fn search(&self, query: &CardQuery, limit: usize) -> Result<Vec<Card>, CorpusError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let cards = self
            .bounded("search", self.cards.search(query, limit))
            .await?;
        tracing::trace!(%query, limit, hits = cards.len(), "card search");
        Ok(cards)
    }

    /// Resolve ids one by one; unknown ids are skipped. Output keeps input order.
    pub async fn cards_by_ids(&self, ids: &[CardId]) -> Result<Vec<Card>, CorpusError> {
        let lookups = ids.iter().map(|id| async move {
            let query = CardQuery::by_id(*id);
            self.search(&query, 1).await
        });
        let found = try_join_all(lookups).await?;
        Ok(found.into_iter().flatten().collect())
    }

    pub async fn combos_for(&self, id: CardId) -> Result<Vec<Combo>, CorpusError> {
        self.bounded("find_by_required_card", self.combos.find_by_required_card(id))
            .await
    }

    pub async fn combos_with(&self, ids: &[CardId]) -> Result<Vec<Combo>, CorpusError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.bounded("find_by_required_cards", self.combos.find_by_required_cards(ids))
            .await
    }

    pub async fn staples(
        &self,
        identity: ColorIdentity,
        tier: BudgetTier,
    ) -> Result<Vec<CardId>, CorpusError> {
        self.bounded("staples_for", self.combos.staples_for(identity, tier))
            .await
    }

    async fn bounded<T: Default>(
        &self,
        op: &'static str,
        call: impl Future<Output = Result<T, CorpusError>>,
    ) -> Result<T, CorpusError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    op,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "corpus call timed out, treating as empty"
                );
                Ok(T::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{InMemoryCardCorpus, InMemoryComboCorpus};
    use crate::testing::{SlowCardCorpus, sample_card};

    fn gateway_over(cards: Arc<dyn CardCorpus>, timeout_ms: u64) -> CorpusGateway {
        CorpusGateway::new(
            cards,
            Arc::new(InMemoryComboCorpus::default()),
            Duration::from_millis(timeout_ms),
        )
    }

    #[tokio::test]
    async fn timed_out_search_is_empty() {
        let slow = SlowCardCorpus::new(vec![sample_card(1)], Duration::from_millis(200));
        let gateway = gateway_over(Arc::new(slow), 20);

        let hits = gateway.search(&CardQuery::any(), 5).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn timed_out_commander_lookup_is_an_error() {
        let slow = SlowCardCorpus::new(vec![sample_card(1)], Duration::from_millis(200));
        let gateway = gateway_over(Arc::new(slow), 20);

        let err = gateway.lookup_commander("anything").await.unwrap_err();
        assert!(matches!(err, CorpusError::Transport(_)));
    }

    #[tokio::test]
    async fn cards_by_ids_keeps_order_and_skips_unknown() {
        let corpus = InMemoryCardCorpus::new(vec![sample_card(1), sample_card(2), sample_card(3)]);
        let gateway = gateway_over(Arc::new(corpus), 1_000);

        let cards = gateway
            .cards_by_ids(&[CardId::new(3), CardId::new(99), CardId::new(1)])
            .await
            .unwrap();
        let ids: Vec<u64> = cards.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
