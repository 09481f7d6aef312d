//! InMemoryComboCorpus - 開発用・テスト用のコンボコーパス

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{BudgetTier, CardId, ColorIdentity, Combo, CorpusError};
use crate::ports::ComboCorpus;

/// メタ定番カード 1 枚分のエントリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staple {
    pub card_id: CardId,

    #[serde(default)]
    pub identity: ColorIdentity,

    /// このティア以上でのみ提案する（None なら全ティア）
    #[serde(default)]
    pub min_tier: Option<BudgetTier>,
}

impl Staple {
    pub fn new(card_id: u64, identity: ColorIdentity) -> Self {
        Self {
            card_id: CardId::new(card_id),
            identity,
            min_tier: None,
        }
    }

    pub fn with_min_tier(mut self, tier: BudgetTier) -> Self {
        self.min_tier = Some(tier);
        self
    }
}

/// InMemoryComboCorpus はコンボと定番カードのリストを保持する
#[derive(Debug, Clone, Default)]
pub struct InMemoryComboCorpus {
    combos: Vec<Combo>,
    staples: Vec<Staple>,
}

impl InMemoryComboCorpus {
    pub fn new(combos: Vec<Combo>) -> Self {
        Self {
            combos,
            staples: Vec::new(),
        }
    }

    pub fn with_staples(mut self, staples: Vec<Staple>) -> Self {
        self.staples = staples;
        self
    }

    pub fn len(&self) -> usize {
        self.combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }
}

#[async_trait]
impl ComboCorpus for InMemoryComboCorpus {
    async fn find_by_required_card(&self, id: CardId) -> Result<Vec<Combo>, CorpusError> {
        Ok(self
            .combos
            .iter()
            .filter(|c| c.requires(id))
            .cloned()
            .collect())
    }

    async fn find_by_required_cards(&self, ids: &[CardId]) -> Result<Vec<Combo>, CorpusError> {
        Ok(self
            .combos
            .iter()
            .filter(|c| ids.iter().any(|id| c.requires(*id)))
            .cloned()
            .collect())
    }

    async fn staples_for(
        &self,
        identity: ColorIdentity,
        tier: BudgetTier,
    ) -> Result<Vec<CardId>, CorpusError> {
        Ok(self
            .staples
            .iter()
            .filter(|s| identity.allows(&s.identity))
            .filter(|s| s.min_tier.is_none_or(|min| tier >= min))
            .map(|s| s.card_id)
            .collect())
    }
}
