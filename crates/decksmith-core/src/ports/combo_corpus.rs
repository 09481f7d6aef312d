//! ComboCorpus port - コンボ（variant）コーパス
//!
//! # 実装
//! - `impls::InMemoryComboCorpus`（テスト / JSON スナップショット用）

use async_trait::async_trait;

use crate::domain::{BudgetTier, CardId, ColorIdentity, Combo, CorpusError};

/// ComboCorpus はコンボを検索するためのインターフェース
///
/// 返り値の順序はコーパス側の順位（人気順など）をそのまま使います。
#[async_trait]
pub trait ComboCorpus: Send + Sync {
    /// `id` を必要とするコンボ
    async fn find_by_required_card(&self, id: CardId) -> Result<Vec<Combo>, CorpusError>;

    /// `ids` のいずれかを必要とするコンボ
    async fn find_by_required_cards(&self, ids: &[CardId]) -> Result<Vec<Combo>, CorpusError>;

    /// 色とティアに合ったメタ定番カードの ID
    async fn staples_for(
        &self,
        identity: ColorIdentity,
        tier: BudgetTier,
    ) -> Result<Vec<CardId>, CorpusError>;
}
