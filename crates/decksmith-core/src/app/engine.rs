//! RecommendationEngine - パイプライン全体の入口
//!
//! # フロー
//! ```text
//! lookup_commander -> StructureBuilder -> SlotFiller -> Deduplicator
//!                  -> ComboEnhancer -> Narrative / Score / Analysis
//! ```
//!
//! エンジン自体は状態を持たないので、複数リクエストから並行に呼べます。
//! 各ステージは前段の出力を受け取り、新しい値を返します。

use std::collections::HashSet;

use super::analysis::analyze;
use super::combos::ComboEnhancer;
use super::dedup::Deduplicator;
use super::filler::SlotFiller;
use super::gateway::CorpusGateway;
use super::narrative::synthesize;
use super::score::{cost_bracket, power_level};
use super::structure::build_structure;
use crate::config::EngineConfig;
use crate::domain::{
    Allocation, BudgetTier, Card, CardId, ComboId, CorpusError, EngineError, RecommendationResult,
    Slot, StrategyFocus,
};

#[derive(Clone)]
pub struct RecommendationEngine {
    gateway: CorpusGateway,
    config: EngineConfig,
}

impl RecommendationEngine {
    pub(crate) fn new(gateway: CorpusGateway, config: EngineConfig) -> Self {
        Self { gateway, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub async fn recommend(
        &self,
        commander_name: &str,
        focus: StrategyFocus,
        tier: BudgetTier,
    ) -> Result<RecommendationResult, EngineError> {
        tracing::info!(commander = commander_name, %focus, %tier, "recommendation started");

        let commander = self
            .gateway
            .lookup_commander(commander_name)
            .await?
            .ok_or_else(|| EngineError::CommanderNotFound(commander_name.to_string()))?;
        let identity = commander.identity;

        let structure = build_structure(identity, focus, self.config.deck_size);
        let filled = SlotFiller::new(&self.gateway, &self.config)
            .fill(structure, identity, &commander)
            .await?;
        let deduped = Deduplicator::new(&self.gateway, self.config.deck_size)
            .run(filled, identity, &commander)
            .await?;
        tracing::debug!(missing = deduped.missing, "slots settled before combo enhancement");
        let report = ComboEnhancer::new(&self.gateway, &self.config)
            .enhance(&commander, deduped.slots, tier)
            .await?;

        let cards = flatten(&report.slots);
        let allocation = Allocation::classify(cards.len(), report.bonus, self.config.deck_size);
        let complete_combos = self.complete_combos(&commander, &cards).await?;

        let narrative = synthesize(&commander, &cards, &report.combos);
        let power = power_level(&cards, self.config.expensive_card_threshold, report.power_delta);
        let estimated_cost = cost_bracket(&cards);
        let analysis = analyze(&cards);

        tracing::info!(
            commander = %commander.name,
            cards = cards.len(),
            power,
            cost = estimated_cost.label(),
            ?allocation,
            "recommendation finished"
        );

        Ok(RecommendationResult {
            commander,
            cards,
            slots: report.slots,
            strategy_summary: narrative.summary,
            synergy_notes: narrative.notes,
            power_level: power,
            estimated_cost,
            allocation,
            combos: report.combos,
            complete_combos,
            analysis,
        })
    }

    /// Combos whose every required card is in the deck or is the commander.
    async fn complete_combos(
        &self,
        commander: &Card,
        cards: &[Card],
    ) -> Result<Vec<ComboId>, CorpusError> {
        let mut ids: Vec<CardId> = cards.iter().map(|c| c.id).collect();
        ids.push(commander.id);
        let owned: HashSet<CardId> = ids.iter().copied().collect();

        let mut seen = HashSet::new();
        Ok(self
            .gateway
            .combos_with(&ids)
            .await?
            .into_iter()
            .filter(|c| !c.card_ids.is_empty() && c.card_ids.iter().all(|id| owned.contains(id)))
            .map(|c| c.id)
            .filter(|id| seen.insert(id.clone()))
            .collect())
    }
}

/// Slot cards in slot order, first occurrence of each name only.
fn flatten(slots: &[Slot]) -> Vec<Card> {
    let mut seen = HashSet::new();
    slots
        .iter()
        .flat_map(|s| s.cards.iter())
        .filter(|c| seen.insert(c.name.as_str()))
        .cloned()
        .collect()
}
