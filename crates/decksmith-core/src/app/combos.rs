//! ComboEnhancer - コンボ情報でスロットを強化する
//!
//! # フロー
//! 1. コマンダーを必須とするコンボを取得（0 件なら何もしない）
//! 2. パワー順に上位 `top_combos` 件を選ぶ
//! 3. 上位コンボの必須カード（未採用のもの）を threats / win_cons / combo_pieces に注入
//! 4. 色とティアに合った定番カードを ramp / card_draw / removal に注入
//! 5. focused / optimized なら上位コンボの残りのカードで `combo_enablers` スロットを追加（EnablerPolicy に従う）
//!
//! 注入はスロットの target を超えません。満杯なら最も優先度の低いカードと入れ替えます。

use std::collections::{BTreeSet, HashSet, VecDeque};

use super::gateway::CorpusGateway;
use super::structure::flexible_index;
use crate::config::{EnablerPolicy, EngineConfig};
use crate::domain::{BudgetTier, Card, CardId, Combo, CorpusError, Slot, SlotCategory};

/// Upper bound on the combo-aware power bonus.
pub const MAX_POWER_DELTA: u8 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct ComboReport {
    pub slots: Vec<Slot>,
    pub power_delta: u8,

    /// Combos the deck was tuned around, strongest first.
    pub combos: Vec<Combo>,

    /// Ids of combo pieces placed into the deck, enablers included.
    pub injected: Vec<CardId>,

    /// Ids of meta staples placed into the deck.
    pub staples: Vec<CardId>,

    /// Cards added on top of the deck size (`EnablerPolicy::Bonus`).
    pub bonus: usize,
}

impl ComboReport {
    fn unchanged(slots: Vec<Slot>) -> Self {
        Self {
            slots,
            power_delta: 0,
            combos: Vec::new(),
            injected: Vec::new(),
            staples: Vec::new(),
            bonus: 0,
        }
    }
}

pub struct ComboEnhancer<'a> {
    gateway: &'a CorpusGateway,
    config: &'a EngineConfig,
}

impl<'a> ComboEnhancer<'a> {
    pub fn new(gateway: &'a CorpusGateway, config: &'a EngineConfig) -> Self {
        Self { gateway, config }
    }

    pub async fn enhance(
        &self,
        commander: &Card,
        slots: Vec<Slot>,
        tier: BudgetTier,
    ) -> Result<ComboReport, CorpusError> {
        let mut found: Vec<Combo> = self
            .gateway
            .combos_for(commander.id)
            .await?
            .into_iter()
            .filter(|c| c.requires_commander(commander.id))
            .collect();
        if found.is_empty() {
            tracing::debug!(commander = %commander.name, "no combos for commander");
            return Ok(ComboReport::unchanged(slots));
        }
        rank(&mut found);

        let mut slots = slots;
        let mut present: HashSet<String> = slots
            .iter()
            .flat_map(|s| s.cards.iter().map(|c| c.name.clone()))
            .collect();
        present.insert(commander.name.clone());

        let top: Vec<Combo> = found.iter().take(self.config.top_combos).cloned().collect();
        let mut pieces: VecDeque<Card> = self
            .resolve_new(&piece_ids(&top, commander.id), commander, &present)
            .await?
            .into();
        let mut injected = Vec::new();
        for slot in slots.iter_mut().filter(|s| s.category.takes_combo_pieces()) {
            injected.extend(inject(
                slot,
                &mut pieces,
                self.config.combo_injection_per_slot,
                &mut present,
            ));
        }

        let staple_ids = self.gateway.staples(commander.identity, tier).await?;
        let mut staple_cards: VecDeque<Card> = self
            .resolve_new(&staple_ids, commander, &present)
            .await?
            .into();
        let mut staples = Vec::new();
        for slot in slots.iter_mut().filter(|s| s.category.takes_staples()) {
            staples.extend(inject(
                slot,
                &mut staple_cards,
                self.config.staple_injection_per_slot,
                &mut present,
            ));
        }

        let mut bonus = 0;
        if tier.wants_combo_enablers() {
            let pool = self
                .resolve_new(&piece_ids(&top, commander.id), commander, &present)
                .await?;
            let enablers = self.add_enablers(&mut slots, pool);
            if self.config.enabler_policy == EnablerPolicy::Bonus {
                bonus = enablers.len();
            }
            injected.extend(enablers);
        }

        let max_power = top.iter().map(Combo::power_level).max().unwrap_or(0);
        let power_delta = (max_power * MAX_POWER_DELTA / 8).min(MAX_POWER_DELTA);
        tracing::info!(
            commander = %commander.name,
            combos = found.len(),
            injected = injected.len(),
            staples = staples.len(),
            bonus,
            power_delta,
            "combo enhancement applied"
        );

        Ok(ComboReport {
            slots,
            power_delta,
            combos: top,
            injected,
            staples,
            bonus,
        })
    }

    /// Resolve ids to legal, on-identity cards whose names are not yet in the deck.
    async fn resolve_new(
        &self,
        ids: &[CardId],
        commander: &Card,
        present: &HashSet<String>,
    ) -> Result<Vec<Card>, CorpusError> {
        let cards = self.gateway.cards_by_ids(ids).await?;
        let mut seen = HashSet::new();
        Ok(cards
            .into_iter()
            .filter(|c| c.legal_commander && commander.identity.allows(&c.identity))
            .filter(|c| !present.contains(&c.name))
            .filter(|c| seen.insert(c.name.clone()))
            .collect())
    }

    /// Build the `combo_enablers` slot from `pool` and return the ids placed.
    fn add_enablers(&self, slots: &mut Vec<Slot>, pool: Vec<Card>) -> Vec<CardId> {
        let mut k = self.config.combo_enabler_count.min(pool.len());
        if k == 0 {
            return Vec::new();
        }

        if self.config.enabler_policy == EnablerPolicy::Reserve {
            let Some(flex) = flexible_index(slots) else {
                return Vec::new();
            };
            k = k.min(slots[flex].target);
            slots[flex].target -= k;
            let dropped = slots[flex].truncate_to_target();
            tracing::debug!(
                slot = %slots[flex].category,
                reserved = k,
                dropped = dropped.len(),
                "reserved capacity for combo enablers"
            );
        } else {
            tracing::warn!(extra = k, "combo enablers exceed the deck size");
        }

        let mut slot = Slot::new(SlotCategory::ComboEnablers, k, 9);
        slot.cards = pool.into_iter().take(k).collect();
        let ids = slot.cards.iter().map(|c| c.id).collect();
        slots.push(slot);
        ids
    }
}

/// Strongest first: power, then popularity, then id.
fn rank(combos: &mut [Combo]) {
    combos.sort_by(|a, b| {
        b.power_level()
            .cmp(&a.power_level())
            .then_with(|| b.popularity.cmp(&a.popularity))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Union of required cards, first-seen order, commander excluded.
fn piece_ids(combos: &[Combo], commander: CardId) -> Vec<CardId> {
    let mut seen = BTreeSet::new();
    combos
        .iter()
        .flat_map(|c| c.card_ids.iter().copied())
        .filter(|id| *id != commander && seen.insert(*id))
        .collect()
}

/// Move up to `max` cards from `queue` into `slot`. Returns the ids placed.
fn inject(
    slot: &mut Slot,
    queue: &mut VecDeque<Card>,
    max: usize,
    present: &mut HashSet<String>,
) -> Vec<CardId> {
    let mut placed = Vec::new();
    while placed.len() < max.min(slot.target) {
        let Some(card) = queue.pop_front() else {
            break;
        };
        let id = card.id;
        present.insert(card.name.clone());
        if let Some(evicted) = slot.inject(card) {
            present.remove(&evicted.name);
            tracing::debug!(slot = %slot.category, evicted = %evicted.name, "replaced lowest-priority card");
        }
        placed.push(id);
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use rstest::rstest;

    use crate::impls::{InMemoryCardCorpus, InMemoryComboCorpus, Staple};
    use crate::testing::{combo, commander, sample_card};

    fn gateway(cards: Vec<Card>, combos: InMemoryComboCorpus) -> CorpusGateway {
        CorpusGateway::new(
            Arc::new(InMemoryCardCorpus::new(cards)),
            Arc::new(combos),
            Duration::from_secs(1),
        )
    }

    fn full_slot(category: SlotCategory, ids: std::ops::Range<u64>) -> Slot {
        let mut slot = Slot::new(category, ids.clone().count(), 5);
        slot.cards = ids.map(sample_card).collect();
        slot
    }

    fn structure() -> Vec<Slot> {
        vec![
            full_slot(SlotCategory::Ramp, 100..104),
            full_slot(SlotCategory::Threats, 200..210),
            full_slot(SlotCategory::Utility, 300..305),
        ]
    }

    fn corpus_cards() -> Vec<Card> {
        let mut cards = vec![commander()];
        cards.extend((500..510).map(sample_card));
        cards
    }

    #[tokio::test]
    async fn no_combos_is_a_pass_through() {
        let gw = gateway(corpus_cards(), InMemoryComboCorpus::default());
        let config = EngineConfig::default();
        let enhancer = ComboEnhancer::new(&gw, &config);

        let before = structure();
        let report = enhancer
            .enhance(&commander(), before.clone(), BudgetTier::Optimized)
            .await
            .unwrap();
        assert_eq!(report.slots, before);
        assert_eq!(report.power_delta, 0);
        assert!(report.combos.is_empty());
    }

    #[tokio::test]
    async fn combos_without_the_commander_as_commander_are_ignored() {
        let combos = InMemoryComboCorpus::new(vec![combo("loose", None, &[1, 500, 501], 3)]);
        let gw = gateway(corpus_cards(), combos);
        let config = EngineConfig::default();

        let before = structure();
        let report = ComboEnhancer::new(&gw, &config)
            .enhance(&commander(), before.clone(), BudgetTier::Casual)
            .await
            .unwrap();
        assert_eq!(report.slots, before);
    }

    #[tokio::test]
    async fn injection_respects_targets_and_stays_within_combo_pieces() {
        let combos = InMemoryComboCorpus::new(vec![
            combo("a", Some(1), &[1, 500, 501, 502], 6),
            combo("b", Some(1), &[1, 503], 2),
        ])
        .with_staples(vec![Staple::new(509, Default::default())]);
        let gw = gateway(corpus_cards(), combos);
        let config = EngineConfig::default();

        let report = ComboEnhancer::new(&gw, &config)
            .enhance(&commander(), structure(), BudgetTier::Casual)
            .await
            .unwrap();

        for (slot, original) in report.slots.iter().zip(structure()) {
            assert_eq!(slot.cards.len(), original.target);
        }
        let allowed: HashSet<CardId> = report
            .combos
            .iter()
            .flat_map(|c| c.card_ids.iter().copied())
            .collect();
        assert!(!report.injected.is_empty());
        assert!(report.injected.iter().all(|id| allowed.contains(id)));
        assert_eq!(report.staples, vec![CardId::new(509)]);

        // "b" (2 cards, 2 mana) ranks first
        assert_eq!(report.combos[0].id.as_str(), "b");
        assert_eq!(report.power_delta, 2);
        assert_eq!(report.bonus, 0);
    }

    #[tokio::test]
    async fn reserve_policy_keeps_deck_size() {
        let combos = InMemoryComboCorpus::new(vec![combo("a", Some(1), &[1, 500, 501, 502, 503, 504], 9)]);
        let gw = gateway(corpus_cards(), combos);
        let config = EngineConfig::default();

        let before: usize = structure().iter().map(|s| s.target).sum();
        let report = ComboEnhancer::new(&gw, &config)
            .enhance(&commander(), structure(), BudgetTier::Focused)
            .await
            .unwrap();

        let after: usize = report.slots.iter().map(|s| s.target).sum();
        assert_eq!(after, before);
        let enablers = report
            .slots
            .iter()
            .find(|s| s.category == SlotCategory::ComboEnablers)
            .unwrap();
        assert_eq!(enablers.cards.len(), 3);
        assert_eq!(report.bonus, 0);
        assert_eq!(report.power_delta, 0);
    }

    #[tokio::test]
    async fn bonus_policy_adds_on_top() {
        let combos = InMemoryComboCorpus::new(vec![combo("a", Some(1), &[1, 500, 501, 502, 503, 504], 9)]);
        let gw = gateway(corpus_cards(), combos);
        let config = EngineConfig {
            enabler_policy: EnablerPolicy::Bonus,
            ..EngineConfig::default()
        };

        let before: usize = structure().iter().map(|s| s.target).sum();
        let report = ComboEnhancer::new(&gw, &config)
            .enhance(&commander(), structure(), BudgetTier::Optimized)
            .await
            .unwrap();

        let after: usize = report.slots.iter().map(|s| s.target).sum();
        assert_eq!(after, before + 3);
        assert_eq!(report.bonus, 3);
    }

    #[rstest]
    #[case(BudgetTier::Focused)]
    #[case(BudgetTier::Optimized)]
    #[tokio::test]
    async fn enablers_come_only_from_returned_combos(#[case] tier: BudgetTier) {
        let combos = InMemoryComboCorpus::new(
            ["a", "b", "c", "d"]
                .into_iter()
                .zip(501..)
                .map(|(id, piece)| combo(id, Some(1), &[1, piece], 2))
                .collect(),
        );
        let gw = gateway(corpus_cards(), combos);
        let config = EngineConfig::default();

        let report = ComboEnhancer::new(&gw, &config)
            .enhance(&commander(), structure(), tier)
            .await
            .unwrap();

        let returned: Vec<&str> = report.combos.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(returned, vec!["a", "b", "c"]);
        let allowed: HashSet<CardId> = report
            .combos
            .iter()
            .flat_map(|c| c.card_ids.iter().copied())
            .collect();
        assert_eq!(report.injected.len(), 3);
        assert!(report.injected.iter().all(|id| allowed.contains(id)));
        assert!(
            report
                .slots
                .iter()
                .flat_map(|s| s.cards.iter())
                .all(|c| c.id != CardId::new(504))
        );
    }

    #[tokio::test]
    async fn off_identity_pieces_are_skipped() {
        let mut cards = corpus_cards();
        cards.push(Card::new(520, "Red Piece", "Artifact").with_identity("R".parse().unwrap()));
        let combos = InMemoryComboCorpus::new(vec![combo("a", Some(1), &[1, 520, 506], 3)])
            .with_staples(vec![Staple::new(520, Default::default())]);
        let gw = gateway(cards, combos);
        let config = EngineConfig::default();

        let report = ComboEnhancer::new(&gw, &config)
            .enhance(&commander(), structure(), BudgetTier::Casual)
            .await
            .unwrap();

        assert_eq!(report.injected, vec![CardId::new(506)]);
        assert!(report.staples.is_empty());
        assert!(
            report
                .slots
                .iter()
                .flat_map(|s| s.cards.iter())
                .all(|c| c.name != "Red Piece")
        );
    }

    #[test]
    fn piece_ids_skip_commander_and_repeats() {
        let combos = vec![combo("a", Some(1), &[1, 2, 3], 3), combo("b", Some(1), &[3, 4], 3)];
        let ids: Vec<u64> = piece_ids(&combos, CardId::new(1)).iter().map(|id| id.get()).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }
}
