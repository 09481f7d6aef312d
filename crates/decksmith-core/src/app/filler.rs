//! SlotFiller - スロットごとに候補カードを集める
//!
//! # フロー
//! 1. カテゴリ固有の primary クエリを順に投げ、`target * multiplier` 枚まで集める
//! 2. `target` 枚に切り詰める
//! 3. 足りなければ fallback クエリ（短い有限チェーン）で埋める
//!
//! 埋まりきらなくてもエラーにはしません（Deduplicator が最後に補充します）。
//! スロット間に依存はないので、`parallel_fill` が有効なら並行に実行します。

use futures::future::try_join_all;

use super::gateway::CorpusGateway;
use super::themes::{creature_subtypes, detect_themes};
use crate::config::EngineConfig;
use crate::domain::{Card, CardQuery, Color, ColorIdentity, Comparison, CorpusError, Slot, SlotCategory};

pub struct SlotFiller<'a> {
    gateway: &'a CorpusGateway,
    config: &'a EngineConfig,
}

impl<'a> SlotFiller<'a> {
    pub fn new(gateway: &'a CorpusGateway, config: &'a EngineConfig) -> Self {
        Self { gateway, config }
    }

    /// Fill every slot. Output order matches input order.
    pub async fn fill(
        &self,
        slots: Vec<Slot>,
        identity: ColorIdentity,
        commander: &Card,
    ) -> Result<Vec<Slot>, CorpusError> {
        if self.config.parallel_fill {
            let jobs = slots
                .into_iter()
                .map(|slot| self.fill_slot(slot, identity, commander));
            return try_join_all(jobs).await;
        }

        let mut filled = Vec::with_capacity(slots.len());
        for slot in slots {
            filled.push(self.fill_slot(slot, identity, commander).await?);
        }
        Ok(filled)
    }

    async fn fill_slot(
        &self,
        mut slot: Slot,
        identity: ColorIdentity,
        commander: &Card,
    ) -> Result<Slot, CorpusError> {
        if slot.target == 0 {
            return Ok(slot);
        }

        let cap = slot.target * self.config.candidate_multiplier;
        let mut gathered: Vec<Card> = Vec::with_capacity(cap);
        for query in primary_queries(slot.category, identity, commander) {
            if gathered.len() >= cap {
                break;
            }
            let limit = self.config.per_query_limit.min(cap - gathered.len());
            let query = query.within(identity).legal();
            for card in self.gateway.search(&query, limit).await? {
                if gathered.len() >= cap {
                    break;
                }
                if card.name == commander.name || gathered.iter().any(|c| c.name == card.name) {
                    continue;
                }
                gathered.push(card);
            }
        }
        let candidates = gathered.len();
        gathered.truncate(slot.target);
        slot.cards = gathered;

        let mut fallback_hits = 0;
        for query in fallback_queries(slot.category, identity) {
            if slot.is_full() {
                break;
            }
            let query = query.within(identity).legal();
            for card in self.gateway.search(&query, slot.vacancy()).await? {
                if card.name == commander.name || slot.contains_name(&card.name) {
                    continue;
                }
                if slot.try_push(card) {
                    fallback_hits += 1;
                }
            }
        }

        tracing::debug!(
            slot = %slot.category,
            target = slot.target,
            candidates,
            fallback_hits,
            filled = slot.cards.len(),
            "slot filled"
        );
        Ok(slot)
    }
}

/// Category queries in rank order, plus color and commander-theme variants.
pub fn primary_queries(
    category: SlotCategory,
    identity: ColorIdentity,
    commander: &Card,
) -> Vec<CardQuery> {
    let has = |color| identity.contains(color);
    let mut queries = Vec::new();

    match category {
        SlotCategory::Lands => {
            queries.push(CardQuery::name("Command Tower"));
            queries.extend(identity.iter().map(|c| CardQuery::name(c.basic_land())));
            if identity.len() >= 2 {
                queries.push(CardQuery::type_is("land").and_oracle("enters the battlefield tapped"));
                queries.push(CardQuery::type_is("land").and_oracle("any color"));
            }
            queries.push(CardQuery::type_is("land"));
        }
        SlotCategory::Ramp => {
            queries.push(CardQuery::name("Sol Ring"));
            queries.push(CardQuery::name("Arcane Signet"));
            if has(Color::Green) {
                queries.push(CardQuery::name("Cultivate"));
                queries.push(CardQuery::name("Kodama's Reach"));
                queries.push(CardQuery::oracle("search your library for a basic land"));
            }
            queries.push(CardQuery::type_is("artifact").and_oracle("add {"));
        }
        SlotCategory::CardDraw => {
            if has(Color::Blue) {
                queries.push(CardQuery::name("Rhystic Study"));
                queries.push(CardQuery::name("Mystic Remora"));
            }
            if has(Color::Black) {
                queries.push(CardQuery::name("Phyrexian Arena"));
            }
            queries.push(CardQuery::oracle("draw cards"));
            queries.push(CardQuery::oracle("draw a card"));
        }
        SlotCategory::Removal => {
            if has(Color::White) {
                queries.push(CardQuery::name("Swords to Plowshares"));
                queries.push(CardQuery::name("Path to Exile"));
            }
            if has(Color::Black) {
                queries.push(CardQuery::name("Murder"));
            }
            if has(Color::Red) {
                queries.push(CardQuery::name("Chaos Warp"));
            }
            queries.push(CardQuery::oracle("destroy target"));
            queries.push(CardQuery::oracle("exile target"));
        }
        SlotCategory::BoardWipes => {
            if has(Color::White) {
                queries.push(CardQuery::name("Wrath of God"));
            }
            if has(Color::Black) {
                queries.push(CardQuery::name("Damnation"));
            }
            if has(Color::Red) {
                queries.push(CardQuery::name("Blasphemous Act"));
            }
            queries.push(CardQuery::oracle("destroy all"));
        }
        SlotCategory::Protection => {
            queries.push(CardQuery::name("Lightning Greaves"));
            queries.push(CardQuery::name("Swiftfoot Boots"));
            if has(Color::Blue) {
                queries.push(CardQuery::name("Counterspell"));
            }
            queries.push(CardQuery::oracle("hexproof"));
            queries.push(CardQuery::oracle("indestructible"));
        }
        SlotCategory::Threats => {
            for subtype in creature_subtypes(&commander.type_line) {
                queries.push(CardQuery::type_is("creature").and_type(subtype));
            }
            queries.push(CardQuery::type_is("creature"));
            queries.push(CardQuery::type_is("planeswalker"));
        }
        SlotCategory::WinCons => {
            queries.push(CardQuery::oracle("win the game"));
            queries.push(CardQuery::type_is("creature").mana_value(Comparison::AtLeast, 5));
        }
        SlotCategory::Utility => {
            for theme in detect_themes(&commander.oracle_text) {
                if let Some(hint) = theme.search_hint() {
                    queries.push(CardQuery::oracle(hint));
                }
            }
            queries.push(CardQuery::oracle("enters the battlefield"));
        }
        SlotCategory::Tutors => {
            if has(Color::Black) {
                queries.push(CardQuery::name("Demonic Tutor"));
                queries.push(CardQuery::name("Vampiric Tutor"));
            }
            queries.push(CardQuery::oracle("search your library"));
        }
        SlotCategory::ComboPieces | SlotCategory::ComboEnablers => {
            queries.push(CardQuery::oracle("infinite"));
            queries.push(CardQuery::oracle("untap"));
        }
    }
    queries
}

/// Short last-resort chain, consumed once per slot.
pub fn fallback_queries(category: SlotCategory, identity: ColorIdentity) -> Vec<CardQuery> {
    match category {
        SlotCategory::Lands => {
            let mut queries: Vec<CardQuery> = identity
                .iter()
                .map(|c| CardQuery::name(c.basic_land()))
                .collect();
            queries.push(CardQuery::type_is("land"));
            queries
        }
        SlotCategory::Ramp => vec![CardQuery::name("Sol Ring")],
        SlotCategory::CardDraw => vec![CardQuery::name("Divination"), CardQuery::oracle("draw")],
        SlotCategory::Removal => vec![CardQuery::name("Murder"), CardQuery::oracle("destroy target")],
        SlotCategory::BoardWipes => {
            vec![CardQuery::name("Day of Judgment"), CardQuery::oracle("destroy all")]
        }
        SlotCategory::Protection => {
            vec![CardQuery::name("Lightning Greaves"), CardQuery::oracle("hexproof")]
        }
        SlotCategory::Threats => vec![CardQuery::type_is("creature")],
        SlotCategory::WinCons => {
            vec![CardQuery::type_is("creature").mana_value(Comparison::AtLeast, 5)]
        }
        SlotCategory::Utility => vec![CardQuery::type_is("artifact")],
        SlotCategory::Tutors => {
            vec![CardQuery::name("Diabolic Tutor"), CardQuery::oracle("search your library")]
        }
        SlotCategory::ComboPieces | SlotCategory::ComboEnablers => {
            vec![CardQuery::oracle("untap")]
        }
    }
}
