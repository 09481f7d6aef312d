//! Deduplicator - 重複除去と枚数の確定
//!
//! # ルール
//! - 名前で重複を除き、最初に出現したものを残す（スロット順が早い方が勝つ）
//! - 多すぎれば末尾から削る
//! - 少なければ「合法カードなら何でも」の広域クエリで補充し、空いているスロットに順に入れる
//! - 新規カードが要求数に届かない補充が 2 回続いたら打ち切り（shortfall）

use std::collections::HashSet;

use super::gateway::CorpusGateway;
use crate::domain::{Card, CardQuery, ColorIdentity, CorpusError, Slot};

/// Consecutive short top-ups before the corpus is treated as exhausted.
const EXHAUSTION_STRIKES: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct DedupOutcome {
    pub slots: Vec<Slot>,

    /// How far short of `deck_size` the list ended up.
    pub missing: usize,
}

pub struct Deduplicator<'a> {
    gateway: &'a CorpusGateway,
    deck_size: usize,
}

impl<'a> Deduplicator<'a> {
    pub fn new(gateway: &'a CorpusGateway, deck_size: usize) -> Self {
        Self { gateway, deck_size }
    }

    pub async fn run(
        &self,
        mut slots: Vec<Slot>,
        identity: ColorIdentity,
        commander: &Card,
    ) -> Result<DedupOutcome, CorpusError> {
        let mut seen: HashSet<String> = HashSet::from([commander.name.clone()]);
        let mut count = 0;
        for slot in &mut slots {
            slot.cards.retain(|card| seen.insert(card.name.clone()));
            count += slot.cards.len();
        }

        if count > self.deck_size {
            tracing::warn!(count, deck_size = self.deck_size, "too many cards after dedup, clamping");
            clamp(&mut slots, count - self.deck_size);
            count = self.deck_size;
        }

        let mut strikes = 0;
        while count < self.deck_size && strikes < EXHAUSTION_STRIKES {
            let missing = self.deck_size - count;
            let query = CardQuery::any().within(identity).legal();
            let hits = self.gateway.search(&query, missing + seen.len()).await?;

            let mut novel = 0;
            for card in hits {
                if count >= self.deck_size {
                    break;
                }
                if !seen.insert(card.name.clone()) {
                    continue;
                }
                let Some(slot) = slots.iter_mut().find(|s| !s.is_full()) else {
                    break;
                };
                slot.cards.push(card);
                count += 1;
                novel += 1;
            }

            if novel < missing {
                strikes += 1;
            } else {
                strikes = 0;
            }
            if slots.iter().all(Slot::is_full) {
                break;
            }
        }

        let missing = self.deck_size.saturating_sub(count);
        if missing > 0 {
            tracing::warn!(
                missing,
                deck_size = self.deck_size,
                "corpus exhausted, accepting a short list"
            );
        }
        Ok(DedupOutcome { slots, missing })
    }
}

/// Drop `excess` cards from the end of the flattened order.
fn clamp(slots: &mut [Slot], mut excess: usize) {
    for slot in slots.iter_mut().rev() {
        if excess == 0 {
            break;
        }
        let take = excess.min(slot.cards.len());
        slot.cards.truncate(slot.cards.len() - take);
        excess -= take;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::domain::SlotCategory;
    use crate::impls::{InMemoryCardCorpus, InMemoryComboCorpus};
    use crate::testing::{commander, sample_card, synthetic_cards};

    fn gateway(cards: Vec<Card>) -> CorpusGateway {
        CorpusGateway::new(
            Arc::new(InMemoryCardCorpus::new(cards)),
            Arc::new(InMemoryComboCorpus::default()),
            Duration::from_secs(1),
        )
    }

    fn assigned(out: &DedupOutcome) -> usize {
        out.slots.iter().map(|s| s.cards.len()).sum()
    }

    fn slot(category: SlotCategory, target: usize, ids: &[u64]) -> Slot {
        let mut slot = Slot::new(category, target, 5);
        slot.cards = ids.iter().map(|&id| sample_card(id)).collect();
        slot
    }

    #[tokio::test]
    async fn earlier_slots_win_duplicates() {
        let gw = gateway(vec![]);
        let dedup = Deduplicator::new(&gw, 4);
        let slots = vec![
            slot(SlotCategory::Ramp, 2, &[1, 2]),
            slot(SlotCategory::Utility, 2, &[2, 3]),
        ];

        let out = dedup
            .run(slots, ColorIdentity::COLORLESS, &commander())
            .await
            .unwrap();
        assert_eq!(out.slots[0].cards.len(), 2);
        assert_eq!(out.slots[1].cards.len(), 1);
        assert_eq!(out.slots[1].cards[0].name, "Card 3");
        assert_eq!(assigned(&out), 3);
        assert_eq!(out.missing, 1);
    }

    #[tokio::test]
    async fn top_up_fills_vacancies_in_slot_order() {
        let gw = gateway(synthetic_cards(20));
        let dedup = Deduplicator::new(&gw, 6);
        let slots = vec![
            slot(SlotCategory::Lands, 3, &[1000]),
            slot(SlotCategory::Ramp, 3, &[1001, 1002]),
        ];

        let out = dedup
            .run(slots, ColorIdentity::COLORLESS, &commander())
            .await
            .unwrap();
        assert_eq!(out.missing, 0);
        assert_eq!(assigned(&out), 6);
        assert!(out.slots.iter().all(Slot::is_full));

        let names: Vec<&str> = out.slots[0].cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Card 1000", "Card 1003", "Card 1004"]);
    }

    #[tokio::test]
    async fn exhausted_corpus_terminates_short() {
        let gw = gateway(synthetic_cards(5));
        let dedup = Deduplicator::new(&gw, 99);
        let slots = vec![slot(SlotCategory::Threats, 99, &[])];

        let out = dedup
            .run(slots, ColorIdentity::COLORLESS, &commander())
            .await
            .unwrap();
        assert_eq!(assigned(&out), 5);
        assert_eq!(out.missing, 94);
    }

    #[tokio::test]
    async fn commander_is_never_added() {
        let mut corpus = vec![commander()];
        corpus.extend(synthetic_cards(3));
        let gw = gateway(corpus);
        let dedup = Deduplicator::new(&gw, 10);

        let out = dedup
            .run(
                vec![slot(SlotCategory::Threats, 10, &[])],
                "WUBG".parse().unwrap(),
                &commander(),
            )
            .await
            .unwrap();
        assert!(
            out.slots
                .iter()
                .flat_map(|s| s.cards.iter())
                .all(|c| c.name != commander().name)
        );
        assert_eq!(assigned(&out), 3);
    }

    #[test]
    fn clamp_trims_from_the_end() {
        let mut slots = vec![
            slot(SlotCategory::Ramp, 3, &[1, 2, 3]),
            slot(SlotCategory::Utility, 2, &[4, 5]),
        ];
        clamp(&mut slots, 3);
        assert_eq!(slots[0].cards.len(), 2);
        assert!(slots[1].cards.is_empty());
    }
}
