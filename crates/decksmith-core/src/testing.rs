//! テスト用のフィクスチャとフェイクコーパス

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    Card, CardId, CardQuery, ColorIdentity, Combo, ComboId, CorpusError, QueryTerm,
};
use crate::impls::InMemoryCardCorpus;
use crate::ports::CardCorpus;

const TYPE_CYCLE: [&str; 6] = [
    "Creature — Human Soldier",
    "Artifact",
    "Instant",
    "Sorcery",
    "Enchantment",
    "Artifact Creature — Golem",
];

/// A colorless, commander-legal card with a predictable shape.
pub fn sample_card(id: u64) -> Card {
    Card::new(id, format!("Card {id}"), TYPE_CYCLE[(id as usize) % TYPE_CYCLE.len()])
        .with_mana_value((id % 6) as u32 + 1)
        .with_price(1.0)
}

/// `n` distinct legal cards (ids `1000..1000+n`).
pub fn synthetic_cards(n: usize) -> Vec<Card> {
    (0..n as u64).map(|i| sample_card(1000 + i)).collect()
}

pub fn commander() -> Card {
    Card::new(1, "Atraxa, Praetors' Voice", "Legendary Creature — Phyrexian Angel Horror")
        .with_text("Flying, vigilance, deathtouch, lifelink. At the beginning of your end step, proliferate.")
        .with_identity("WUBG".parse().unwrap())
        .with_mana_value(4)
        .with_price(20.0)
}

pub fn basic_land(id: u64, name: &str, identity: &str) -> Card {
    Card::new(id, name, "Basic Land").with_identity(identity.parse().unwrap())
}

pub fn combo(id: &str, commander: Option<u64>, cards: &[u64], mana_value: u32) -> Combo {
    Combo {
        id: ComboId::new(id),
        description: format!("Combo {id} produces infinite value"),
        commander_ids: commander.into_iter().map(CardId::new).collect(),
        card_ids: cards.iter().copied().map(CardId::new).collect(),
        feature_ids: vec![],
        mana_value,
        identity: ColorIdentity::COLORLESS,
        popularity: None,
    }
}

/// Wraps an in-memory corpus and counts calls.
#[derive(Default)]
pub struct CountingCardCorpus {
    inner: InMemoryCardCorpus,
    pub searches: AtomicUsize,
    pub lookups: AtomicUsize,
}

impl CountingCardCorpus {
    pub fn new(cards: Vec<Card>) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryCardCorpus::new(cards),
            searches: AtomicUsize::new(0),
            lookups: AtomicUsize::new(0),
        })
    }

    pub fn search_count(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CardCorpus for CountingCardCorpus {
    async fn search(&self, query: &CardQuery, limit: usize) -> Result<Vec<Card>, CorpusError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        self.inner.search(query, limit).await
    }

    async fn lookup_commander(&self, name: &str) -> Result<Option<Card>, CorpusError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup_commander(name).await
    }
}

/// Finds the commander, then fails every search.
pub struct FailingCardCorpus {
    inner: InMemoryCardCorpus,
}

impl FailingCardCorpus {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            inner: InMemoryCardCorpus::new(cards),
        }
    }
}

#[async_trait]
impl CardCorpus for FailingCardCorpus {
    async fn search(&self, _query: &CardQuery, _limit: usize) -> Result<Vec<Card>, CorpusError> {
        Err(CorpusError::Transport("connection refused".to_string()))
    }

    async fn lookup_commander(&self, name: &str) -> Result<Option<Card>, CorpusError> {
        self.inner.lookup_commander(name).await
    }
}

/// Sleeps before answering every call.
pub struct SlowCardCorpus {
    inner: InMemoryCardCorpus,
    delay: Duration,
}

impl SlowCardCorpus {
    pub fn new(cards: Vec<Card>, delay: Duration) -> Self {
        Self {
            inner: InMemoryCardCorpus::new(cards),
            delay,
        }
    }
}

#[async_trait]
impl CardCorpus for SlowCardCorpus {
    async fn search(&self, query: &CardQuery, limit: usize) -> Result<Vec<Card>, CorpusError> {
        tokio::time::sleep(self.delay).await;
        self.inner.search(query, limit).await
    }

    async fn lookup_commander(&self, name: &str) -> Result<Option<Card>, CorpusError> {
        tokio::time::sleep(self.delay).await;
        self.inner.lookup_commander(name).await
    }
}

/// Answers broad searches from `visible` only; `unlisted` cards surface on id lookups.
pub struct UnlistedCardCorpus {
    visible: InMemoryCardCorpus,
    unlisted: InMemoryCardCorpus,
}

impl UnlistedCardCorpus {
    pub fn new(visible: Vec<Card>, unlisted: Vec<Card>) -> Self {
        Self {
            visible: InMemoryCardCorpus::new(visible),
            unlisted: InMemoryCardCorpus::new(unlisted),
        }
    }
}

#[async_trait]
impl CardCorpus for UnlistedCardCorpus {
    async fn search(&self, query: &CardQuery, limit: usize) -> Result<Vec<Card>, CorpusError> {
        let mut hits = self.visible.search(query, limit).await?;
        if hits.len() < limit && query.terms().iter().any(|t| matches!(t, QueryTerm::Id(_))) {
            hits.extend(self.unlisted.search(query, limit - hits.len()).await?);
        }
        Ok(hits)
    }

    async fn lookup_commander(&self, name: &str) -> Result<Option<Card>, CorpusError> {
        self.visible.lookup_commander(name).await
    }
}
