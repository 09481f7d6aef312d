//! Recommendation output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::combo::Combo;
use super::ids::ComboId;
use super::slot::{Slot, SlotCategory};

/// Estimated deck cost, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostBracket {
    Budget,
    Casual,
    Focused,
    Optimized,
    HighPower,
}

impl CostBracket {
    pub const ALL: [CostBracket; 5] = [
        CostBracket::Budget,
        CostBracket::Casual,
        CostBracket::Focused,
        CostBracket::Optimized,
        CostBracket::HighPower,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CostBracket::Budget => "$50-100 (Budget)",
            CostBracket::Casual => "$150-300 (Casual)",
            CostBracket::Focused => "$300-600 (Focused)",
            CostBracket::Optimized => "$600-1000 (Optimized)",
            CostBracket::HighPower => "$1000+ (High Power)",
        }
    }
}

/// How the final list relates to the configured deck size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Allocation {
    /// Exactly `deck_size` cards.
    Exact,

    /// The corpus ran out of distinct legal cards.
    Shortfall { missing: usize },

    /// A combo enabler slot was added on top of the deck size.
    ComboBonus { extra: usize },

    /// Short of the deck size and carrying bonus enablers at once.
    ShortfallWithBonus { missing: usize, extra: usize },
}

impl Allocation {
    /// Classify a final list of `count` cards, `extra` of which sit outside the budget.
    pub fn classify(count: usize, extra: usize, deck_size: usize) -> Self {
        let missing = deck_size.saturating_sub(count.saturating_sub(extra));
        match (missing, extra) {
            (0, 0) => Allocation::Exact,
            (missing, 0) => Allocation::Shortfall { missing },
            (0, extra) => Allocation::ComboBonus { extra },
            (missing, extra) => Allocation::ShortfallWithBonus { missing, extra },
        }
    }
}

/// Mana curve and color spread of the final list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckAnalysis {
    /// Non-land cards per mana value bucket (`"1"` .. `"5"`, `"6+"`).
    pub mana_curve: BTreeMap<String, usize>,

    /// Cards per color symbol; colorless cards count under `"C"`.
    pub color_distribution: BTreeMap<String, usize>,
}

/// Result of one `recommend` call. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub commander: Card,

    /// Unique cards, commander excluded.
    pub cards: Vec<Card>,
    pub slots: Vec<Slot>,
    pub strategy_summary: String,

    /// At most six notes.
    pub synergy_notes: Vec<String>,

    /// 1..=10
    pub power_level: u8,
    pub estimated_cost: CostBracket,
    pub allocation: Allocation,

    /// Combos the deck was tuned around.
    pub combos: Vec<Combo>,

    /// Combos whose every piece made it into the deck (commander included).
    pub complete_combos: Vec<ComboId>,
    pub analysis: DeckAnalysis,
}

impl RecommendationResult {
    pub fn slot(&self, category: SlotCategory) -> Option<&Slot> {
        self.slots.iter().find(|s| s.category == category)
    }

    pub fn card_names(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.name.as_str()).collect()
    }
}
