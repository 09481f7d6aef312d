//! Slot model: a named deck category with a target count.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::card::Card;

/// Closed set of deck categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotCategory {
    Lands,
    Ramp,
    CardDraw,
    Removal,
    BoardWipes,
    Protection,
    Threats,
    WinCons,
    Utility,
    Tutors,
    ComboPieces,
    ComboEnablers,
}

impl SlotCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotCategory::Lands => "lands",
            SlotCategory::Ramp => "ramp",
            SlotCategory::CardDraw => "card_draw",
            SlotCategory::Removal => "removal",
            SlotCategory::BoardWipes => "board_wipes",
            SlotCategory::Protection => "protection",
            SlotCategory::Threats => "threats",
            SlotCategory::WinCons => "win_cons",
            SlotCategory::Utility => "utility",
            SlotCategory::Tutors => "tutors",
            SlotCategory::ComboPieces => "combo_pieces",
            SlotCategory::ComboEnablers => "combo_enablers",
        }
    }

    pub fn is_land(&self) -> bool {
        matches!(self, SlotCategory::Lands)
    }

    /// Slots that receive combo pieces.
    pub fn takes_combo_pieces(&self) -> bool {
        matches!(
            self,
            SlotCategory::Threats | SlotCategory::WinCons | SlotCategory::ComboPieces
        )
    }

    /// Slots that receive meta staples.
    pub fn takes_staples(&self) -> bool {
        matches!(
            self,
            SlotCategory::Ramp | SlotCategory::CardDraw | SlotCategory::Removal
        )
    }
}

impl fmt::Display for SlotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category with a target count and the cards assigned to it.
///
/// Invariant: `cards.len() <= target`. Card order is rank order, so the
/// last card is the lowest-priority one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub category: SlotCategory,
    pub target: usize,
    pub cards: Vec<Card>,

    /// 1-10, advisory only.
    pub priority: u8,
}

impl Slot {
    pub fn new(category: SlotCategory, target: usize, priority: u8) -> Self {
        Self {
            category,
            target,
            cards: Vec::with_capacity(target),
            priority: priority.clamp(1, 10),
        }
    }

    pub fn vacancy(&self) -> usize {
        self.target.saturating_sub(self.cards.len())
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.target
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.cards.iter().any(|c| c.name == name)
    }

    /// Append if there is unused capacity. Returns whether the card was taken.
    pub fn try_push(&mut self, card: Card) -> bool {
        if self.is_full() {
            return false;
        }
        self.cards.push(card);
        true
    }

    /// Put `card` at the head of the slot, evicting the lowest-priority card
    /// when the slot is full.
    ///
    /// Returns the card that left the slot: the evicted one, or `card` itself
    /// when the slot has no capacity at all. Repeated injections evict
    /// successive tail cards, never an earlier injection.
    pub fn inject(&mut self, card: Card) -> Option<Card> {
        if self.target == 0 {
            return Some(card);
        }
        let evicted = if self.is_full() { self.cards.pop() } else { None };
        self.cards.insert(0, card);
        evicted
    }

    /// Drop trailing cards so the slot fits its target again.
    pub fn truncate_to_target(&mut self) -> Vec<Card> {
        if self.cards.len() <= self.target {
            return Vec::new();
        }
        self.cards.split_off(self.target)
    }
}
