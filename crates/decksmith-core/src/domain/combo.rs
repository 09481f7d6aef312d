//! Combination (combo / variant) model.

use serde::{Deserialize, Serialize};

use super::color::ColorIdentity;
use super::ids::{CardId, ComboId, FeatureId};

/// A named set of cards that together produce one or more features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    pub id: ComboId,

    #[serde(default)]
    pub description: String,

    /// Cards that must be the commander, in corpus order.
    #[serde(default)]
    pub commander_ids: Vec<CardId>,

    /// Every card the combo needs (commander pieces included).
    pub card_ids: Vec<CardId>,

    #[serde(default)]
    pub feature_ids: Vec<FeatureId>,

    /// Total mana value needed to assemble the combo.
    #[serde(default)]
    pub mana_value: u32,

    #[serde(default)]
    pub identity: ColorIdentity,

    #[serde(default)]
    pub popularity: Option<u64>,
}

impl Combo {
    /// Heuristic power level of the combo, see [`estimate_power`].
    pub fn power_level(&self) -> u8 {
        estimate_power(self.mana_value, self.card_ids.len())
    }

    pub fn requires_commander(&self, id: CardId) -> bool {
        self.commander_ids.contains(&id)
    }

    pub fn requires(&self, id: CardId) -> bool {
        self.card_ids.contains(&id)
    }
}

/// Step function over (mana value, card count).
///
/// - ≤3 mana and ≤2 cards: 8
/// - ≤5 mana and ≤3 cards: 6
/// - ≤7 mana: 4
/// - otherwise: 2
pub fn estimate_power(mana_value: u32, card_count: usize) -> u8 {
    if mana_value <= 3 && card_count <= 2 {
        8
    } else if mana_value <= 5 && card_count <= 3 {
        6
    } else if mana_value <= 7 {
        4
    } else {
        2
    }
}
