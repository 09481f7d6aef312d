//! Card model: one addressable entity of the card corpus.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::color::{Color, ColorIdentity};
use super::ids::CardId;

/// A card as returned by the card corpus.
///
/// Type predicates (`is_creature`, `is_land`, ...) are derived from `type_line`
/// by substring match and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,

    #[serde(default)]
    pub oracle_text: String,

    #[serde(default)]
    pub type_line: String,

    #[serde(default)]
    pub mana_value: u32,

    #[serde(default)]
    pub identity: ColorIdentity,

    #[serde(default)]
    pub keywords: BTreeSet<String>,

    /// Market price in USD.
    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub legal_commander: bool,
}

impl Card {
    pub fn new(id: u64, name: impl Into<String>, type_line: impl Into<String>) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            oracle_text: String::new(),
            type_line: type_line.into(),
            mana_value: 0,
            identity: ColorIdentity::COLORLESS,
            keywords: BTreeSet::new(),
            price: 0.0,
            legal_commander: true,
        }
    }

    pub fn with_text(mut self, oracle_text: impl Into<String>) -> Self {
        self.oracle_text = oracle_text.into();
        self
    }

    pub fn with_mana_value(mut self, mana_value: u32) -> Self {
        self.mana_value = mana_value;
        self
    }

    pub fn with_identity(mut self, identity: ColorIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.insert(keyword.into());
        self
    }

    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.identity.iter()
    }

    pub fn is_creature(&self) -> bool {
        self.type_line.contains("Creature")
    }

    pub fn is_instant_or_sorcery(&self) -> bool {
        self.type_line.contains("Instant") || self.type_line.contains("Sorcery")
    }

    pub fn is_artifact(&self) -> bool {
        self.type_line.contains("Artifact")
    }

    pub fn is_enchantment(&self) -> bool {
        self.type_line.contains("Enchantment")
    }

    pub fn is_planeswalker(&self) -> bool {
        self.type_line.contains("Planeswalker")
    }

    pub fn is_land(&self) -> bool {
        self.type_line.contains("Land")
    }

    pub fn is_legendary(&self) -> bool {
        self.type_line.contains("Legendary")
    }
}
