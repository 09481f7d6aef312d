//! Theme detection over commander text.
//!
//! A pure function from text to a set of themes, backed by one fixed pattern
//! table. Bump [`THEME_TABLE_VERSION`] whenever the table changes.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const THEME_TABLE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Artifacts,
    Graveyard,
    Tokens,
    Counters,
    Spells,
    Tribal,
    Voltron,
    Control,
    Aggro,
    Combo,
    Ramp,
}

/// Lowercase needles; any hit tags the theme.
const PATTERNS: &[(Theme, &[&str])] = &[
    (Theme::Artifacts, &["artifact", "equipment", "treasure"]),
    (Theme::Graveyard, &["graveyard", "mill", "return target creature card", "flashback"]),
    (Theme::Tokens, &["create", "token", "populate"]),
    (Theme::Counters, &["+1/+1 counter", "proliferate", "counter on"]),
    (Theme::Spells, &["instant or sorcery", "noncreature spell", "copy target", "storm"]),
    (Theme::Tribal, &["creature type", "other elf", "other goblin", "other zombie", "other vampire", "other dragon"]),
    (Theme::Voltron, &["equipped", "enchanted creature", "aura", "commander damage"]),
    (Theme::Control, &["counter target", "tap target", "can't attack", "destroy all"]),
    (Theme::Aggro, &["haste", "attacks", "double strike", "combat damage"]),
    (Theme::Combo, &["untap", "infinite", "whenever you cast", "copy"]),
    (Theme::Ramp, &["add {", "search your library for a basic land", "additional land", "mana of any"]),
];

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Artifacts => "artifacts",
            Theme::Graveyard => "graveyard",
            Theme::Tokens => "tokens",
            Theme::Counters => "counters",
            Theme::Spells => "spells",
            Theme::Tribal => "tribal",
            Theme::Voltron => "voltron",
            Theme::Control => "control",
            Theme::Aggro => "aggro",
            Theme::Combo => "combo",
            Theme::Ramp => "ramp",
        }
    }

    /// Descriptive-text fragment used to find on-theme support cards.
    pub fn search_hint(&self) -> Option<&'static str> {
        match self {
            Theme::Artifacts => Some("artifact"),
            Theme::Graveyard => Some("graveyard"),
            Theme::Tokens => Some("create"),
            Theme::Counters => Some("+1/+1 counter"),
            Theme::Spells => Some("instant or sorcery"),
            Theme::Voltron => Some("equipped creature"),
            Theme::Ramp => Some("add {"),
            Theme::Tribal | Theme::Control | Theme::Aggro | Theme::Combo => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn detect_themes(text: &str) -> BTreeSet<Theme> {
    let text = text.to_lowercase();
    PATTERNS
        .iter()
        .filter(|(_, needles)| needles.iter().any(|n| text.contains(n)))
        .map(|(theme, _)| *theme)
        .collect()
}

/// Creature subtypes after the em dash of a type line, e.g. `"Elf Druid"`.
pub fn creature_subtypes(type_line: &str) -> Vec<&str> {
    match type_line.split_once('—') {
        Some((_, subtypes)) => subtypes.split_whitespace().collect(),
        None => Vec::new(),
    }
}
