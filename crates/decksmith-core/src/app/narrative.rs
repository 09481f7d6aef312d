//! NarrativeSynthesizer - 戦略サマリーとシナジーノート
//!
//! 入力はコマンダー、最終カード集合、使ったコンボだけ。
//! 副作用はなく、同じ入力には同じ文章を返します。

use std::collections::BTreeSet;

use super::themes::{Theme, detect_themes};
use crate::domain::{Card, Combo};

pub const MAX_NOTES: usize = 6;

/// Character budget for the quoted combo description.
pub const COMBO_DESCRIPTION_BUDGET: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyType {
    Combo,
    Aggressive,
    Control,
    Value,
}

impl StrategyType {
    pub fn classify(themes: &BTreeSet<Theme>, has_combos: bool) -> Self {
        if has_combos || themes.contains(&Theme::Combo) {
            StrategyType::Combo
        } else if themes.contains(&Theme::Voltron) || themes.contains(&Theme::Aggro) {
            StrategyType::Aggressive
        } else if themes.contains(&Theme::Control) {
            StrategyType::Control
        } else {
            StrategyType::Value
        }
    }

    fn phrase(&self) -> &'static str {
        match self {
            StrategyType::Combo => "assembles a game-winning combination while staying resilient",
            StrategyType::Aggressive => "applies early pressure and closes games through combat",
            StrategyType::Control => "answers threats efficiently and wins in the late game",
            StrategyType::Value => "grinds incremental card advantage into a dominant board",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Narrative {
    pub summary: String,
    pub notes: Vec<String>,
}

pub fn synthesize(commander: &Card, cards: &[Card], combos: &[Combo]) -> Narrative {
    let themes = detect_themes(&commander.oracle_text);
    let strategy = StrategyType::classify(&themes, !combos.is_empty());

    let mut summary = format!("{} {}.", commander.name, strategy.phrase());
    if !themes.is_empty() {
        let names: Vec<&str> = themes.iter().map(Theme::as_str).collect();
        summary.push_str(&format!(" Key themes: {}.", names.join(", ")));
    }
    if let Some(top) = combos.first() {
        summary.push_str(&format!(
            " Primary combo: {}",
            truncate(&top.description, COMBO_DESCRIPTION_BUDGET)
        ));
    }

    Narrative {
        summary,
        notes: synergy_notes(cards, combos),
    }
}

fn truncate(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let head: String = text.chars().take(budget).collect();
    format!("{head}...")
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 / whole as f64 }
}

fn synergy_notes(cards: &[Card], combos: &[Combo]) -> Vec<String> {
    let mut notes = Vec::new();
    let total = cards.len();

    let artifacts = ratio(cards.iter().filter(|c| c.is_artifact()).count(), total);
    if artifacts >= 0.25 {
        notes.push("Heavy artifact presence enables artifact synergies".to_string());
    } else if artifacts >= 0.10 {
        notes.push("Moderate artifact count supports incidental artifact payoffs".to_string());
    }

    let creatures = ratio(cards.iter().filter(|c| c.is_creature()).count(), total);
    if creatures >= 0.35 {
        notes.push("Creature-dense list pressures opponents on the board".to_string());
    } else if creatures >= 0.20 {
        notes.push("Balanced creature count keeps a steady board presence".to_string());
    } else {
        notes.push("Low creature count leans on spells and permanents for value".to_string());
    }

    let spells: Vec<&Card> = cards.iter().filter(|c| !c.is_land()).collect();
    let cheap = ratio(
        spells.iter().filter(|c| (2..=3).contains(&c.mana_value)).count(),
        spells.len(),
    );
    if cheap >= 0.40 {
        notes.push("Efficient curve concentrated at two and three mana".to_string());
    } else if cheap >= 0.25 {
        notes.push("Reasonable early curve with room for bigger plays".to_string());
    } else {
        notes.push("Top-heavy curve relies on ramp to function".to_string());
    }

    let colored: Vec<&Card> = cards.iter().filter(|c| !c.identity.is_colorless()).collect();
    if !colored.is_empty() {
        let avg = colored.iter().map(|c| c.identity.len()).sum::<usize>() as f64 / colored.len() as f64;
        if avg >= 2.0 {
            notes.push("Multicolor cards reward the full color identity".to_string());
        } else if avg >= 1.3 {
            notes.push("Some gold cards tie the colors together".to_string());
        } else {
            notes.push("Mostly mono-colored cards keep the mana forgiving".to_string());
        }
    }

    if !combos.is_empty() {
        let n = combos.len() as f64;
        let power = combos.iter().map(|c| f64::from(c.power_level())).sum::<f64>() / n;
        if power >= 7.0 {
            notes.push("Compact, high-power combos can end the game quickly".to_string());
        } else if power >= 5.0 {
            notes.push("Mid-power combos provide a reliable alternate win".to_string());
        } else {
            notes.push("Combos are slow to assemble and serve as a backup plan".to_string());
        }

        let mana = combos.iter().map(|c| f64::from(c.mana_value)).sum::<f64>() / n;
        if mana <= 3.0 {
            notes.push("Combo pieces are cheap enough to deploy in one turn".to_string());
        } else if mana <= 6.0 {
            notes.push("Combos need a moderate mana investment".to_string());
        } else {
            notes.push("Combos demand a large mana investment".to_string());
        }
    }

    notes.truncate(MAX_NOTES);
    notes
}
