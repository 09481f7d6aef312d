//! ScoreEstimator - パワーレベルとコスト帯の推定

use crate::domain::{Card, CostBracket};

pub const BASE_POWER: u8 = 5;

pub const FAST_MANA: &[&str] = &[
    "Sol Ring",
    "Mana Crypt",
    "Mana Vault",
    "Chrome Mox",
    "Mox Diamond",
    "Jeweled Lotus",
    "Lotus Petal",
    "Mox Opal",
    "Grim Monolith",
    "Ancient Tomb",
];

pub const TUTOR_KEYWORD: &str = "search your library";

/// Upper bounds (exclusive, USD) of every bracket but the last.
const COST_THRESHOLDS: [(f64, CostBracket); 4] = [
    (100.0, CostBracket::Budget),
    (300.0, CostBracket::Casual),
    (600.0, CostBracket::Focused),
    (1000.0, CostBracket::Optimized),
];

/// Power level in 1..=10.
pub fn power_level(cards: &[Card], expensive_threshold: f64, combo_delta: u8) -> u8 {
    let expensive = cards.iter().filter(|c| c.price > expensive_threshold).count();
    let fast_mana = cards
        .iter()
        .filter(|c| FAST_MANA.contains(&c.name.as_str()))
        .count();
    let tutors = cards
        .iter()
        .filter(|c| c.oracle_text.to_lowercase().contains(TUTOR_KEYWORD))
        .count();

    let score = usize::from(BASE_POWER)
        + (expensive / 5).min(2)
        + fast_mana.min(2)
        + (tutors / 3).min(1)
        + usize::from(combo_delta);
    score.clamp(1, 10) as u8
}

pub fn cost_bracket(cards: &[Card]) -> CostBracket {
    let total: f64 = cards.iter().map(|c| c.price.max(0.0)).sum();
    COST_THRESHOLDS
        .iter()
        .find(|(limit, _)| total < *limit)
        .map(|(_, bracket)| *bracket)
        .unwrap_or(CostBracket::HighPower)
}
