//! Mana curve and color spread of a finished list.

use crate::domain::{COLORLESS_SYMBOL, Card, Color, DeckAnalysis};

const CURVE_BUCKETS: [&str; 6] = ["1", "2", "3", "4", "5", "6+"];

fn curve_bucket(mana_value: u32) -> &'static str {
    match mana_value {
        0 | 1 => "1",
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        _ => "6+",
    }
}

pub fn analyze(cards: &[Card]) -> DeckAnalysis {
    let mut analysis = DeckAnalysis::default();
    for bucket in CURVE_BUCKETS {
        analysis.mana_curve.insert(bucket.to_string(), 0);
    }
    for color in Color::ALL {
        analysis.color_distribution.insert(color.symbol().to_string(), 0);
    }
    analysis
        .color_distribution
        .insert(COLORLESS_SYMBOL.to_string(), 0);

    for card in cards {
        if !card.is_land() {
            *analysis
                .mana_curve
                .entry(curve_bucket(card.mana_value).to_string())
                .or_default() += 1;
        }
        if card.identity.is_colorless() {
            *analysis
                .color_distribution
                .entry(COLORLESS_SYMBOL.to_string())
                .or_default() += 1;
        }
        for color in card.colors() {
            *analysis
                .color_distribution
                .entry(color.symbol().to_string())
                .or_default() += 1;
        }
    }
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lands_are_left_out_of_the_curve() {
        let cards = vec![
            Card::new(1, "Forest", "Basic Land").with_identity("G".parse().unwrap()),
            Card::new(2, "Ornithopter", "Artifact Creature").with_mana_value(0),
            Card::new(3, "Craterhoof", "Creature").with_mana_value(8).with_identity("G".parse().unwrap()),
            Card::new(4, "Teferi", "Planeswalker").with_mana_value(3).with_identity("WU".parse().unwrap()),
        ];
        let analysis = analyze(&cards);
        assert_eq!(analysis.mana_curve["1"], 1);
        assert_eq!(analysis.mana_curve["3"], 1);
        assert_eq!(analysis.mana_curve["6+"], 1);
        assert_eq!(analysis.mana_curve.values().sum::<usize>(), 3);

        assert_eq!(analysis.color_distribution["G"], 2);
        assert_eq!(analysis.color_distribution["W"], 1);
        assert_eq!(analysis.color_distribution["C"], 1);
        assert_eq!(analysis.color_distribution["R"], 0);
    }
}
