//! StructureBuilder - 戦略プリセットからスロット構成を作る
//!
//! # 不変条件
//! - 返すスロットの target 合計は常に `deck_size` と一致する
//! - プリセットの合計がずれていても、柔軟スロット（土地以外で最大のもの）で吸収する
//!
//! 色に依存するのは土地の枚数だけです。

use crate::domain::{ColorIdentity, Slot, SlotCategory, StrategyFocus};

use SlotCategory::*;

type Preset = &'static [(SlotCategory, usize, u8)];

const BALANCED: Preset = &[
    (Lands, 37, 10),
    (Ramp, 10, 8),
    (CardDraw, 10, 8),
    (Removal, 8, 7),
    (Threats, 15, 7),
    (Protection, 5, 6),
    (Utility, 8, 6),
    (BoardWipes, 3, 5),
    (Tutors, 3, 6),
];

const AGGRO: Preset = &[
    (Lands, 35, 10),
    (Ramp, 8, 8),
    (CardDraw, 8, 7),
    (Removal, 6, 6),
    (Protection, 6, 8),
    (Threats, 22, 9),
    (Utility, 10, 5),
    (BoardWipes, 2, 4),
    (Tutors, 2, 6),
];

// 109 as listed; `rebalance` takes the excess out of ramp.
const CONTROL: Preset = &[
    (Lands, 38, 10),
    (Ramp, 12, 8),
    (CardDraw, 12, 9),
    (Removal, 10, 9),
    (BoardWipes, 6, 8),
    (Protection, 8, 7),
    (Threats, 8, 7),
    (Utility, 12, 6),
    (Tutors, 3, 7),
];

const COMBO: Preset = &[
    (Lands, 36, 10),
    (Ramp, 12, 9),
    (CardDraw, 10, 9),
    (Tutors, 8, 10),
    (ComboPieces, 12, 10),
    (Protection, 10, 8),
    (Removal, 6, 6),
    (Utility, 5, 5),
];

fn preset(focus: StrategyFocus) -> Preset {
    match focus {
        StrategyFocus::Balanced => BALANCED,
        StrategyFocus::Aggro => AGGRO,
        StrategyFocus::Control => CONTROL,
        StrategyFocus::Combo => COMBO,
    }
}

/// Build the slot list for `focus`, sized to `deck_size`.
pub fn build_structure(
    identity: ColorIdentity,
    focus: StrategyFocus,
    deck_size: usize,
) -> Vec<Slot> {
    let mut slots: Vec<Slot> = preset(focus)
        .iter()
        .map(|&(category, target, priority)| Slot::new(category, target, priority))
        .collect();

    if let Some(lands) = slots.iter_mut().find(|s| s.category.is_land()) {
        match identity.len() {
            0 | 1 => lands.target = lands.target.saturating_sub(1),
            n if n >= 3 => lands.target += 1,
            _ => {}
        }
    }

    rebalance(&mut slots, deck_size);
    slots
}

/// Index of the largest non-land slot (first wins on ties).
///
/// The supplementary `combo_enablers` slot never counts.
pub fn flexible_index(slots: &[Slot]) -> Option<usize> {
    slots
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.category.is_land() && s.category != ComboEnablers)
        .fold(None, |best: Option<(usize, usize)>, (i, s)| match best {
            Some((_, target)) if target >= s.target => best,
            _ => Some((i, s.target)),
        })
        .map(|(i, _)| i)
}

/// Make the target sum equal `deck_size`.
///
/// A deficit goes entirely to the flexible slot. An excess is taken from the
/// flexible slot first, then from the other non-land slots (largest first),
/// and from lands only as a last resort.
pub fn rebalance(slots: &mut [Slot], deck_size: usize) {
    let total: usize = slots.iter().map(|s| s.target).sum();
    if total == deck_size {
        return;
    }
    tracing::warn!(total, deck_size, "slot preset does not match deck size, rebalancing");

    let Some(flex) = flexible_index(slots) else {
        if let Some(first) = slots.first_mut() {
            first.target = (first.target + deck_size).saturating_sub(total);
        }
        return;
    };

    if total < deck_size {
        slots[flex].target += deck_size - total;
        return;
    }

    let mut excess = total - deck_size;
    let mut order: Vec<usize> = (0..slots.len()).collect();
    order.sort_by_key(|&i| {
        (
            i != flex,
            slots[i].category.is_land(),
            std::cmp::Reverse(slots[i].target),
            i,
        )
    });
    for i in order {
        if excess == 0 {
            break;
        }
        let take = excess.min(slots[i].target);
        slots[i].target -= take;
        excess -= take;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn total(slots: &[Slot]) -> usize {
        slots.iter().map(|s| s.target).sum()
    }

    fn target(slots: &[Slot], category: SlotCategory) -> usize {
        slots
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.target)
            .unwrap_or(0)
    }

    #[rstest]
    #[case(StrategyFocus::Balanced)]
    #[case(StrategyFocus::Aggro)]
    #[case(StrategyFocus::Control)]
    #[case(StrategyFocus::Combo)]
    fn targets_sum_to_deck_size(#[case] focus: StrategyFocus) {
        for identity in ["C", "G", "UB", "WUB", "WUBG", "WUBRG"] {
            let slots = build_structure(identity.parse().unwrap(), focus, 99);
            assert_eq!(total(&slots), 99, "{focus} / {identity}");
        }
    }

    #[rstest]
    #[case(StrategyFocus::Balanced, 60)]
    #[case(StrategyFocus::Combo, 59)]
    #[case(StrategyFocus::Control, 120)]
    fn other_deck_sizes_self_heal(#[case] focus: StrategyFocus, #[case] deck_size: usize) {
        let slots = build_structure("WU".parse().unwrap(), focus, deck_size);
        assert_eq!(total(&slots), deck_size);
    }

    #[rstest]
    #[case("WU", 38, 2)]
    #[case("WUBG", 39, 1)]
    #[case("U", 37, 3)]
    fn control_preset_self_heals_through_ramp(
        #[case] identity: &str,
        #[case] lands: usize,
        #[case] ramp: usize,
    ) {
        let raw: usize = CONTROL.iter().map(|&(_, target, _)| target).sum();
        assert_eq!(raw, 109);

        let slots = build_structure(identity.parse().unwrap(), StrategyFocus::Control, 99);
        assert_eq!(total(&slots), 99);
        assert_eq!(target(&slots, Lands), lands);
        assert_eq!(target(&slots, Ramp), ramp);
        assert_eq!(target(&slots, Utility), 12);
        assert_eq!(target(&slots, CardDraw), 12);
    }

    #[test]
    fn four_color_balanced_is_land_heavy() {
        let slots = build_structure("WUBG".parse().unwrap(), StrategyFocus::Balanced, 99);
        let lands = target(&slots, Lands);
        assert_eq!(lands, 38);
        assert!(slots.iter().all(|s| s.category == Lands || s.target < lands));
        assert_eq!(target(&slots, Threats), 14);
    }

    #[test]
    fn mono_color_drops_a_land() {
        let slots = build_structure("R".parse().unwrap(), StrategyFocus::Aggro, 99);
        assert_eq!(target(&slots, Lands), 34);
        assert_eq!(target(&slots, Threats), 23);
    }

    #[test]
    fn flexible_slot_is_first_largest_non_land() {
        // ramp and combo_pieces both target 12
        let slots = build_structure("WU".parse().unwrap(), StrategyFocus::Combo, 99);
        let flex = flexible_index(&slots).unwrap();
        assert_eq!(slots[flex].category, Ramp);

        let slots = build_structure("WU".parse().unwrap(), StrategyFocus::Aggro, 99);
        let flex = flexible_index(&slots).unwrap();
        assert_eq!(slots[flex].category, Threats);
    }

    #[test]
    fn excess_never_goes_negative() {
        let mut slots = vec![Slot::new(Lands, 5, 10), Slot::new(Ramp, 2, 8), Slot::new(Utility, 1, 5)];
        rebalance(&mut slots, 4);
        assert_eq!(total(&slots), 4);
        assert_eq!(target(&slots, Lands), 4);
    }
}
