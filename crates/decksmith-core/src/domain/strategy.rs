//! Request-level knobs: strategy focus and budget tier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Deck archetype that selects the slot preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyFocus {
    #[default]
    Balanced,
    Aggro,
    Control,
    Combo,
}

impl StrategyFocus {
    pub const ALL: [StrategyFocus; 4] = [
        StrategyFocus::Balanced,
        StrategyFocus::Aggro,
        StrategyFocus::Control,
        StrategyFocus::Combo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyFocus::Balanced => "balanced",
            StrategyFocus::Aggro => "aggro",
            StrategyFocus::Control => "control",
            StrategyFocus::Combo => "combo",
        }
    }
}

impl fmt::Display for StrategyFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyFocus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyFocus::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "strategy focus",
                value: s.to_string(),
            })
    }
}

/// Requested budget / power tier, in ascending order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Budget,
    #[default]
    Casual,
    Focused,
    Optimized,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 4] = [
        BudgetTier::Budget,
        BudgetTier::Casual,
        BudgetTier::Focused,
        BudgetTier::Optimized,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "budget",
            BudgetTier::Casual => "casual",
            BudgetTier::Focused => "focused",
            BudgetTier::Optimized => "optimized",
        }
    }

    /// Tiers that get a supplementary `combo_enablers` slot when combos exist.
    pub fn wants_combo_enablers(&self) -> bool {
        matches!(self, BudgetTier::Focused | BudgetTier::Optimized)
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetTier {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BudgetTier::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "budget tier",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Control".parse::<StrategyFocus>().unwrap(), StrategyFocus::Control);
        assert_eq!(" optimized ".parse::<BudgetTier>().unwrap(), BudgetTier::Optimized);
    }

    #[test]
    fn unknown_values_are_rejected() {
        let err = "midrange".parse::<StrategyFocus>().unwrap_err();
        assert_eq!(err.kind, "strategy focus");
        assert!(err.to_string().contains("midrange"));
    }

    #[test]
    fn only_high_tiers_want_enablers() {
        assert!(!BudgetTier::Budget.wants_combo_enablers());
        assert!(!BudgetTier::Casual.wants_combo_enablers());
        assert!(BudgetTier::Focused.wants_combo_enablers());
        assert!(BudgetTier::Optimized.wants_combo_enablers());
    }
}
