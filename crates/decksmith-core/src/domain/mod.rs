//! Domain model (cards, combos, slots, queries, results, errors).

pub mod card;
pub mod color;
pub mod combo;
pub mod errors;
pub mod ids;
pub mod query;
pub mod result;
pub mod slot;
pub mod strategy;

pub use card::Card;
pub use color::{COLORLESS_SYMBOL, Color, ColorIdentity, InvalidColor};
pub use combo::{Combo, estimate_power};
pub use errors::{CorpusError, EngineError, ErrorKind};
pub use ids::{CardId, ComboId, FeatureId};
pub use query::{CardQuery, Comparison, QueryError, QueryOrder, QueryTerm};
pub use result::{Allocation, CostBracket, DeckAnalysis, RecommendationResult};
pub use slot::{Slot, SlotCategory};
pub use strategy::{BudgetTier, StrategyFocus, UnknownVariant};
