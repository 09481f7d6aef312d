//! decksmith-core
//!
//! Deck recommendation and combo-aware allocation engine.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（card, color, combo, slot, query, result, errors）
//! - **ports**: 抽象化レイヤー（CardCorpus, ComboCorpus）
//! - **app**: パイプライン（structure, filler, dedup, combos, narrative, score, engine）
//! - **impls**: 実装（インメモリコーパス、JSON スナップショット）
//! - **config**: EngineConfig（TOML から読み込み可能）

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{BuildError, EngineBuilder, RecommendationEngine};
pub use config::{ConfigError, EnablerPolicy, EngineConfig};
pub use domain::{
    Allocation, BudgetTier, Card, CardQuery, CostBracket, EngineError, ErrorKind,
    RecommendationResult, StrategyFocus,
};
