//! EngineBuilder - エンジンの構築とワイヤリング
//!
//! # ポイント
//! - コーパスは必ず外から渡す（テストでは決定的なフェイクに差し替える）
//! - 起動時検証（Fail-fast 設計）: コーパス不足や不正な設定は build() で弾く

use std::sync::Arc;

use super::engine::RecommendationEngine;
use super::gateway::CorpusGateway;
use crate::config::{ConfigError, EngineConfig};
use crate::ports::{CardCorpus, ComboCorpus};

/// EngineBuilder は RecommendationEngine を構築
///
/// # 使用例
/// ```ignore
/// let engine = EngineBuilder::new()
///     .with_card_corpus(Arc::new(cards))
///     .with_combo_corpus(Arc::new(combos))
///     .with_config(EngineConfig::default())
///     .build()?;
/// ```
#[derive(Default)]
pub struct EngineBuilder {
    cards: Option<Arc<dyn CardCorpus>>,
    combos: Option<Arc<dyn ComboCorpus>>,
    config: EngineConfig,
}

/// BuildError はエンジン構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no card corpus configured")]
    MissingCardCorpus,

    #[error("no combo corpus configured")]
    MissingComboCorpus,

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_card_corpus(mut self, cards: Arc<dyn CardCorpus>) -> Self {
        self.cards = Some(cards);
        self
    }

    pub fn with_combo_corpus(mut self, combos: Arc<dyn ComboCorpus>) -> Self {
        self.combos = Some(combos);
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// # 検証
    /// - 両方のコーパスが設定されているか
    /// - 設定値が妥当か（`EngineConfig::validate`）
    pub fn build(self) -> Result<RecommendationEngine, BuildError> {
        let cards = self.cards.ok_or(BuildError::MissingCardCorpus)?;
        let combos = self.combos.ok_or(BuildError::MissingComboCorpus)?;
        self.config.validate()?;

        let gateway = CorpusGateway::new(cards, combos, self.config.call_timeout());
        Ok(RecommendationEngine::new(gateway, self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{InMemoryCardCorpus, InMemoryComboCorpus};

    #[test]
    fn test_build_success() {
        let engine = EngineBuilder::new()
            .with_card_corpus(Arc::new(InMemoryCardCorpus::default()))
            .with_combo_corpus(Arc::new(InMemoryComboCorpus::default()))
            .build();
        assert!(engine.is_ok());
    }

    #[test]
    fn test_build_missing_corpus() {
        let engine = EngineBuilder::new()
            .with_combo_corpus(Arc::new(InMemoryComboCorpus::default()))
            .build();
        assert!(matches!(engine, Err(BuildError::MissingCardCorpus)));

        let engine = EngineBuilder::new()
            .with_card_corpus(Arc::new(InMemoryCardCorpus::default()))
            .build();
        assert!(matches!(engine, Err(BuildError::MissingComboCorpus)));
    }

    #[test]
    fn test_build_invalid_config() {
        let engine = EngineBuilder::new()
            .with_card_corpus(Arc::new(InMemoryCardCorpus::default()))
            .with_combo_corpus(Arc::new(InMemoryComboCorpus::default()))
            .with_config(EngineConfig {
                deck_size: 0,
                ..EngineConfig::default()
            })
            .build();
        assert!(matches!(engine, Err(BuildError::InvalidConfig(_))));
    }
}
