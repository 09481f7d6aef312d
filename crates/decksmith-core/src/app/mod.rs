//! App - アプリケーション層
//!
//! ports を組み合わせてレコメンドのパイプラインを実装します。
//!
//! # 主要コンポーネント
//! - **EngineBuilder**: エンジンの構築とワイヤリング
//! - **RecommendationEngine**: `recommend` の入口
//! - **structure / filler / dedup / combos**: 枚数を確定させるステージ
//! - **themes / narrative / score / analysis**: 最終リストから導出する情報
//! - **CorpusGateway**: タイムアウト付きのコーパス呼び出し

pub mod analysis;
pub mod builder;
pub mod combos;
pub mod dedup;
pub mod engine;
pub mod filler;
pub mod gateway;
pub mod narrative;
pub mod score;
pub mod structure;
pub mod themes;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, EngineBuilder};
pub use self::engine::RecommendationEngine;
pub use self::structure::build_structure;
pub use self::themes::{THEME_TABLE_VERSION, Theme, detect_themes};
