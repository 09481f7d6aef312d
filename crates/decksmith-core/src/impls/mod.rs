//! Impls - ports の実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryCardCorpus**: `Vec<Card>` を検索するカードコーパス
//! - **InMemoryComboCorpus**: コンボ + 定番カードのコーパス
//! - **snapshot**: JSON ファイルから上記を構築
//!
//! 本番用（HTTP 越しのコーパス）は別クレートに置く想定です。

pub mod inmem_cards;
pub mod inmem_combos;
pub mod snapshot;

pub use self::inmem_cards::InMemoryCardCorpus;
pub use self::inmem_combos::{InMemoryComboCorpus, Staple};
pub use self::snapshot::{ComboSnapshot, SnapshotError, load_cards, load_combos};
