//! Domain identifiers (strongly-typed IDs).
//!
//! # 数値 ID + Phantom Type
//! コーパス側の card / feature ID は数値なので、`Id<T>` は `u64` をラップします。
//! `T` は実行時には使わないマーカー型で、CardId と FeatureId を混同できないように
//! コンパイル時に区別します。
//!
//! Combo の ID はコーパス側で `"12-345"` のような文字列なので、別の newtype にしています。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"card-", "feature-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// JSON では素の数値として表現されます（`{"id": 42}`）。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    value: u64,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub const fn new(value: u64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub fn get(&self) -> u64 {
        self.value
    }
}

impl<T: IdMarker> From<u64> for Id<T> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.value)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Card のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardMarker {}

impl IdMarker for CardMarker {
    fn prefix() -> &'static str {
        "card-"
    }
}

/// Feature のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureMarker {}

impl IdMarker for FeatureMarker {
    fn prefix() -> &'static str {
        "feature-"
    }
}

/// Identifier of a card in the entity corpus.
pub type CardId = Id<CardMarker>;

/// Identifier of a feature (effect) a combination produces.
pub type FeatureId = Id<FeatureMarker>;

/// Identifier of a combination / variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComboId(String);

impl ComboId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComboId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
