//! JSON スナップショットからコーパスを構築する
//!
//! - cards: `Card` の配列
//! - combos: `{ "combos": [...], "staples": [...] }`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::inmem_cards::InMemoryCardCorpus;
use super::inmem_combos::{InMemoryComboCorpus, Staple};
use crate::domain::{Card, Combo};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComboSnapshot {
    #[serde(default)]
    pub combos: Vec<Combo>,

    #[serde(default)]
    pub staples: Vec<Staple>,
}

impl ComboSnapshot {
    pub fn into_corpus(self) -> InMemoryComboCorpus {
        InMemoryComboCorpus::new(self.combos).with_staples(self.staples)
    }
}

pub fn load_cards(path: impl AsRef<Path>) -> Result<InMemoryCardCorpus, SnapshotError> {
    let cards: Vec<Card> = read_json(path.as_ref())?;
    tracing::info!(path = %path.as_ref().display(), cards = cards.len(), "loaded card snapshot");
    Ok(InMemoryCardCorpus::new(cards))
}

pub fn load_combos(path: impl AsRef<Path>) -> Result<InMemoryComboCorpus, SnapshotError> {
    let snapshot: ComboSnapshot = read_json(path.as_ref())?;
    tracing::info!(
        path = %path.as_ref().display(),
        combos = snapshot.combos.len(),
        staples = snapshot.staples.len(),
        "loaded combo snapshot"
    );
    Ok(snapshot.into_corpus())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, SnapshotError> {
    let bytes = std::fs::read(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| SnapshotError::Json {
        path: path.to_path_buf(),
        source,
    })
}
