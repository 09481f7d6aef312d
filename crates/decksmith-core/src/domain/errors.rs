//! Errors - エラー型と分類
//!
//! 呼び出し側が区別すべきなのは 2 種類だけです。
//! - コマンダーが見つからない（4xx 相当）
//! - コーパス側の障害（5xx 相当）
//!
//! 結果件数が足りないだけのケース（shortfall）はエラーではありません。
//! `RecommendationResult::allocation` で報告されます。

use thiserror::Error;

/// ErrorKind は呼び出し側向けの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 入力が解決できない（commander not found）
    NotFound,
    /// 上流コーパスの障害（transport / protocol）
    Upstream,
}

/// CorpusError は port 実装が返すエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorpusError {
    #[error("corpus transport error: {0}")]
    Transport(String),

    #[error("corpus protocol error: {0}")]
    Protocol(String),
}

/// EngineError はレコメンド要求全体を中断するエラー
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("commander '{0}' not found")]
    CommanderNotFound(String),

    #[error(transparent)]
    CorpusUnavailable(#[from] CorpusError),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::CommanderNotFound(_) => ErrorKind::NotFound,
            EngineError::CorpusUnavailable(_) => ErrorKind::Upstream,
        }
    }
}
