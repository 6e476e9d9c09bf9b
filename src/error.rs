// File: src/error.rs
use std::path::PathBuf;

/// Failures that stop the engine or the offline builder from being constructed.
/// Per-detection and per-word problems never surface here; they resolve to
/// fallback icons or builder outcomes instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("core vocabulary file not found: {}", path.display())]
    MissingVocabularyFile { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
