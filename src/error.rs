use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single read call; no partial result accompanies it
#[derive(Debug, Error)]
pub enum ReadError {
    /// The input is not well-formed JSON (or not UTF-8)
    #[error("invalid GeoJSON text: {0}")]
    Parse(#[source] serde_json::Error),

    /// Well-formed JSON that is not a recognized GeoJSON shape
    #[error("unsupported GeoJSON structure: {0}")]
    Schema(String),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from a caller-supplied byte stream failed
    #[error("failed to read GeoJSON stream: {0}")]
    Stream(#[source] std::io::Error),
}

impl ReadError {
    pub(crate) fn schema(msg: impl Into<String>) -> Self {
        ReadError::Schema(msg.into())
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ReadError::Parse(_))
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, ReadError::Schema(_))
    }

    pub fn is_io(&self) -> bool {
        matches!(self, ReadError::Io { .. } | ReadError::Stream(_))
    }
}

pub type Result<T> = std::result::Result<T, ReadError>;
