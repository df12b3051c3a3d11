use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while reading a PGN database. Any of them aborts the
/// whole parse.
#[derive(Debug, Error)]
pub enum PgnError {
    #[error("invalid metadata (line {line}): {text}")]
    MalformedMetadata { line: usize, text: String },

    #[error("unable to parse PGN string (line {line}): \"{text}\"")]
    MalformedMoveText { line: usize, text: String },

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PgnError {
    /// Line number (1-based) of the offending line, if the error comes from
    /// the input text.
    pub fn line(&self) -> Option<usize> {
        match self {
            PgnError::MalformedMetadata { line, .. }
            | PgnError::MalformedMoveText { line, .. } => Some(*line),
            PgnError::Io { .. } => None,
        }
    }
}
