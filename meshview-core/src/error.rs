//! Error types for meshview

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The per-vertex index stream a face component refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexStream {
    Position,
    Texcoord,
    Normal,
}

impl fmt::Display for IndexStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexStream::Position => "position",
            IndexStream::Texcoord => "texcoord",
            IndexStream::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// Main error type for meshview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A recognized directive has the wrong argument count or a non-numeric argument
    #[error("Malformed directive on line {line}: {raw}")]
    MalformedDirective { line: usize, raw: String },

    /// A face references an index outside its stream's pool
    #[error("Dangling {stream} index {index} on line {line}")]
    DanglingIndexReference {
        line: usize,
        index: i64,
        stream: IndexStream,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// Line number the error points at, if it came from the parsers
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::MalformedDirective { line, .. } | Error::DanglingIndexReference { line, .. } => {
                Some(*line)
            }
            _ => None,
        }
    }
}

/// Result type alias for meshview operations
pub type Result<T> = std::result::Result<T, Error>;
