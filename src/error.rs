//! Error types for the sub-architecture pipeline.
//!
//! Only malformed requests and unreadable topology files are errors. A search
//! branch that yields no combinations is ordinary control flow and shows up as
//! an empty result.

use thiserror::Error;

/// Errors surfaced by the public pipeline operations and the topology reader.
#[derive(Debug, Error)]
pub enum SubarchError {
    /// The requested subgraph size is zero or exceeds the vertex count.
    #[error("invalid subgraph size {k}: must be between 1 and {vertices}")]
    InvalidSize { k: usize, vertices: usize },

    /// A topology description could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Reading a topology file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SubarchError>;
