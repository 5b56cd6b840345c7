//! Error type shared by the FIN reader, the sequence tree builder and the MT wrappers.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// FIN syntax error reported by the grammar (line/column in the message).
    #[error("Parse error: {0}")]
    Syntax(String),

    /// A block was found but its content is not valid for that block.
    #[error("Invalid block {block}: {reason}")]
    InvalidBlock { block: String, reason: String },

    /// Input exceeds `ParserConfig::max_message_len`.
    #[error("Message too large: {len} bytes (limit {limit})")]
    TooLarge { len: usize, limit: usize },

    /// Block 4 uses bare LF while `strict_line_breaks` is set.
    #[error("Bare LF line break in block 4 at byte {0}")]
    LineBreak(usize),

    /// A user block was rejected because `allow_unknown_blocks` is off.
    #[error("Unknown block: {0}")]
    UnknownBlock(String),

    /// Unbalanced or mismatched 16R/16S boundaries.
    #[error("Structure: {0}")]
    Structure(String),

    #[error("Config: {0}")]
    Config(String),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
