//! Reader and validator settings, loadable from TOML.
//!
//! ```toml
//! [parser]
//! strict_line_breaks = true
//! max_message_len = 100000
//! allow_unknown_blocks = false
//!
//! [validation]
//! check_mandatory = true
//! check_repetition = true
//! unknown_sequence_is_error = false
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserConfig,
    pub validation: ValidationConfig,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

/// FIN reader settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Reject bare LF line breaks inside block 4 (FIN requires CRLF).
    pub strict_line_breaks: bool,
    /// Upper bound on the input size of a single message, in bytes.
    pub max_message_len: usize,
    /// Keep blocks other than 1-5 (e.g. `{S:...}`) instead of failing.
    pub allow_unknown_blocks: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strict_line_breaks: false,
            max_message_len: 100_000,
            allow_unknown_blocks: true,
        }
    }
}

/// Structure validator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Report mandatory sequences that are absent.
    pub check_mandatory: bool,
    /// Report non-repeatable sequences that occur more than once.
    pub check_repetition: bool,
    /// Report sequences not allowed at their position as errors instead of warnings.
    pub unknown_sequence_is_error: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_mandatory: true,
            check_repetition: true,
            unknown_sequence_is_error: false,
        }
    }
}
