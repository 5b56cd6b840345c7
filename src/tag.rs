//! Block 4 tags: a name (`16R`, `98A`, ...) and its raw value.
//!
//! Sequence boundaries use the reserved names [`START_TAG`] and [`END_TAG`]; their value is the
//! qualifier that names the sequence (`GENL`, `LINK`, `CASHMOVE`, ...). Generic fields carry
//! their qualifier at the front of the value: `:SEME//REF1` has qualifier `SEME`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag name that opens a sequence.
pub const START_TAG: &str = "16R";
/// Tag name that closes a sequence.
pub const END_TAG: &str = "16S";

/// A single block 4 tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            value: value.into(),
        }
    }

    /// `16R:<qualifier>`
    pub fn start(qualifier: &str) -> Self {
        Tag::new(START_TAG, qualifier)
    }

    /// `16S:<qualifier>`
    pub fn end(qualifier: &str) -> Self {
        Tag::new(END_TAG, qualifier)
    }

    /// Qualifier of the tag.
    ///
    /// For boundary tags this is the whole value. For generic fields (value starting with `:`)
    /// it is the text up to the first `/`. Other tags have no qualifier.
    pub fn qualifier(&self) -> Option<&str> {
        if self.is_boundary() {
            return Some(self.value.trim());
        }
        let rest = self.value.strip_prefix(':')?;
        let end = rest.find('/').unwrap_or(rest.len());
        let q = &rest[..end];
        if q.is_empty() {
            None
        } else {
            Some(q)
        }
    }

    pub fn is_boundary(&self) -> bool {
        self.name == START_TAG || self.name == END_TAG
    }

    /// True for `16R:<qualifier>`.
    pub fn is_start(&self, qualifier: &str) -> bool {
        self.name == START_TAG && self.value.trim() == qualifier
    }

    /// True for `16S:<qualifier>`.
    pub fn is_end(&self, qualifier: &str) -> bool {
        self.name == END_TAG && self.value.trim() == qualifier
    }

    /// Name without the letter option (`98A` -> `98`).
    pub fn number(&self) -> &str {
        self.name.trim_end_matches(|c: char| c.is_ascii_alphabetic())
    }

    /// Letter option, if any (`98A` -> `Some('A')`).
    pub fn letter_option(&self) -> Option<char> {
        self.name.chars().last().filter(|c| c.is_ascii_alphabetic())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}:{}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_qualifier_is_value() {
        let t = Tag::start("GENL");
        assert_eq!(t.qualifier(), Some("GENL"));
        assert!(t.is_start("GENL"));
        assert!(!t.is_end("GENL"));
        assert!(Tag::end("GENL").is_end("GENL"));
    }

    #[test]
    fn generic_field_qualifier() {
        assert_eq!(Tag::new("20C", ":SEME//REF1").qualifier(), Some("SEME"));
        assert_eq!(Tag::new("22F", ":CAEV/XYZ/DVCA").qualifier(), Some("CAEV"));
        assert_eq!(Tag::new("35B", "ISIN US0378331005").qualifier(), None);
        assert_eq!(Tag::new("20C", "://X").qualifier(), None);
    }

    #[test]
    fn number_and_option() {
        let t = Tag::new("98A", ":PREP//20240101");
        assert_eq!(t.number(), "98");
        assert_eq!(t.letter_option(), Some('A'));
        let t = Tag::new("20", "REF");
        assert_eq!(t.letter_option(), None);
    }

    #[test]
    fn display_fin_line() {
        assert_eq!(Tag::new("16R", "GENL").to_string(), ":16R:GENL");
    }
}
