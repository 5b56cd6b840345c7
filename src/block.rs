//! The generic tag list (block 4 and any sub-block of it).
//!
//! A [`TagList`] is an ordered list of [`Tag`]s. Sequences are located by their boundary
//! qualifier: [`TagList::sub_block`] returns the first balanced `16R:Q ... 16S:Q` range
//! (boundaries included), counting nested occurrences of the same qualifier so that an inner
//! `16S:Q` does not close the outer one.
//!
//! Qualifier lookups here are purely by name. When a qualifier appears at several nesting
//! levels of a message type, use [`crate::resolve`] to pick occurrences by parent path.

use crate::field::Field;
use crate::tag::{Tag, END_TAG, START_TAG};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagList {
    tags: Vec<Tag>,
}

impl TagList {
    pub fn new() -> Self {
        TagList { tags: Vec::new() }
    }

    pub fn from_tags(tags: Vec<Tag>) -> Self {
        TagList { tags }
    }

    /// `16R:q`, then `inner`, then `16S:q`.
    pub fn wrap_in(qualifier: &str, inner: &[Tag]) -> Self {
        let mut tags = Vec::with_capacity(inner.len() + 2);
        tags.push(Tag::start(qualifier));
        tags.extend_from_slice(inner);
        tags.push(Tag::end(qualifier));
        TagList { tags }
    }

    /// Append one tag. Returns `&mut self` for chaining.
    pub fn append(&mut self, tag: Tag) -> &mut Self {
        self.tags.push(tag);
        self
    }

    /// Append all tags of another list.
    pub fn append_block(&mut self, block: &TagList) -> &mut Self {
        self.tags.extend_from_slice(&block.tags);
        self
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn into_tags(self) -> Vec<Tag> {
        self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    /// First tag with the given name.
    pub fn tag_by_name(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// All tags with the given name, in order.
    pub fn tags_by_name(&self, name: &str) -> Vec<&Tag> {
        self.tags.iter().filter(|t| t.name == name).collect()
    }

    /// First tag with the given name and qualifier (`98A` + `PREP`).
    pub fn tag_by_name_and_qualifier(&self, name: &str, qualifier: &str) -> Option<&Tag> {
        self.tags
            .iter()
            .find(|t| t.name == name && t.qualifier() == Some(qualifier))
    }

    pub fn contains_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// First matching tag wrapped in its typed field.
    pub fn field<F: Field>(&self) -> Option<F> {
        self.tag_by_name(F::NAME).map(|t| F::parse(&t.value))
    }

    /// Every matching tag wrapped in its typed field, in document order.
    pub fn fields<F: Field>(&self) -> Vec<F> {
        self.tags
            .iter()
            .filter(|t| t.name == F::NAME)
            .map(|t| F::parse(&t.value))
            .collect()
    }

    /// Index range (inclusive) of the first balanced `16R:q ... 16S:q` starting at or after `from`.
    fn sub_block_range(&self, qualifier: &str, from: usize) -> Option<(usize, usize)> {
        let start = self.tags[from..]
            .iter()
            .position(|t| t.is_start(qualifier))?
            + from;
        let mut depth = 0usize;
        for (i, t) in self.tags.iter().enumerate().skip(start + 1) {
            if t.is_start(qualifier) {
                depth += 1;
            } else if t.is_end(qualifier) {
                if depth == 0 {
                    return Some((start, i));
                }
                depth -= 1;
            }
        }
        None
    }

    /// First sequence delimited by `qualifier`, boundaries included.
    ///
    /// Returns `None` when the qualifier is absent or its start is never closed.
    pub fn sub_block(&self, qualifier: &str) -> Option<TagList> {
        self.sub_block_range(qualifier, 0)
            .map(|(s, e)| TagList::from_tags(self.tags[s..=e].to_vec()))
    }

    /// All disjoint sequences delimited by `qualifier`, in order.
    pub fn sub_blocks(&self, qualifier: &str) -> Vec<TagList> {
        let mut out = Vec::new();
        let mut from = 0;
        while from < self.tags.len() {
            match self.sub_block_range(qualifier, from) {
                Some((s, e)) => {
                    out.push(TagList::from_tags(self.tags[s..=e].to_vec()));
                    from = e + 1;
                }
                None => break,
            }
        }
        out
    }

    /// Tags in `[start, end]` (inclusive) as a new list.
    pub fn slice(&self, start: usize, end: usize) -> TagList {
        TagList::from_tags(self.tags[start..=end].to_vec())
    }

    /// The list without its outer boundary pair, if it has one.
    pub fn strip_boundaries(&self) -> TagList {
        match (self.tags.first(), self.tags.last()) {
            (Some(first), Some(last))
                if self.tags.len() >= 2
                    && first.name == START_TAG
                    && last.name == END_TAG
                    && first.value.trim() == last.value.trim() =>
            {
                TagList::from_tags(self.tags[1..self.tags.len() - 1].to_vec())
            }
            _ => self.clone(),
        }
    }

    /// Qualifier of the outer boundary pair, if the list is delimited.
    pub fn boundary_qualifier(&self) -> Option<&str> {
        match (self.tags.first(), self.tags.last()) {
            (Some(first), Some(last))
                if first.name == START_TAG
                    && last.name == END_TAG
                    && first.value.trim() == last.value.trim() =>
            {
                Some(first.value.trim())
            }
            _ => None,
        }
    }
}

impl From<Vec<Tag>> for TagList {
    fn from(tags: Vec<Tag>) -> Self {
        TagList::from_tags(tags)
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}
