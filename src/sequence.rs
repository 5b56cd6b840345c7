//! Typed sequences: a tag range delimited by `16R:Q` / `16S:Q`.
//!
//! Every sequence type knows its boundary qualifier, its qualifier path from the top of
//! block 4, and the message type it belongs to. Extraction from a whole message goes through
//! [`crate::resolve::resolve`], so a qualifier that recurs at several levels (`LINK`, `FIA`,
//! `SETPRTY`, `SUMM`) only matches occurrences under the right parents.

use crate::block::TagList;
use crate::field::Field;
use crate::message::SwiftMessage;
use crate::resolve::{resolve, resolve_in_parent};
use crate::schema;
use crate::tag::Tag;

pub trait Sequence: Sized {
    /// Boundary qualifier (value of the 16R/16S pair).
    const START_END: &'static str;
    /// Qualifiers from the top level down to this sequence, `START_END` last.
    const PATH: &'static [&'static str];
    const MESSAGE_TYPE: &'static str;
    /// Letter name, e.g. `"B1a1A"`.
    const NAME: &'static str;

    /// Wrap an already delimited tag list as is.
    fn from_tag_list(tags: TagList) -> Self;
    /// Tags of the sequence, boundaries included.
    fn tags(&self) -> &TagList;
    fn into_tag_list(self) -> TagList;

    /// Only the two boundary tags.
    fn empty() -> Self {
        Self::from_tags(&[])
    }

    /// `tags` wrapped in this sequence's boundaries.
    fn from_tags(tags: &[Tag]) -> Self {
        Self::from_tag_list(TagList::wrap_in(Self::START_END, tags))
    }

    /// First occurrence in the message body.
    fn from_message(message: &SwiftMessage) -> Option<Self> {
        Self::list_from_message(message).into_iter().next()
    }

    /// Every occurrence in the message body, in document order.
    fn list_from_message(message: &SwiftMessage) -> Vec<Self> {
        list_in_body::<Self>(&message.block4)
    }

    /// First occurrence inside `parent`.
    fn from_block(parent: &TagList) -> Option<Self> {
        Self::list_from_block(parent).into_iter().next()
    }

    /// Every occurrence inside `parent`, which is either a whole block 4 or a sequence on this
    /// sequence's path.
    fn list_from_block(parent: &TagList) -> Vec<Self> {
        let on_path = parent
            .boundary_qualifier()
            .is_some_and(|q| Self::PATH.contains(&q));
        if on_path {
            resolve_in_parent(parent, Self::PATH)
                .into_iter()
                .map(Self::from_tag_list)
                .collect()
        } else {
            list_in_body::<Self>(parent)
        }
    }

    /// First tag of field type `F` in this sequence (nested sequences included).
    fn field<F: Field>(&self) -> Option<F> {
        self.tags().field::<F>()
    }

    fn fields<F: Field>(&self) -> Vec<F> {
        self.tags().fields::<F>()
    }
}

fn list_in_body<S: Sequence>(body: &TagList) -> Vec<S> {
    let blocks = match schema::lookup(S::MESSAGE_TYPE) {
        Some(schema) => resolve(body, schema, S::PATH),
        None => body.sub_blocks(S::START_END),
    };
    blocks.into_iter().map(S::from_tag_list).collect()
}

/// Declares a sequence type: `mt_sequence!(SequenceA1, "566", "A1", "LINK", ["GENL", "LINK"]);`
macro_rules! mt_sequence {
    ($(#[$meta:meta])* $ty:ident, $mt:literal, $name:literal, $qualifier:literal, [$($path:literal),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $ty {
            tags: $crate::block::TagList,
        }

        impl $crate::sequence::Sequence for $ty {
            const START_END: &'static str = $qualifier;
            const PATH: &'static [&'static str] = &[$($path),+];
            const MESSAGE_TYPE: &'static str = $mt;
            const NAME: &'static str = $name;

            fn from_tag_list(tags: $crate::block::TagList) -> Self {
                $ty { tags }
            }

            fn tags(&self) -> &$crate::block::TagList {
                &self.tags
            }

            fn into_tag_list(self) -> $crate::block::TagList {
                self.tags
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                <Self as $crate::sequence::Sequence>::empty()
            }
        }

        impl AsRef<$crate::block::TagList> for $ty {
            fn as_ref(&self) -> &$crate::block::TagList {
                &self.tags
            }
        }
    };
}

pub(crate) use mt_sequence;
