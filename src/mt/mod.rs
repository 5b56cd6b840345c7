//! Per-message-type wrappers over [`SwiftMessage`].
//!
//! A wrapper owns its message and adds typed getters: one per field (`field_98a()`) and two
//! per sequence (`sequence_a()` for the first occurrence, `sequence_a_list()` for all). The
//! shared construction and conversion API lives on [`MtMessage`].
//!
//! Construction never fails on content: a message of another type, or a service message,
//! logs a warning and is still wrapped.

use crate::block::TagList;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::message::SwiftMessage;
use crate::parser;
use crate::schema::{self, MtSchema};
use crate::tag::Tag;
use std::io::Read;
use std::path::Path;
use tracing::warn;

pub trait MtMessage: Sized {
    /// Fixed 3-digit message type.
    const MESSAGE_TYPE: &'static str;

    /// Wrap without any check.
    fn wrap(message: SwiftMessage) -> Self;
    fn swift_message(&self) -> &SwiftMessage;
    fn swift_message_mut(&mut self) -> &mut SwiftMessage;
    fn into_swift_message(self) -> SwiftMessage;

    /// Wrap `message`, warning when it is a service message or of another type.
    fn new(message: SwiftMessage) -> Self {
        if message.is_service_message() {
            warn!(
                expected = Self::MESSAGE_TYPE,
                "wrapping a service message"
            );
        } else if !message.is_type(Self::MESSAGE_TYPE) {
            warn!(
                expected = Self::MESSAGE_TYPE,
                found = message.message_type().unwrap_or("none"),
                "message type mismatch"
            );
        }
        Self::wrap(message)
    }

    /// Empty outgoing message from `sender` to `receiver` (BIC8, BIC11 or logical terminal).
    fn with_headers(sender: &str, receiver: &str) -> Self {
        Self::wrap(SwiftMessage::new_outgoing(Self::MESSAGE_TYPE, sender, receiver))
    }

    fn parse(fin: &str) -> Result<Self> {
        Self::parse_with(fin, &ParserConfig::default())
    }

    fn parse_with(fin: &str, config: &ParserConfig) -> Result<Self> {
        Ok(Self::new(parser::parse_with(fin, config)?))
    }

    fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let fin = std::fs::read_to_string(path)?;
        Self::parse(&fin)
    }

    fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut fin = String::new();
        reader.read_to_string(&mut fin)?;
        Self::parse(&fin)
    }

    fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(SwiftMessage::from_json(json)?))
    }

    fn to_json(&self) -> Result<String> {
        self.swift_message().to_json()
    }

    fn to_fin(&self) -> String {
        self.swift_message().to_fin()
    }

    /// Always [`Self::MESSAGE_TYPE`], whatever the wrapped headers say.
    fn message_type(&self) -> &'static str {
        Self::MESSAGE_TYPE
    }

    fn append(&mut self, tag: Tag) -> &mut Self {
        self.swift_message_mut().append(tag);
        self
    }

    fn append_block(&mut self, block: &TagList) -> &mut Self {
        self.swift_message_mut().append_block(block);
        self
    }

    fn block4(&self) -> &TagList {
        &self.swift_message().block4
    }

    fn schema() -> Option<&'static MtSchema> {
        schema::lookup(Self::MESSAGE_TYPE)
    }
}

macro_rules! mt_message {
    ($(#[$meta:meta])* $ty:ident, $mt:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $ty {
            message: $crate::message::SwiftMessage,
        }

        impl $crate::mt::MtMessage for $ty {
            const MESSAGE_TYPE: &'static str = $mt;

            fn wrap(message: $crate::message::SwiftMessage) -> Self {
                $ty { message }
            }

            fn swift_message(&self) -> &$crate::message::SwiftMessage {
                &self.message
            }

            fn swift_message_mut(&mut self) -> &mut $crate::message::SwiftMessage {
                &mut self.message
            }

            fn into_swift_message(self) -> $crate::message::SwiftMessage {
                self.message
            }
        }

        impl From<$crate::message::SwiftMessage> for $ty {
            fn from(message: $crate::message::SwiftMessage) -> Self {
                <Self as $crate::mt::MtMessage>::new(message)
            }
        }

        impl AsRef<$crate::message::SwiftMessage> for $ty {
            fn as_ref(&self) -> &$crate::message::SwiftMessage {
                &self.message
            }
        }
    };
}

/// Field and sequence getters of a wrapper.
///
/// `single` fields give `Option<F>` (first occurrence), `multi` fields give `Vec<F>` in
/// document order, and each sequence gets a first-occurrence and a list getter.
macro_rules! mt_getters {
    (
        $ty:ident {
            single { $($single:ident: $single_ty:ty),* $(,)? }
            multi { $($multi:ident: $multi_ty:ty),* $(,)? }
            sequences { $($seq:ident / $seq_list:ident: $seq_ty:ty),* $(,)? }
        }
    ) => {
        impl $ty {
            $(
                pub fn $single(&self) -> Option<$single_ty> {
                    $crate::mt::MtMessage::block4(self).field::<$single_ty>()
                }
            )*

            $(
                pub fn $multi(&self) -> Vec<$multi_ty> {
                    $crate::mt::MtMessage::block4(self).fields::<$multi_ty>()
                }
            )*

            $(
                pub fn $seq(&self) -> Option<$seq_ty> {
                    <$seq_ty as $crate::sequence::Sequence>::from_message(
                        $crate::mt::MtMessage::swift_message(self),
                    )
                }

                pub fn $seq_list(&self) -> Vec<$seq_ty> {
                    <$seq_ty as $crate::sequence::Sequence>::list_from_message(
                        $crate::mt::MtMessage::swift_message(self),
                    )
                }
            )*
        }
    };
}

pub mod mt506;
pub mod mt527;
pub mod mt566;
pub mod mt575;

pub use mt506::Mt506;
pub use mt527::Mt527;
pub use mt566::Mt566;
pub use mt575::Mt575;
