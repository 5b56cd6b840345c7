//! In-memory SWIFT message: headers, user header, text block (block 4), trailer, user blocks.
//!
//! Built once by the [parser](crate::parser) or programmatically, then read through
//! accessors. The only mutation is appending to block 4.

use crate::block::TagList;
use crate::error::Result;
use crate::header::{ApplicationHeader, BasicHeader, SubField};
use crate::resolve::SequenceTree;
use crate::tag::Tag;
use serde::{Deserialize, Serialize};

/// How block 4 is laid out on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block4Format {
    /// `{4:\r\n:20C:...\r\n-}`
    #[default]
    Text,
    /// `{4:{177:...}{451:0}}`, used by service messages.
    SubFields,
    /// No block 4 in the input.
    Absent,
}

/// A block other than 1-5 (e.g. the system trailer `S`), kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBlock {
    pub id: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwiftMessage {
    pub block1: Option<BasicHeader>,
    pub block2: Option<ApplicationHeader>,
    /// `None` when the input has no `{3:...}` block at all.
    pub block3: Option<Vec<SubField>>,
    pub block4: TagList,
    #[serde(default)]
    pub block4_format: Block4Format,
    pub block5: Option<Vec<SubField>>,
    #[serde(default)]
    pub user_blocks: Vec<UserBlock>,
}

impl SwiftMessage {
    /// Empty outgoing message of type `message_type` from `sender` to `receiver` (BIC8/BIC11/LT).
    pub fn new_outgoing(message_type: &str, sender: &str, receiver: &str) -> Self {
        SwiftMessage {
            block1: Some(BasicHeader::new(sender)),
            block2: Some(ApplicationHeader::input(message_type, receiver)),
            ..Default::default()
        }
    }

    /// 3-digit message type from block 2.
    pub fn message_type(&self) -> Option<&str> {
        self.block2.as_ref().map(|b| b.message_type())
    }

    pub fn is_type(&self, message_type: &str) -> bool {
        self.message_type() == Some(message_type)
    }

    /// System/service message (ACK, NAK, ...): block 1 service id other than `01`, or no block 2.
    pub fn is_service_message(&self) -> bool {
        self.block2.is_none() || self.block1.as_ref().is_some_and(|b1| !b1.is_fin())
    }

    /// Logical terminal of the sender.
    pub fn sender(&self) -> Option<&str> {
        if let Some(ApplicationHeader::Output { mir, .. }) = &self.block2 {
            if let Some(terminal) = mir.get(6..18) {
                return Some(terminal);
            }
        }
        self.block1.as_ref().map(|b| b.logical_terminal.as_str())
    }

    /// Logical terminal of the receiver.
    pub fn receiver(&self) -> Option<&str> {
        match &self.block2 {
            Some(ApplicationHeader::Input { receiver, .. }) => Some(receiver),
            Some(ApplicationHeader::Output { .. }) => {
                self.block1.as_ref().map(|b| b.logical_terminal.as_str())
            }
            None => None,
        }
    }

    fn block3_value(&self, name: &str) -> Option<&str> {
        self.block3
            .as_ref()?
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Message user reference (block 3, tag 108).
    pub fn mur(&self) -> Option<&str> {
        self.block3_value("108")
    }

    /// Unique end-to-end transaction reference (block 3, tag 121).
    pub fn uetr(&self) -> Option<&str> {
        self.block3_value("121")
    }

    /// Append a tag to block 4.
    pub fn append(&mut self, tag: Tag) -> &mut Self {
        self.block4.append(tag);
        if self.block4_format == Block4Format::Absent {
            self.block4_format = Block4Format::Text;
        }
        self
    }

    /// Append a tag list to block 4.
    pub fn append_block(&mut self, block: &TagList) -> &mut Self {
        self.block4.append_block(block);
        if self.block4_format == Block4Format::Absent {
            self.block4_format = Block4Format::Text;
        }
        self
    }

    /// Nesting tree of the 16R/16S sequences in block 4.
    pub fn sequence_tree(&self) -> Result<SequenceTree> {
        SequenceTree::build(&self.block4)
    }

    /// FIN text of this message.
    pub fn to_fin(&self) -> String {
        crate::writer::write(self)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
