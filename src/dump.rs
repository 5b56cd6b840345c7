//! Format messages for display: headers, then block 4 as an indented sequence tree.

use crate::header::SubField;
use crate::message::{Block4Format, SwiftMessage};
use crate::schema;
use crate::tag::{Tag, END_TAG, START_TAG};

fn sub_fields(fields: &[SubField]) -> String {
    fields
        .iter()
        .map(|f| format!("{{{}:{}}}", f.name, f.value))
        .collect::<Vec<_>>()
        .join("")
}

/// One line for a tag: `:TAG:value`, lines of a multi-line value joined with ` | `.
pub fn tag_summary_line(tag: &Tag) -> String {
    let value = tag.value.lines().collect::<Vec<_>>().join(" | ");
    format!(":{}:{}", tag.name, value)
}

/// Multi-line dump. Sequences are shown as `[B1a1A LINK]` when the message type is known.
pub fn dump_message(message: &SwiftMessage) -> String {
    let mut lines: Vec<String> = Vec::new();
    if let Some(b1) = &message.block1 {
        lines.push(format!("Block 1: {}", b1));
    }
    if let Some(b2) = &message.block2 {
        lines.push(format!("Block 2: {}", b2));
    }
    if let Some(b3) = &message.block3 {
        lines.push(format!("Block 3: {}", sub_fields(b3)));
    }

    let schema = message.message_type().and_then(schema::lookup);
    match schema {
        Some(s) => lines.push(format!("Block 4 (MT{} {}):", s.message_type, s.title)),
        None if message.block4_format == Block4Format::Absent => {}
        None => lines.push("Block 4:".to_string()),
    }

    let mut path: Vec<&str> = Vec::new();
    for tag in &message.block4 {
        let pad = "  ".repeat(path.len() + 1);
        if tag.name == START_TAG {
            let qualifier = tag.value.trim();
            path.push(qualifier);
            let name = schema.and_then(|s| s.name_of(&path));
            match name {
                Some(name) => lines.push(format!("{}[{} {}]", pad, name, qualifier)),
                None => lines.push(format!("{}[{}]", pad, qualifier)),
            }
        } else if tag.name == END_TAG && path.last() == Some(&tag.value.trim()) {
            path.pop();
        } else {
            lines.push(format!("{}{}", pad, tag_summary_line(tag)));
        }
    }

    if let Some(b5) = &message.block5 {
        lines.push(format!("Block 5: {}", sub_fields(b5)));
    }
    for block in &message.user_blocks {
        lines.push(format!("Block {}: {}", block.id, block.content));
    }
    lines.join("\n")
}
