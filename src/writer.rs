//! Serialize a [`SwiftMessage`] back to FIN text.
//!
//! Block 4 lines always end in CRLF. Blocks that were absent on input stay absent, so a parsed
//! message written out and parsed again compares equal.

use crate::header::SubField;
use crate::message::{Block4Format, SwiftMessage};
use std::fmt::Write;

/// FIN text of `message`.
pub fn write(message: &SwiftMessage) -> String {
    let mut out = String::new();
    if let Some(b1) = &message.block1 {
        let _ = write!(out, "{{1:{}}}", b1);
    }
    if let Some(b2) = &message.block2 {
        let _ = write!(out, "{{2:{}}}", b2);
    }
    if let Some(b3) = &message.block3 {
        out.push_str("{3:");
        write_sub_fields(&mut out, b3);
        out.push('}');
    }
    match message.block4_format {
        Block4Format::Text => write_text_block4(&mut out, message),
        Block4Format::SubFields => {
            out.push_str("{4:");
            for tag in &message.block4 {
                let _ = write!(out, "{{{}:{}}}", tag.name, tag.value);
            }
            out.push('}');
        }
        Block4Format::Absent => {
            if !message.block4.is_empty() {
                write_text_block4(&mut out, message);
            }
        }
    }
    if let Some(b5) = &message.block5 {
        out.push_str("{5:");
        write_sub_fields(&mut out, b5);
        out.push('}');
    }
    for block in &message.user_blocks {
        let _ = write!(out, "{{{}:{}}}", block.id, block.content);
    }
    out
}

fn write_text_block4(out: &mut String, message: &SwiftMessage) {
    out.push_str("{4:\r\n");
    for tag in &message.block4 {
        let _ = write!(out, ":{}:{}\r\n", tag.name, tag.value);
    }
    out.push_str("-}");
}

fn write_sub_fields(out: &mut String, fields: &[SubField]) {
    for f in fields {
        let _ = write!(out, "{{{}:{}}}", f.name, f.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::tag::Tag;

    #[test]
    fn write_outgoing() {
        let mut m = SwiftMessage::new_outgoing("566", "BANKBEBB", "BANKDEFF");
        m.append(Tag::start("GENL")).append(Tag::end("GENL"));
        assert_eq!(
            write(&m),
            "{1:F01BANKBEBBAXXX0000000000}{2:I566BANKDEFFAXXXN}{4:\r\n:16R:GENL\r\n:16S:GENL\r\n-}"
        );
    }

    #[test]
    fn parse_write_roundtrip() {
        let src = "{1:F01BANKBEBBAXXX2222123456}{2:I566BANKDEFFXXXXN}{3:{108:MUR1}}{4:\r\n:16R:GENL\r\n:70E::ADTX//A\r\nB\r\n:16S:GENL\r\n-}{5:{CHK:ABC}}{S:{TNG:}}";
        let m = parse(src).expect("parse");
        assert_eq!(write(&m), src);
        assert_eq!(parse(&write(&m)).expect("reparse"), m);
    }

    #[test]
    fn service_message_keeps_sub_field_form() {
        let src = "{1:F21BANKBEBBAXXX2222123456}{4:{177:2401011200}{451:0}}";
        let m = parse(src).expect("parse");
        assert_eq!(write(&m), src);
    }
}
