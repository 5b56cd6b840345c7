//! Parse FIN message text into a [`SwiftMessage`] using PEST.
//!
//! Header blocks are split into their fixed-width components, blocks 3 and 5 into
//! `{name:value}` sub-fields, and block 4 into an ordered [`TagList`]. Multi-line tag values
//! keep their internal line breaks, normalized to CRLF so that
//! [`writer::write`](crate::writer::write) reproduces the input.

use crate::block::TagList;
use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::header::{ApplicationHeader, BasicHeader, SubField};
use crate::message::{Block4Format, SwiftMessage, UserBlock};
use crate::tag::Tag;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser as PestParser;
use tracing::{debug, warn};

#[derive(PestParser)]
#[grammar = "fin.pest"]
struct FinParser;

/// Parse one FIN message with default settings.
pub fn parse(source: &str) -> Result<SwiftMessage> {
    parse_with(source, &ParserConfig::default())
}

/// Parse one FIN message.
pub fn parse_with(source: &str, config: &ParserConfig) -> Result<SwiftMessage> {
    if source.len() > config.max_message_len {
        return Err(Error::TooLarge {
            len: source.len(),
            limit: config.max_message_len,
        });
    }
    let pairs = FinParser::parse(Rule::message, source).map_err(|e| Error::Syntax(e.to_string()))?;
    let pair = pairs
        .into_iter()
        .next()
        .ok_or_else(|| Error::Syntax("empty parse".to_string()))?;
    let message = build_message(pair, config)?;
    debug!(
        message_type = message.message_type().unwrap_or("-"),
        tags = message.block4.len(),
        "parsed FIN message"
    );
    Ok(message)
}

fn build_message(pair: Pair<Rule>, config: &ParserConfig) -> Result<SwiftMessage> {
    let mut message = SwiftMessage {
        block4_format: Block4Format::Absent,
        ..Default::default()
    };
    let mut seen_block4 = false;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::block1 => {
                if message.block1.is_some() {
                    return Err(duplicate("1"));
                }
                message.block1 = Some(BasicHeader::parse(header_text(inner))?);
            }
            Rule::block2 => {
                if message.block2.is_some() {
                    return Err(duplicate("2"));
                }
                message.block2 = Some(ApplicationHeader::parse(header_text(inner))?);
            }
            Rule::block3 => {
                if message.block3.is_some() {
                    return Err(duplicate("3"));
                }
                message.block3 = Some(build_sub_fields(inner));
            }
            Rule::block4 => {
                if seen_block4 {
                    return Err(duplicate("4"));
                }
                seen_block4 = true;
                if config.strict_line_breaks {
                    check_line_breaks(inner.as_str(), inner.as_span().start())?;
                }
                let (tags, format) = build_block4(inner);
                message.block4 = tags;
                message.block4_format = format;
            }
            Rule::block5 => {
                if message.block5.is_some() {
                    return Err(duplicate("5"));
                }
                message.block5 = Some(build_sub_fields(inner));
            }
            Rule::user_block => {
                let mut it = inner.into_inner();
                let id = it.next().map(|p| p.as_str().to_string()).unwrap_or_default();
                let content = it.next().map(|p| p.as_str().to_string()).unwrap_or_default();
                if !config.allow_unknown_blocks {
                    return Err(Error::UnknownBlock(id));
                }
                warn!(block = %id, "keeping unknown block verbatim");
                message.user_blocks.push(UserBlock { id, content });
            }
            _ => {}
        }
    }
    Ok(message)
}

fn duplicate(block: &str) -> Error {
    Error::InvalidBlock {
        block: block.to_string(),
        reason: "block appears more than once".to_string(),
    }
}

fn header_text<'i>(pair: Pair<'i, Rule>) -> &'i str {
    pair.into_inner()
        .find(|p| p.as_rule() == Rule::header_text)
        .map(|p| p.as_str())
        .unwrap_or("")
}

fn build_sub_fields(pair: Pair<Rule>) -> Vec<SubField> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::sub_field)
        .map(build_sub_field)
        .collect()
}

fn build_sub_field(pair: Pair<Rule>) -> SubField {
    let mut name = String::new();
    let mut value = String::new();
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::sub_name => name = part.as_str().to_string(),
            Rule::sub_value => value = part.as_str().to_string(),
            _ => {}
        }
    }
    SubField { name, value }
}

fn build_block4(pair: Pair<Rule>) -> (TagList, Block4Format) {
    let mut tags = TagList::new();
    let mut format = Block4Format::SubFields;
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::text_body => {
                format = Block4Format::Text;
                for line in part.into_inner() {
                    if line.as_rule() == Rule::tag_line {
                        tags.append(build_tag(line));
                    }
                }
            }
            Rule::sub_field => {
                let f = build_sub_field(part);
                tags.append(Tag::new(f.name, f.value));
            }
            _ => {}
        }
    }
    (tags, format)
}

fn build_tag(pair: Pair<Rule>) -> Tag {
    let mut name = "";
    let mut value = "";
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::tag_name => name = part.as_str(),
            Rule::tag_value => value = part.as_str(),
            _ => {}
        }
    }
    Tag::new(name, normalize_line_breaks(value))
}

/// Multi-line values always use CRLF internally.
fn normalize_line_breaks(value: &str) -> String {
    if !value.contains('\n') {
        return value.to_string();
    }
    value.replace("\r\n", "\n").replace('\n', "\r\n")
}

fn check_line_breaks(block: &str, offset: usize) -> Result<()> {
    let bytes = block.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'\n' && (i == 0 || bytes[i - 1] != b'\r') {
            return Err(Error::LineBreak(offset + i));
        }
    }
    Ok(())
}
