//! RJE batches: several FIN messages in one file, separated by `$` lines.
//!
//! A message that fails to parse is rejected (with its index and the reason) and the rest of
//! the batch is still decoded.

use crate::config::ParserConfig;
use crate::message::SwiftMessage;
use crate::parser::parse_with;
use tracing::warn;

/// Separator between messages in an RJE file.
pub const RJE_SEPARATOR: char = '$';

#[derive(Debug)]
pub struct RjeBatch {
    /// Messages that parsed, with their position in the batch.
    pub messages: Vec<DecodedMessage>,
    /// Messages that failed to parse.
    pub rejected: Vec<RejectedMessage>,
}

#[derive(Debug)]
pub struct DecodedMessage {
    pub index: usize,
    pub message: SwiftMessage,
}

#[derive(Debug)]
pub struct RejectedMessage {
    pub index: usize,
    pub reason: String,
}

/// Decode every message of an RJE batch. Blank chunks (e.g. a trailing `$`) are skipped.
pub fn decode_batch(source: &str, config: &ParserConfig) -> RjeBatch {
    let mut messages = Vec::new();
    let mut rejected = Vec::new();
    let chunks = source
        .split(RJE_SEPARATOR)
        .map(str::trim)
        .filter(|c| !c.is_empty());
    for (index, chunk) in chunks.enumerate() {
        match parse_with(chunk, config) {
            Ok(message) => messages.push(DecodedMessage { index, message }),
            Err(e) => {
                warn!(index, error = %e, "rejecting message in RJE batch");
                rejected.push(RejectedMessage {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }
    RjeBatch { messages, rejected }
}

/// Write messages as an RJE batch (CRLF `$` CRLF between messages).
pub fn encode_batch(messages: &[SwiftMessage]) -> String {
    messages
        .iter()
        .map(SwiftMessage::to_fin)
        .collect::<Vec<_>>()
        .join("\r\n$\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "{1:F01BANKBEBBAXXX2222123456}{2:I566BANKDEFFXXXXN}{4:\r\n:20C::SEME//A\r\n-}";
    const B: &str = "{1:F01BANKBEBBAXXX2222123457}{2:I575BANKDEFFXXXXN}{4:\r\n:20C::SEME//B\r\n-}";

    #[test]
    fn decode_two_messages() {
        let src = format!("{}\r\n$\r\n{}\r\n", A, B);
        let batch = decode_batch(&src, &ParserConfig::default());
        assert!(batch.rejected.is_empty());
        assert_eq!(batch.messages.len(), 2);
        assert_eq!(batch.messages[1].message.message_type(), Some("575"));
    }

    #[test]
    fn bad_message_is_rejected_others_kept() {
        let src = format!("{}$garbage${}$", A, B);
        let batch = decode_batch(&src, &ParserConfig::default());
        assert_eq!(batch.messages.len(), 2);
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].index, 1);
        assert_eq!(batch.messages[1].index, 2);
    }

    #[test]
    fn encode_then_decode() {
        let batch = decode_batch(&format!("{}${}", A, B), &ParserConfig::default());
        let msgs: Vec<_> = batch.messages.into_iter().map(|d| d.message).collect();
        let again = decode_batch(&encode_batch(&msgs), &ParserConfig::default());
        assert_eq!(again.messages.len(), 2);
        assert_eq!(again.messages[0].message, msgs[0]);
    }
}
