//! Header blocks: basic header (block 1), application header (block 2), and the
//! `{tag:value}` sub-fields used by the user header (block 3) and trailer (block 5).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Service id of a regular user-to-user FIN message.
pub const SERVICE_ID_FIN: &str = "01";

/// Block 1: `F01BANKBEBBAXXX0000000000`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicHeader {
    pub application_id: String,
    pub service_id: String,
    /// BIC8 + terminal code + branch (12 characters).
    pub logical_terminal: String,
    pub session_number: String,
    pub sequence_number: String,
}

impl BasicHeader {
    /// Header for an outgoing FIN message from `logical_terminal`.
    pub fn new(logical_terminal: &str) -> Self {
        BasicHeader {
            application_id: "F".to_string(),
            service_id: SERVICE_ID_FIN.to_string(),
            logical_terminal: normalize_terminal(logical_terminal),
            session_number: "0000".to_string(),
            sequence_number: "000000".to_string(),
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() < 15 || !s.is_ascii() {
            return Err(Error::InvalidBlock {
                block: "1".to_string(),
                reason: format!("expected at least 15 ASCII characters, got {:?}", s),
            });
        }
        let session_end = s.len().min(19);
        Ok(BasicHeader {
            application_id: s[0..1].to_string(),
            service_id: s[1..3].to_string(),
            logical_terminal: s[3..15].to_string(),
            session_number: s[15..session_end].to_string(),
            sequence_number: s[session_end..].to_string(),
        })
    }

    pub fn is_fin(&self) -> bool {
        self.service_id == SERVICE_ID_FIN
    }
}

impl fmt::Display for BasicHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.application_id,
            self.service_id,
            self.logical_terminal,
            self.session_number,
            self.sequence_number
        )
    }
}

/// Block 2, either direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "direction", rename_all = "lowercase")]
pub enum ApplicationHeader {
    /// `I566BANKDEFFXXXXN`
    Input {
        message_type: String,
        receiver: String,
        priority: Option<String>,
        delivery_monitoring: Option<String>,
        obsolescence: Option<String>,
    },
    /// `O5661200240101BANKBEBBAXXX22221234562401011201N`
    Output {
        message_type: String,
        input_time: String,
        /// Message input reference: date(6) + logical terminal(12) + session(4) + sequence(6).
        mir: String,
        output_date: String,
        output_time: String,
        priority: Option<String>,
    },
}

impl ApplicationHeader {
    /// Input header for `message_type` addressed to `receiver`, normal priority.
    pub fn input(message_type: &str, receiver: &str) -> Self {
        ApplicationHeader::Input {
            message_type: message_type.to_string(),
            receiver: normalize_terminal(receiver),
            priority: Some("N".to_string()),
            delivery_monitoring: None,
            obsolescence: None,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = |reason: String| Error::InvalidBlock {
            block: "2".to_string(),
            reason,
        };
        if !s.is_ascii() {
            return Err(invalid("non-ASCII content".to_string()));
        }
        let opt = |a: usize, b: usize| -> Option<String> {
            if s.len() > a {
                Some(s[a..s.len().min(b)].to_string())
            } else {
                None
            }
        };
        match s.chars().next() {
            Some('I') => {
                if s.len() < 16 {
                    return Err(invalid(format!("input header too short: {:?}", s)));
                }
                Ok(ApplicationHeader::Input {
                    message_type: s[1..4].to_string(),
                    receiver: s[4..16].to_string(),
                    priority: opt(16, 17),
                    delivery_monitoring: opt(17, 18),
                    obsolescence: opt(18, 21),
                })
            }
            Some('O') => {
                if s.len() < 46 {
                    return Err(invalid(format!("output header too short: {:?}", s)));
                }
                Ok(ApplicationHeader::Output {
                    message_type: s[1..4].to_string(),
                    input_time: s[4..8].to_string(),
                    mir: s[8..36].to_string(),
                    output_date: s[36..42].to_string(),
                    output_time: s[42..46].to_string(),
                    priority: opt(46, 47),
                })
            }
            _ => Err(invalid(format!("expected I or O, got {:?}", s))),
        }
    }

    pub fn message_type(&self) -> &str {
        match self {
            ApplicationHeader::Input { message_type, .. } => message_type,
            ApplicationHeader::Output { message_type, .. } => message_type,
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, ApplicationHeader::Input { .. })
    }
}

impl fmt::Display for ApplicationHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationHeader::Input {
                message_type,
                receiver,
                priority,
                delivery_monitoring,
                obsolescence,
            } => write!(
                f,
                "I{}{}{}{}{}",
                message_type,
                receiver,
                priority.as_deref().unwrap_or(""),
                delivery_monitoring.as_deref().unwrap_or(""),
                obsolescence.as_deref().unwrap_or("")
            ),
            ApplicationHeader::Output {
                message_type,
                input_time,
                mir,
                output_date,
                output_time,
                priority,
            } => write!(
                f,
                "O{}{}{}{}{}{}",
                message_type,
                input_time,
                mir,
                output_date,
                output_time,
                priority.as_deref().unwrap_or("")
            ),
        }
    }
}

/// One `{name:value}` entry of block 3, block 5, or a sub-field style block 4.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubField {
    pub name: String,
    pub value: String,
}

impl SubField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        SubField {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Pads a BIC8 or BIC11 to the 12-character logical terminal form (`BANKDEFF` -> `BANKDEFFXXXX`).
fn normalize_terminal(bic: &str) -> String {
    let bic = bic.trim();
    match (bic.len(), bic.get(..8), bic.get(8..)) {
        (8, _, _) => format!("{}AXXX", bic),
        (11, Some(bank), Some(branch)) => format!("{}A{}", bank, branch),
        _ => bic.to_string(),
    }
}
