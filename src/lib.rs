//! # swiftmt — SWIFT MT message model, FIN reader and typed MT5xx accessors
//!
//! A generic tag-list model of SWIFT FIN messages with a PEST grammar for the FIN text
//! format, plus typed wrappers for the securities and collateral types MT506, MT527, MT566
//! and MT575.
//!
//! ## Message structure
//!
//! - **Block 1/2**: basic and application headers (sender, receiver, message type)
//! - **Block 3/5**: user header and trailer, kept as `{name:value}` sub-fields
//! - **Block 4**: the text block, an ordered list of `:TAG:value` entries
//! - **User blocks**: anything else (`{S:...}`), kept verbatim
//!
//! ## Sequences
//!
//! Block 4 of an MT5xx message is divided into nested sequences delimited by `16R:QUAL` and
//! `16S:QUAL`. Some qualifiers (`LINK`, `FIA`, `SETPRTY`, `SUMM`) occur at several levels of
//! one message type, so sequences are resolved by their path of parent qualifiers against a
//! static per-type [schema](crate::schema). See [`resolve`].
//!
//! ## Example FIN
//!
//! ```text
//! {1:F01BANKBEBBAXXX0000000000}{2:I566BANKDEFFXXXXN}{4:
//! :16R:GENL
//! :20C::SEME//REF566
//! :23G:NEWM
//! :16S:GENL
//! -}
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use swiftmt::{Mt566, MtMessage};
//!
//! let fin = std::fs::read_to_string("confirmation.fin")?;
//! let mt = Mt566::parse(&fin)?;
//! for cash in mt.sequence_e2_list() {
//!     println!("{:?}", cash);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! See `tests/integration.rs` for full examples.

pub mod block;
pub mod config;
pub mod dump;
pub mod error;
pub mod field;
pub mod header;
pub mod message;
pub mod mt;
pub mod parser;
pub mod resolve;
pub mod rje;
pub mod schema;
pub mod sequence;
pub mod tag;
pub mod validate;
pub mod writer;

pub use block::TagList;
pub use config::{Config, ParserConfig, ValidationConfig};
pub use error::{Error, Result};
pub use field::Field;
pub use message::SwiftMessage;
pub use mt::{Mt506, Mt527, Mt566, Mt575, MtMessage};
pub use parser::parse;
pub use resolve::{resolve, resolve_path, SequenceTree};
pub use sequence::Sequence;
pub use tag::Tag;
pub use validate::{validate, Finding};
