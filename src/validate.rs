//! Structure checks of block 4 against the sequence hierarchy of its message type.
//!
//! ## Rules
//!
//! - **Unclosed sequence**: every `16R:Q` needs a matching `16S:Q`.
//! - **Unexpected end**: a `16S` with no open sequence, or closing another qualifier.
//! - **Unknown sequence**: the qualifier is not allowed under its parent.
//! - **Missing sequence**: a mandatory child of a present parent is absent.
//! - **Repeated sequence**: a non-repeatable sequence occurs more than once under one parent.
//! - **Tag outside sequence**: a tag sits between top-level sequences.
//! - **No schema**: the message type is not registered; only the boundary rules run.
//!
//! Findings never abort validation. Positions are 1-based tag indices in block 4; `0` means
//! the finding is about the message as a whole.
//!
//! Run the validator via the `mt_lint` binary: `mt_lint message.fin`. Exit code 1 if any
//! error-level findings.

use crate::config::ValidationConfig;
use crate::message::SwiftMessage;
use crate::resolve::{IssueKind, SequenceNode, SequenceTree};
use crate::schema::{self, SequenceDef};
use serde::Serialize;
use std::collections::HashMap;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Identifies which rule produced the finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    UnclosedSequence,
    UnexpectedEnd,
    UnknownSequence,
    MissingSequence,
    RepeatedSequence,
    TagOutsideSequence,
    NoSchema,
}

impl Rule {
    /// Kebab-case identifier, the same as the serialized form.
    pub fn id(self) -> &'static str {
        match self {
            Rule::UnclosedSequence => "unclosed-sequence",
            Rule::UnexpectedEnd => "unexpected-end",
            Rule::UnknownSequence => "unknown-sequence",
            Rule::MissingSequence => "missing-sequence",
            Rule::RepeatedSequence => "repeated-sequence",
            Rule::TagOutsideSequence => "tag-outside-sequence",
            Rule::NoSchema => "no-schema",
        }
    }
}

/// A single finding with location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub position: usize,
    pub rule: Rule,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn new(position: usize, rule: Rule, severity: Severity, message: String) -> Self {
        Finding {
            position,
            rule,
            severity,
            message,
        }
    }
}

/// Run all rules on `message`. Returns findings in tag order.
pub fn validate(message: &SwiftMessage, config: &ValidationConfig) -> Vec<Finding> {
    let block = &message.block4;
    let (tree, issues) = SequenceTree::scan(block);
    let mut out: Vec<Finding> = issues
        .into_iter()
        .map(|issue| {
            let rule = match issue.kind {
                IssueKind::Unclosed => Rule::UnclosedSequence,
                IssueKind::UnexpectedEnd => Rule::UnexpectedEnd,
            };
            Finding::new(issue.index + 1, rule, Severity::Error, issue.message)
        })
        .collect();

    let mt = message.message_type().unwrap_or("");
    let Some(schema) = schema::lookup(mt) else {
        out.push(Finding::new(
            0,
            Rule::NoSchema,
            Severity::Warning,
            format!("no sequence schema for message type {:?}", mt),
        ));
        out.sort_by_key(|f| f.position);
        return out;
    };

    let mut path = Vec::new();
    check_level(&tree.roots, schema.sequences, &mut path, 0, config, &mut out);

    // Tags between top-level sequences
    let mut covered = vec![false; block.len()];
    for root in &tree.roots {
        for c in covered.iter_mut().take(root.end + 1).skip(root.start) {
            *c = true;
        }
    }
    for (i, tag) in block.iter().enumerate() {
        if !covered[i] && !tag.is_boundary() {
            out.push(Finding::new(
                i + 1,
                Rule::TagOutsideSequence,
                Severity::Warning,
                format!(":{}: is not inside any sequence", tag.name),
            ));
        }
    }

    out.sort_by_key(|f| f.position);
    out
}

fn check_level<'a>(
    nodes: &'a [SequenceNode],
    allowed: &'static [SequenceDef],
    path: &mut Vec<&'a str>,
    parent_position: usize,
    config: &ValidationConfig,
    out: &mut Vec<Finding>,
) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for node in nodes {
        let position = node.start + 1;
        let Some(def) = allowed.iter().find(|d| d.qualifier == node.qualifier) else {
            let severity = if config.unknown_sequence_is_error {
                Severity::Error
            } else {
                Severity::Warning
            };
            out.push(Finding::new(
                position,
                Rule::UnknownSequence,
                severity,
                format!(
                    "sequence {} not allowed under {}",
                    node.qualifier,
                    describe(path)
                ),
            ));
            continue;
        };

        let count = counts.entry(def.qualifier).or_insert(0);
        *count += 1;
        if config.check_repetition && !def.repeatable && *count == 2 {
            out.push(Finding::new(
                position,
                Rule::RepeatedSequence,
                Severity::Error,
                format!("sequence {} ({}) must not repeat", def.name, def.qualifier),
            ));
        }

        path.push(&node.qualifier);
        check_level(&node.children, def.children, path, position, config, out);
        path.pop();
    }

    if config.check_mandatory {
        for def in allowed.iter().filter(|d| d.mandatory) {
            if !counts.contains_key(def.qualifier) {
                out.push(Finding::new(
                    parent_position,
                    Rule::MissingSequence,
                    Severity::Error,
                    format!(
                        "mandatory sequence {} ({}) missing under {}",
                        def.name,
                        def.qualifier,
                        describe(path)
                    ),
                ));
            }
        }
    }
}

fn describe(path: &[&str]) -> String {
    if path.is_empty() {
        "message body".to_string()
    } else {
        path.join("/")
    }
}

/// True when any finding is an error.
pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(|f| f.severity == Severity::Error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::TagList;
    use crate::tag::Tag;

    fn msg(mt: &str, tags: Vec<Tag>) -> SwiftMessage {
        let mut m = SwiftMessage::new_outgoing(mt, "BANKBEBB", "BANKDEFF");
        m.append_block(&TagList::from_tags(tags));
        m
    }

    fn seq(q: &str, inner: Vec<Tag>) -> Vec<Tag> {
        TagList::wrap_in(q, &inner).into_tags()
    }

    fn minimal_566() -> Vec<Tag> {
        [
            seq("GENL", vec![Tag::new("20C", ":SEME//1")]),
            seq("USECU", vec![Tag::new("35B", "ISIN US0378331005")]),
            seq("CADETL", vec![]),
            seq("CACONF", vec![]),
        ]
        .concat()
    }

    fn rules(findings: &[Finding]) -> Vec<Rule> {
        findings.iter().map(|f| f.rule).collect()
    }

    #[test]
    fn rule_id_matches_serialized_name() {
        for rule in [
            Rule::UnclosedSequence,
            Rule::UnexpectedEnd,
            Rule::UnknownSequence,
            Rule::MissingSequence,
            Rule::RepeatedSequence,
            Rule::TagOutsideSequence,
            Rule::NoSchema,
        ] {
            assert_eq!(
                serde_json::to_value(rule).ok(),
                Some(serde_json::Value::from(rule.id()))
            );
        }
    }

    #[test]
    fn valid_minimal_message() {
        let findings = validate(&msg("566", minimal_566()), &ValidationConfig::default());
        assert!(findings.is_empty(), "{:?}", findings);
    }

    #[test]
    fn unclosed_reported_once() {
        let mut tags = minimal_566();
        tags.push(Tag::start("ADDINFO"));
        tags.push(Tag::new("70E", ":ADTX//X"));
        let findings = validate(&msg("566", tags), &ValidationConfig::default());
        let unclosed: Vec<_> = findings
            .iter()
            .filter(|f| f.rule == Rule::UnclosedSequence)
            .collect();
        assert_eq!(unclosed.len(), 1);
        assert_eq!(unclosed[0].position, 11);
        assert!(has_errors(&findings));
    }

    #[test]
    fn missing_and_unknown() {
        let tags = [
            seq("GENL", vec![]),
            seq("CADETL", vec![]),
            seq("CACONF", seq("BOGUS", vec![])),
        ]
        .concat();
        let findings = validate(&msg("566", tags), &ValidationConfig::default());
        assert_eq!(rules(&findings), vec![Rule::MissingSequence, Rule::UnknownSequence]);
        assert_eq!(findings[0].position, 0);
        assert_eq!(findings[1].severity, Severity::Warning);

        let strict = ValidationConfig {
            unknown_sequence_is_error: true,
            check_mandatory: false,
            ..ValidationConfig::default()
        };
        let findings = validate(&msg("566", seq("GENL", seq("BOGUS", vec![]))), &strict);
        assert_eq!(rules(&findings), vec![Rule::UnknownSequence]);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn repeated_non_repeatable() {
        let mut tags = minimal_566();
        tags.extend(seq("ADDINFO", vec![]));
        tags.extend(seq("ADDINFO", vec![]));
        let findings = validate(&msg("566", tags.clone()), &ValidationConfig::default());
        assert_eq!(rules(&findings), vec![Rule::RepeatedSequence]);
        let lenient = ValidationConfig {
            check_repetition: false,
            ..ValidationConfig::default()
        };
        assert!(validate(&msg("566", tags), &lenient).is_empty());
    }

    #[test]
    fn mandatory_child_of_present_parent() {
        // MT575: TRAN requires LINK and TRANSDET.
        let tags = [
            seq("GENL", vec![]),
            seq(
                "CASHACCT",
                seq("ACTCURR", seq("ACTINFO", seq("TRAN", seq("TRANSDET", vec![])))),
            ),
        ]
        .concat();
        let findings = validate(&msg("575", tags), &ValidationConfig::default());
        assert_eq!(rules(&findings), vec![Rule::MissingSequence]);
        assert!(findings[0].message.contains("B1a1A"));
        assert_eq!(findings[0].position, 6);
    }

    #[test]
    fn stray_end_and_outside_tag() {
        let mut tags = vec![Tag::new("20C", ":SEME//X")];
        tags.extend(minimal_566());
        tags.push(Tag::end("GENL"));
        let findings = validate(&msg("566", tags), &ValidationConfig::default());
        assert_eq!(rules(&findings), vec![Rule::TagOutsideSequence, Rule::UnexpectedEnd]);
    }

    #[test]
    fn unknown_type_only_structure() {
        let findings = validate(&msg("103", seq("GENL", vec![])), &ValidationConfig::default());
        assert_eq!(rules(&findings), vec![Rule::NoSchema]);
    }
}
