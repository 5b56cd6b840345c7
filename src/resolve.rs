//! Sequence nesting and path-based resolution of boundary qualifiers.
//!
//! [`SequenceTree`] tracks 16R/16S pairs with a stack and records each sequence as a node
//! holding the tag indices of its start and end boundary. With the tree, a sequence is
//! found by its chain of ancestor qualifiers instead of by qualifier alone, which is what
//! non-unique separators need: in MT575 the `LINK` under `GENL` and the `LINK` under
//! `TRAN` are different sequences.
//!
//! ## Entry points
//!
//! | Need | Use |
//! |------|-----|
//! | Nesting tree, fail on bad structure | [`SequenceTree::build`] |
//! | Nesting tree plus every structural issue | [`SequenceTree::scan`] |
//! | Occurrences at an exact path | [`resolve_path`] |
//! | Occurrences of a schema sequence (plain lookup when the qualifier is unique) | [`resolve`] |

use crate::block::TagList;
use crate::error::{Error, Result};
use crate::schema::MtSchema;
use crate::tag::{END_TAG, START_TAG};
use tracing::{debug, warn};

/// One 16R ... 16S sequence. `start` and `end` are tag indices of the boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceNode {
    pub qualifier: String,
    pub start: usize,
    pub end: usize,
    pub children: Vec<SequenceNode>,
}

impl SequenceNode {
    /// Tags of this sequence, boundaries included.
    pub fn tags(&self, block: &TagList) -> TagList {
        block.slice(self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// A 16R whose sequence is never closed.
    Unclosed,
    /// A 16S with no open sequence, or closing a different qualifier than the open one.
    UnexpectedEnd,
}

/// Structural problem found while scanning boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureIssue {
    pub kind: IssueKind,
    /// Tag index of the offending boundary.
    pub index: usize,
    pub qualifier: String,
    pub message: String,
}

/// Top-level sequences of a tag list, each with its nested children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceTree {
    pub roots: Vec<SequenceNode>,
}

struct Open {
    qualifier: String,
    start: usize,
    children: Vec<SequenceNode>,
}

impl SequenceTree {
    /// Build the tree; fails on the first unbalanced or mismatched boundary.
    pub fn build(block: &TagList) -> Result<Self> {
        let (tree, issues) = Self::scan(block);
        match issues.into_iter().next() {
            Some(issue) => Err(Error::Structure(issue.message)),
            None => Ok(tree),
        }
    }

    /// Build the tree and collect every structural issue.
    ///
    /// A 16S that closes an outer sequence also closes the inner ones still open, each reported
    /// as unclosed. A 16S matching no open sequence is reported and skipped. Sequences still
    /// open at the end are reported and closed at the last tag so that their content stays
    /// reachable.
    pub fn scan(block: &TagList) -> (Self, Vec<StructureIssue>) {
        let mut stack: Vec<Open> = Vec::new();
        let mut roots = Vec::new();
        let mut issues = Vec::new();

        for (i, tag) in block.iter().enumerate() {
            if tag.name == START_TAG {
                stack.push(Open {
                    qualifier: tag.value.trim().to_string(),
                    start: i,
                    children: Vec::new(),
                });
            } else if tag.name == END_TAG {
                let qualifier = tag.value.trim();
                match stack.iter().rposition(|o| o.qualifier == qualifier) {
                    Some(depth) => {
                        // Inner sequences left open are closed just before this end.
                        while stack.len() > depth + 1 {
                            if let Some(open) = stack.last() {
                                issues.push(unclosed_issue(
                                    open,
                                    format!(
                                        "16R:{} at tag {} is not closed before 16S:{} at tag {}",
                                        open.qualifier,
                                        open.start + 1,
                                        qualifier,
                                        i + 1
                                    ),
                                ));
                            }
                            close_top(&mut stack, &mut roots, i - 1);
                        }
                        close_top(&mut stack, &mut roots, i);
                    }
                    None => {
                        let message = match stack.last() {
                            Some(open) => format!(
                                "16S:{} at tag {} does not close open sequence {} (opened at tag {})",
                                qualifier,
                                i + 1,
                                open.qualifier,
                                open.start + 1
                            ),
                            None => format!("16S:{} at tag {} has no matching 16R", qualifier, i + 1),
                        };
                        issues.push(StructureIssue {
                            kind: IssueKind::UnexpectedEnd,
                            index: i,
                            qualifier: qualifier.to_string(),
                            message,
                        });
                    }
                }
            }
        }

        let last = block.len().saturating_sub(1);
        while let Some(open) = stack.last() {
            issues.push(unclosed_issue(
                open,
                format!("16R:{} at tag {} is never closed", open.qualifier, open.start + 1),
            ));
            close_top(&mut stack, &mut roots, last);
        }
        issues.sort_by_key(|issue| issue.index);

        (SequenceTree { roots }, issues)
    }

    /// Nodes whose qualifier chain from the top level equals `path`, in document order.
    pub fn find_path(&self, path: &[&str]) -> Vec<&SequenceNode> {
        let Some((first, rest)) = path.split_first() else {
            return Vec::new();
        };
        let mut current: Vec<&SequenceNode> =
            self.roots.iter().filter(|n| n.qualifier == *first).collect();
        for q in rest {
            current = current
                .into_iter()
                .flat_map(|n| n.children.iter().filter(|c| c.qualifier == *q))
                .collect();
        }
        current
    }

    /// Depth-first walk: `(depth, qualifier path, node)` for every node, parents first.
    pub fn walk(&self) -> Vec<(usize, Vec<&str>, &SequenceNode)> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        for root in &self.roots {
            walk_node(root, 0, &mut path, &mut out);
        }
        out
    }
}

fn unclosed_issue(open: &Open, message: String) -> StructureIssue {
    StructureIssue {
        kind: IssueKind::Unclosed,
        index: open.start,
        qualifier: open.qualifier.clone(),
        message,
    }
}

/// Pop the innermost open sequence as a node ending at `end` and attach it to its parent.
fn close_top(stack: &mut Vec<Open>, roots: &mut Vec<SequenceNode>, end: usize) {
    let Some(open) = stack.pop() else {
        return;
    };
    let node = SequenceNode {
        qualifier: open.qualifier,
        start: open.start,
        end,
        children: open.children,
    };
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

fn walk_node<'a>(
    node: &'a SequenceNode,
    depth: usize,
    path: &mut Vec<&'a str>,
    out: &mut Vec<(usize, Vec<&'a str>, &'a SequenceNode)>,
) {
    path.push(&node.qualifier);
    out.push((depth, path.clone(), node));
    for child in &node.children {
        walk_node(child, depth + 1, path, out);
    }
    path.pop();
}

/// Every sequence of `block` whose ancestor qualifiers equal `path`, boundaries included.
///
/// `block` is either a whole block 4 or a sub-block that starts with its own 16R, in which
/// case `path` must start with that qualifier. If the boundaries are unbalanced the lookup
/// falls back to nested qualifier search.
pub fn resolve_path(block: &TagList, path: &[&str]) -> Vec<TagList> {
    match SequenceTree::build(block) {
        Ok(tree) => tree
            .find_path(path)
            .into_iter()
            .map(|n| n.tags(block))
            .collect(),
        Err(e) => {
            warn!(path = %path.join("/"), error = %e, "falling back to qualifier search");
            fallback_path(block, path)
        }
    }
}

fn fallback_path(block: &TagList, path: &[&str]) -> Vec<TagList> {
    let Some((first, rest)) = path.split_first() else {
        return Vec::new();
    };
    let mut current = block.sub_blocks(first);
    for q in rest {
        current = current
            .iter()
            .flat_map(|b| b.strip_boundaries().sub_blocks(q))
            .collect();
    }
    current
}

/// Occurrences of the schema sequence at `path` within a whole block 4.
///
/// A qualifier that is unique in `schema` is looked up by name; a non-unique one is resolved
/// through its path.
pub fn resolve(block: &TagList, schema: &MtSchema, path: &[&str]) -> Vec<TagList> {
    let Some(qualifier) = path.last() else {
        return Vec::new();
    };
    if schema.is_non_unique(qualifier) {
        debug!(
            message_type = schema.message_type,
            path = %path.join("/"),
            "resolving non-unique qualifier by path"
        );
        resolve_path(block, path)
    } else {
        block.sub_blocks(qualifier)
    }
}

/// Occurrences of the sequence at `path` inside `parent`, an already extracted sub-block.
///
/// When `parent` is delimited by a qualifier on `path`, only the part of the path below it is
/// followed. Otherwise the qualifier is searched by name.
pub fn resolve_in_parent(parent: &TagList, path: &[&str]) -> Vec<TagList> {
    let Some((qualifier, ancestors)) = path.split_last() else {
        return Vec::new();
    };
    match parent
        .boundary_qualifier()
        .and_then(|pq| ancestors.iter().rposition(|a| *a == pq))
    {
        Some(k) => resolve_path(parent, &path[k..]),
        None => parent.sub_blocks(qualifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::MT575;
    use crate::tag::Tag;

    fn seq(q: &str, inner: Vec<Tag>) -> Vec<Tag> {
        TagList::wrap_in(q, &inner).into_tags()
    }

    fn mt575_block() -> TagList {
        let genl = seq(
            "GENL",
            [vec![Tag::new("20C", ":SEME//S1")], seq("LINK", vec![Tag::new("20C", ":PREV//G1")])].concat(),
        );
        let tran = seq(
            "TRAN",
            [
                seq("LINK", vec![Tag::new("20C", ":RELA//T1")]),
                seq("LINK", vec![Tag::new("20C", ":RELA//T2")]),
                seq("TRANSDET", seq("SETPRTY", vec![Tag::new("95P", ":SELL//BANKBEBB")])),
            ]
            .concat(),
        );
        let cash = seq("CASHACCT", seq("ACTCURR", seq("ACTINFO", tran)));
        TagList::from_tags([genl, cash].concat())
    }

    #[test]
    fn build_tree_nesting() {
        let block = mt575_block();
        let tree = SequenceTree::build(&block).expect("balanced");
        assert_eq!(tree.roots.len(), 2);
        assert_eq!(tree.roots[0].qualifier, "GENL");
        assert_eq!(tree.roots[0].children[0].qualifier, "LINK");
        assert_eq!(tree.roots[0].start, 0);
        assert!(block.tags()[tree.roots[1].end].is_end("CASHACCT"));
    }

    #[test]
    fn path_separates_non_unique_link() {
        let block = mt575_block();
        let genl_links = resolve_path(&block, &["GENL", "LINK"]);
        assert_eq!(genl_links.len(), 1);
        assert_eq!(genl_links[0].tags()[1].value, ":PREV//G1");

        let tran_links = resolve(&block, &MT575, &["CASHACCT", "ACTCURR", "ACTINFO", "TRAN", "LINK"]);
        assert_eq!(tran_links.len(), 2);
        assert_eq!(tran_links[1].tags()[1].value, ":RELA//T2");

        // Plain qualifier search mixes both levels.
        assert_eq!(block.sub_blocks("LINK").len(), 3);
    }

    #[test]
    fn resolve_within_parent() {
        let block = mt575_block();
        let tran = resolve_path(&block, &["CASHACCT", "ACTCURR", "ACTINFO", "TRAN"]);
        let links = resolve_in_parent(&tran[0], &["CASHACCT", "ACTCURR", "ACTINFO", "TRAN", "LINK"]);
        assert_eq!(links.len(), 2);
        let setprty = resolve_in_parent(
            &tran[0],
            &["CASHACCT", "ACTCURR", "ACTINFO", "TRAN", "TRANSDET", "SETPRTY"],
        );
        assert_eq!(setprty.len(), 1);
    }

    #[test]
    fn scan_reports_issues() {
        let block = TagList::from_tags(vec![
            Tag::start("GENL"),
            Tag::start("LINK"),
            Tag::end("GENL"),
            Tag::end("LINK"),
            Tag::end("ADDINFO"),
        ]);
        let (tree, issues) = SequenceTree::scan(&block);
        let kinds: Vec<_> = issues.iter().map(|i| (i.kind, i.index)).collect();
        assert_eq!(
            kinds,
            vec![
                (IssueKind::Unclosed, 1),
                (IssueKind::UnexpectedEnd, 3),
                (IssueKind::UnexpectedEnd, 4)
            ]
        );
        assert_eq!(tree.roots.len(), 1);
        assert_eq!(tree.roots[0].end, 2);
        assert_eq!(tree.roots[0].children[0].end, 1);
        assert!(SequenceTree::build(&block).is_err());
    }

    #[test]
    fn fallback_on_unbalanced() {
        let mut block = mt575_block();
        block.append(Tag::start("ADDINFO"));
        let links = resolve_path(&block, &["GENL", "LINK"]);
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn walk_depths() {
        let tree = SequenceTree::build(&mt575_block()).expect("balanced");
        let walked = tree.walk();
        let deepest = walked.iter().map(|(d, _, _)| *d).max();
        assert_eq!(deepest, Some(5));
        let (_, path, _) = walked
            .iter()
            .find(|(_, _, n)| n.qualifier == "SETPRTY")
            .expect("SETPRTY");
        assert_eq!(path.join("/"), "CASHACCT/ACTCURR/ACTINFO/TRAN/TRANSDET/SETPRTY");
    }
}
