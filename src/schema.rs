//! Sequence hierarchy of each supported MT type.
//!
//! A [`SequenceDef`] names one sequence (`B1a1A`), its boundary qualifier (`LINK`), whether it
//! is mandatory or repeatable, and its child sequences. The same qualifier can appear at
//! several places in one hierarchy (MT575 has `LINK` under `GENL` and under `TRAN`), so a
//! sequence is identified by its *path* of qualifiers from the top level, not by the
//! qualifier alone. [`MtSchema::is_non_unique`] tells which qualifiers need the path.

/// One sequence of a message type.
#[derive(Debug)]
pub struct SequenceDef {
    /// Sequence letter name, e.g. `"A1"`.
    pub name: &'static str,
    /// Boundary qualifier (value of 16R/16S).
    pub qualifier: &'static str,
    pub mandatory: bool,
    pub repeatable: bool,
    pub children: &'static [SequenceDef],
}

macro_rules! seq {
    ($name:literal, $qualifier:literal, $mandatory:expr, $repeatable:expr, $children:expr $(,)?) => {
        SequenceDef {
            name: $name,
            qualifier: $qualifier,
            mandatory: $mandatory,
            repeatable: $repeatable,
            children: $children,
        }
    };
}

const M: bool = true;
const O: bool = false;
const REP: bool = true;
const ONE: bool = false;

/// Sequence hierarchy of one MT type.
#[derive(Debug)]
pub struct MtSchema {
    pub message_type: &'static str,
    pub title: &'static str,
    pub sequences: &'static [SequenceDef],
}

pub static MT506: MtSchema = MtSchema {
    message_type: "506",
    title: "Collateral and Exposure Statement",
    sequences: &[
        seq!("A", "GENL", M, ONE, &[seq!("A1", "LINK", O, REP, &[])]),
        seq!("B", "SUMM", M, ONE, &[]),
        seq!(
            "C",
            "COLLDET",
            O,
            REP,
            &[
                seq!("C1", "SUMM", O, ONE, &[]),
                seq!("C2", "TRANSDET", O, REP, &[seq!("C2a", "LINK", O, REP, &[])]),
            ],
        ),
        seq!("D", "ADDINFO", O, ONE, &[]),
    ],
};

pub static MT527: MtSchema = MtSchema {
    message_type: "527",
    title: "Triparty Collateral Instruction",
    sequences: &[
        seq!(
            "A",
            "GENL",
            M,
            ONE,
            &[
                seq!("A1", "COLLPRTY", M, REP, &[]),
                seq!("A2", "LINK", O, REP, &[]),
            ],
        ),
        seq!("B", "DEALTRAN", M, ONE, &[]),
        seq!("C", "SECMOVE", O, REP, &[seq!("C1", "SETPRTY", O, REP, &[])]),
        seq!("D", "SETDET", O, ONE, &[seq!("D1", "SETPRTY", O, REP, &[])]),
        seq!("E", "ADDINFO", O, ONE, &[]),
    ],
};

pub static MT566: MtSchema = MtSchema {
    message_type: "566",
    title: "Corporate Action Confirmation",
    sequences: &[
        seq!("A", "GENL", M, ONE, &[seq!("A1", "LINK", O, REP, &[])]),
        seq!("B", "USECU", M, ONE, &[seq!("B1", "FIA", O, ONE, &[])]),
        seq!("C", "INTSEC", O, ONE, &[]),
        seq!("D", "CADETL", M, ONE, &[]),
        seq!(
            "E",
            "CACONF",
            M,
            ONE,
            &[
                seq!("E1", "SECMOVE", O, REP, &[seq!("E1a", "FIA", O, ONE, &[])]),
                seq!("E2", "CASHMOVE", O, REP, &[]),
            ],
        ),
        seq!("F", "ADDINFO", O, ONE, &[]),
    ],
};

pub static MT575: MtSchema = MtSchema {
    message_type: "575",
    title: "Report of Combined Activity",
    sequences: &[
        seq!("A", "GENL", M, ONE, &[seq!("A1", "LINK", O, REP, &[])]),
        seq!(
            "B",
            "CASHACCT",
            O,
            REP,
            &[seq!(
                "B1",
                "ACTCURR",
                M,
                REP,
                &[seq!(
                    "B1a",
                    "ACTINFO",
                    O,
                    REP,
                    &[
                        seq!(
                            "B1a1",
                            "TRAN",
                            M,
                            REP,
                            &[
                                seq!("B1a1A", "LINK", M, REP, &[]),
                                seq!(
                                    "B1a1B",
                                    "TRANSDET",
                                    M,
                                    ONE,
                                    &[seq!("B1a1B1", "SETPRTY", O, REP, &[])],
                                ),
                            ],
                        ),
                        seq!(
                            "B1a2",
                            "CASHDET",
                            O,
                            ONE,
                            &[seq!("B1a2A", "SETPRTY", O, REP, &[])],
                        ),
                    ],
                )],
            )],
        ),
        seq!("C", "ADDINFO", O, ONE, &[]),
    ],
};

static ALL: [&MtSchema; 4] = [&MT506, &MT527, &MT566, &MT575];

/// Schema for a 3-digit message type.
pub fn lookup(message_type: &str) -> Option<&'static MtSchema> {
    ALL.iter().copied().find(|s| s.message_type == message_type)
}

/// All registered schemas.
pub fn all() -> &'static [&'static MtSchema] {
    &ALL
}

impl MtSchema {
    /// Sequence at `path` (qualifiers from the top level).
    pub fn find(&self, path: &[&str]) -> Option<&'static SequenceDef> {
        let (first, rest) = path.split_first()?;
        let mut current = self.sequences.iter().find(|s| s.qualifier == *first)?;
        for q in rest {
            current = current.children.iter().find(|s| s.qualifier == *q)?;
        }
        Some(current)
    }

    /// Allowed children at `path`; the top-level sequences for an empty path.
    pub fn children_of(&self, path: &[&str]) -> &'static [SequenceDef] {
        if path.is_empty() {
            return self.sequences;
        }
        self.find(path).map(|s| s.children).unwrap_or(&[])
    }

    /// Letter name of the sequence at `path`, e.g. `"B1a1A"`.
    pub fn name_of(&self, path: &[&str]) -> Option<&'static str> {
        self.find(path).map(|s| s.name)
    }

    /// Every path ending in `qualifier`, in declaration order.
    pub fn paths_of(&self, qualifier: &str) -> Vec<Vec<&'static str>> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        collect_paths(self.sequences, qualifier, &mut prefix, &mut out);
        out
    }

    /// True when `qualifier` names more than one sequence of this message type.
    pub fn is_non_unique(&self, qualifier: &str) -> bool {
        self.paths_of(qualifier).len() > 1
    }
}

fn collect_paths(
    defs: &'static [SequenceDef],
    qualifier: &str,
    prefix: &mut Vec<&'static str>,
    out: &mut Vec<Vec<&'static str>>,
) {
    for def in defs {
        prefix.push(def.qualifier);
        if def.qualifier == qualifier {
            out.push(prefix.clone());
        }
        collect_paths(def.children, qualifier, prefix, out);
        prefix.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_registered_types() {
        for mt in ["506", "527", "566", "575"] {
            assert_eq!(lookup(mt).map(|s| s.message_type), Some(mt));
        }
        assert!(lookup("103").is_none());
        assert_eq!(all().len(), 4);
    }

    #[test]
    fn non_unique_qualifiers() {
        assert!(MT566.is_non_unique("FIA"));
        assert!(!MT566.is_non_unique("LINK"));
        assert!(MT575.is_non_unique("LINK"));
        assert!(MT575.is_non_unique("SETPRTY"));
        assert!(MT506.is_non_unique("SUMM"));
        assert!(MT527.is_non_unique("SETPRTY"));
        assert!(!MT527.is_non_unique("GENL"));
    }

    #[test]
    fn paths_and_names() {
        assert_eq!(
            MT575.paths_of("LINK"),
            vec![
                vec!["GENL", "LINK"],
                vec!["CASHACCT", "ACTCURR", "ACTINFO", "TRAN", "LINK"]
            ]
        );
        assert_eq!(
            MT575.name_of(&["CASHACCT", "ACTCURR", "ACTINFO", "TRAN", "LINK"]),
            Some("B1a1A")
        );
        assert_eq!(MT566.name_of(&["CACONF", "SECMOVE", "FIA"]), Some("E1a"));
        assert!(MT566.find(&["GENL", "FIA"]).is_none());
    }

    #[test]
    fn children_of_root_and_nested() {
        assert_eq!(MT566.children_of(&[]).len(), 6);
        let names: Vec<_> = MT566.children_of(&["CACONF"]).iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["E1", "E2"]);
        assert!(MT566.children_of(&["NOPE"]).is_empty());
    }
}
