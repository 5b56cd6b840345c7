//! MT575 Report of Combined Activity.
//!
//! The deepest hierarchy of the supported types. `LINK` (A1 and B1a1A) and `SETPRTY` (B1a1B1
//! and B1a2A) are non-unique and resolved by path.

use crate::field::*;
use crate::sequence::mt_sequence;

mt_message!(
    /// MT575 Report of Combined Activity.
    Mt575, "575");

mt_sequence!(
    /// General information.
    SequenceA, "575", "A", "GENL", ["GENL"]);
mt_sequence!(
    /// Linkages.
    SequenceA1, "575", "A1", "LINK", ["GENL", "LINK"]);
mt_sequence!(
    /// Cash account.
    SequenceB, "575", "B", "CASHACCT", ["CASHACCT"]);
mt_sequence!(
    /// Activity currency.
    SequenceB1, "575", "B1", "ACTCURR", ["CASHACCT", "ACTCURR"]);
mt_sequence!(
    /// Activity information.
    SequenceB1a, "575", "B1a", "ACTINFO", ["CASHACCT", "ACTCURR", "ACTINFO"]);
mt_sequence!(
    /// Transaction.
    SequenceB1a1, "575", "B1a1", "TRAN", ["CASHACCT", "ACTCURR", "ACTINFO", "TRAN"]);
mt_sequence!(
    /// Transaction linkages.
    SequenceB1a1A,
    "575",
    "B1a1A",
    "LINK",
    ["CASHACCT", "ACTCURR", "ACTINFO", "TRAN", "LINK"]
);
mt_sequence!(
    /// Transaction details.
    SequenceB1a1B,
    "575",
    "B1a1B",
    "TRANSDET",
    ["CASHACCT", "ACTCURR", "ACTINFO", "TRAN", "TRANSDET"]
);
mt_sequence!(
    /// Settlement parties of a transaction.
    SequenceB1a1B1,
    "575",
    "B1a1B1",
    "SETPRTY",
    ["CASHACCT", "ACTCURR", "ACTINFO", "TRAN", "TRANSDET", "SETPRTY"]
);
mt_sequence!(
    /// Cash details.
    SequenceB1a2, "575", "B1a2", "CASHDET", ["CASHACCT", "ACTCURR", "ACTINFO", "CASHDET"]);
mt_sequence!(
    /// Settlement parties of the cash details.
    SequenceB1a2A,
    "575",
    "B1a2A",
    "SETPRTY",
    ["CASHACCT", "ACTCURR", "ACTINFO", "CASHDET", "SETPRTY"]
);
mt_sequence!(
    /// Additional information.
    SequenceC, "575", "C", "ADDINFO", ["ADDINFO"]);

mt_getters!(Mt575 {
    single {
        field_28e: Field28E,
        field_23g: Field23G,
    }
    multi {
        field_11a: Field11A,
        field_13a: Field13A,
        field_16r: Field16R,
        field_16s: Field16S,
        field_17b: Field17B,
        field_19a: Field19A,
        field_20c: Field20C,
        field_22f: Field22F,
        field_22h: Field22H,
        field_35b: Field35B,
        field_36b: Field36B,
        field_69a: Field69A,
        field_70e: Field70E,
        field_90b: Field90B,
        field_95p: Field95P,
        field_95q: Field95Q,
        field_95r: Field95R,
        field_97a: Field97A,
        field_98a: Field98A,
        field_98c: Field98C,
    }
    sequences {
        sequence_a / sequence_a_list: SequenceA,
        sequence_a1 / sequence_a1_list: SequenceA1,
        sequence_b / sequence_b_list: SequenceB,
        sequence_b1 / sequence_b1_list: SequenceB1,
        sequence_b1a / sequence_b1a_list: SequenceB1a,
        sequence_b1a1 / sequence_b1a1_list: SequenceB1a1,
        sequence_b1a1a / sequence_b1a1a_list: SequenceB1a1A,
        sequence_b1a1b / sequence_b1a1b_list: SequenceB1a1B,
        sequence_b1a1b1 / sequence_b1a1b1_list: SequenceB1a1B1,
        sequence_b1a2 / sequence_b1a2_list: SequenceB1a2,
        sequence_b1a2a / sequence_b1a2a_list: SequenceB1a2A,
        sequence_c / sequence_c_list: SequenceC,
    }
});
