//! MT527 Triparty Collateral Instruction.

use crate::field::*;
use crate::sequence::mt_sequence;

mt_message!(
    /// MT527 Triparty Collateral Instruction.
    Mt527, "527");

mt_sequence!(
    /// General information.
    SequenceA, "527", "A", "GENL", ["GENL"]);
mt_sequence!(
    /// Collateral parties.
    SequenceA1, "527", "A1", "COLLPRTY", ["GENL", "COLLPRTY"]);
mt_sequence!(
    /// Linkages.
    SequenceA2, "527", "A2", "LINK", ["GENL", "LINK"]);
mt_sequence!(
    /// Deal transaction details.
    SequenceB, "527", "B", "DEALTRAN", ["DEALTRAN"]);
mt_sequence!(
    /// Securities movement.
    SequenceC, "527", "C", "SECMOVE", ["SECMOVE"]);
mt_sequence!(
    /// Settlement parties of a securities movement.
    SequenceC1, "527", "C1", "SETPRTY", ["SECMOVE", "SETPRTY"]);
mt_sequence!(
    /// Settlement details.
    SequenceD, "527", "D", "SETDET", ["SETDET"]);
mt_sequence!(
    /// Settlement parties of the settlement details.
    SequenceD1, "527", "D1", "SETPRTY", ["SETDET", "SETPRTY"]);
mt_sequence!(
    /// Additional information.
    SequenceE, "527", "E", "ADDINFO", ["ADDINFO"]);

mt_getters!(Mt527 {
    single {
        field_23g: Field23G,
    }
    multi {
        field_13a: Field13A,
        field_13b: Field13B,
        field_16r: Field16R,
        field_16s: Field16S,
        field_19a: Field19A,
        field_20c: Field20C,
        field_22f: Field22F,
        field_22h: Field22H,
        field_35b: Field35B,
        field_36b: Field36B,
        field_70c: Field70C,
        field_70e: Field70E,
        field_92a: Field92A,
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
        sequence_a2 / sequence_a2_list: SequenceA2,
        sequence_b / sequence_b_list: SequenceB,
        sequence_c / sequence_c_list: SequenceC,
        sequence_c1 / sequence_c1_list: SequenceC1,
        sequence_d / sequence_d_list: SequenceD,
        sequence_d1 / sequence_d1_list: SequenceD1,
        sequence_e / sequence_e_list: SequenceE,
    }
});
