//! MT506 Collateral and Exposure Statement.
//!
//! `SUMM` is both the top-level summary (B) and the per-collateral summary (C1); `LINK` sits
//! under `GENL` (A1) and under `COLLDET/TRANSDET` (C2a).

use crate::field::*;
use crate::sequence::mt_sequence;

mt_message!(
    /// MT506 Collateral and Exposure Statement.
    Mt506, "506");

mt_sequence!(
    /// General information.
    SequenceA, "506", "A", "GENL", ["GENL"]);
mt_sequence!(
    /// Linkages.
    SequenceA1, "506", "A1", "LINK", ["GENL", "LINK"]);
mt_sequence!(
    /// Overall summary.
    SequenceB, "506", "B", "SUMM", ["SUMM"]);
mt_sequence!(
    /// Collateral details.
    SequenceC, "506", "C", "COLLDET", ["COLLDET"]);
mt_sequence!(
    /// Summary per collateral.
    SequenceC1, "506", "C1", "SUMM", ["COLLDET", "SUMM"]);
mt_sequence!(
    /// Transaction details.
    SequenceC2, "506", "C2", "TRANSDET", ["COLLDET", "TRANSDET"]);
mt_sequence!(
    /// Transaction linkages.
    SequenceC2a, "506", "C2a", "LINK", ["COLLDET", "TRANSDET", "LINK"]);
mt_sequence!(
    /// Additional information.
    SequenceD, "506", "D", "ADDINFO", ["ADDINFO"]);

mt_getters!(Mt506 {
    single {
        field_28e: Field28E,
        field_23g: Field23G,
    }
    multi {
        field_13a: Field13A,
        field_16r: Field16R,
        field_16s: Field16S,
        field_17b: Field17B,
        field_19a: Field19A,
        field_20c: Field20C,
        field_22f: Field22F,
        field_22h: Field22H,
        field_25d: Field25D,
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
        sequence_b / sequence_b_list: SequenceB,
        sequence_c / sequence_c_list: SequenceC,
        sequence_c1 / sequence_c1_list: SequenceC1,
        sequence_c2 / sequence_c2_list: SequenceC2,
        sequence_c2a / sequence_c2a_list: SequenceC2a,
        sequence_d / sequence_d_list: SequenceD,
    }
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::MtMessage;
    use crate::sequence::Sequence;
    use rust_decimal::Decimal;

    const FIN: &str = "{1:F01BANKBEBBAXXX0000000000}{2:I506BANKDEFFXXXXN}{4:\r\n\
:16R:GENL\r\n\
:28E:1/ONLY\r\n\
:20C::SEME//COLL1\r\n\
:23G:NEWM\r\n\
:98C::STAT//20240131170000\r\n\
:16R:LINK\r\n\
:20C::PREV//COLL0\r\n\
:16S:LINK\r\n\
:16S:GENL\r\n\
:16R:SUMM\r\n\
:19A::TEXA//EUR1000000,\r\n\
:19A::TCOR//EUR1050000,\r\n\
:16S:SUMM\r\n\
:16R:COLLDET\r\n\
:20C::CLTR//CTR1\r\n\
:16R:SUMM\r\n\
:19A::TEXA//EUR400000,\r\n\
:92A::MARG//5,\r\n\
:16S:SUMM\r\n\
:16R:TRANSDET\r\n\
:16R:LINK\r\n\
:20C::RELA//TRD1\r\n\
:16S:LINK\r\n\
:16R:LINK\r\n\
:20C::RELA//TRD2\r\n\
:16S:LINK\r\n\
:16S:TRANSDET\r\n\
:16S:COLLDET\r\n\
-}";

    #[test]
    fn summ_resolved_by_parent() {
        let m = Mt506::parse(FIN).expect("parse");
        let b = m.sequence_b_list();
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].fields::<Field19A>().len(), 2);
        let c1 = m.sequence_c1().expect("C1");
        assert_eq!(c1.field::<Field19A>().and_then(|f| f.amount()), Some(Decimal::new(400000, 0)));
        assert_eq!(c1.field::<Field92A>().and_then(|f| f.rate()), Some(Decimal::new(5, 0)));
    }

    #[test]
    fn link_resolved_by_parent() {
        let m = Mt506::parse(FIN).expect("parse");
        assert_eq!(m.sequence_a1_list().len(), 1);
        assert_eq!(m.sequence_c2a_list().len(), 2);
        let c2 = m.sequence_c2().expect("C2");
        assert_eq!(SequenceC2a::list_from_block(c2.tags()).len(), 2);
    }

    #[test]
    fn getters() {
        let m = Mt506::parse(FIN).expect("parse");
        assert_eq!(m.message_type(), "506");
        assert!(m.field_28e().is_some());
        assert_eq!(m.field_19a().len(), 3);
        assert!(m.field_25d().is_empty());
        assert!(m.sequence_d().is_none());
        assert_eq!(
            m.field_98c().first().and_then(|f| f.date_time()).map(|d| d.to_string()),
            Some("2024-01-31 17:00:00".to_string())
        );
    }
}
