//! MT566 Corporate Action Confirmation.
//!
//! `FIA` appears twice (B1 under `USECU`, E1a under `CACONF/SECMOVE`) and is resolved by path.

use crate::field::*;
use crate::sequence::mt_sequence;

mt_message!(
    /// MT566 Corporate Action Confirmation.
    Mt566, "566");

mt_sequence!(
    /// General information.
    SequenceA, "566", "A", "GENL", ["GENL"]);
mt_sequence!(
    /// Linkages.
    SequenceA1, "566", "A1", "LINK", ["GENL", "LINK"]);
mt_sequence!(
    /// Underlying securities.
    SequenceB, "566", "B", "USECU", ["USECU"]);
mt_sequence!(
    /// Financial instrument attributes of the underlying.
    SequenceB1, "566", "B1", "FIA", ["USECU", "FIA"]);
mt_sequence!(
    /// Intermediate securities.
    SequenceC, "566", "C", "INTSEC", ["INTSEC"]);
mt_sequence!(
    /// Corporate action details.
    SequenceD, "566", "D", "CADETL", ["CADETL"]);
mt_sequence!(
    /// Corporate action confirmation.
    SequenceE, "566", "E", "CACONF", ["CACONF"]);
mt_sequence!(
    /// Securities movement.
    SequenceE1, "566", "E1", "SECMOVE", ["CACONF", "SECMOVE"]);
mt_sequence!(
    /// Financial instrument attributes of the movement.
    SequenceE1a, "566", "E1a", "FIA", ["CACONF", "SECMOVE", "FIA"]);
mt_sequence!(
    /// Cash movement.
    SequenceE2, "566", "E2", "CASHMOVE", ["CACONF", "CASHMOVE"]);
mt_sequence!(
    /// Additional information.
    SequenceF, "566", "F", "ADDINFO", ["ADDINFO"]);

mt_getters!(Mt566 {
    single {
        field_23g: Field23G,
    }
    multi {
        field_11a: Field11A,
        field_13a: Field13A,
        field_13b: Field13B,
        field_16r: Field16R,
        field_16s: Field16S,
        field_17b: Field17B,
        field_19b: Field19B,
        field_20c: Field20C,
        field_22f: Field22F,
        field_22h: Field22H,
        field_35b: Field35B,
        field_36b: Field36B,
        field_69a: Field69A,
        field_70e: Field70E,
        field_90a: Field90A,
        field_90b: Field90B,
        field_92a: Field92A,
        field_93b: Field93B,
        field_94b: Field94B,
        field_95p: Field95P,
        field_95q: Field95Q,
        field_95r: Field95R,
        field_97a: Field97A,
        field_98a: Field98A,
        field_98c: Field98C,
        field_99a: Field99A,
    }
    sequences {
        sequence_a / sequence_a_list: SequenceA,
        sequence_a1 / sequence_a1_list: SequenceA1,
        sequence_b / sequence_b_list: SequenceB,
        sequence_b1 / sequence_b1_list: SequenceB1,
        sequence_c / sequence_c_list: SequenceC,
        sequence_d / sequence_d_list: SequenceD,
        sequence_e / sequence_e_list: SequenceE,
        sequence_e1 / sequence_e1_list: SequenceE1,
        sequence_e1a / sequence_e1a_list: SequenceE1a,
        sequence_e2 / sequence_e2_list: SequenceE2,
        sequence_f / sequence_f_list: SequenceF,
    }
});

impl Mt566 {
    /// Corporate action event indicator (`22F::CAEV`).
    pub fn corporate_action_event(&self) -> Option<String> {
        self.field_22f()
            .into_iter()
            .find(|f| f.qualifier() == Some("CAEV"))
            .and_then(|f| f.indicator().map(String::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::MtMessage;
    use crate::sequence::Sequence;
    use rust_decimal::Decimal;

    const FIN: &str = "{1:F01BANKBEBBAXXX0000000000}{2:I566BANKDEFFXXXXN}{4:\r\n\
:16R:GENL\r\n\
:20C::CORP//CA123\r\n\
:20C::SEME//REF566\r\n\
:23G:NEWM\r\n\
:22F::CAEV//DVCA\r\n\
:16S:GENL\r\n\
:16R:USECU\r\n\
:97A::SAFE//123456\r\n\
:35B:ISIN US0378331005\r\n\
:16R:FIA\r\n\
:11A::DENO//USD\r\n\
:16S:FIA\r\n\
:93B::CONB//UNIT/1000,\r\n\
:16S:USECU\r\n\
:16R:CADETL\r\n\
:98A::PAYD//20240131\r\n\
:16S:CADETL\r\n\
:16R:CACONF\r\n\
:13A::CAON//001\r\n\
:22F::CAOP//CASH\r\n\
:16R:SECMOVE\r\n\
:22H::CRDB//CRED\r\n\
:35B:ISIN US0378331005\r\n\
:16R:FIA\r\n\
:11A::DENO//EUR\r\n\
:16S:FIA\r\n\
:36B::PSTA//UNIT/10,\r\n\
:16S:SECMOVE\r\n\
:16R:CASHMOVE\r\n\
:22H::CRDB//CRED\r\n\
:19B::PSTA//USD1234,56\r\n\
:19B::NETT//USD1000,\r\n\
:98A::POST//20240131\r\n\
:16S:CASHMOVE\r\n\
:16S:CACONF\r\n\
-}";

    #[test]
    fn fields_and_message_type() {
        let m = Mt566::parse(FIN).expect("parse");
        assert_eq!(m.message_type(), "566");
        assert_eq!(m.field_23g().and_then(|f| f.function().map(String::from)), Some("NEWM".to_string()));
        assert_eq!(m.field_20c().len(), 2);
        assert_eq!(m.field_19b().len(), 2);
        assert_eq!(m.field_19b()[0].amount(), Some(Decimal::new(123456, 2)));
        assert!(m.field_70e().is_empty());
        assert!(m.field_99a().is_empty());
        assert_eq!(m.corporate_action_event().as_deref(), Some("DVCA"));
    }

    #[test]
    fn fia_resolved_by_parent() {
        let m = Mt566::parse(FIN).expect("parse");
        let b1 = m.sequence_b1_list();
        assert_eq!(b1.len(), 1);
        assert_eq!(b1[0].field::<Field11A>().and_then(|f| f.currency().map(String::from)), Some("USD".to_string()));
        let e1a = m.sequence_e1a_list();
        assert_eq!(e1a.len(), 1);
        assert_eq!(e1a[0].field::<Field11A>().and_then(|f| f.currency().map(String::from)), Some("EUR".to_string()));
    }

    #[test]
    fn sequences_present_and_absent() {
        let m = Mt566::parse(FIN).expect("parse");
        assert!(m.sequence_a().is_some());
        assert!(m.sequence_c().is_none());
        assert!(m.sequence_a1_list().is_empty());
        assert!(m.sequence_f().is_none());
        let e2 = m.sequence_e2().expect("E2");
        assert_eq!(e2.fields::<Field19B>().len(), 2);
        let e1 = m.sequence_e1().expect("E1");
        assert_eq!(SequenceE1a::from_block(e1.tags()).map(|s| s.tags().len()), Some(3));
    }

    #[test]
    fn build_programmatically() {
        let mut m = Mt566::with_headers("BANKBEBB", "BANKDEFF");
        m.append_block(
            SequenceA::from_tags(&[Field20C::new(":SEME//X").to_tag(), Field23G::new("NEWM").to_tag()]).tags(),
        );
        let again = Mt566::parse(&m.to_fin()).expect("reparse");
        assert_eq!(again, m);
        assert_eq!(again.sequence_a().map(|s| s.tags().len()), Some(4));
    }

    #[test]
    fn wrong_type_still_wraps() {
        let m = Mt566::parse(&FIN.replace("I566", "I575")).expect("parse");
        assert_eq!(m.message_type(), "566");
        assert_eq!(m.swift_message().message_type(), Some("575"));
        assert_eq!(m.field_20c().len(), 2);
    }
}
