//! Integration tests: FIN file to typed MT wrapper, sequences, validation, config and RJE batches.

use std::io::Write;
use swiftmt::config::Config;
use swiftmt::field::{Field, Field19B, Field22F, Field98A};
use swiftmt::mt::mt566::{SequenceA, SequenceE1, SequenceE1a, SequenceE2};
use swiftmt::rje::{decode_batch, encode_batch};
use swiftmt::validate::{has_errors, Rule};
use swiftmt::{parse, validate, Mt566, Mt575, MtMessage, Sequence, SwiftMessage, Tag, TagList};

const MT566: &str = "{1:F01BANKBEBBAXXX2222123456}{2:O5661200240131BANKDEFFAXXX11112233442401311201N}{3:{108:CONF566}}{4:\r\n\
:16R:GENL\r\n\
:20C::CORP//CA-2024-01\r\n\
:20C::SEME//CONF566\r\n\
:23G:NEWM\r\n\
:22F::CAEV//DVCA\r\n\
:98C::PREP//20240131120000\r\n\
:16R:LINK\r\n\
:20C::RELA//NOTIF1\r\n\
:16S:LINK\r\n\
:16S:GENL\r\n\
:16R:USECU\r\n\
:97A::SAFE//ACC-1\r\n\
:35B:ISIN US0378331005\r\n\
APPLE INC\r\n\
:16R:FIA\r\n\
:11A::DENO//USD\r\n\
:16S:FIA\r\n\
:93B::CONB//UNIT/1500,\r\n\
:16S:USECU\r\n\
:16R:CADETL\r\n\
:98A::XDTE//20240115\r\n\
:98A::RDTE//20240116\r\n\
:98A::PAYD//20240131\r\n\
:16S:CADETL\r\n\
:16R:CACONF\r\n\
:13A::CAON//001\r\n\
:22F::CAOP//CASH\r\n\
:16R:CASHMOVE\r\n\
:22H::CRDB//CRED\r\n\
:97A::CASH//CASH-1\r\n\
:19B::PSTA//USD360,\r\n\
:19B::GRSS//USD360,\r\n\
:19B::WITF//USD54,\r\n\
:92A::TAXR//15,\r\n\
:98A::POST//20240131\r\n\
:98A::VALU//20240131\r\n\
:16S:CASHMOVE\r\n\
:16S:CACONF\r\n\
:16R:ADDINFO\r\n\
:70E::ADTX//QUARTERLY DIVIDEND\r\n\
:16S:ADDINFO\r\n\
-}{5:{CHK:0123456789AB}}";

#[test]
fn test_parse_mt566_confirmation() {
    let mt = Mt566::parse(MT566).expect("parse");
    assert_eq!(mt.message_type(), "566");
    assert_eq!(mt.swift_message().sender(), Some("BANKDEFFAXXX"));
    assert_eq!(mt.swift_message().mur(), Some("CONF566"));
    assert_eq!(mt.corporate_action_event().as_deref(), Some("DVCA"));

    let payd = mt
        .field_98a()
        .into_iter()
        .find(|f| f.qualifier() == Some("PAYD"))
        .and_then(|f| f.date());
    assert_eq!(payd.map(|d| d.to_string()), Some("2024-01-31".to_string()));

    let cash = mt.sequence_e2().expect("cash movement");
    let amounts: Vec<String> = cash
        .fields::<Field19B>()
        .iter()
        .filter_map(|f| f.amount())
        .map(|d| d.normalize().to_string())
        .collect();
    assert_eq!(amounts, vec!["360", "360", "54"]);
    assert!(mt.sequence_e1().is_none());
    assert!(mt.sequence_e1a_list().is_empty());
}

#[test]
fn test_validate_parsed_message() {
    let m = parse(MT566).expect("parse");
    let findings = validate(&m, &Config::default().validation);
    assert!(findings.is_empty(), "{:?}", findings);

    let broken = MT566.replace(":16S:FIA\r\n", "");
    let m = parse(&broken).expect("parse");
    let findings = validate(&m, &Config::default().validation);
    assert!(has_errors(&findings));
    assert_eq!(
        findings.iter().filter(|f| f.rule == Rule::UnclosedSequence).count(),
        1
    );
}

#[test]
fn test_from_path_and_reader() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(MT566.as_bytes()).expect("write");
    let from_path = Mt566::from_path(file.path()).expect("from_path");
    let from_reader = Mt566::from_reader(MT566.as_bytes()).expect("from_reader");
    assert_eq!(from_path, from_reader);
    assert!(Mt566::from_path(file.path().with_extension("missing")).is_err());
}

#[test]
fn test_json_and_fin_roundtrip() {
    let mt = Mt566::parse(MT566).expect("parse");
    let json = mt.to_json().expect("to_json");
    assert!(json.contains("\"direction\": \"output\""));
    let back = Mt566::from_json(&json).expect("from_json");
    assert_eq!(back, mt);
    assert_eq!(mt.to_fin(), MT566);
}

#[test]
fn test_build_and_append() {
    let mut mt = Mt566::with_headers("BANKBEBB", "BANKDEFFXXX");
    let genl = SequenceA::from_tags(&[
        Tag::new("20C", ":SEME//OUT1"),
        Tag::new("23G", "NEWM"),
        Field22F::new(":CAEV//INTR").to_tag(),
    ]);
    let fia = SequenceE1a::from_tags(&[Tag::new("11A", ":DENO//EUR")]);
    let secmove = SequenceE1::from_tags(&fia.into_tag_list().into_tags());
    let mut caconf = vec![Tag::new("13A", ":CAON//001")];
    caconf.extend(secmove.into_tag_list().into_tags());
    caconf.extend(SequenceE2::empty().into_tag_list().into_tags());

    mt.append_block(genl.tags())
        .append(Tag::start("CACONF"))
        .append_block(&TagList::from_tags(caconf))
        .append(Tag::end("CACONF"));

    assert_eq!(mt.corporate_action_event().as_deref(), Some("INTR"));
    assert_eq!(mt.sequence_e1a_list().len(), 1);
    assert!(mt.sequence_b1().is_none());
    let reparsed = Mt566::parse(&mt.to_fin()).expect("reparse");
    assert_eq!(reparsed, mt);
}

#[test]
fn test_wrong_type_and_service_message() {
    let mt = Mt575::parse(MT566).expect("parse");
    assert_eq!(mt.message_type(), "575");
    assert!(mt.swift_message().is_type("566"));

    let ack = Mt566::parse("{1:F21BANKBEBBAXXX2222123456}{4:{177:2401311200}{451:0}}").expect("parse");
    assert!(ack.swift_message().is_service_message());
    assert!(ack.field_23g().is_none());
    assert!(ack.sequence_a().is_none());
}

#[test]
fn test_config_from_toml_file() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(file, "[parser]\nallow_unknown_blocks = false\n\n[validation]\ncheck_mandatory = false").expect("write");
    let config = Config::load(file.path()).expect("load");
    assert!(!config.parser.allow_unknown_blocks);
    assert!(!config.validation.check_mandatory);
    assert!(config.validation.check_repetition);

    let with_trailer = format!("{}{{S:{{TNG:}}}}", MT566);
    assert!(swiftmt::parser::parse_with(&with_trailer, &config.parser).is_err());
    assert!(parse(&with_trailer).is_ok());
}

#[test]
fn test_rje_batch() {
    let second = MT566.replace("CONF566", "CONF567");
    let src = format!("{}\r\n$\r\n{{1:broken\r\n$\r\n{}\r\n", MT566, second);
    let batch = decode_batch(&src, &Config::default().parser);
    assert_eq!(batch.messages.len(), 2);
    assert_eq!(batch.rejected.len(), 1);
    assert_eq!(batch.rejected[0].index, 1);

    let messages: Vec<SwiftMessage> = batch.messages.into_iter().map(|d| d.message).collect();
    let again = decode_batch(&encode_batch(&messages), &Config::default().parser);
    assert_eq!(again.messages.len(), 2);
    assert_eq!(again.messages[1].message.mur(), Some("CONF567"));
    let mt: Mt566 = again.messages[0].message.clone().into();
    assert_eq!(
        mt.sequence_a().and_then(|a| a.field::<Field98A>()),
        None
    );
}
