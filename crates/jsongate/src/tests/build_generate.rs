use alloc::string::String;

use crate::{
    ArrOptions, At, BoolOptions, ErrorKind, FloatOptions, IntOptions, ObjOptions, Phase, Session,
    Slot, StrOptions, Whitespace,
};

fn compact() -> Whitespace {
    Whitespace {
        compact: true,
        ..Whitespace::default()
    }
}

#[test]
fn built_values_read_back_unchanged() {
    let mut builder = Session::new();
    let root = builder.set_obj(Slot::Root).unwrap();
    builder.set_str(root.key("text"), "line\n\"quoted\"\t\u{1}").unwrap();
    builder.set_num(root.key("neg"), -42i64).unwrap();
    builder.set_num(root.key("big"), u64::MAX).unwrap();
    builder.set_num(root.key("pi"), core::f64::consts::PI).unwrap();
    builder.set_bool(root.key("yes"), true).unwrap();
    let list = builder.set_arr(root.key("list")).unwrap();
    builder.set_null(list.push()).unwrap();
    let inner = builder.set_obj(list.push()).unwrap();
    builder.set_str(inner.key("k\u{e9}y"), "\u{1f600}").unwrap();
    let json = builder.generate(&Whitespace::default()).unwrap();

    let mut reader = Session::new();
    reader.parse(&json).unwrap();
    let root = reader.get_obj(At::Root, &ObjOptions::default()).unwrap();
    let text = reader
        .get_str(root.at("text"), &StrOptions::default())
        .unwrap();
    assert_eq!(text.as_str(), Some("line\n\"quoted\"\t\u{1}"));
    assert_eq!(
        reader
            .get_int::<i64>(root.at("neg"), &IntOptions::default())
            .unwrap(),
        -42
    );
    assert_eq!(
        reader
            .get_int::<u64>(root.at("big"), &IntOptions::default())
            .unwrap(),
        u64::MAX
    );
    let pi: f64 = reader
        .get_float(root.at("pi"), &FloatOptions::default())
        .unwrap();
    assert_eq!(pi.to_bits(), core::f64::consts::PI.to_bits());
    assert!(
        reader
            .get_bool(root.at("yes"), &BoolOptions::default())
            .unwrap()
    );
    let list = reader
        .get_arr(root.at("list"), &ArrOptions::default())
        .unwrap();
    reader.get_null(list.at(0)).unwrap();
    let inner = reader
        .get_obj(list.at(1), &ObjOptions::default())
        .unwrap();
    let face = reader
        .get_str(inner.at("k\u{e9}y"), &StrOptions::default())
        .unwrap();
    assert_eq!(face.as_str(), Some("\u{1f600}"));
}

#[test]
fn control_characters_are_escaped() {
    let mut session = Session::new();
    session.set_str(Slot::Root, "a\u{0}\u{1f}\u{8}/").unwrap();
    assert_eq!(
        session.generate(&compact()).unwrap(),
        "\"a\\u0000\\u001F\\b/\""
    );
}

#[test]
fn slot_misuse_is_reported() {
    let mut session = Session::new();
    let root = session.set_obj(Slot::Root).unwrap();
    let err = session.set_null(Slot::Root).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::RootAlreadySet));
    let err = session.set_null(root.push()).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::SetNotArr));

    let arr = session.set_arr(root.key("arr")).unwrap();
    let err = session.set_null(arr.key("x")).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::SetNotObj));
    let scalar = session.set_num(arr.push(), 1u8).unwrap();
    let err = session.set_null(scalar.push()).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::SetNotArr));

    let err = session.set_bool(root.key("arr"), true).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::SetDuplicateKey { key } if key == "arr"));

    session.set_str(root.key("q\""), "v").unwrap();
    let err = session.set_null(root.key("q\"")).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::SetDuplicateKey { .. }));

    assert_eq!(
        session.generate(&compact()).unwrap(),
        "{\"arr\":[1],\"q\\\"\":\"v\"}"
    );
}

#[test]
fn caller_strings_are_written_verbatim() {
    let owned = String::from("tab\\there");
    let mut session = Session::new();
    let arr = session.set_arr(Slot::Root).unwrap();
    session.set_caller_str(arr.push(), &owned).unwrap();
    session.set_json_str(arr.push(), "\\u00e9").unwrap();
    session.set_str(arr.push(), "\\").unwrap();
    assert_eq!(
        session.generate(&compact()).unwrap(),
        "[\"tab\\there\",\"\\u00e9\",\"\\\\\"]"
    );
}

#[test]
fn reset_allows_switching_between_reading_and_writing() {
    let mut session = Session::new();
    session.parse("[1]").unwrap();
    assert!(matches!(
        session.set_null(Slot::Root).unwrap_err().kind(),
        ErrorKind::StateNotSet
    ));
    assert!(matches!(
        session.generate(&compact()).unwrap_err().kind(),
        ErrorKind::StateNotGenerate
    ));

    session.reset();
    session.set_num(Slot::Root, 2.5f32).unwrap();
    assert!(matches!(
        session.parse("[]").unwrap_err().kind(),
        ErrorKind::StateNotParse
    ));
    assert!(matches!(
        session.get_type(At::Root).unwrap_err().kind(),
        ErrorKind::StateNotGet
    ));
    assert_eq!(session.generate(&compact()).unwrap(), "2.5");
    assert_eq!(session.phase(), Phase::Renderable);

    session.reset();
    session.parse("{}").unwrap();
    assert_eq!(session.phase(), Phase::Parsing);
}

#[test]
fn final_newline_is_opt_in_for_strings() {
    let mut session = Session::new();
    session.set_arr(Slot::Root).unwrap();
    assert_eq!(session.generate(&Whitespace::default()).unwrap(), "[]");
    let ws = Whitespace {
        final_newline: Some(true),
        ..Whitespace::default()
    };
    assert_eq!(session.generate(&ws).unwrap(), "[]\n");
    assert_eq!(session.generate_into(&ws, None).unwrap(), 3);
}

#[test]
fn parsed_documents_can_be_copied_and_regenerated() {
    let mut source = Session::new();
    source
        .parse("{\"list\": [1.50, -0, \"\\u00e9\"], \"empty\": {}, \"t\": true}")
        .unwrap();
    let root = source.get_obj(At::Root, &ObjOptions::default()).unwrap();
    let list = source.get_value(root.at("list")).unwrap();

    let mut copy = Session::new();
    let top = copy.set_obj(Slot::Root).unwrap();
    copy.set_value(top.key("copied"), list).unwrap();
    copy.set_value(top.key("all"), source.get_value(At::Root).unwrap())
        .unwrap();
    assert_eq!(
        copy.generate(&Whitespace::default()).unwrap(),
        "{\n  \"copied\": [1.50, -0, \"\\u00e9\"],\n  \"all\": {\n    \"list\": [1.50, -0, \"\\u00e9\"],\n    \"empty\": {},\n    \"t\": true\n  }\n}"
    );
}

#[test]
fn deeply_nested_documents_generate_without_recursion() {
    const DEPTH: usize = 200_000;
    let mut session = Session::new();
    let mut arr = session.set_arr(Slot::Root).unwrap();
    for _ in 1..DEPTH {
        arr = session.set_arr(arr.push()).unwrap();
    }
    let obj = session.set_obj(arr.push()).unwrap();
    session.set_num(obj.key("k"), 1u8).unwrap();

    let json = session.generate(&compact()).unwrap();
    assert_eq!(json.len(), 2 * DEPTH + "{\"k\":1}".len());
    assert!(json[..DEPTH].bytes().all(|b| b == b'['));
    assert!(json[DEPTH..].starts_with("{\"k\":1}]"));
    assert!(json[json.len() - DEPTH..].bytes().all(|b| b == b']'));
    assert_eq!(session.generate_into(&compact(), None).unwrap(), json.len());

    let pretty = session.generate(&Whitespace::default()).unwrap();
    assert!(pretty.ends_with("[{\n  \"k\": 1\n}]]"));
}
