#![expect(missing_docs)]

use jsongate::{
    ArrOptions, At, ErrorKind, IntOptions, ObjOptions, Session, Slot, StrOptions, Whitespace,
};
use quickcheck_macros::quickcheck;

fn parsed(json: &str) -> Session<'static> {
    let mut session = Session::new();
    if let Err(err) = session.parse(json) {
        panic!("{}", session.describe_with(&err, "<", ">"));
    }
    session
}

/// Parses `json`, copies the tree into a builder and generates it compactly.
fn regenerate(json: &str) -> String {
    let source = parsed(json);
    let mut copy = Session::new();
    copy.set_value(Slot::Root, source.get_value(At::Root).unwrap())
        .unwrap();
    copy.generate(&Whitespace {
        compact: true,
        ..Whitespace::default()
    })
    .unwrap()
}

#[test]
fn reads_a_service_configuration() {
    let session = parsed(
        r#"{
            "service": "gate",
            "listen": {"host": "0.0.0.0", "port": 8443},
            "upstreams": ["10.0.0.1", "10.0.0.2"],
            "timeout_ms": 1500,
            "tls": true,
            "motd": ""
        }"#,
    );
    let root = session.get_obj(At::Root, &ObjOptions::default()).unwrap();
    let listen = session
        .get_obj(
            root.at("listen"),
            &ObjOptions {
                min: 2,
                max: 2,
                ..Default::default()
            },
        )
        .unwrap();
    let port: u16 = session
        .get_int(listen.at("port"), &IntOptions::default())
        .unwrap();
    assert_eq!(port, 8443);

    let upstreams = session
        .get_arr(
            root.at("upstreams"),
            &ArrOptions {
                min: 1,
                min_reason: Some("at least one upstream is needed"),
                ..Default::default()
            },
        )
        .unwrap();
    let hosts: Vec<String> = upstreams
        .iter()
        .map(|at| {
            session
                .get_str(at, &StrOptions::default())
                .unwrap()
                .as_str()
                .unwrap()
                .to_owned()
        })
        .collect();
    assert_eq!(hosts, ["10.0.0.1", "10.0.0.2"]);

    let retries: u8 = session
        .get_int(
            root.at("retries"),
            &IntOptions {
                default: Some(3),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(retries, 3);

    let motd = session
        .get_str(
            root.at("motd"),
            &StrOptions {
                null_if_empty: true,
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(motd.as_str(), None);
}

#[test]
fn count_bounds_report_the_violated_bound() {
    let one = parsed("[1]");
    let two = parsed("[1, 2]");
    let opts = ArrOptions {
        min: 2,
        ..Default::default()
    };
    let err = one.get_arr(At::Root, &opts).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::ArrTooShort { min: 2 }));
    assert_eq!(two.get_arr(At::Root, &opts).unwrap().len(), 2);
}

#[test]
fn numeric_boundaries() {
    for ok in ["0", "0.5", "-0"] {
        parsed(ok);
    }
    let cases: [(&str, fn(&ErrorKind) -> bool); 4] = [
        ("01", |k| matches!(k, ErrorKind::NumLeadZero)),
        ("1.", |k| matches!(k, ErrorKind::NumPointNoDigit)),
        (".5", |k| matches!(k, ErrorKind::InvalidType)),
        ("1e", |k| matches!(k, ErrorKind::NumExpHeadInvalid)),
    ];
    for (json, expected) in cases {
        let mut session = Session::new();
        let err = session.parse(json).unwrap_err();
        assert!(expected(err.kind()), "{json}: {err}");
    }
}

#[test]
fn surrogate_escapes() {
    let session = parsed(r#""\uD83D\uDE00""#);
    let s = session.get_str(At::Root, &StrOptions::default()).unwrap();
    assert_eq!(s.as_str(), Some("\u{1f600}"));

    for lone in [r#""\uD83D""#, r#""\uDE00""#] {
        let mut session = Session::new();
        let err = session.parse(lone).unwrap_err();
        assert!(
            matches!(
                err.kind(),
                ErrorKind::StrUtf16UnpairedHigh | ErrorKind::StrUtf16UnpairedLow
            ),
            "{lone}: {err}"
        );
    }
}

#[test]
fn duplicate_keys_are_rejected_everywhere() {
    for json in [
        r#"{"k": 1, "k": 2}"#,
        r#"[[{"deep": {"k": 1, "k": 2}}]]"#,
        r#"{"a": {"b": [{"x": null, "y": null, "x": null}]}}"#,
    ] {
        let mut session = Session::new();
        let err = session.parse(json).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ObjDuplicateKey), "{json}");
    }
}

#[test]
fn regenerated_documents_are_stable() {
    for json in [
        "null",
        "[true, false, -0, 1.5e+10, \"\\ud83d\\ude00\"]",
        "{\"a\": {\"b\": [1, {\"c\": []}]}, \"d\": \"tab\\there\"}",
        "  {\"spaced\" :\t[ 1 ,2 ] }\n",
    ] {
        let once = regenerate(json);
        let twice = regenerate(&once);
        assert_eq!(once, twice, "{json}");
    }
}

#[test]
fn regenerating_drops_insignificant_whitespace() {
    assert_eq!(
        regenerate("  {\"spaced\" :\t[ 1 ,2 ] , \"e\": {} }\n"),
        "{\"spaced\":[1,2],\"e\":{}}"
    );
}

#[quickcheck]
fn any_string_survives_a_round_trip(text: String) -> bool {
    let mut builder = Session::new();
    builder.set_str(Slot::Root, &text).unwrap();
    let json = builder.generate(&Whitespace::default()).unwrap();
    let reader = parsed(&json);
    let s = reader.get_str(At::Root, &StrOptions::default()).unwrap();
    s.as_str() == Some(text.as_str()) && s.chars() == text.chars().count()
}
