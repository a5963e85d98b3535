use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use quickcheck::{Arbitrary, Gen, QuickCheck};

use crate::{
    ArrOptions, At, BoolOptions, FloatOptions, Indent, IntOptions, JsonType, Newline, ObjOptions,
    Session, Slot, StrOptions, Whitespace,
};

/// Owned mirror of a document, compared by value.
#[derive(Debug, Clone, PartialEq)]
enum Tree {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Arr(Vec<Tree>),
    Obj(Vec<(String, Tree)>),
}

impl Arbitrary for Tree {
    fn arbitrary(g: &mut Gen) -> Self {
        fn scalar(g: &mut Gen) -> Tree {
            match usize::arbitrary(g) % 5 {
                0 => Tree::Null,
                1 => Tree::Bool(bool::arbitrary(g)),
                2 => Tree::Int(i64::arbitrary(g)),
                3 => {
                    let mut value = f64::arbitrary(g);
                    while !value.is_finite() {
                        value = f64::arbitrary(g);
                    }
                    Tree::Float(value)
                }
                _ => Tree::Str(String::arbitrary(g)),
            }
        }

        fn gen_tree(g: &mut Gen, depth: usize) -> Tree {
            if depth == 0 {
                return scalar(g);
            }
            match usize::arbitrary(g) % 4 {
                0 => Tree::Arr(
                    (0..usize::arbitrary(g) % 4)
                        .map(|_| gen_tree(g, depth - 1))
                        .collect(),
                ),
                1 => {
                    let mut pairs: Vec<(String, Tree)> = Vec::new();
                    for _ in 0..usize::arbitrary(g) % 4 {
                        let key = String::arbitrary(g);
                        if pairs.iter().all(|(k, _)| *k != key) {
                            pairs.push((key, gen_tree(g, depth - 1)));
                        }
                    }
                    Tree::Obj(pairs)
                }
                _ => scalar(g),
            }
        }

        let depth = usize::arbitrary(g) % 4;
        gen_tree(g, depth)
    }
}

#[derive(Debug, Clone)]
struct Layout(Whitespace);

impl Arbitrary for Layout {
    fn arbitrary(g: &mut Gen) -> Self {
        Layout(Whitespace {
            indent: usize::arbitrary(g) % 5,
            indent_with: if bool::arbitrary(g) {
                Indent::Tabs
            } else {
                Indent::Spaces
            },
            newline: if bool::arbitrary(g) {
                Newline::CrLf
            } else {
                Newline::Lf
            },
            compact: bool::arbitrary(g),
            final_newline: Option::arbitrary(g),
        })
    }
}

fn build(session: &mut Session<'_>, slot: Slot<'_>, tree: &Tree) {
    match tree {
        Tree::Null => {
            session.set_null(slot).unwrap();
        }
        Tree::Bool(b) => {
            session.set_bool(slot, *b).unwrap();
        }
        Tree::Int(n) => {
            session.set_num(slot, *n).unwrap();
        }
        Tree::Float(f) => {
            session.set_num(slot, *f).unwrap();
        }
        Tree::Str(s) => {
            session.set_str(slot, s).unwrap();
        }
        Tree::Arr(items) => {
            let arr = session.set_arr(slot).unwrap();
            for item in items {
                build(session, arr.push(), item);
            }
        }
        Tree::Obj(pairs) => {
            let obj = session.set_obj(slot).unwrap();
            for (key, value) in pairs {
                build(session, obj.key(key), value);
            }
        }
    }
}

fn read<'s>(session: &'s Session<'_>, at: At<'s>) -> Tree {
    match session.get_type(at).unwrap() {
        JsonType::Null => Tree::Null,
        JsonType::Bool => Tree::Bool(session.get_bool(at, &BoolOptions::default()).unwrap()),
        JsonType::Number => match session.get_int::<i64>(at, &IntOptions::default()) {
            Ok(n) => Tree::Int(n),
            Err(_) => Tree::Float(session.get_float(at, &FloatOptions::default()).unwrap()),
        },
        JsonType::String => Tree::Str(
            session
                .get_str(at, &StrOptions::default())
                .unwrap()
                .into_text()
                .unwrap_or_default()
                .into_owned(),
        ),
        JsonType::Array => {
            let arr = session.get_arr(at, &ArrOptions::default()).unwrap();
            Tree::Arr(arr.iter().map(|at| read(session, at)).collect())
        }
        JsonType::Object => {
            let obj = session.get_obj(at, &ObjOptions::default()).unwrap();
            Tree::Obj(
                obj.keys()
                    .map(|key| {
                        let value = read(session, obj.at(&key));
                        (key.to_string(), value)
                    })
                    .collect(),
            )
        }
    }
}

fn reparse(json: &str) -> Session<'static> {
    let mut session = Session::new();
    session.parse(json).unwrap();
    session
}

/// Property: a built document survives generate → parse → read, and copying
/// the parsed document into a new builder reproduces it again.
#[test]
fn build_generate_parse_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(tree: Tree, first: Layout, second: Layout) -> bool {
        let mut builder = Session::new();
        build(&mut builder, Slot::Root, &tree);
        let json = builder.generate(&first.0).unwrap();
        let parsed = reparse(&json);
        if read(&parsed, At::Root) != tree {
            return false;
        }

        let mut copy = Session::new();
        copy.set_value(Slot::Root, parsed.get_value(At::Root).unwrap())
            .unwrap();
        let again = copy.generate(&second.0).unwrap();
        read(&reparse(&again), At::Root) == tree
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Tree, Layout, Layout) -> bool);
}

/// Property: the measured size always equals the generated length.
#[test]
fn measured_size_matches_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(tree: Tree, layout: Layout) -> bool {
        let mut builder = Session::new();
        build(&mut builder, Slot::Root, &tree);
        let needed = builder.generate_into(&layout.0, None).unwrap();
        let mut buf = alloc::vec![0u8; needed];
        let written = builder.generate_into(&layout.0, Some(&mut buf)).unwrap();
        written == needed && buf == builder.generate(&layout.0).unwrap().as_bytes()
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Tree, Layout) -> bool);
}
