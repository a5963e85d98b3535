#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsongate::{At, Indent, Newline, ParseOptions, Session, Slot, Whitespace};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 1; // layout flags

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

/// JSON whitespace, plus bytes the parser must reject between tokens.
static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r", b"\r\n", b"\x0b", b"\x0c"];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8);
        let mut prefix = HEADER;
        let limit = max_size - prefix;
        prefix += append_whitespace(&mut data[prefix..], limit);
        prefix += append_value(&mut data[prefix..], size.max(8), max_size - prefix);
        prefix += append_whitespace(&mut data[prefix..], max_size - prefix);
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }
        let mut written = 0;
        for _ in 0..rng.random_range(0..=limit.min(4)) {
            let w = WS_TABLE[rng.random_range(0..WS_TABLE.len())];
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");
    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3 => Value::Number(u.arbitrary::<i64>()?.into()),
            4..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

fn layout(flags: u8) -> Whitespace {
    Whitespace {
        indent: usize::from(flags >> 5),
        indent_with: if flags & 1 != 0 {
            Indent::Tabs
        } else {
            Indent::Spaces
        },
        newline: if flags & 2 != 0 {
            Newline::CrLf
        } else {
            Newline::Lf
        },
        compact: flags & 4 != 0,
        final_newline: Some(flags & 8 != 0),
    }
}

/// Any accepted input must copy into a builder, generate into exactly the
/// measured size, and parse again.
fn roundtrip(data: &[u8]) {
    let Some((&flags, json)) = data.split_first() else {
        return;
    };

    let mut source = Session::new();
    let accepted = if flags & 16 != 0 {
        source.parse_borrowed(json)
    } else {
        source.parse(json)
    };
    if accepted.is_err() {
        return;
    }

    let mut copy = Session::new();
    copy.set_value(Slot::Root, source.get_value(At::Root).unwrap())
        .unwrap();
    let ws = layout(flags);
    let text = copy.generate(&ws).unwrap();
    assert_eq!(copy.generate_into(&ws, None).unwrap(), text.len());

    let mut again = Session::with_options(ParseOptions {
        panic_on_error: true,
        ..Default::default()
    });
    again.parse(&text).unwrap();
}

fuzz_target!(|data: &[u8]| roundtrip(data));
