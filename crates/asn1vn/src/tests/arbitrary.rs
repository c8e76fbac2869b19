use alloc::{
    boxed::Box,
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt::{self, Write};

use quickcheck::{Arbitrary, Gen};

const IDENTIFIERS: &[&str] = &["value1", "v", "profile_2", "pe42"];
const TYPES: &[&str] = &["ProfileElement", "T", "Header_1", "PE_MF"];
const KEYS: &[&str] = &[
    "major-version",
    "iccid",
    "usim",
    "fileDescriptor",
    "ef-pl",
    "k",
    "a_b",
];
const VALUE_NAMES: &[&str] = &["header", "mf", "alt", "pe-usim", "genericFileManagement"];

/// A syntactically valid value.
#[derive(Debug, Clone)]
pub(crate) enum Value {
    /// Keyed members, each optionally written `key : value`.
    Record(Vec<(&'static str, bool, Value)>),
    /// Records nested directly inside a record.
    Records(Vec<Value>),
    /// Scalars separated by whitespace (`false`) or commas (`true`).
    List(Vec<Value>, bool),
    Octets(String),
    Hex(u64),
    Null,
    Number(String),
    Choice(&'static str, Box<Value>),
}

/// One top-level assignment.
#[derive(Debug, Clone)]
pub(crate) struct Assignment {
    pub identifier: &'static str,
    pub ty: &'static str,
    pub value: Value,
}

/// An assignment whose value is always a non-empty keyed record.
#[derive(Debug, Clone)]
pub(crate) struct RecordAssignment(pub Assignment);

fn pick(g: &mut Gen, names: &'static [&'static str]) -> &'static str {
    g.choose(names).copied().unwrap_or("x")
}

fn gen_number(g: &mut Gen) -> String {
    let int = u32::arbitrary(g);
    match u8::arbitrary(g) % 5 {
        0 => "0".into(),
        1 => format!("{int}.{}", u8::arbitrary(g)),
        2 => format!("{int}e{}", u8::arbitrary(g)),
        3 => {
            let sign = if bool::arbitrary(g) { '+' } else { '-' };
            format!("{int}.{}E{sign}{}", u16::arbitrary(g), u8::arbitrary(g))
        }
        _ => int.to_string(),
    }
}

fn gen_scalar(g: &mut Gen) -> Value {
    match u8::arbitrary(g) % 3 {
        0 => Value::Octets(
            String::arbitrary(g)
                .chars()
                .filter(|&c| c >= ' ' && c != '"')
                .collect(),
        ),
        1 => Value::Hex(u64::arbitrary(g)),
        _ => Value::Number(gen_number(g)),
    }
}

fn gen_record(g: &mut Gen, depth: usize, min_len: usize) -> Value {
    let len = min_len + usize::arbitrary(g) % 3;
    Value::Record(
        (0..len)
            .map(|_| (pick(g, KEYS), bool::arbitrary(g), gen_value(g, depth)))
            .collect(),
    )
}

fn gen_value(g: &mut Gen, depth: usize) -> Value {
    if depth == 0 {
        return match u8::arbitrary(g) % 4 {
            0 => Value::Null,
            _ => gen_scalar(g),
        };
    }
    match u8::arbitrary(g) % 8 {
        0 => Value::Null,
        1 | 2 => gen_scalar(g),
        3 => Value::Choice(pick(g, VALUE_NAMES), Box::new(gen_value(g, depth - 1))),
        4 => {
            let len = 1 + usize::arbitrary(g) % 4;
            Value::List((0..len).map(|_| gen_scalar(g)).collect(), bool::arbitrary(g))
        }
        5 => {
            let len = usize::arbitrary(g) % 3;
            Value::Records((0..len).map(|_| gen_record(g, depth - 1, 0)).collect())
        }
        _ => gen_record(g, depth - 1, 0),
    }
}

impl Arbitrary for Assignment {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 4;
        Self {
            identifier: pick(g, IDENTIFIERS),
            ty: pick(g, TYPES),
            value: gen_value(g, depth),
        }
    }
}

impl Arbitrary for RecordAssignment {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 3;
        let record = gen_record(g, depth, 1);
        let value = if bool::arbitrary(g) {
            Value::Choice(pick(g, VALUE_NAMES), Box::new(record))
        } else {
            record
        };
        Self(Assignment {
            identifier: pick(g, IDENTIFIERS),
            ty: pick(g, TYPES),
            value,
        })
    }
}

/// A list in which one member directly follows its predecessor, which must be
/// rejected at the first byte of that member.
#[derive(Debug, Clone)]
pub(crate) struct TouchingListMembers {
    pub src: String,
    pub offset: u64,
}

impl Arbitrary for TouchingListMembers {
    fn arbitrary(g: &mut Gen) -> Self {
        let first = gen_scalar(g);
        let mut second = gen_scalar(g);
        // Adjacent digits would just make one longer number.
        if matches!((&first, &second), (Value::Number(_), Value::Number(_))) {
            second = Value::Hex(u64::arbitrary(g));
        }
        let mut src = String::from("v T ::= { ");
        for _ in 0..usize::arbitrary(g) % 3 {
            let _ = write!(src, "{} ", gen_scalar(g));
        }
        let _ = write!(src, "{first}");
        let offset = src.len() as u64 + 1;
        let _ = write!(src, "{second}");
        for _ in 0..usize::arbitrary(g) % 3 {
            let _ = write!(src, ", {}", gen_scalar(g));
        }
        src.push_str(" }");
        Self { src, offset }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Value], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Record(members) if members.is_empty() => f.write_str("{}"),
            Value::Record(members) => {
                f.write_str("{\n")?;
                for (i, (key, marked, value)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",\n")?;
                    }
                    let marker = if *marked { " :" } else { "" };
                    write!(f, "  {key}{marker} {value}")?;
                }
                f.write_str("\n}")
            }
            Value::Records(records) => {
                f.write_str("{ ")?;
                write_joined(f, records, ", ")?;
                f.write_str(" }")
            }
            Value::List(items, commas) => {
                f.write_str("{ ")?;
                write_joined(f, items, if *commas { ", " } else { " " })?;
                f.write_str(" }")
            }
            Value::Octets(s) => write!(f, "\"{s}\""),
            Value::Hex(h) => write!(f, "'{h:X}'H"),
            Value::Null => f.write_str("NULL"),
            Value::Number(n) => f.write_str(n),
            Value::Choice(name, value) => write!(f, "{name} : {value}"),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ::= {}", self.identifier, self.ty, self.value)
    }
}
