//! The value-notation scanning state machine.
//!
//! Callers reset the scanner and then pass bytes in one at a time. Each byte
//! yields an [`Opcode`]; [`Opcode::End`] reports that a top-level value has
//! been completed *before* the byte just passed in. The report must be
//! delayed in order to recognize the end of numbers: is `123` a whole value
//! or the beginning of `12345e+6`? [`Scanner::end_of_input`] resolves such a
//! pending literal by feeding one synthetic space.
//!
//! Grammar, at a glance:
//!
//! ```text
//! top      := identifier Type "::=" value
//! value    := record | octets | hex | "NULL" | number | name ":" value
//! record   := "{" [ member { "," member } ] "}"
//!           | "{" value { (ws | ",") value } "}"     (bare value list)
//! member   := key ws [":"] value | record
//! octets   := '"' { byte >= 0x20 except '"' } '"'
//! hex      := "'" { byte >= 0x20 except "'" } "'H"
//! number   := ("0" | [1-9][0-9]*) ["." [0-9]+] [("e"|"E") ["+"|"-"] [0-9]+]
//! ```

use alloc::{format, string::String, vec::Vec};

use crate::{
    error::{ErrorKind, SyntaxError},
    literal_buffer::{ExpectedLiteralBuffer, Step},
    opcode::{Opcode, ParseContext},
    options::ScannerOptions,
};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Beginning of a top-level assignment.
    BeginTop,
    /// Inside the identifier or the type name of an assignment.
    InName,
    /// Whitespace after the identifier or the type name.
    AfterName,
    /// After the first `:` of `::=`.
    AssignColon,
    /// After `::`.
    AssignEquals,
    BeginValue,
    /// After a record key and its whitespace; a `:` may select a choice.
    BeginMemberValue,
    InValueName,
    AfterValueName,
    /// After `{`.
    BeginMemberOrEmpty,
    /// After `,` in a keyed record.
    BeginMember,
    InKey,
    InOctetString,
    InHexString,
    /// After the closing quote of a hexadecimal string.
    HexSuffix,
    InNull(ExpectedLiteralBuffer),
    /// Non-zero integer digits, such as `1` or `100`.
    Integer,
    /// A lone leading `0`.
    Zero,
    /// After the decimal point, such as `1.`.
    DecimalPoint,
    /// Fraction digits, such as `3.14`.
    DecimalFraction,
    /// After the exponent marker, such as `314e`.
    Exponent,
    /// After the exponent sign, such as `314e-`.
    ExponentSign,
    /// Exponent digits, such as `314e-2`.
    ExponentDigits,
    /// After a completed value, such as `{}` or `NULL`.
    EndValue,
    /// Whitespace after a list member; another member may follow.
    AfterListMember,
    /// After the top-level value; only whitespace or a new assignment.
    EndTop,
    /// Absorbing state after a syntax error.
    Error,
}

/// An ASN.1 value-notation scanning state machine.
///
/// The scanner is reusable: [`Scanner::reset`] prepares it for a new scan
/// without releasing its nesting stack. The byte counter survives `reset` and
/// is zeroed only by [`Scanner::reset_bytes`], so that a caller scanning a
/// stream in several passes keeps absolute offsets.
///
/// # Examples
///
/// ```rust
/// use asn1vn::{Opcode, Scanner};
///
/// let mut scanner = Scanner::default();
/// let ops: Vec<Opcode> = b"v T ::= 5".iter().map(|&c| scanner.feed(c)).collect();
/// assert_eq!(ops[0], Opcode::BeginIdentifierOrType);
/// assert_eq!(ops[8], Opcode::BeginLiteral);
/// // The number is still open; only the end of input can close it.
/// assert!(scanner.is_pending_literal());
/// assert_eq!(scanner.end_of_input(), Opcode::End);
/// ```
#[derive(Debug, Clone)]
pub struct Scanner {
    state: State,
    end_top: bool,
    contexts: Vec<ParseContext>,
    err: Option<SyntaxError>,
    pub(crate) bytes: u64,
    options: ScannerOptions,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ScannerOptions::default())
    }
}

impl Scanner {
    /// Creates a scanner ready to scan.
    #[must_use]
    pub fn new(options: ScannerOptions) -> Self {
        Self {
            state: State::BeginTop,
            end_top: false,
            contexts: Vec::new(),
            err: None,
            bytes: 0,
            options,
        }
    }

    /// The options in effect.
    #[must_use]
    pub fn options(&self) -> ScannerOptions {
        self.options
    }

    /// Replaces the options. Meant to be called between scans.
    pub fn set_options(&mut self, options: ScannerOptions) {
        self.options = options;
    }

    /// Prepares the scanner for a new scan.
    ///
    /// The nesting stack keeps its allocation. The byte counter is left
    /// untouched.
    pub fn reset(&mut self) {
        self.state = State::BeginTop;
        self.contexts.clear();
        self.err = None;
        self.end_top = false;
    }

    /// Zeroes the byte counter. The owner of a fresh scan calls this.
    pub fn reset_bytes(&mut self) {
        self.bytes = 0;
    }

    /// Bytes consumed through [`Scanner::feed`] since the last
    /// [`Scanner::reset_bytes`].
    #[must_use]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// The recorded syntax error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&SyntaxError> {
        self.err.as_ref()
    }

    /// `Err` with a copy of the recorded syntax error, `Ok` if there is none.
    pub fn result(&self) -> Result<(), SyntaxError> {
        match &self.err {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.contexts.len()
    }

    /// What the innermost nesting level expects, if any level is open.
    #[must_use]
    pub fn context(&self) -> Option<ParseContext> {
        self.contexts.last().copied()
    }

    /// The whole nesting stack, outermost first.
    #[cfg(any(test, feature = "fuzzing"))]
    #[must_use]
    pub fn contexts(&self) -> &[ParseContext] {
        &self.contexts
    }

    /// Whether the current top-level value has been completed.
    #[must_use]
    pub fn is_end_top(&self) -> bool {
        self.end_top
    }

    /// Whether a number is open whose end is only known from the next byte.
    #[must_use]
    pub fn is_pending_literal(&self) -> bool {
        matches!(
            self.state,
            State::Integer | State::Zero | State::DecimalFraction | State::ExponentDigits
        )
    }

    pub(crate) fn stack_capacity(&self) -> usize {
        self.contexts.capacity()
    }

    pub(crate) fn release_stack(&mut self) {
        self.contexts = Vec::new();
    }

    /// Counts `c` as consumed and advances the machine by it.
    ///
    /// This is what drivers call; error offsets come from the count.
    pub fn feed(&mut self, c: u8) -> Opcode {
        self.bytes += 1;
        self.step(c)
    }

    /// Tells the scanner that the input has ended.
    ///
    /// Returns [`Opcode::End`] if the top-level value is complete, resolving a
    /// pending number first, and [`Opcode::Error`] otherwise.
    pub fn end_of_input(&mut self) -> Opcode {
        if self.err.is_some() {
            return Opcode::Error;
        }
        if self.end_top {
            return Opcode::End;
        }
        self.step(b' ');
        if self.end_top {
            return Opcode::End;
        }
        if self.err.is_none() {
            self.state = State::Error;
            self.err = Some(SyntaxError::new(
                ErrorKind::UnexpectedEndOfInput,
                "unexpected end of input".into(),
                self.bytes,
            ));
        }
        Opcode::Error
    }

    /// Advances the machine by one byte without counting it.
    ///
    /// Once an error is recorded every further call returns
    /// [`Opcode::Error`].
    #[expect(clippy::too_many_lines)]
    pub fn step(&mut self, c: u8) -> Opcode {
        use State::*;
        match self.state {
            Error => Opcode::Error,

            // -------------------------- ASSIGNMENT ---------------------------
            BeginTop => self.begin_top(c),
            InName => match c {
                c if is_name_byte(c) => Opcode::Continue,
                c if is_space(c) => {
                    self.state = AfterName;
                    if self.context() == Some(ParseContext::Identifier) {
                        Opcode::EndIdentifierOrType
                    } else {
                        Opcode::Continue
                    }
                }
                b':' if self.context() == Some(ParseContext::Type) => self.end_type(),
                _ => self.fail(c, ErrorKind::UnexpectedByte, "in identifier or type"),
            },
            AfterName => match (self.context(), c) {
                (_, c) if is_space(c) => Opcode::SkipSpace,
                (Some(ParseContext::Identifier), c) if c.is_ascii_alphabetic() => {
                    self.set_context(ParseContext::Type);
                    self.state = InName;
                    Opcode::BeginType
                }
                (Some(ParseContext::Type), b':') => self.end_type(),
                (Some(ParseContext::Type), _) => {
                    self.fail(c, ErrorKind::UnexpectedByte, "after type")
                }
                _ => self.fail(c, ErrorKind::UnexpectedByte, "after identifier or type"),
            },
            AssignColon => {
                if c == b':' {
                    self.state = AssignEquals;
                    return Opcode::Continue;
                }
                self.fail(
                    c,
                    ErrorKind::MalformedOperator,
                    "in assignment operator (expected ':')",
                )
            }
            AssignEquals => {
                if c == b'=' {
                    self.state = BeginValue;
                    return Opcode::Continue;
                }
                self.fail(
                    c,
                    ErrorKind::MalformedOperator,
                    "in assignment operator (expected '=')",
                )
            }

            // -------------------------- VALUE entry --------------------------
            BeginValue => {
                if is_space(c) {
                    return Opcode::SkipSpace;
                }
                self.begin_value(c)
            }
            BeginMemberValue => match c {
                c if is_space(c) => Opcode::SkipSpace,
                // `key : value` selects the alternative `key` of a choice.
                b':' => {
                    self.state = BeginValue;
                    Opcode::Continue
                }
                _ => self.begin_value(c),
            },
            InValueName => match c {
                c if is_key_byte(c) => Opcode::Continue,
                c if is_space(c) => {
                    self.state = AfterValueName;
                    Opcode::Continue
                }
                b':' => self.end_value_name(),
                _ => self.fail(c, ErrorKind::UnexpectedByte, "in value name"),
            },
            AfterValueName => match c {
                c if is_space(c) => Opcode::SkipSpace,
                b':' => self.end_value_name(),
                _ => self.fail(c, ErrorKind::UnexpectedByte, "after value name"),
            },

            // -------------------------- RECORDS ------------------------------
            BeginMemberOrEmpty => match c {
                c if is_space(c) => Opcode::SkipSpace,
                b'}' => self.close_record(),
                b'{' => self.begin_anonymous_record(c),
                c if c.is_ascii_alphabetic() => {
                    self.state = InKey;
                    Opcode::BeginLiteral
                }
                b'"' | b'\'' | b'0'..=b'9' => {
                    self.set_context(ParseContext::ListValue);
                    self.begin_value(c)
                }
                _ => self.fail(
                    c,
                    ErrorKind::UnexpectedByte,
                    "looking for beginning of object key string",
                ),
            },
            BeginMember => match c {
                c if is_space(c) => Opcode::SkipSpace,
                b'{' => self.begin_anonymous_record(c),
                c if c.is_ascii_alphabetic() => {
                    self.state = InKey;
                    Opcode::BeginLiteral
                }
                _ => self.fail(
                    c,
                    ErrorKind::UnexpectedByte,
                    "looking for beginning of object key string",
                ),
            },
            InKey => match c {
                c if is_key_byte(c) => Opcode::Continue,
                c if is_space(c) => {
                    self.set_context(ParseContext::ObjectValue);
                    self.state = BeginMemberValue;
                    Opcode::ObjectKey
                }
                _ => self.fail(c, ErrorKind::UnexpectedByte, "in object key"),
            },

            // -------------------------- LITERALS -----------------------------
            InOctetString => match c {
                b'"' => {
                    self.state = EndValue;
                    Opcode::Continue
                }
                0..0x20 => self.fail(c, ErrorKind::MalformedLiteral, "in string literal"),
                _ => Opcode::Continue,
            },
            InHexString => match c {
                b'\'' => {
                    self.state = HexSuffix;
                    Opcode::Continue
                }
                0..0x20 => self.fail(
                    c,
                    ErrorKind::MalformedLiteral,
                    "in hexadecimal string literal",
                ),
                _ => Opcode::Continue,
            },
            HexSuffix => {
                if c == b'H' {
                    self.state = EndValue;
                    return Opcode::Continue;
                }
                self.fail(
                    c,
                    ErrorKind::MalformedLiteral,
                    "in hexadecimal string (expected 'H')",
                )
            }
            InNull(mut expected) => match expected.step(c) {
                Step::NeedMore => {
                    self.state = InNull(expected);
                    Opcode::Continue
                }
                Step::Done => {
                    self.state = EndValue;
                    Opcode::Continue
                }
                Step::Reject { expected: want } => {
                    let context = format!(
                        "in literal {} (expecting {})",
                        expected.literal(),
                        quote_byte(want)
                    );
                    self.fail(c, ErrorKind::MalformedLiteral, &context)
                }
            },

            // -------------------------- NUMBERS ------------------------------
            Integer if c.is_ascii_digit() => Opcode::Continue,
            Integer | Zero => match c {
                b'.' => {
                    self.state = DecimalPoint;
                    Opcode::Continue
                }
                b'e' | b'E' => {
                    self.state = Exponent;
                    Opcode::Continue
                }
                _ => self.end_value(c),
            },
            DecimalPoint => {
                if c.is_ascii_digit() {
                    self.state = DecimalFraction;
                    return Opcode::Continue;
                }
                self.fail(
                    c,
                    ErrorKind::MalformedLiteral,
                    "after decimal point in numeric literal",
                )
            }
            DecimalFraction => match c {
                c if c.is_ascii_digit() => Opcode::Continue,
                b'e' | b'E' => {
                    self.state = Exponent;
                    Opcode::Continue
                }
                _ => self.end_value(c),
            },
            Exponent if matches!(c, b'+' | b'-') => {
                self.state = ExponentSign;
                Opcode::Continue
            }
            Exponent | ExponentSign => {
                if c.is_ascii_digit() {
                    self.state = ExponentDigits;
                    return Opcode::Continue;
                }
                self.fail(
                    c,
                    ErrorKind::MalformedLiteral,
                    "in exponent of numeric literal",
                )
            }
            ExponentDigits if c.is_ascii_digit() => Opcode::Continue,
            ExponentDigits | EndValue => self.end_value(c),
            AfterListMember => match c {
                c if is_space(c) => Opcode::SkipSpace,
                b',' => {
                    self.state = BeginValue;
                    Opcode::ObjectValue
                }
                b'}' => self.close_record(),
                c if starts_value(c) => self.begin_value(c),
                _ => self.fail(c, ErrorKind::UnexpectedByte, "after list member"),
            },

            EndTop => self.end_top(c),
        }
    }

    fn begin_top(&mut self, c: u8) -> Opcode {
        if is_space(c) {
            return Opcode::SkipSpace;
        }
        if c.is_ascii_alphabetic() {
            self.state = State::InName;
            return self.push(c, ParseContext::Identifier, Opcode::BeginIdentifierOrType);
        }
        self.fail(
            c,
            ErrorKind::UnexpectedByte,
            "looking for beginning of top value",
        )
    }

    fn end_top(&mut self, c: u8) -> Opcode {
        if is_space(c) {
            return Opcode::End;
        }
        if self.options.allow_multiple_top_values {
            self.end_top = false;
            self.state = State::BeginTop;
            return self.begin_top(c);
        }
        self.fail(c, ErrorKind::UnexpectedByte, "after top-level value")
    }

    // The first `:` of `::=` closes the identifier/type level.
    fn end_type(&mut self) -> Opcode {
        self.contexts.pop();
        self.state = State::AssignColon;
        Opcode::EndType
    }

    fn end_value_name(&mut self) -> Opcode {
        self.contexts.pop();
        self.state = State::BeginValue;
        Opcode::Continue
    }

    fn begin_value(&mut self, c: u8) -> Opcode {
        use State::*;
        match c {
            b'{' => {
                self.state = BeginMemberOrEmpty;
                self.push(c, ParseContext::ObjectKey, Opcode::BeginObject)
            }
            b'"' => {
                self.state = InOctetString;
                Opcode::BeginLiteral
            }
            b'\'' => {
                self.state = InHexString;
                Opcode::BeginLiteral
            }
            b'N' => {
                self.state = InNull(ExpectedLiteralBuffer::null());
                Opcode::BeginLiteral
            }
            b'0' => {
                self.state = Zero;
                Opcode::BeginLiteral
            }
            b'1'..=b'9' => {
                self.state = Integer;
                Opcode::BeginLiteral
            }
            b'a'..=b'z' => {
                self.state = InValueName;
                self.push(c, ParseContext::ValueName, Opcode::BeginLiteral)
            }
            _ => self.fail(
                c,
                ErrorKind::UnexpectedByte,
                "looking for beginning of value",
            ),
        }
    }

    // An unkeyed record where a key was expected: strange but valid.
    fn begin_anonymous_record(&mut self, c: u8) -> Opcode {
        self.set_context(ParseContext::ObjectValue);
        self.state = State::BeginMemberOrEmpty;
        self.push(c, ParseContext::ObjectKey, Opcode::BeginObject)
    }

    fn close_record(&mut self) -> Opcode {
        self.contexts.pop();
        self.finish_value();
        Opcode::EndObject
    }

    fn finish_value(&mut self) {
        if self.contexts.is_empty() {
            self.state = State::EndTop;
            self.end_top = true;
        } else {
            self.state = State::EndValue;
        }
    }

    /// Handles the first byte after a completed value.
    fn end_value(&mut self, c: u8) -> Opcode {
        self.state = State::EndValue;
        let Some(context) = self.context() else {
            // The top-level value was completed before this byte, which must
            // not run on into a new assignment.
            if c.is_ascii_alphanumeric() {
                return self.fail(c, ErrorKind::UnexpectedByte, "after top-level value");
            }
            self.state = State::EndTop;
            self.end_top = true;
            return self.end_top(c);
        };
        if is_space(c) {
            if context == ParseContext::ListValue {
                self.state = State::AfterListMember;
            }
            return Opcode::SkipSpace;
        }
        match (context, c) {
            (ParseContext::ObjectValue, b',') => {
                self.set_context(ParseContext::ObjectKey);
                self.state = State::BeginMember;
                Opcode::ObjectValue
            }
            (ParseContext::ListValue, b',') => {
                self.state = State::BeginValue;
                Opcode::ObjectValue
            }
            (ParseContext::ObjectValue | ParseContext::ListValue, b'}') => self.close_record(),
            (ParseContext::ObjectValue, _) => self.fail(
                c,
                ErrorKind::UnexpectedByte,
                "after object key:value pair",
            ),
            (ParseContext::ListValue, _) => {
                self.fail(c, ErrorKind::UnexpectedByte, "after list member")
            }
            _ => self.fail(c, ErrorKind::UnexpectedByte, "after value"),
        }
    }

    fn set_context(&mut self, context: ParseContext) {
        if let Some(last) = self.contexts.last_mut() {
            *last = context;
        }
    }

    /// Opens a nesting level, or fails if that would exceed the max depth.
    fn push(&mut self, c: u8, context: ParseContext, success: Opcode) -> Opcode {
        if self.contexts.len() >= self.options.max_depth {
            return self.fail(c, ErrorKind::DepthExceeded, "exceeded max depth");
        }
        self.contexts.push(context);
        success
    }

    /// Records an error and switches to the error state.
    fn fail(&mut self, c: u8, kind: ErrorKind, context: &str) -> Opcode {
        self.state = State::Error;
        let msg = format!("invalid character {} {context}", quote_byte(c));
        self.err = Some(SyntaxError::new(kind, msg, self.bytes));
        Opcode::Error
    }
}

fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n')
}

fn is_name_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

fn is_key_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_'
}

fn starts_value(c: u8) -> bool {
    matches!(c, b'{' | b'"' | b'\'' | b'N' | b'0'..=b'9' | b'a'..=b'z')
}

/// Formats `c` as a single-quoted character literal for error messages.
pub(crate) fn quote_byte(c: u8) -> String {
    match c {
        // Special cases, different from quoted strings.
        b'\'' => "'\\''".into(),
        b'"' => "'\"'".into(),
        b'\\' => "'\\\\'".into(),
        0x07 => "'\\a'".into(),
        0x08 => "'\\b'".into(),
        0x0c => "'\\f'".into(),
        b'\n' => "'\\n'".into(),
        b'\r' => "'\\r'".into(),
        b'\t' => "'\\t'".into(),
        0x0b => "'\\v'".into(),
        0x00..0x20 | 0x7f => format!("'\\x{c:02x}'"),
        // Latin-1 code points that do not print.
        0x80..=0xa0 | 0xad => format!("'\\u{c:04x}'"),
        _ => format!("'{}'", char::from(c)),
    }
}
