use alloc::string::String;
use core::fmt;

use bstr::{BStr, ByteSlice};
use thiserror::Error;

/// Classification of a [`SyntaxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub enum ErrorKind {
    /// The current state received a byte outside its accepted set.
    UnexpectedByte,
    /// The `::=` assignment operator is missing its second colon or its `=`.
    MalformedOperator,
    /// A string, hexadecimal string, `NULL` or numeric literal is malformed.
    MalformedLiteral,
    /// The nesting stack would exceed the configured maximum depth.
    DepthExceeded,
    /// The input ended inside an open construct.
    UnexpectedEndOfInput,
}

/// A syntax error found while scanning value notation.
///
/// The offset counts the bytes consumed up to and including the offending
/// byte, so the first byte of the input has offset 1. Errors detected when the
/// input ends carry the input length.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{msg}")]
pub struct SyntaxError {
    kind: ErrorKind,
    msg: String,
    offset: u64,
}

impl SyntaxError {
    pub(crate) fn new(kind: ErrorKind, msg: String, offset: u64) -> Self {
        Self { kind, msg, offset }
    }

    /// What went wrong, without the details of the message.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The human-readable description, e.g. `invalid character 'x' in
    /// literal NULL (expecting 'L')`.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Number of bytes consumed when the error occurred, counting the
    /// offending byte.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Resolves the offset to a line and column within `input`, which must be
    /// the input the error was produced from.
    #[must_use]
    pub fn location(&self, input: &[u8]) -> Location {
        let idx = self.byte_index(input);
        let before = &input[..idx];
        let line = 1 + before.find_iter(b"\n").count();
        let line_start = before.rfind_byte(b'\n').map_or(0, |i| i + 1);
        Location {
            line,
            column: idx - line_start + 1,
        }
    }

    /// The line of `input` holding the offending byte, without its line
    /// terminator.
    #[must_use]
    pub fn line_text<'a>(&self, input: &'a [u8]) -> &'a BStr {
        let idx = self.byte_index(input);
        let start = input[..idx].rfind_byte(b'\n').map_or(0, |i| i + 1);
        let end = input[idx..]
            .find_byte(b'\n')
            .map_or(input.len(), |i| idx + i);
        let line = &input[start..end];
        line.strip_suffix(b"\r").unwrap_or(line).as_bstr()
    }

    // Zero-based index of the offending byte, clamped to the input.
    fn byte_index(&self, input: &[u8]) -> usize {
        usize::try_from(self.offset)
            .unwrap_or(usize::MAX)
            .saturating_sub(1)
            .min(input.len())
    }
}

/// A 1-based line and byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number, starting at 1.
    pub line: usize,
    /// Byte column within the line, starting at 1.
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
