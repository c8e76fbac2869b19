//! Whole-input syntax checks.

use crate::{error::SyntaxError, opcode::Opcode, scanner::Scanner};

/// Reports whether `data` is valid ASN.1 value notation.
///
/// ```rust
/// assert!(asn1vn::is_valid(b"v T ::= { a 1, b '0A'H }"));
/// assert!(!asn1vn::is_valid(b"v T ::= { a 1,"));
/// ```
#[must_use]
pub fn is_valid(data: &[u8]) -> bool {
    check_valid(data).is_ok()
}

/// Verifies that `data` is valid ASN.1 value notation, returning the first
/// syntax error otherwise.
pub fn check_valid(data: &[u8]) -> Result<(), SyntaxError> {
    check_valid_with(data, &mut Scanner::default())
}

/// Verifies `data` with a caller-provided scanner, so that repeated checks
/// can reuse one allocation.
///
/// The scanner is reset first. Its byte counter is not zeroed: offsets keep
/// counting from wherever the caller left it, which is zero for a fresh
/// scanner.
///
/// ```rust
/// use asn1vn::{Scanner, check_valid_with};
///
/// let mut scanner = Scanner::default();
/// check_valid_with(b"v T ::= 1", &mut scanner).unwrap();
/// scanner.reset_bytes();
/// let err = check_valid_with(b"v T ::= 1.", &mut scanner).unwrap_err();
/// assert_eq!(err.offset(), 10);
/// ```
pub fn check_valid_with(data: &[u8], scanner: &mut Scanner) -> Result<(), SyntaxError> {
    let result = scan(data, scanner);
    if let Err(err) = &result {
        tracing::debug!(
            offset = err.offset(),
            kind = ?err.kind(),
            "value notation rejected: {err}"
        );
    }
    result
}

fn scan(data: &[u8], scanner: &mut Scanner) -> Result<(), SyntaxError> {
    scanner.reset();
    for &c in data {
        if scanner.feed(c) == Opcode::Error {
            return scanner.result();
        }
    }
    scanner.end_of_input();
    scanner.result()
}
