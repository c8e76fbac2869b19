//! A byte-driven scanner for ASN.1 value notation.
//!
//! Value notation is the readable textual form of ASN.1 values, as used for
//! example by eSIM profile descriptions:
//!
//! ```text
//! value1 ProfileElement ::= header : {
//!   major-version 2,
//!   minor-version 1,
//!   iccid '89000123456789012341'H
//! }
//! ```
//!
//! The [`Scanner`] consumes one byte at a time and answers each byte with an
//! [`Opcode`] describing what just happened (a record began, a key ended, the
//! top-level value completed, ...). The first syntax error is latched and
//! reported with the byte offset at which it occurred.
//!
//! ```rust
//! use asn1vn::{ErrorKind, check_valid, is_valid};
//!
//! assert!(is_valid(b"value1 ProfileElement ::= header : { major-version 2 }"));
//!
//! let err = check_valid(b"value1 X ::= NUL").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::MalformedLiteral);
//! assert_eq!(err.offset(), 16);
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod error;
mod literal_buffer;
mod opcode;
mod opcodes;
mod options;
#[cfg(feature = "std")]
mod pool;
mod scanner;
mod validate;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, Location, SyntaxError};
pub use opcode::{Opcode, ParseContext};
pub use opcodes::{Opcodes, ScanEvent};
pub use options::{DEFAULT_MAX_DEPTH, ScannerOptions};
#[cfg(feature = "std")]
pub use pool::{PooledScanner, ScannerPool};
pub use scanner::Scanner;
pub use validate::{check_valid, check_valid_with, is_valid};
