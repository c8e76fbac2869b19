//! Signals returned by the scanner for each byte.
//!
//! An [`Opcode`] tells the caller about significant scanning events, such as
//! the beginning of a literal or the end of a record, so that it can follow
//! along if it wishes. Literals have no end opcode: a literal ends at the next
//! result that is not [`Opcode::Continue`].
//!
//! [`ParseContext`] values make up the scanner's nesting stack. The outermost
//! context is at the bottom.

/// The result of a single scanner transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub enum Opcode {
    /// Uninteresting byte.
    Continue,
    /// Whitespace that may be skipped.
    SkipSpace,
    /// Beginning of a literal: a string, `NULL`, a number, a key or a name.
    BeginLiteral,
    /// `{` opened a record.
    BeginObject,
    /// A record key was just completed.
    ObjectKey,
    /// A record member other than the last was just completed.
    ObjectValue,
    /// `}` closed a record.
    EndObject,
    /// The type name of an assignment started.
    BeginType,
    /// The type name of an assignment was completed by `:`.
    EndType,
    /// The identifier of an assignment started.
    BeginIdentifierOrType,
    /// The identifier of an assignment was completed by whitespace.
    EndIdentifierOrType,
    /// The top-level value was completed by an earlier byte.
    End,
    /// A syntax error was recorded; see [`Scanner::error`].
    ///
    /// [`Scanner::error`]: crate::Scanner::error
    Error,
}

/// What the enclosing nesting level currently expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub enum ParseContext {
    /// A record waiting for its next key.
    ObjectKey,
    /// A record whose member value is being read.
    ObjectValue,
    /// A record holding unkeyed values, e.g. `{ 2 23 143 1 }`.
    ListValue,
    /// The identifier of a top-level assignment.
    Identifier,
    /// The type name of a top-level assignment.
    Type,
    /// The alternative name of a choice value, before its `:`.
    ValueName,
}
