/// Maximum nesting depth used by [`ScannerOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Configuration options for the value-notation scanner.
///
/// # Examples
///
/// ```rust
/// use asn1vn::{Scanner, ScannerOptions};
///
/// let scanner = Scanner::new(ScannerOptions {
///     allow_multiple_top_values: false,
///     ..Default::default()
/// });
/// assert_eq!(scanner.options().max_depth, 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerOptions {
    /// Whether the input may hold several top-level assignments.
    ///
    /// When `true`, a non-whitespace byte after a completed top-level value
    /// starts a new `identifier Type ::= value` assignment. When `false`, it
    /// is a syntax error.
    ///
    /// ```text
    /// value1 Header ::= { major 2 }
    /// value2 Header ::= { major 3 }
    /// ```
    ///
    /// # Default
    ///
    /// `true`
    pub allow_multiple_top_values: bool,

    /// Maximum number of simultaneously open nesting levels.
    ///
    /// Records, value names and the identifier/type pair each take one level.
    /// Exceeding the limit is a syntax error at the byte that opened the
    /// excess level.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_DEPTH`]
    pub max_depth: usize,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            allow_multiple_top_values: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
