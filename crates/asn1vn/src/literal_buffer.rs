/// What happened after feeding one more byte into the literal matcher?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Byte matched, but the literal is not finished yet.
    NeedMore,
    /// Byte matched *and* it was the last byte of the literal.
    Done,
    /// Byte did **not** match `expected`.
    Reject { expected: u8 },
}

/// Matches the remaining bytes of a keyword literal, one byte at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer {
    literal: &'static str,
    rest: &'static [u8],
}

impl ExpectedLiteralBuffer {
    /// Start matching `NULL` after its leading `N`.
    pub(crate) fn null() -> Self {
        Self {
            literal: "NULL",
            rest: b"ULL",
        }
    }

    /// The literal being matched, for error messages.
    pub(crate) fn literal(self) -> &'static str {
        self.literal
    }

    /// Give the matcher the next input byte and learn what to do next.
    pub(crate) fn step(&mut self, c: u8) -> Step {
        // Nothing left to match.
        let Some((&want, tail)) = self.rest.split_first() else {
            return Step::Done;
        };
        if want != c {
            return Step::Reject { expected: want };
        }
        self.rest = tail;
        if tail.is_empty() {
            Step::Done
        } else {
            Step::NeedMore
        }
    }
}
