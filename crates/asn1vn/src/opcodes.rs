use crate::{error::SyntaxError, opcode::Opcode, scanner::Scanner};

/// A significant opcode together with the byte count at which it occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub struct ScanEvent {
    /// Bytes consumed when the opcode was produced, counting the byte that
    /// produced it.
    pub offset: u64,
    /// What happened.
    pub opcode: Opcode,
}

/// Iterator over the significant opcodes of a complete input.
///
/// Created by [`Scanner::opcodes`]. [`Opcode::Continue`] and
/// [`Opcode::SkipSpace`] are not reported. The iterator ends with the result
/// of [`Scanner::end_of_input`], or with the first syntax error.
///
/// ```rust
/// use asn1vn::{Opcode, Scanner};
///
/// let mut scanner = Scanner::default();
/// let ops: Vec<Opcode> = scanner
///     .opcodes(b"v T ::= {}")
///     .map(|event| event.unwrap().opcode)
///     .collect();
/// assert_eq!(
///     ops,
///     [
///         Opcode::BeginIdentifierOrType,
///         Opcode::EndIdentifierOrType,
///         Opcode::BeginType,
///         Opcode::EndType,
///         Opcode::BeginObject,
///         Opcode::EndObject,
///         Opcode::End,
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct Opcodes<'a> {
    scanner: &'a mut Scanner,
    input: &'a [u8],
    pos: usize,
    done: bool,
}

impl Scanner {
    /// Resets the scanner and returns an iterator that scans `input`.
    pub fn opcodes<'a>(&'a mut self, input: &'a [u8]) -> Opcodes<'a> {
        self.reset();
        Opcodes {
            scanner: self,
            input,
            pos: 0,
            done: false,
        }
    }
}

impl Opcodes<'_> {
    fn event(&self, opcode: Opcode) -> ScanEvent {
        ScanEvent {
            offset: self.scanner.bytes(),
            opcode,
        }
    }
}

impl Iterator for Opcodes<'_> {
    type Item = Result<ScanEvent, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        while let Some(&c) = self.input.get(self.pos) {
            self.pos += 1;
            match self.scanner.feed(c) {
                Opcode::Continue | Opcode::SkipSpace => {}
                Opcode::Error => {
                    self.done = true;
                    return self.scanner.result().err().map(Err);
                }
                opcode => return Some(Ok(self.event(opcode))),
            }
        }
        self.done = true;
        match self.scanner.end_of_input() {
            Opcode::Error => self.scanner.result().err().map(Err),
            opcode => Some(Ok(self.event(opcode))),
        }
    }
}

impl core::iter::FusedIterator for Opcodes<'_> {}
