#![no_main]

use arbitrary::Arbitrary;
use asn1vn::{Opcode, Scanner, ScannerOptions, ScannerPool, check_valid, check_valid_with, is_valid};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    allow_multiple_top_values: bool,
    max_depth: u8,
    /// Scanned first, so that the scanner under test is a reused one.
    previous: &'a [u8],
    data: &'a [u8],
}

fn scan(input: Input<'_>) {
    let options = ScannerOptions {
        allow_multiple_top_values: input.allow_multiple_top_values,
        max_depth: usize::from(input.max_depth),
    };

    // Feed byte by byte, checking the nesting limit at every step.
    let mut fresh = Scanner::new(options);
    for &c in input.data {
        let opcode = fresh.feed(c);
        assert!(fresh.contexts().len() <= options.max_depth);
        if opcode == Opcode::Error {
            assert!(fresh.error().is_some());
            break;
        }
    }
    fresh.end_of_input();
    let expected = fresh.result();

    let mut reused = Scanner::new(options);
    let _ = check_valid_with(input.previous, &mut reused);
    reused.reset_bytes();
    assert_eq!(check_valid_with(input.data, &mut reused), expected);

    let pool = ScannerPool::new(options);
    let _ = pool.check_valid(input.previous);
    assert_eq!(pool.check_valid(input.data), expected);

    if let Err(err) = &expected {
        assert!(err.offset() <= input.data.len() as u64);
        let _ = err.location(input.data);
        let _ = err.line_text(input.data);
    }

    if options == ScannerOptions::default() {
        assert_eq!(is_valid(input.data), expected.is_ok());
        assert_eq!(check_valid(input.data), expected);
    }
}

fuzz_target!(|input: Input<'_>| scan(input));
