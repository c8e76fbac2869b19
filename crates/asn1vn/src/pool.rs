//! A caller-owned pool of reusable scanners.
//!
//! Scanning allocates only the nesting stack, but validating many small
//! documents still pays for that allocation each time. A [`ScannerPool`]
//! keeps idle scanners on a free list. [`ScannerPool::acquire`] checks one out
//! behind a [`PooledScanner`] guard, which returns it on drop, on every exit
//! path of the scan.

use core::ops::{Deref, DerefMut};
use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    vec::Vec,
};

use crate::{error::SyntaxError, options::ScannerOptions, scanner::Scanner, validate};

/// Nesting stacks with more capacity than this are dropped on check-in.
const MAX_RETAINED_STACK: usize = 1024;

/// A thread-safe free list of [`Scanner`]s sharing one set of options.
///
/// ```rust
/// use asn1vn::ScannerPool;
///
/// let pool = ScannerPool::default();
/// assert!(pool.is_valid(b"v T ::= { a 1 }"));
/// assert!(pool.check_valid(b"v T ::= { a 1").is_err());
/// // Both checks ran on the same scanner.
/// assert_eq!(pool.idle(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ScannerPool {
    free: Mutex<Vec<Scanner>>,
    options: ScannerOptions,
}

impl ScannerPool {
    /// Creates an empty pool whose scanners use `options`.
    #[must_use]
    pub fn new(options: ScannerOptions) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            options,
        }
    }

    /// The options applied to every checked-out scanner.
    #[must_use]
    pub fn options(&self) -> ScannerOptions {
        self.options
    }

    /// Number of scanners waiting on the free list.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.lock().len()
    }

    /// Checks out a scanner, reset and with a zeroed byte counter.
    pub fn acquire(&self) -> PooledScanner<'_> {
        let recycled = self.lock().pop();
        let mut scanner = match recycled {
            Some(scanner) => {
                tracing::trace!("reusing pooled scanner");
                scanner
            }
            None => {
                tracing::trace!("pool empty, allocating scanner");
                Scanner::new(self.options)
            }
        };
        scanner.set_options(self.options);
        scanner.reset_bytes();
        scanner.reset();
        PooledScanner {
            pool: self,
            scanner,
        }
    }

    /// [`crate::is_valid`] on a pooled scanner.
    #[must_use]
    pub fn is_valid(&self, data: &[u8]) -> bool {
        self.check_valid(data).is_ok()
    }

    /// [`crate::check_valid`] on a pooled scanner.
    pub fn check_valid(&self, data: &[u8]) -> Result<(), SyntaxError> {
        let mut scanner = self.acquire();
        validate::check_valid_with(data, &mut scanner)
    }

    fn release(&self, mut scanner: Scanner) {
        if scanner.stack_capacity() > MAX_RETAINED_STACK {
            tracing::trace!(
                capacity = scanner.stack_capacity(),
                "discarding oversized nesting stack"
            );
            scanner.release_stack();
        }
        self.lock().push(scanner);
    }

    // A scan cannot leave the free list half-updated, so a poisoned lock is
    // still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<Scanner>> {
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A scanner checked out of a [`ScannerPool`], returned to it on drop.
#[derive(Debug)]
pub struct PooledScanner<'pool> {
    pool: &'pool ScannerPool,
    scanner: Scanner,
}

impl Deref for PooledScanner<'_> {
    type Target = Scanner;

    fn deref(&self) -> &Scanner {
        &self.scanner
    }
}

impl DerefMut for PooledScanner<'_> {
    fn deref_mut(&mut self) -> &mut Scanner {
        &mut self.scanner
    }
}

impl Drop for PooledScanner<'_> {
    fn drop(&mut self) {
        let scanner = core::mem::take(&mut self.scanner);
        self.pool.release(scanner);
    }
}
