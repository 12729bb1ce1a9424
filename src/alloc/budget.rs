use std::cell::Cell;

use super::{byte_count, Strategy};
use crate::error::{Error, Result};

/// Caps the number of bytes another strategy may hand out.
///
/// A request that would exceed what remains of the budget fails with
/// [`Error::OutOfMemory`] and never reaches the inner strategy.
/// Released stores give their bytes back.
#[derive(Debug)]
pub struct Budget<S> {
    inner: S,
    remaining: Cell<usize>,
}

impl<S> Budget<S> {
    /// Wrap `inner`, allowing at most `bytes` bytes to be outstanding at once
    pub fn new(inner: S, bytes: usize) -> Self {
        Self {
            inner,
            remaining: Cell::new(bytes),
        }
    }

    /// Bytes still available
    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }
}

impl<T, S: Strategy<T>> Strategy<T> for Budget<S> {
    fn allocate(&self, slots: usize) -> Result<Box<[T]>> {
        let bytes = byte_count::<T>(slots).ok_or(Error::OutOfMemory { bytes: usize::MAX })?;
        let remaining = self.remaining.get();
        if bytes > remaining {
            return Err(Error::OutOfMemory { bytes });
        }

        let store = self.inner.allocate(slots)?;
        self.remaining.set(remaining - bytes);
        Ok(store)
    }

    fn release(&self, store: Box<[T]>) {
        let bytes = byte_count::<T>(store.len()).unwrap_or(0);
        self.remaining.set(self.remaining.get() + bytes);
        self.inner.release(store);
    }
}
