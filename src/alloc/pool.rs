use std::cell::RefCell;
use std::fmt::{self, Debug};

use log::debug;

use super::{Heap, Strategy};
use crate::error::Result;

const DEFAULT_LIMIT: usize = 16;

/// Recycles released stores.
///
/// A released store is wiped back to `T::default()` and kept on a free
/// list. The next request for the same number of slots takes it off the
/// list instead of going to the heap. At most `limit` stores are kept,
/// anything beyond that is dropped.
///
/// The pool is shared between queues through an `Rc<Pool<T>>`.
pub struct Pool<T> {
    free: RefCell<Vec<Box<[T]>>>,
    limit: usize,
}

impl<T> Pool<T> {
    /// Create a pool keeping at most 16 stores
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }

    /// Create a pool keeping at most `limit` stores
    pub fn with_limit(limit: usize) -> Self {
        Self {
            free: RefCell::new(vec![]),
            limit,
        }
    }

    /// Number of stores currently waiting for reuse
    pub fn pooled(&self) -> usize {
        self.free.borrow().len()
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let free = self.free.borrow();
        let lens = free.iter().map(|store| store.len()).collect::<Vec<_>>();
        f.debug_struct("Pool")
            .field("free", &lens)
            .field("limit", &self.limit)
            .finish()
    }
}

impl<T: Default> Strategy<T> for Pool<T> {
    fn allocate(&self, slots: usize) -> Result<Box<[T]>> {
        // The borrow ends before any `T` is created or dropped, either can
        // reach back into this pool.
        let pooled = {
            let mut free = self.free.borrow_mut();
            free.iter()
                .position(|store| store.len() == slots)
                .map(|index| free.swap_remove(index))
        };

        match pooled {
            Some(store) => {
                debug!("reusing pooled store of {slots} slots");
                Ok(store)
            }
            None => Heap.allocate(slots),
        }
    }

    fn release(&self, mut store: Box<[T]>) {
        if self.pooled() >= self.limit {
            Heap.release(store);
            return;
        }

        // Dropping the old values may release nested stores into this pool
        store.iter_mut().for_each(|slot| *slot = T::default());

        let mut free = self.free.borrow_mut();
        if free.len() >= self.limit {
            drop(free);
            Heap.release(store);
            return;
        }
        free.push(store);
    }
}
