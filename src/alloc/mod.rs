//! Allocation strategies for the backing store of a [`RingQueue`](crate::RingQueue).
//!
//! A strategy hands out a boxed slice of exactly `slots` default
//! initialised values and takes it back once the queue is done with it.
//! Every store that was successfully allocated is released exactly once,
//! through the same strategy.
//!
//! ```
//! use std::rc::Rc;
//! use ringq::{Pool, RingQueue};
//!
//! # fn run() -> ringq::Result<()> {
//! let pool = Rc::new(Pool::new());
//! let queue = RingQueue::<u32, _>::with_strategy(8, Rc::clone(&pool))?;
//! drop(queue);
//! assert_eq!(pool.pooled(), 1);
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```
use std::mem::size_of;
use std::rc::Rc;

use log::trace;

pub use self::budget::Budget;
pub use self::pool::Pool;
use crate::error::{Error, Result};

mod budget;
mod pool;

/// Provides and reclaims storage for a fixed number of slots.
pub trait Strategy<T> {
    /// Allocate `slots` slots, each holding `T::default()`.
    fn allocate(&self, slots: usize) -> Result<Box<[T]>>;

    /// Give a store back. Called once per successful `allocate`.
    fn release(&self, store: Box<[T]>);
}

/// Size in bytes of a store with `slots` slots of `T`
pub(crate) fn byte_count<T>(slots: usize) -> Option<usize> {
    size_of::<T>().checked_mul(slots)
}

/// General purpose allocation through the global allocator.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Heap;

impl<T: Default> Strategy<T> for Heap {
    fn allocate(&self, slots: usize) -> Result<Box<[T]>> {
        let bytes = byte_count::<T>(slots).ok_or(Error::OutOfMemory { bytes: usize::MAX })?;

        let mut store = Vec::new();
        store
            .try_reserve_exact(slots)
            .map_err(|_| Error::OutOfMemory { bytes })?;
        store.resize_with(slots, T::default);

        trace!("allocated {slots} slots ({bytes} bytes)");
        Ok(store.into_boxed_slice())
    }

    fn release(&self, store: Box<[T]>) {
        trace!("released {} slots", store.len());
        drop(store);
    }
}

impl<T, S: Strategy<T> + ?Sized> Strategy<T> for Rc<S> {
    fn allocate(&self, slots: usize) -> Result<Box<[T]>> {
        (**self).allocate(slots)
    }

    fn release(&self, store: Box<[T]>) {
        (**self).release(store)
    }
}

impl<T, S: Strategy<T> + ?Sized> Strategy<T> for &S {
    fn allocate(&self, slots: usize) -> Result<Box<[T]>> {
        (**self).allocate(slots)
    }

    fn release(&self, store: Box<[T]>) {
        (**self).release(store)
    }
}
