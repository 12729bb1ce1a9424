use std::mem;

use crate::alloc::Strategy;
use crate::error::{Error, Result};

/// Fixed length slot storage, allocated once through a strategy and
/// released through the same strategy when dropped.
pub(crate) struct Store<T, A: Strategy<T>> {
    slots: Box<[T]>,
    strategy: A,
}

impl<T, A: Strategy<T>> Store<T, A> {
    pub(crate) fn new(capacity: usize, strategy: A) -> Result<Self> {
        let slots = allocate(&strategy, capacity)?;
        Ok(Self { slots, strategy })
    }

    /// Allocate slots for a replacement store through this store's strategy
    pub(crate) fn allocate(&self, capacity: usize) -> Result<Box<[T]>> {
        allocate(&self.strategy, capacity)
    }

    pub(crate) fn strategy(&self) -> &A {
        &self.strategy
    }

    pub(crate) fn slot(&self, index: usize) -> &T {
        &self.slots[index]
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut T {
        &mut self.slots[index]
    }

    pub(crate) fn slots(&self) -> &[T] {
        &self.slots
    }

    pub(crate) fn put(&mut self, index: usize, value: T) {
        self.slots[index] = value;
    }

    /// Swap in a new set of slots, releasing the old ones.
    pub(crate) fn replace(&mut self, slots: Box<[T]>) {
        let old = mem::replace(&mut self.slots, slots);
        self.strategy.release(old);
    }
}

// A store of the wrong length is handed straight back
fn allocate<T, A: Strategy<T>>(strategy: &A, capacity: usize) -> Result<Box<[T]>> {
    let slots = strategy.allocate(capacity)?;
    if slots.len() != capacity {
        let len = slots.len();
        strategy.release(slots);
        return Err(Error::StoreLength { expected: capacity, len });
    }
    Ok(slots)
}

impl<T: Default, A: Strategy<T>> Store<T, A> {
    /// Move the value out, leaving the default behind
    pub(crate) fn take(&mut self, index: usize) -> T {
        mem::take(&mut self.slots[index])
    }
}

impl<T, A: Strategy<T>> Drop for Store<T, A> {
    fn drop(&mut self) {
        let slots = mem::take(&mut self.slots);
        self.strategy.release(slots);
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use super::*;
    use crate::alloc::Heap;

    struct Counting<'a> {
        allocated: &'a Cell<usize>,
        released: &'a Cell<usize>,
    }

    impl Strategy<u8> for Counting<'_> {
        fn allocate(&self, slots: usize) -> Result<Box<[u8]>> {
            self.allocated.set(self.allocated.get() + 1);
            Heap.allocate(slots)
        }

        fn release(&self, store: Box<[u8]>) {
            self.released.set(self.released.get() + 1);
            Heap.release(store)
        }
    }

    #[test]
    fn released_once_on_drop() {
        let allocated = Cell::new(0);
        let released = Cell::new(0);
        let store = Store::new(4, Counting { allocated: &allocated, released: &released }).unwrap();
        assert_eq!(store.slots().len(), 4);
        drop(store);
        assert_eq!(allocated.get(), 1);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn replace_releases_old_slots() {
        let allocated = Cell::new(0);
        let released = Cell::new(0);
        let strategy = Counting { allocated: &allocated, released: &released };
        let mut store = Store::new(2, strategy).unwrap();
        let slots = store.strategy().allocate(5).unwrap();
        store.replace(slots);
        assert_eq!(released.get(), 1);
        assert_eq!(store.slots().len(), 5);
        drop(store);
        assert_eq!((allocated.get(), released.get()), (2, 2));
    }

    struct OffByOne<'a> {
        released: &'a Cell<usize>,
    }

    impl Strategy<u8> for OffByOne<'_> {
        fn allocate(&self, slots: usize) -> Result<Box<[u8]>> {
            Heap.allocate(slots + 1)
        }

        fn release(&self, store: Box<[u8]>) {
            self.released.set(self.released.get() + 1);
            Heap.release(store)
        }
    }

    #[test]
    fn wrong_length_is_rejected() {
        let released = Cell::new(0);
        let result = Store::new(3, OffByOne { released: &released });
        assert!(matches!(result, Err(Error::StoreLength { expected: 3, len: 4 })));
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn wrong_length_replacement_is_rejected() {
        let released = Cell::new(0);
        let store = Store {
            slots: vec![0u8; 2].into_boxed_slice(),
            strategy: OffByOne { released: &released },
        };
        assert!(matches!(store.allocate(5), Err(Error::StoreLength { expected: 5, len: 6 })));
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn take_leaves_default() {
        let mut store = Store::new(2, Heap).unwrap();
        store.put(1, String::from("hello"));
        assert_eq!(store.take(1), "hello");
        assert_eq!(store.slot(1), "");
    }
}
