use std::fmt::{self, Debug};

use log::debug;

pub use self::builder::{builder, Builder};
pub use self::cursor::{Cursor, CursorMut};
pub use self::iter::{Drain, Iter};
use crate::alloc::{Heap, Strategy};
use crate::error::{Error, Result};
use crate::position::Position;
use crate::store::Store;

mod builder;
mod cursor;
mod iter;

/// A fixed capacity, double ended queue backed by a ring of slots.
///
/// The slots are allocated once, when the queue is created, through an
/// allocation [`Strategy`] (the global allocator by default) and are
/// never resized. Items can be added and removed at both ends in constant
/// time, and read or overwritten by their offset from the front.
///
/// The queue is not synchronized. Share it between threads behind a lock.
///
/// ```
/// use ringq::RingQueue;
///
/// # fn run() -> ringq::Result<()> {
/// let mut queue = RingQueue::with_capacity(3)?;
/// queue.enqueue_tail(1)?;
/// queue.enqueue_tail(2)?;
/// queue.enqueue_head(0)?;
/// assert!(queue.is_full());
///
/// assert_eq!(*queue.get(1)?, 1);
/// assert_eq!(queue.dequeue_head()?, 0);
/// assert_eq!(queue.dequeue_tail()?, 2);
/// # Ok(())
/// # }
/// # run().unwrap();
/// ```
pub struct RingQueue<T, A: Strategy<T> = Heap> {
    store: Store<T, A>,
    pos: Position,
    // Bumped on every structural change, checked by cursors
    generation: u64,
}

impl<T: Default> RingQueue<T> {
    /// Create an empty queue holding at most `capacity` items,
    /// allocated on the heap.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_strategy(capacity, Heap)
    }
}

impl<T, A: Strategy<T>> RingQueue<T, A> {
    /// Create an empty queue holding at most `capacity` items,
    /// with storage provided by `strategy`.
    pub fn with_strategy(capacity: usize, strategy: A) -> Result<Self> {
        let store = Store::new(capacity, strategy)?;
        Ok(Self {
            store,
            pos: Position::new(capacity),
            generation: 0,
        })
    }

    /// Maximum number of items
    pub fn capacity(&self) -> usize {
        self.pos.capacity()
    }

    /// Number of items currently in the queue
    pub fn size(&self) -> usize {
        self.pos.count()
    }

    /// `true` if the queue holds no items
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// `true` if no more items fit.
    /// A queue with a capacity of zero is both empty and full.
    pub fn is_full(&self) -> bool {
        self.pos.is_full()
    }

    /// The strategy the backing store was allocated with
    pub fn strategy(&self) -> &A {
        self.store.strategy()
    }

    /// Add an item to the tail of the queue.
    pub fn enqueue_tail(&mut self, item: T) -> Result<()> {
        if self.pos.is_full() {
            return Err(self.capacity_exceeded());
        }

        let index = self.pos.push_back();
        self.store.put(index, item);
        self.bump();
        Ok(())
    }

    /// Add an item to the head of the queue.
    pub fn enqueue_head(&mut self, item: T) -> Result<()> {
        if self.pos.is_full() {
            return Err(self.capacity_exceeded());
        }

        let index = self.pos.push_front();
        self.store.put(index, item);
        self.bump();
        Ok(())
    }

    /// Reference to the item `slot` places from the front.
    ///
    /// The reference borrows the queue, so it can not be held across
    /// an enqueue, dequeue or reset.
    pub fn get(&self, slot: usize) -> Result<&T> {
        self.check_slot(slot)?;
        Ok(self.store.slot(self.pos.physical(slot)))
    }

    /// Mutable reference to the item `slot` places from the front.
    pub fn get_mut(&mut self, slot: usize) -> Result<&mut T> {
        self.check_slot(slot)?;
        Ok(self.store.slot_mut(self.pos.physical(slot)))
    }

    /// The oldest item, if any
    pub fn front(&self) -> Option<&T> {
        self.get(0).ok()
    }

    /// The newest item, if any
    pub fn back(&self) -> Option<&T> {
        let last = self.size().checked_sub(1)?;
        self.get(last).ok()
    }

    /// Empty the queue, keeping its capacity and storage.
    ///
    /// Items are not dropped until their slots are written again or the
    /// queue is dropped.
    pub fn reset(&mut self) {
        debug!("reset queue holding {} items", self.size());
        self.pos.clear();
        self.bump();
    }

    /// Enqueue items at the tail until either the iterator runs out or the
    /// queue is full. Returns the number of items added.
    ///
    /// No item is pulled from the iterator once the queue is full.
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, items: I) -> usize {
        let mut items = items.into_iter();
        let mut added = 0;
        while !self.is_full() {
            let Some(item) = items.next() else { break };
            let index = self.pos.push_back();
            self.store.put(index, item);
            added += 1;
        }

        if added > 0 {
            self.bump();
        }
        added
    }

    /// Front to rear iterator over the items.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.store.slots(), self.pos)
    }

    /// Read-only cursor positioned at the front
    pub fn cursor(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, false)
    }

    /// Read-only cursor positioned past the last item
    pub fn cursor_end(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, true)
    }

    /// Mutable cursor positioned at the front
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T, A> {
        CursorMut::new(self, false)
    }

    /// Mutable cursor positioned past the last item
    pub fn cursor_mut_end(&mut self) -> CursorMut<'_, T, A> {
        CursorMut::new(self, true)
    }

    /// Deep copy into a new store, allocated through a clone of this
    /// queue's strategy.
    ///
    /// The copy is laid out from the first slot, so its front and rear
    /// may differ from this queue's, but the items and their order do not.
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
        A: Clone,
    {
        let mut store = Store::new(self.capacity(), self.strategy().clone())?;
        for (index, item) in self.iter().enumerate() {
            store.put(index, item.clone());
        }

        Ok(Self {
            store,
            pos: Position::compact(self.capacity(), self.size()),
            generation: 0,
        })
    }

    /// Turn this queue into a deep copy of `other`, taking on its capacity.
    ///
    /// The new store is allocated through this queue's strategy before the
    /// old one is released, so on failure this queue is left untouched.
    pub fn assign<B: Strategy<T>>(&mut self, other: &RingQueue<T, B>) -> Result<()>
    where
        T: Clone,
    {
        let mut slots = self.store.allocate(other.capacity())?;
        for (slot, item) in slots.iter_mut().zip(other.iter()) {
            *slot = item.clone();
        }

        self.store.replace(slots);
        self.pos = Position::compact(other.capacity(), other.size());
        self.bump();
        debug!(
            "assigned {} items, capacity is now {}",
            other.size(),
            other.capacity()
        );
        Ok(())
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn check_slot(&self, slot: usize) -> Result<()> {
        if slot >= self.size() {
            return Err(Error::IndexOutOfRange {
                slot,
                size: self.size(),
            });
        }
        Ok(())
    }

    fn capacity_exceeded(&self) -> Error {
        Error::CapacityExceeded {
            capacity: self.capacity(),
        }
    }
}

impl<T: Default, A: Strategy<T>> RingQueue<T, A> {
    /// Remove and return the item at the head of the queue.
    pub fn dequeue_head(&mut self) -> Result<T> {
        if self.pos.is_empty() {
            return Err(Error::Empty);
        }

        let index = self.pos.pop_front();
        self.bump();
        Ok(self.store.take(index))
    }

    /// Remove and return the item at the tail of the queue.
    pub fn dequeue_tail(&mut self) -> Result<T> {
        if self.pos.is_empty() {
            return Err(Error::Empty);
        }

        let index = self.pos.pop_back();
        self.bump();
        Ok(self.store.take(index))
    }

    /// Write `item` at `slot` places from the front.
    ///
    /// * A slot inside the queue is overwritten.
    /// * A slot directly after the last item is the same as `enqueue_tail`.
    /// * A slot further out first pads the gap with `T::default()`.
    ///
    /// Fails with [`Error::CapacityExceeded`], without touching the queue,
    /// if `slot` is not below the capacity.
    ///
    /// ```
    /// # fn run() -> ringq::Result<()> {
    /// let mut queue = ringq::RingQueue::with_capacity(4)?;
    /// queue.enqueue_tail(10)?;
    /// queue.set(99, 2)?;
    /// assert_eq!(queue.iter().copied().collect::<Vec<_>>(), [10, 0, 99]);
    /// # Ok(())
    /// # }
    /// # run().unwrap();
    /// ```
    pub fn set(&mut self, item: T, slot: usize) -> Result<()> {
        if slot >= self.capacity() {
            return Err(self.capacity_exceeded());
        }

        if slot < self.size() {
            *self.store.slot_mut(self.pos.physical(slot)) = item;
            return Ok(());
        }

        while self.size() < slot {
            self.enqueue_tail(T::default())?;
        }
        self.enqueue_tail(item)
    }

    /// Remove every item, front to rear.
    ///
    /// Items not consumed by the time the iterator is dropped are removed
    /// all the same.
    pub fn drain(&mut self) -> Drain<'_, T, A> {
        Drain::new(self)
    }
}

impl<T: PartialEq, A: Strategy<T>, B: Strategy<T>> PartialEq<RingQueue<T, B>> for RingQueue<T, A> {
    /// Queues are equal when they hold the same items in the same order,
    /// regardless of capacity or layout.
    fn eq(&self, other: &RingQueue<T, B>) -> bool {
        self.size() == other.size() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: Strategy<T>> Eq for RingQueue<T, A> {}

impl<'a, T, A: Strategy<T>> IntoIterator for &'a RingQueue<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub(crate) struct Items<'a, T, A: Strategy<T>>(pub(crate) &'a RingQueue<T, A>);

impl<T: Debug, A: Strategy<T>> Debug for Items<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<T: Debug, A: Strategy<T>> Debug for RingQueue<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingQueue")
            .field("capacity", &self.capacity())
            .field("size", &self.size())
            .field("front", &self.pos.front())
            .field("rear", &self.pos.rear())
            .field("items", &Items(self))
            .finish()
    }
}
