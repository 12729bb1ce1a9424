//! Cursors walk a queue front to rear with an explicit
//! `first` / `advance` / `done` / `next` protocol.
//!
//! A cursor remembers the number of items and the queue's generation
//! when it was created (or last rewound with `first`). Any enqueue,
//! dequeue or reset after that invalidates it: `advance` and `next`
//! fail with [`Error::Invalidated`] instead of reading stale slots, and
//! `done` reports `true`. `first` rebinds the cursor to the queue as it
//! is now, so it never fails.
//!
//! A [`Cursor`] holds a shared borrow, so the queue can't change under
//! it. A [`CursorMut`] hands the queue back through
//! [`CursorMut::queue_mut`], which is where invalidation can occur.
use crate::alloc::Strategy;
use crate::error::{Error, Result};
use crate::queue::RingQueue;

#[derive(Debug, Copy, Clone)]
struct State {
    position: usize,
    len: usize,
    generation: u64,
}

impl State {
    fn new<T, A: Strategy<T>>(queue: &RingQueue<T, A>, end: bool) -> Self {
        let len = queue.size();
        Self {
            position: if end { len } else { 0 },
            len,
            generation: queue.generation(),
        }
    }

    fn first<T, A: Strategy<T>>(&mut self, queue: &RingQueue<T, A>) -> bool {
        *self = Self::new(queue, false);
        self.len != 0
    }

    fn advance(&mut self) -> bool {
        if self.position < self.len {
            self.position += 1;
        }
        !self.done()
    }

    fn done(&self) -> bool {
        self.position >= self.len
    }

    fn done_in<T, A: Strategy<T>>(&self, queue: &RingQueue<T, A>) -> bool {
        self.done() || self.check(queue).is_err()
    }

    fn check<T, A: Strategy<T>>(&self, queue: &RingQueue<T, A>) -> Result<()> {
        if self.generation != queue.generation() {
            return Err(Error::Invalidated);
        }
        Ok(())
    }
}

/// Read-only cursor over a [`RingQueue`].
///
/// ```
/// # fn run() -> ringq::Result<()> {
/// let mut queue = ringq::RingQueue::with_capacity(4)?;
/// queue.try_extend([1, 2, 3]);
///
/// let mut cursor = queue.cursor();
/// let mut seen = vec![];
/// while let Some(item) = cursor.next()? {
///     seen.push(*item);
///     cursor.advance()?;
/// }
/// assert!(cursor.done());
/// assert_eq!(seen, [1, 2, 3]);
/// # Ok(())
/// # }
/// # run().unwrap();
/// ```
#[derive(Debug)]
pub struct Cursor<'a, T, A: Strategy<T>> {
    queue: &'a RingQueue<T, A>,
    state: State,
}

impl<'a, T, A: Strategy<T>> Cursor<'a, T, A> {
    pub(crate) fn new(queue: &'a RingQueue<T, A>, end: bool) -> Self {
        Self {
            state: State::new(queue, end),
            queue,
        }
    }

    /// Move to the front. Returns `false` if the queue is empty.
    pub fn first(&mut self) -> bool {
        self.state.first(self.queue)
    }

    /// Move one item toward the rear. Returns `false` once every item has
    /// been visited.
    pub fn advance(&mut self) -> Result<bool> {
        self.state.check(self.queue)?;
        Ok(self.state.advance())
    }

    /// `true` when every item has been visited
    pub fn done(&self) -> bool {
        self.state.done_in(self.queue)
    }

    /// The item under the cursor, without moving. `None` when done.
    pub fn next(&self) -> Result<Option<&'a T>> {
        self.state.check(self.queue)?;
        if self.state.done() {
            return Ok(None);
        }
        let item = self.queue.get(self.state.position)?;
        Ok(Some(item))
    }
}

impl<T, A: Strategy<T>> Clone for Cursor<'_, T, A> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue,
            state: self.state,
        }
    }
}

/// Mutable cursor over a [`RingQueue`].
#[derive(Debug)]
pub struct CursorMut<'a, T, A: Strategy<T>> {
    queue: &'a mut RingQueue<T, A>,
    state: State,
}

impl<'a, T, A: Strategy<T>> CursorMut<'a, T, A> {
    pub(crate) fn new(queue: &'a mut RingQueue<T, A>, end: bool) -> Self {
        Self {
            state: State::new(queue, end),
            queue,
        }
    }

    /// Move to the front. Returns `false` if the queue is empty.
    ///
    /// This also rebinds the cursor to the queue's current contents,
    /// clearing any invalidation.
    pub fn first(&mut self) -> bool {
        self.state.first(&*self.queue)
    }

    /// Move one item toward the rear. Returns `false` once every item has
    /// been visited.
    pub fn advance(&mut self) -> Result<bool> {
        self.state.check(&*self.queue)?;
        Ok(self.state.advance())
    }

    /// `true` when every item has been visited, or when the queue changed
    /// structure since the cursor was bound to it.
    pub fn done(&self) -> bool {
        self.state.done_in(&*self.queue)
    }

    /// The item under the cursor, without moving. `None` when done.
    pub fn next(&mut self) -> Result<Option<&mut T>> {
        self.state.check(&*self.queue)?;
        if self.state.done() {
            return Ok(None);
        }
        let item = self.queue.get_mut(self.state.position)?;
        Ok(Some(item))
    }

    /// The queue being walked
    pub fn queue(&self) -> &RingQueue<T, A> {
        &*self.queue
    }

    /// The queue being walked. Enqueuing, dequeuing or resetting through
    /// this invalidates the cursor until the next call to `first`.
    pub fn queue_mut(&mut self) -> &mut RingQueue<T, A> {
        &mut *self.queue
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn queue_of(items: &[i32]) -> RingQueue<i32> {
        let mut queue = RingQueue::with_capacity(4).unwrap();
        queue.try_extend(items.iter().copied());
        queue
    }

    #[test]
    fn walk_front_to_rear() {
        let mut queue = queue_of(&[1, 2]);
        queue.dequeue_head().unwrap();
        queue.enqueue_tail(3).unwrap();
        queue.enqueue_head(0).unwrap();

        let mut cursor = queue.cursor();
        let mut seen = vec![];
        while let Some(item) = cursor.next().unwrap() {
            seen.push(*item);
            cursor.advance().unwrap();
        }
        assert_eq!(seen, [0, 2, 3]);
        assert!(cursor.done());
    }

    #[test]
    fn advance_reports_remaining() {
        let queue = queue_of(&[1, 2]);
        let mut cursor = queue.cursor();
        assert!(cursor.first());
        assert!(cursor.advance().unwrap());
        assert!(!cursor.advance().unwrap());
        assert!(!cursor.advance().unwrap());
        assert!(cursor.done());
    }

    #[test]
    fn restart_with_first() {
        let queue = queue_of(&[5, 6]);
        let mut cursor = queue.cursor();
        cursor.advance().unwrap();
        cursor.advance().unwrap();
        assert_eq!(cursor.next().unwrap(), None);
        assert!(cursor.first());
        assert_eq!(cursor.next().unwrap(), Some(&5));
    }

    #[test]
    fn end_cursor_is_done() {
        let queue = queue_of(&[1]);
        let mut cursor = queue.cursor_end();
        assert!(cursor.done());
        assert_eq!(cursor.next().unwrap(), None);
        assert!(cursor.first());
        assert!(!cursor.done());
    }

    #[test]
    fn empty_queue() {
        let queue = queue_of(&[]);
        let mut cursor = queue.cursor();
        assert!(!cursor.first());
        assert!(cursor.done());
        assert_eq!(cursor.next().unwrap(), None);
    }

    #[test]
    fn cursor_mut_writes_through() {
        let mut queue = queue_of(&[1, 2, 3]);
        let mut cursor = queue.cursor_mut();
        while let Some(item) = cursor.next().unwrap() {
            *item *= 10;
            cursor.advance().unwrap();
        }
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), [10, 20, 30]);
    }

    #[test]
    fn invalidated_by_dequeue() {
        let mut queue = queue_of(&[1, 2, 3]);
        let mut cursor = queue.cursor_mut();
        cursor.advance().unwrap();
        cursor.queue_mut().dequeue_head().unwrap();

        assert!(matches!(cursor.next(), Err(Error::Invalidated)));
        assert!(matches!(cursor.advance(), Err(Error::Invalidated)));

        // Rewinding rebinds to what is left
        assert!(cursor.first());
        assert_eq!(cursor.next().unwrap(), Some(&mut 2));
    }

    #[test]
    fn invalidated_cursor_is_done() {
        let mut queue = queue_of(&[1, 2]);
        let mut cursor = queue.cursor_mut();
        assert!(!cursor.done());
        cursor.queue_mut().enqueue_tail(3).unwrap();
        assert!(cursor.done());
        assert!(cursor.first());
        assert!(!cursor.done());
    }

    #[test]
    fn end_cursor_mut() {
        let mut queue = queue_of(&[1, 2]);
        let mut cursor = queue.cursor_mut_end();
        assert!(cursor.done());
        assert_eq!(cursor.next().unwrap(), None);
        assert!(!cursor.advance().unwrap());

        assert!(cursor.first());
        *cursor.next().unwrap().unwrap() = 10;
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), [10, 2]);
    }

    #[test]
    fn invalidated_by_reset() {
        let mut queue = queue_of(&[1]);
        let mut cursor = queue.cursor_mut();
        cursor.queue_mut().reset();
        assert!(matches!(cursor.next(), Err(Error::Invalidated)));
        assert!(!cursor.first());
    }

    #[test]
    fn in_place_set_keeps_cursor_valid() {
        let mut queue = queue_of(&[1, 2]);
        let mut cursor = queue.cursor_mut();
        cursor.queue_mut().set(7, 0).unwrap();
        assert_eq!(cursor.next().unwrap(), Some(&mut 7));
    }

    #[test]
    fn snapshot_len() {
        let mut queue = queue_of(&[1]);
        let mut cursor = queue.cursor_mut();
        assert!(!cursor.advance().unwrap());
        assert_eq!(cursor.queue().size(), 1);
    }
}
