use std::iter::FusedIterator;

use crate::alloc::Strategy;
use crate::position::Position;
use crate::queue::RingQueue;

/// Front to rear iterator over the items of a [`RingQueue`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    slots: &'a [T],
    pos: Position,
    // Logical offsets still to be yielded: head..tail
    head: usize,
    tail: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(slots: &'a [T], pos: Position) -> Self {
        Self {
            slots,
            pos,
            head: 0,
            tail: pos.count(),
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            pos: self.pos,
            head: self.head,
            tail: self.tail,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }
        let item = &self.slots[self.pos.physical(self.head)];
        self.head += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.tail - self.head;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        Some(&self.slots[self.pos.physical(self.tail)])
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Removes items front to rear, see [`RingQueue::drain`].
#[derive(Debug)]
pub struct Drain<'a, T: Default, A: Strategy<T>> {
    queue: &'a mut RingQueue<T, A>,
}

impl<'a, T: Default, A: Strategy<T>> Drain<'a, T, A> {
    pub(crate) fn new(queue: &'a mut RingQueue<T, A>) -> Self {
        Self { queue }
    }
}

impl<T: Default, A: Strategy<T>> Iterator for Drain<'_, T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.dequeue_head().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.size();
        (len, Some(len))
    }
}

impl<T: Default, A: Strategy<T>> DoubleEndedIterator for Drain<'_, T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.queue.dequeue_tail().ok()
    }
}

impl<T: Default, A: Strategy<T>> ExactSizeIterator for Drain<'_, T, A> {}

impl<T: Default, A: Strategy<T>> Drop for Drain<'_, T, A> {
    fn drop(&mut self) {
        while self.queue.dequeue_head().is_ok() {}
    }
}
