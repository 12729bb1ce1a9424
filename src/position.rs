/// Front / rear bookkeeping for a ring of `capacity` slots.
///
/// Emptiness and fullness come from `count`. `front == rear` holds both
/// for an empty and a full ring, so the indices alone can't tell them apart.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Position {
    capacity: usize,
    count: usize,
    front: usize,
    rear: usize,
}

impl Position {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            count: 0,
            front: 0,
            rear: 0,
        }
    }

    /// `count` items laid out from physical slot zero
    pub(crate) fn compact(capacity: usize, count: usize) -> Self {
        debug_assert!(count <= capacity);
        let rear = if count == capacity { 0 } else { count };
        Self {
            capacity,
            count,
            front: 0,
            rear,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn front(&self) -> usize {
        self.front
    }

    pub(crate) fn rear(&self) -> usize {
        self.rear
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub(crate) fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    /// Physical index of the logical `slot`, counted from the front.
    /// `slot` has to be below the capacity.
    pub(crate) fn physical(&self, slot: usize) -> usize {
        debug_assert!(slot < self.capacity);
        // Written so `front + slot` never has to be computed, it could overflow
        let to_end = self.capacity - self.front;
        if slot < to_end {
            self.front + slot
        } else {
            slot - to_end
        }
    }

    /// Claim the slot at the rear and return its physical index.
    /// The ring must not be full.
    pub(crate) fn push_back(&mut self) -> usize {
        debug_assert!(!self.is_full());
        let index = self.rear;
        self.rear = self.next(self.rear);
        self.count += 1;
        index
    }

    /// Claim the slot before the front and return its physical index.
    /// The ring must not be full.
    pub(crate) fn push_front(&mut self) -> usize {
        debug_assert!(!self.is_full());
        self.front = self.prev(self.front);
        self.count += 1;
        self.front
    }

    /// Give up the front slot and return its physical index.
    /// The ring must not be empty.
    pub(crate) fn pop_front(&mut self) -> usize {
        debug_assert!(!self.is_empty());
        let index = self.front;
        self.front = self.next(self.front);
        self.count -= 1;
        index
    }

    /// Give up the rear-most occupied slot and return its physical index.
    /// The ring must not be empty.
    pub(crate) fn pop_back(&mut self) -> usize {
        debug_assert!(!self.is_empty());
        self.rear = self.prev(self.rear);
        self.count -= 1;
        self.rear
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::new(self.capacity);
    }

    fn next(&self, index: usize) -> usize {
        if index + 1 == self.capacity {
            0
        } else {
            index + 1
        }
    }

    fn prev(&self, index: usize) -> usize {
        if index == 0 {
            self.capacity - 1
        } else {
            index - 1
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn push_back_wraps() {
        let mut pos = Position::new(3);
        assert_eq!(pos.push_back(), 0);
        assert_eq!(pos.push_back(), 1);
        assert_eq!(pos.push_back(), 2);
        assert!(pos.is_full());
        assert_eq!(pos.rear(), 0);
        assert_eq!(pos.front(), pos.rear());
    }

    #[test]
    fn push_front_wraps() {
        let mut pos = Position::new(4);
        assert_eq!(pos.push_front(), 3);
        assert_eq!(pos.push_front(), 2);
        assert_eq!(pos.count(), 2);
        assert_eq!(pos.physical(0), 2);
        assert_eq!(pos.physical(1), 3);
    }

    #[test]
    fn empty_and_full_share_indices() {
        let mut pos = Position::new(2);
        assert!(pos.is_empty());
        assert_eq!(pos.front(), pos.rear());

        pos.push_back();
        pos.push_back();
        assert!(pos.is_full());
        assert!(!pos.is_empty());
        assert_eq!(pos.front(), pos.rear());
    }

    #[test]
    fn pop_back_mirrors_push_back() {
        let mut pos = Position::new(3);
        let a = pos.push_back();
        let b = pos.push_back();
        assert_eq!(pos.pop_back(), b);
        assert_eq!(pos.pop_back(), a);
        assert!(pos.is_empty());
    }

    #[test]
    fn physical_wraps_around() {
        let mut pos = Position::new(4);
        for _ in 0..3 {
            pos.push_back();
        }
        pos.pop_front();
        pos.pop_front();
        pos.push_back();
        pos.push_back();

        // front at 2, items in 2, 3, 0, 1
        assert_eq!(pos.front(), 2);
        assert_eq!(pos.physical(0), 2);
        assert_eq!(pos.physical(1), 3);
        assert_eq!(pos.physical(2), 0);
        assert_eq!(pos.physical(3), 1);
    }

    #[test]
    fn physical_does_not_overflow() {
        let mut pos = Position::new(usize::MAX);
        pos.push_front();
        assert_eq!(pos.front(), usize::MAX - 1);
        assert_eq!(pos.physical(1), 0);
        assert_eq!(pos.physical(usize::MAX - 1), usize::MAX - 2);
    }

    #[test]
    fn compact() {
        let pos = Position::compact(3, 3);
        assert_eq!((pos.front(), pos.rear()), (0, 0));
        assert!(pos.is_full());

        let pos = Position::compact(3, 1);
        assert_eq!((pos.front(), pos.rear()), (0, 1));
    }

    #[test]
    fn zero_capacity_is_empty_and_full() {
        let pos = Position::new(0);
        assert!(pos.is_empty());
        assert!(pos.is_full());
    }
}
